use archmage::prelude::*;

use super::{narrow_u16, widen_u16};

// u16 lanes per 128-bit register
const LANES: usize = 8;

// ===========================================================================
// ARM NEON — rite row implementations
// ===========================================================================

// vshlq_u16 shifts left for positive counts and right for negative ones.
#[rite]
pub(super) fn widen_row_arm_v2(
    _token: Arm64V2Token,
    src: &[u16],
    dst: &mut [u16],
    shl: u32,
    shr: u32,
) {
    use core::arch::aarch64::{vdupq_n_s16, vorrq_u16, vshlq_u16};
    let left = vdupq_n_s16(shl as i16);
    let right = vdupq_n_s16(-(shr as i16));
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + LANES <= n {
        let s: &[u16; 8] = src[i..i + LANES].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u16(s);
        let out = vorrq_u16(vshlq_u16(v, left), vshlq_u16(v, right));
        let d: &mut [u16; 8] = (&mut dst[i..i + LANES]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u16(d, out);
        i += LANES;
    }
    for (s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = widen_u16(*s, shl, shr);
    }
}

#[rite]
pub(super) fn narrow_row_arm_v2(_token: Arm64V2Token, src: &[u16], dst: &mut [u16], shr: u32) {
    use core::arch::aarch64::{vdupq_n_s16, vshlq_u16};
    let right = vdupq_n_s16(-(shr as i16));
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + LANES <= n {
        let s: &[u16; 8] = src[i..i + LANES].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u16(s);
        let d: &mut [u16; 8] = (&mut dst[i..i + LANES]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u16(d, vshlq_u16(v, right));
        i += LANES;
    }
    for (s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = narrow_u16(*s, shr);
    }
}

// ===========================================================================
// ARM arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn widen_impl_arm_v2(t: Arm64V2Token, s: &[u16], d: &mut [u16], shl: u32, shr: u32) {
    widen_row_arm_v2(t, s, d, shl, shr);
}
#[arcane]
pub(super) fn narrow_impl_arm_v2(t: Arm64V2Token, s: &[u16], d: &mut [u16], shr: u32) {
    narrow_row_arm_v2(t, s, d, shr);
}
