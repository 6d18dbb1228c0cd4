use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::{narrow_u16, widen_u16};

// u16 lanes per 256-bit register
const LANES: usize = 16;

// ===========================================================================
// x86-64 AVX2 — rite row implementations
// ===========================================================================

// Shift counts come from a register (sll/srl), so one kernel serves every
// depth pair. Bits shifted past a lane's top are dropped, same as `u16 << n`.
#[rite]
pub(super) fn widen_row_v3(_token: X64V3Token, src: &[u16], dst: &mut [u16], shl: u32, shr: u32) {
    let left = _mm_cvtsi32_si128(shl as i32);
    let right = _mm_cvtsi32_si128(shr as i32);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + LANES <= n {
        let s: &[u8; 32] = bytemuck::cast_slice::<u16, u8>(&src[i..i + LANES])
            .try_into()
            .unwrap();
        let v = _mm256_loadu_si256(s);
        let out = _mm256_or_si256(_mm256_sll_epi16(v, left), _mm256_srl_epi16(v, right));
        let d: &mut [u8; 32] = bytemuck::cast_slice_mut::<u16, u8>(&mut dst[i..i + LANES])
            .try_into()
            .unwrap();
        _mm256_storeu_si256(d, out);
        i += LANES;
    }
    for (s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = widen_u16(*s, shl, shr);
    }
}

#[rite]
pub(super) fn narrow_row_v3(_token: X64V3Token, src: &[u16], dst: &mut [u16], shr: u32) {
    let right = _mm_cvtsi32_si128(shr as i32);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + LANES <= n {
        let s: &[u8; 32] = bytemuck::cast_slice::<u16, u8>(&src[i..i + LANES])
            .try_into()
            .unwrap();
        let v = _mm256_loadu_si256(s);
        let out = _mm256_srl_epi16(v, right);
        let d: &mut [u8; 32] = bytemuck::cast_slice_mut::<u16, u8>(&mut dst[i..i + LANES])
            .try_into()
            .unwrap();
        _mm256_storeu_si256(d, out);
        i += LANES;
    }
    for (s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = narrow_u16(*s, shr);
    }
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn widen_impl_v3(t: X64V3Token, s: &[u16], d: &mut [u16], shl: u32, shr: u32) {
    widen_row_v3(t, s, d, shl, shr);
}
#[arcane]
pub(super) fn narrow_impl_v3(t: X64V3Token, s: &[u16], d: &mut [u16], shr: u32) {
    narrow_row_v3(t, s, d, shr);
}
