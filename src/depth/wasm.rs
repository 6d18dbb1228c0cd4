use core::arch::wasm32::{u16x8_shl, u16x8_shr, v128_or};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::{narrow_u16, widen_u16};

// u16 lanes per 128-bit register
const LANES: usize = 8;

// ===========================================================================
// WASM SIMD128 — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn widen_row_wasm128(
    _token: Wasm128Token,
    src: &[u16],
    dst: &mut [u16],
    shl: u32,
    shr: u32,
) {
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + LANES <= n {
        let s: &[u8; 16] = bytemuck::cast_slice::<u16, u8>(&src[i..i + LANES])
            .try_into()
            .unwrap();
        let v = v128_load(s);
        let d: &mut [u8; 16] = bytemuck::cast_slice_mut::<u16, u8>(&mut dst[i..i + LANES])
            .try_into()
            .unwrap();
        v128_store(d, v128_or(u16x8_shl(v, shl), u16x8_shr(v, shr)));
        i += LANES;
    }
    for (s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = widen_u16(*s, shl, shr);
    }
}

#[rite]
pub(super) fn narrow_row_wasm128(_token: Wasm128Token, src: &[u16], dst: &mut [u16], shr: u32) {
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + LANES <= n {
        let s: &[u8; 16] = bytemuck::cast_slice::<u16, u8>(&src[i..i + LANES])
            .try_into()
            .unwrap();
        let v = v128_load(s);
        let d: &mut [u8; 16] = bytemuck::cast_slice_mut::<u16, u8>(&mut dst[i..i + LANES])
            .try_into()
            .unwrap();
        v128_store(d, u16x8_shr(v, shr));
        i += LANES;
    }
    for (s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = narrow_u16(*s, shr);
    }
}

// ===========================================================================
// WASM arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn widen_impl_wasm128(t: Wasm128Token, s: &[u16], d: &mut [u16], shl: u32, shr: u32) {
    widen_row_wasm128(t, s, d, shl, shr);
}
#[arcane]
pub(super) fn narrow_impl_wasm128(t: Wasm128Token, s: &[u16], d: &mut [u16], shr: u32) {
    narrow_row_wasm128(t, s, d, shr);
}
