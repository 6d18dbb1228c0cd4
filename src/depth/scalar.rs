use archmage::prelude::*;

use super::{narrow_u16, widen_u16};

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn widen_row_scalar(
    _token: ScalarToken,
    src: &[u16],
    dst: &mut [u16],
    shl: u32,
    shr: u32,
) {
    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = widen_u16(*s, shl, shr);
    }
}

pub(super) fn narrow_row_scalar(_token: ScalarToken, src: &[u16], dst: &mut [u16], shr: u32) {
    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = narrow_u16(*s, shr);
    }
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn widen_impl_scalar(t: ScalarToken, s: &[u16], d: &mut [u16], shl: u32, shr: u32) {
    widen_row_scalar(t, s, d, shl, shr);
}
pub(super) fn narrow_impl_scalar(t: ScalarToken, s: &[u16], d: &mut [u16], shr: u32) {
    narrow_row_scalar(t, s, d, shr);
}
