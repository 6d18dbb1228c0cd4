//! Bit-depth remapping for channel samples.
//!
//! Samples live in `u16` containers with only the low N bits meaningful for
//! an N-bit depth. Widening replicates the sample's own high bits into the
//! newly opened low bits, so `narrow(widen(v))` returns `v` for every
//! in-range value. Narrowing truncates.
//!
//! ```rust
//! use pixdepth::depth::{self, BitDepth};
//!
//! assert_eq!(depth::rgba_8to10(&[0, 1, 255]), [0, 4, 1023]);
//! assert_eq!(depth::widen(255, BitDepth::Eight, BitDepth::Sixteen), 65535);
//! assert_eq!(depth::narrow(1023, BitDepth::Ten, BitDepth::Eight), 255);
//! ```
//!
//! No input validation is performed: a sample wider than its declared depth
//! is shifted like any other value, and bits pushed past bit 15 are dropped.

// Architecture: #[rite] row functions contain the SIMD loops.
// #[arcane] wrappers are the incant! dispatch targets.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use archmage::incant;

use crate::ConvertError;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;


// ===========================================================================
// Depths
// ===========================================================================

/// Number of meaningful bits in one channel sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BitDepth {
    Eight = 8,
    Ten = 10,
    Twelve = 12,
    Sixteen = 16,
}

impl BitDepth {
    /// Every supported depth, narrowest first.
    pub const ALL: [BitDepth; 4] = [Self::Eight, Self::Ten, Self::Twelve, Self::Sixteen];

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Largest sample value representable at this depth.
    #[inline]
    pub const fn max_value(self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = ConvertError;

    fn try_from(bits: u32) -> Result<Self, ConvertError> {
        match bits {
            8 => Ok(Self::Eight),
            10 => Ok(Self::Ten),
            12 => Ok(Self::Twelve),
            16 => Ok(Self::Sixteen),
            _ => Err(ConvertError::UnsupportedDepth),
        }
    }
}

// ===========================================================================
// Utility
// ===========================================================================

/// `(left, right)` shifts for widening. Every supported pair has `to <= 2 * from`,
/// so the right shift `2 * from - to` never goes negative.
#[inline(always)]
const fn widen_shifts(from: BitDepth, to: BitDepth) -> (u32, u32) {
    let shl = to.bits() - from.bits();
    (shl, from.bits() - shl)
}

#[inline(always)]
const fn widen_u16(v: u16, shl: u32, shr: u32) -> u16 {
    (v << shl) | (v >> shr)
}

#[inline(always)]
const fn narrow_u16(v: u16, shr: u32) -> u16 {
    v >> shr
}

// ===========================================================================
// Single samples
// ===========================================================================

/// Widen one sample by bit replication: `(v << (T−S)) | (v >> (2S−T))`.
///
/// Doubling the width (8 → 16) copies the value into both halves. Returns
/// `value` unchanged when `to` is not wider than `from`.
#[inline]
pub const fn widen(value: u16, from: BitDepth, to: BitDepth) -> u16 {
    if to.bits() <= from.bits() {
        return value;
    }
    let (shl, shr) = widen_shifts(from, to);
    widen_u16(value, shl, shr)
}

/// Narrow one sample by dropping its low `S−T` bits.
///
/// Returns `value` unchanged when `to` is not narrower than `from`.
#[inline]
pub const fn narrow(value: u16, from: BitDepth, to: BitDepth) -> u16 {
    if from.bits() <= to.bits() {
        return value;
    }
    narrow_u16(value, from.bits() - to.bits())
}

/// Widen or narrow one sample, whichever direction `from → to` needs.
#[inline]
pub const fn remap_sample(value: u16, from: BitDepth, to: BitDepth) -> u16 {
    if from.bits() < to.bits() {
        widen(value, from, to)
    } else {
        narrow(value, from, to)
    }
}

// ===========================================================================
// Slices — SIMD dispatched
// ===========================================================================

fn remap_slice(src: &[u16], dst: &mut [u16], from: BitDepth, to: BitDepth) {
    match from.cmp(&to) {
        Ordering::Less => {
            let (shl, shr) = widen_shifts(from, to);
            incant!(widen_impl(src, dst, shl, shr), [v3, neon, wasm128, scalar]);
        }
        Ordering::Greater => {
            let shr = from.bits() - to.bits();
            incant!(narrow_impl(src, dst, shr), [v3, neon, wasm128, scalar]);
        }
        Ordering::Equal => dst.copy_from_slice(src),
    }
}

/// Remap every sample of `src` into the front of `dst`.
///
/// `dst` must hold at least `src.len()` samples; any extra tail is left
/// untouched. An empty `src` is fine and writes nothing.
pub fn remap_into(
    src: &[u16],
    dst: &mut [u16],
    from: BitDepth,
    to: BitDepth,
) -> Result<(), ConvertError> {
    if dst.len() < src.len() {
        return Err(ConvertError::PixelCountMismatch);
    }
    remap_slice(src, &mut dst[..src.len()], from, to);
    Ok(())
}

/// Remap every sample of `src` into a new vector of the same length.
pub fn remap(src: &[u16], from: BitDepth, to: BitDepth) -> Vec<u16> {
    let mut dst = vec![0u16; src.len()];
    remap_slice(src, &mut dst, from, to);
    dst
}

// ===========================================================================
// Fixed-pair conversions over 16-bit containers
// ===========================================================================

macro_rules! remap_fns {
    ($($(#[$doc:meta])* $name:ident: $from:ident => $to:ident;)*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(src: &[u16]) -> Vec<u16> {
                remap(src, BitDepth::$from, BitDepth::$to)
            }
        )*
    };
}

remap_fns! {
    /// 8 → 10 bits: `(v << 2) | (v >> 6)`.
    rgba_8to10: Eight => Ten;
    /// 8 → 12 bits: `(v << 4) | (v >> 4)`.
    rgba_8to12: Eight => Twelve;
    /// 8 → 16 bits: `(v << 8) | v`.
    rgba_8to16: Eight => Sixteen;
    /// 10 → 12 bits: `(v << 2) | (v >> 8)`.
    rgba_10to12: Ten => Twelve;
    /// 10 → 16 bits: `(v << 6) | (v >> 4)`.
    rgba_10to16: Ten => Sixteen;
    /// 12 → 16 bits: `(v << 4) | (v >> 8)`.
    rgba_12to16: Twelve => Sixteen;
    /// 10 → 8 bits: `v >> 2`.
    rgba_10to8: Ten => Eight;
    /// 12 → 8 bits: `v >> 4`.
    rgba_12to8: Twelve => Eight;
    /// 16 → 8 bits: `v >> 8`.
    rgba_16to8: Sixteen => Eight;
    /// 12 → 10 bits: `v >> 2`.
    rgba_12to10: Twelve => Ten;
    /// 16 → 10 bits: `v >> 6`.
    rgba_16to10: Sixteen => Ten;
    /// 16 → 12 bits: `v >> 4`.
    rgba_16to12: Sixteen => Twelve;
}

// ===========================================================================
// Scalar-only operations — byte-sized 8-bit samples
// ===========================================================================

fn widen_bytes(src: &[u8], to: BitDepth) -> Vec<u16> {
    let (shl, shr) = widen_shifts(BitDepth::Eight, to);
    src.iter().map(|&v| widen_u16(u16::from(v), shl, shr)).collect()
}

fn narrow_to_bytes(src: &[u16], from: BitDepth) -> Vec<u8> {
    let shr = from.bits() - BitDepth::Eight.bits();
    src.iter().map(|&v| narrow_u16(v, shr) as u8).collect()
}

/// 8-bit samples stored one per byte → 10 bits in `u16` containers.
pub fn bytes_8to10(src: &[u8]) -> Vec<u16> {
    widen_bytes(src, BitDepth::Ten)
}

/// 8-bit samples stored one per byte → 12 bits in `u16` containers.
pub fn bytes_8to12(src: &[u8]) -> Vec<u16> {
    widen_bytes(src, BitDepth::Twelve)
}

/// 8-bit samples stored one per byte → 16 bits, `(v << 8) | v`.
pub fn bytes_8to16(src: &[u8]) -> Vec<u16> {
    widen_bytes(src, BitDepth::Sixteen)
}

/// 10 → 8 bits, one output byte per sample.
pub fn rgba_10to8_bytes(src: &[u16]) -> Vec<u8> {
    narrow_to_bytes(src, BitDepth::Ten)
}

/// 12 → 8 bits, one output byte per sample.
pub fn rgba_12to8_bytes(src: &[u16]) -> Vec<u8> {
    narrow_to_bytes(src, BitDepth::Twelve)
}

/// 16 → 8 bits, one output byte per sample (the high byte).
pub fn rgba_16to8_bytes(src: &[u16]) -> Vec<u8> {
    narrow_to_bytes(src, BitDepth::Sixteen)
}
