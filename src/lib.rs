//! # pixdepth
//!
//! Bit-depth remapping for RGBA channel samples and a packed 64-bit RGBA
//! storage format.
//!
//! ## Core operations (always available)
//!
//! - [`depth`] — widen (bit replication, lossless) and narrow (truncation,
//!   lossy) samples between 8, 10, 12 and 16 bits per channel. Slice kernels
//!   are SIMD-accelerated on x86-64 AVX2, ARM NEON and WASM SIMD128, with
//!   automatic fallback to scalar code.
//! - [`Rgba64`] — one pixel packed into a `u64`, 16 bits per channel,
//!   red in the low lane and alpha in the high lane.
//! - [`Rgba64Image`] / [`Gray16Image`] — pixel buffers with width and height,
//!   including RGBA32 import/export and luminosity grayscale.
//!
//! ## Feature flags
//!
//! - **`rgb`** — Conversions on [`rgb`] crate pixel types (`Rgba<u16>`,
//!   `Rgba<u8>`, `Gray<u16>`) via bytemuck.
//! - **`imgref`** — Whole-image conversions using [`imgref`] types
//!   (`ImgRef`, `ImgVec`). Implies `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

use core::fmt;

pub mod depth;
mod image;
mod pixel;

pub use depth::BitDepth;
pub use image::{Gray16Image, Rgba64Image};
pub use pixel::*;

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod img;

/// Returned when a buffer's shape doesn't fit the requested conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    /// Input length is not a multiple of the samples (or bytes) per pixel.
    NotPixelAligned,
    /// Destination is smaller than the source, or image dimensions disagree.
    PixelCountMismatch,
    /// A bit width other than 8, 10, 12 or 16 was requested.
    UnsupportedDepth,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPixelAligned => f.write_str("buffer length is not a whole number of pixels"),
            Self::PixelCountMismatch => f.write_str("source and destination pixel counts differ"),
            Self::UnsupportedDepth => f.write_str("bit depth must be 8, 10, 12 or 16"),
        }
    }
}

impl core::error::Error for ConvertError {}
