//! Type-safe conversions using [`rgb`] crate pixel types via bytemuck.
//!
//! Bit-depth remapping on `Rgba<u16>` slices reinterprets them as flat
//! sample slices and runs the SIMD-dispatched kernels from
//! [`depth`](crate::depth). Packing to [`Rgba64`] goes channel by channel, so
//! the lane layout is the same on every target.
//!
//! ```rust
//! use rgb::Rgba;
//! use pixdepth::{BitDepth, typed_rgb};
//!
//! let ten_bit = vec![Rgba::new(1023u16, 512, 0, 1023); 4];
//! let wide: Vec<Rgba<u16>> = typed_rgb::remap_rgba(&ten_bit, BitDepth::Ten, BitDepth::Sixteen);
//! assert_eq!(wide[0], Rgba::new(65535, 32800, 0, 65535));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use rgb::{Gray, Rgba};

use crate::depth::{self, BitDepth};
use crate::{ConvertError, Rgba64};

// ---------------------------------------------------------------------------
// Rgba64 <-> Rgba<u16>
// ---------------------------------------------------------------------------

impl From<Rgba64> for Rgba<u16> {
    #[inline]
    fn from(px: Rgba64) -> Self {
        Rgba::new(px.red(), px.green(), px.blue(), px.alpha())
    }
}

impl From<Rgba<u16>> for Rgba64 {
    #[inline]
    fn from(px: Rgba<u16>) -> Self {
        Rgba64::new(px.r, px.g, px.b, px.a)
    }
}

// ---------------------------------------------------------------------------
// Bit-depth remapping on typed pixels
// ---------------------------------------------------------------------------

/// Copy `&[Rgba<u16>]` into `&mut [Rgba<u16>]`, remapping every channel
/// (alpha included) from `from` to `to` bits.
pub fn remap_rgba_buf(
    src: &[Rgba<u16>],
    dst: &mut [Rgba<u16>],
    from: BitDepth,
    to: BitDepth,
) -> Result<(), ConvertError> {
    let src_samples: &[u16] = bytemuck::cast_slice(src);
    let dst_samples: &mut [u16] = bytemuck::cast_slice_mut(dst);
    depth::remap_into(src_samples, dst_samples, from, to)
}

/// Remap every channel of `src` into a new vector.
pub fn remap_rgba(src: &[Rgba<u16>], from: BitDepth, to: BitDepth) -> Vec<Rgba<u16>> {
    let mut dst = vec![Rgba::new(0u16, 0, 0, 0); src.len()];
    let dst_samples: &mut [u16] = bytemuck::cast_slice_mut(&mut dst);
    depth::remap_into(bytemuck::cast_slice(src), dst_samples, from, to)
        .expect("destination sized to source");
    dst
}

/// Copy `&[Gray<u16>]` into `&mut [Gray<u16>]`, remapping from `from` to `to` bits.
pub fn remap_gray_buf(
    src: &[Gray<u16>],
    dst: &mut [Gray<u16>],
    from: BitDepth,
    to: BitDepth,
) -> Result<(), ConvertError> {
    let src_samples: &[u16] = bytemuck::cast_slice(src);
    let dst_samples: &mut [u16] = bytemuck::cast_slice_mut(dst);
    depth::remap_into(src_samples, dst_samples, from, to)
}

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

/// `&[Rgba<u8>]` → packed pixels, widening each channel to 16 bits by replication.
pub fn rgba8_to_rgba64(src: &[Rgba<u8>]) -> Vec<Rgba64> {
    let bytes: &[u8] = bytemuck::cast_slice(src);
    let wide = depth::bytes_8to16(bytes);
    wide.chunks_exact(4)
        .map(|s| Rgba64::new(s[0], s[1], s[2], s[3]))
        .collect()
}

/// Packed pixels → `Vec<Rgba<u8>>`, keeping the high byte of each channel.
pub fn rgba64_to_rgba8(src: &[Rgba64]) -> Vec<Rgba<u8>> {
    src.iter()
        .map(|px| {
            let [r, g, b, a] = px.into_array().map(|c| (c >> 8) as u8);
            Rgba::new(r, g, b, a)
        })
        .collect()
}

/// `&[Rgba<u16>]` → packed pixels, channels stored as given.
pub fn rgba16_to_rgba64(src: &[Rgba<u16>]) -> Vec<Rgba64> {
    src.iter().map(|&px| Rgba64::from(px)).collect()
}

/// Packed pixels → `Vec<Rgba<u16>>`.
pub fn rgba64_to_rgba16(src: &[Rgba64]) -> Vec<Rgba<u16>> {
    src.iter().map(|&px| Rgba::from(px)).collect()
}

/// `&[Gray<u16>]` → packed pixels with R=G=B=gray and alpha=0xFFFF.
pub fn gray16_to_rgba64(src: &[Gray<u16>]) -> Vec<Rgba64> {
    let samples: &[u16] = bytemuck::cast_slice(src);
    samples.iter().map(|&v| Rgba64::opaque_gray(v)).collect()
}
