// ---------------------------------------------------------------------------
// Whole-buffer storage types: packed RGBA64 and single-channel gray.
//
// `pixels.len() == width * height` is the caller's convention; constructors
// never check it, so buffers can be filled incrementally with `push`.
// ---------------------------------------------------------------------------

use alloc::vec::Vec;

use crate::ConvertError;
use crate::depth::{self, BitDepth};
use crate::pixel::{Rgba64, pack_samples, unpack_samples};

// Rec. 601 luma weights.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Luminosity of one pixel: `round(0.299 R + 0.587 G + 0.114 B)`, alpha ignored.
///
/// The weighted sum is taken in `f64` and rounded half away from zero, so a
/// tie the sum can't represent exactly rounds the way its `f64` value does.
#[inline]
fn luminosity(px: Rgba64) -> u16 {
    let sum = LUMA_R * f64::from(px.red())
        + LUMA_G * f64::from(px.green())
        + LUMA_B * f64::from(px.blue());
    // sum >= 0, so truncating and checking the fraction is `f64::round`.
    let whole = sum as u16;
    if sum - f64::from(whole) >= 0.5 {
        whole.saturating_add(1)
    } else {
        whole
    }
}

/// RGBA image stored as one packed [`Rgba64`] per pixel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgba64Image {
    pub pixels: Vec<Rgba64>,
    pub width: usize,
    pub height: usize,
}

impl Rgba64Image {
    /// An image with the given dimensions and no pixels yet.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Vec::new(),
            width,
            height,
        }
    }

    /// Append one pixel.
    #[inline]
    pub fn push(&mut self, pixel: Rgba64) {
        self.pixels.push(pixel);
    }

    /// Build from 8-bit RGBA samples (`R,G,B,A,R,G,B,A,...`).
    ///
    /// Each byte is widened to 16 bits by replication (`(v << 8) | v`) before
    /// packing, so [`to_rgba32`](Self::to_rgba32) gives the bytes back exactly.
    /// Fails with [`ConvertError::NotPixelAligned`] if `rgba32.len()` isn't a
    /// multiple of 4.
    pub fn from_rgba32(width: usize, height: usize, rgba32: &[u8]) -> Result<Self, ConvertError> {
        if !rgba32.len().is_multiple_of(4) {
            return Err(ConvertError::NotPixelAligned);
        }
        let widen = |v: u8| depth::widen(u16::from(v), BitDepth::Eight, BitDepth::Sixteen);
        let pixels = rgba32
            .chunks_exact(4)
            .map(|s| Rgba64::new(widen(s[0]), widen(s[1]), widen(s[2]), widen(s[3])))
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build from interleaved 16-bit samples (`R,G,B,A,...`), stored as given.
    pub fn from_samples(width: usize, height: usize, samples: &[u16]) -> Result<Self, ConvertError> {
        Ok(Self {
            pixels: pack_samples(samples)?,
            width,
            height,
        })
    }

    /// Gray → RGBA with R=G=B=gray and alpha=0xFFFF.
    pub fn from_gray16(gray: &Gray16Image) -> Self {
        Self {
            pixels: gray.pixels.iter().map(|&v| Rgba64::opaque_gray(v)).collect(),
            width: gray.width,
            height: gray.height,
        }
    }

    /// Decode the packed format from little-endian bytes, 8 per pixel.
    ///
    /// Fails with [`ConvertError::NotPixelAligned`] if `bytes.len()` isn't a
    /// multiple of 8.
    pub fn from_le_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ConvertError> {
        if !bytes.len().is_multiple_of(8) {
            return Err(ConvertError::NotPixelAligned);
        }
        let pixels = bytes
            .chunks_exact(8)
            .map(|b| {
                let arr: [u8; 8] = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
                Rgba64(u64::from_le_bytes(arr))
            })
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// 8-bit RGBA samples in `R,G,B,A,...` order, keeping the high byte of
    /// each channel.
    pub fn to_rgba32(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend(px.into_array().map(|c| (c >> 8) as u8));
        }
        out
    }

    /// Interleaved 16-bit samples in `R,G,B,A,...` order.
    pub fn to_samples(&self) -> Vec<u16> {
        unpack_samples(&self.pixels)
    }

    /// Encode the packed format as little-endian bytes, 8 per pixel.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.to_bits().to_le_bytes())
            .collect()
    }

    /// Luminosity grayscale; see [`Gray16Image::from_rgba64`].
    pub fn to_gray16(&self) -> Gray16Image {
        Gray16Image::from_rgba64(self)
    }

    /// Number of stored pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Single-channel image, one 16-bit sample per pixel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gray16Image {
    pub pixels: Vec<u16>,
    pub width: usize,
    pub height: usize,
}

impl Gray16Image {
    /// An image with the given dimensions and no pixels yet.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Vec::new(),
            width,
            height,
        }
    }

    #[inline]
    pub fn push(&mut self, value: u16) {
        self.pixels.push(value);
    }

    /// RGBA → gray by luminosity, `round(0.299 R + 0.587 G + 0.114 B)`.
    ///
    /// Alpha is dropped. There is no inverse.
    pub fn from_rgba64(rgba: &Rgba64Image) -> Self {
        Self {
            pixels: rgba.pixels.iter().map(|&px| luminosity(px)).collect(),
            width: rgba.width,
            height: rgba.height,
        }
    }

    /// Expand to RGBA; see [`Rgba64Image::from_gray16`].
    pub fn to_rgba64(&self) -> Rgba64Image {
        Rgba64Image::from_gray16(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn make_rgba32(n_pixels: usize) -> Vec<u8> {
        (0..n_pixels * 4).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_from_rgba32_widens_by_replication() {
        let img = Rgba64Image::from_rgba32(1, 1, &[0, 1, 128, 255]).unwrap();
        assert_eq!(img.pixels, [Rgba64::new(0, 257, 0x8080, 65535)]);
        assert_eq!((img.width, img.height), (1, 1));
    }

    #[test]
    fn test_rgba32_round_trip() {
        for n in [0, 1, 2, 7, 64, 100] {
            let bytes = make_rgba32(n);
            let img = Rgba64Image::from_rgba32(n, 1, &bytes).unwrap();
            assert_eq!(img.len(), n);
            assert_eq!(img.to_rgba32(), bytes, "n={n}");
        }
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(Rgba64Image::from_rgba32(64, 1, &all).unwrap().to_rgba32(), all);
    }

    #[test]
    fn test_from_rgba32_rejects_partial_pixel() {
        assert_eq!(
            Rgba64Image::from_rgba32(1, 1, &[1, 2, 3, 4, 5]),
            Err(ConvertError::NotPixelAligned)
        );
        assert_eq!(
            Rgba64Image::from_rgba32(1, 1, &[1, 2, 3]),
            Err(ConvertError::NotPixelAligned)
        );
    }

    #[test]
    fn test_dimensions_not_enforced() {
        // 2x2 declared, one pixel supplied: allowed, caller's responsibility.
        let img = Rgba64Image::from_rgba32(2, 2, &[9, 9, 9, 9]).unwrap();
        assert_eq!(img.len(), 1);
        assert_eq!((img.width, img.height), (2, 2));
    }

    #[test]
    fn test_to_rgba32_keeps_high_byte() {
        let img = Rgba64Image {
            pixels: vec![Rgba64::new(0x12FF, 0x3400, 0xFF01, 0x00FF)],
            width: 1,
            height: 1,
        };
        assert_eq!(img.to_rgba32(), [0x12, 0x34, 0xFF, 0x00]);
    }

    #[test]
    fn test_incremental_fill() {
        let mut img = Rgba64Image::new(2, 1);
        assert!(img.is_empty());
        img.push(Rgba64::new(1, 2, 3, 4));
        img.push(Rgba64::new(5, 6, 7, 8));
        assert_eq!(img.to_samples(), [1, 2, 3, 4, 5, 6, 7, 8]);

        let mut gray = Gray16Image::new(3, 1);
        gray.push(10);
        assert_eq!(gray.len(), 1);
    }

    #[test]
    fn test_from_samples() {
        let img = Rgba64Image::from_samples(1, 1, &[1023, 0, 512, 1023]).unwrap();
        assert_eq!(img.pixels[0].into_array(), [1023, 0, 512, 1023]);
        assert_eq!(
            Rgba64Image::from_samples(1, 1, &[1, 2]),
            Err(ConvertError::NotPixelAligned)
        );
    }

    #[test]
    fn test_le_bytes_layout_and_round_trip() {
        let img = Rgba64Image {
            pixels: vec![Rgba64::new(0x0201, 0x0403, 0x0605, 0x0807)],
            width: 1,
            height: 1,
        };
        let bytes = img.to_le_bytes();
        assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(Rgba64Image::from_le_bytes(1, 1, &bytes).unwrap(), img);
        assert_eq!(
            Rgba64Image::from_le_bytes(1, 1, &bytes[..7]),
            Err(ConvertError::NotPixelAligned)
        );
    }

    #[test]
    fn test_gray_expands_opaque() {
        let gray = Gray16Image {
            pixels: vec![0, 1000, 65535],
            width: 3,
            height: 1,
        };
        let rgba = Rgba64Image::from_gray16(&gray);
        assert_eq!((rgba.width, rgba.height), (3, 1));
        assert_eq!(rgba.pixels[1].into_array(), [1000, 1000, 1000, 0xFFFF]);
        assert_eq!(rgba.pixels[2].into_array(), [65535, 65535, 65535, 0xFFFF]);
        assert_eq!(gray.to_rgba64(), rgba);
    }

    #[test]
    fn test_luminosity() {
        let rgba = Rgba64Image {
            pixels: vec![
                Rgba64::new(155, 38, 182, 204),
                Rgba64::new(65535, 65535, 65535, 0),
                Rgba64::new(0, 0, 0, 65535),
                Rgba64::new(1000, 0, 0, 0),
                Rgba64::new(0, 1000, 0, 0),
                Rgba64::new(0, 0, 1000, 0),
                // 0.299 * 3 + 0.587 * 1 = 1.484 -> 1
                Rgba64::new(3, 1, 0, 0),
                // 0.299 * 5 + 0.114 * 1 = 1.609 -> 2
                Rgba64::new(5, 0, 1, 0),
            ],
            width: 8,
            height: 1,
        };
        let gray = rgba.to_gray16();
        assert_eq!(gray.pixels, [89, 65535, 0, 299, 587, 114, 1, 2]);
        assert_eq!((gray.width, gray.height), (8, 1));
    }

    #[test]
    fn test_luminosity_rounds_float_sum() {
        let cases = [
            // 7.5 is exact in f64, rounds away from zero
            ((0, 12, 4), 8),
            ((2, 14, 6), 10),
            // 22.5 sums to 22.499999999999996 in f64
            ((0, 36, 12), 22),
            ((1, 37, 13), 23),
            ((3, 39, 15), 25),
            // 0.456 and 0.570
            ((0, 0, 4), 0),
            ((0, 0, 5), 1),
            ((1, 0, 0), 0),
            ((2, 0, 0), 1),
        ];
        for ((r, g, b), expected) in cases {
            let px = Rgba64::new(r, g, b, 0xFFFF);
            assert_eq!(luminosity(px), expected, "({r}, {g}, {b})");
        }
    }

    #[test]
    fn test_gray_round_trip_is_stable() {
        // Gray -> RGBA -> gray reproduces the samples since the weights sum to 1.
        let gray = Gray16Image {
            pixels: (0..=65535u32).step_by(97).map(|v| v as u16).collect(),
            width: 0,
            height: 0,
        };
        assert_eq!(gray.to_rgba64().to_gray16(), gray);
    }

    #[test]
    fn test_empty_buffers() {
        let img = Rgba64Image::from_rgba32(0, 0, &[]).unwrap();
        assert!(img.is_empty());
        assert!(img.to_rgba32().is_empty());
        assert!(img.to_gray16().is_empty());
        assert!(Rgba64Image::from_gray16(&Gray16Image::new(0, 0)).is_empty());
    }
}
