// ---------------------------------------------------------------------------
// Packed 64-bit RGBA pixel.
//
// Lane layout (LSB-first bit numbering):
//
//   63        48 47        32 31        16 15         0
//  +------------+------------+------------+------------+
//  |   alpha    |    blue    |   green    |    red     |
//  +------------+------------+------------+------------+
//
// This layout is a binary contract; stored little-endian, red sits at the
// lowest byte address.
// ---------------------------------------------------------------------------

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};

use crate::ConvertError;

/// Pack four 16-bit channels into one `u64`: red in bits 0..16, alpha in 48..64.
#[inline]
pub const fn pack(red: u16, green: u16, blue: u16, alpha: u16) -> u64 {
    ((alpha as u64) << 48) + ((blue as u64) << 32) + ((green as u64) << 16) + red as u64
}

#[inline]
pub const fn unpack_red(pixel: u64) -> u16 {
    pixel as u16
}

#[inline]
pub const fn unpack_green(pixel: u64) -> u16 {
    (pixel >> 16) as u16
}

#[inline]
pub const fn unpack_blue(pixel: u64) -> u16 {
    (pixel >> 32) as u16
}

#[inline]
pub const fn unpack_alpha(pixel: u64) -> u16 {
    (pixel >> 48) as u16
}

/// One RGBA pixel at 16 bits per channel, packed into a `u64`.
///
/// A pure storage type: each lane holds whatever sample it was given, so
/// 8, 10 or 12-bit values stay at their own depth unless widened first with
/// [`depth`](crate::depth).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba64(pub u64);

impl Rgba64 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    #[inline]
    pub const fn new(red: u16, green: u16, blue: u16, alpha: u16) -> Self {
        Self(pack(red, green, blue, alpha))
    }

    /// Gray pixel with R=G=B=`value` and full (0xFFFF) alpha.
    #[inline]
    pub const fn opaque_gray(value: u16) -> Self {
        Self::new(value, value, value, u16::MAX)
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn red(self) -> u16 {
        unpack_red(self.0)
    }

    #[inline]
    pub const fn green(self) -> u16 {
        unpack_green(self.0)
    }

    #[inline]
    pub const fn blue(self) -> u16 {
        unpack_blue(self.0)
    }

    #[inline]
    pub const fn alpha(self) -> u16 {
        unpack_alpha(self.0)
    }

    /// Channels in R, G, B, A order.
    #[inline]
    pub const fn into_array(self) -> [u16; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl From<u64> for Rgba64 {
    #[inline]
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Rgba64> for u64 {
    #[inline]
    fn from(px: Rgba64) -> Self {
        px.0
    }
}

impl From<[u16; 4]> for Rgba64 {
    #[inline]
    fn from([r, g, b, a]: [u16; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba64> for [u16; 4] {
    #[inline]
    fn from(px: Rgba64) -> Self {
        px.into_array()
    }
}

// ===========================================================================
// Interleaved sample streams
// ===========================================================================

/// Pack an interleaved `R,G,B,A,R,G,B,A,...` sample stream, four samples per pixel.
///
/// Samples are stored as-is; widen them first if they aren't 16-bit.
/// Fails with [`ConvertError::NotPixelAligned`] when the length isn't a
/// multiple of 4. An empty stream packs to no pixels.
pub fn pack_samples(samples: &[u16]) -> Result<Vec<Rgba64>, ConvertError> {
    if !samples.len().is_multiple_of(4) {
        return Err(ConvertError::NotPixelAligned);
    }
    Ok(samples
        .chunks_exact(4)
        .map(|s| Rgba64::new(s[0], s[1], s[2], s[3]))
        .collect())
}

/// Unpack pixels back into an interleaved `R,G,B,A,...` sample stream.
pub fn unpack_samples(pixels: &[Rgba64]) -> Vec<u16> {
    pixels.iter().flat_map(|px| px.into_array()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_violet_round_trip() {
        // rgba(155, 38, 182, 0.8)
        let violet = Rgba64::new(155, 38, 182, (0.8f32 * 256.0) as u16);
        assert_eq!(violet.red(), 155);
        assert_eq!(violet.green(), 38);
        assert_eq!(violet.blue(), 182);
        assert_eq!(violet.alpha(), 204);
    }

    #[test]
    fn test_lane_layout() {
        let bits = pack(0x1111, 0x2222, 0x3333, 0x4444);
        assert_eq!(bits, 0x4444_3333_2222_1111);
        assert_eq!(unpack_red(bits), 0x1111);
        assert_eq!(unpack_green(bits), 0x2222);
        assert_eq!(unpack_blue(bits), 0x3333);
        assert_eq!(unpack_alpha(bits), 0x4444);
        // Little-endian storage puts red at the lowest address.
        assert_eq!(&bits.to_le_bytes()[..2], &[0x11, 0x11]);
        assert_eq!(&bits.to_le_bytes()[6..], &[0x44, 0x44]);
    }

    #[test]
    fn test_extremes_do_not_bleed() {
        let px = Rgba64::new(u16::MAX, 0, u16::MAX, 0);
        assert_eq!(px.into_array(), [u16::MAX, 0, u16::MAX, 0]);
        let px = Rgba64::new(0, u16::MAX, 0, u16::MAX);
        assert_eq!(px.into_array(), [0, u16::MAX, 0, u16::MAX]);
        assert_eq!(Rgba64::new(u16::MAX, u16::MAX, u16::MAX, u16::MAX).to_bits(), u64::MAX);
    }

    #[test]
    fn test_conversions() {
        let px = Rgba64::from([1, 2, 3, 4]);
        assert_eq!(u64::from(px), pack(1, 2, 3, 4));
        assert_eq!(<[u16; 4]>::from(px), [1, 2, 3, 4]);
        assert_eq!(Rgba64::from(px.to_bits()), px);
        assert_eq!(Rgba64::opaque_gray(7).into_array(), [7, 7, 7, 0xFFFF]);
        assert_eq!(Rgba64::default(), Rgba64::TRANSPARENT);
    }

    #[test]
    fn test_pack_samples() {
        let samples = vec![1u16, 2, 3, 4, 500, 600, 700, 800];
        let pixels = pack_samples(&samples).unwrap();
        assert_eq!(pixels, [Rgba64::new(1, 2, 3, 4), Rgba64::new(500, 600, 700, 800)]);
        assert_eq!(unpack_samples(&pixels), samples);
        assert!(pack_samples(&[]).unwrap().is_empty());
        assert_eq!(pack_samples(&[1, 2, 3]), Err(ConvertError::NotPixelAligned));
    }
}
