//! Whole-image conversions using [`imgref`] types.
//!
//! Source images may be strided; padding between rows is never read.
//! Results are tightly packed (`stride == width`).
//!
//! ```rust
//! use rgb::Rgba;
//! use imgref::ImgVec;
//! use pixdepth::{BitDepth, img};
//!
//! let ten_bit = ImgVec::new(vec![Rgba::new(1023u16, 0, 512, 1023); 6], 3, 2);
//! let wide = img::remap_img(ten_bit.as_ref(), BitDepth::Ten, BitDepth::Sixteen);
//! let packed = img::rgba16_img_to_rgba64(wide.as_ref());
//! assert_eq!((packed.width, packed.height), (3, 2));
//! assert_eq!(packed.pixels[0].red(), 65535);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::{Gray, Rgba};

use crate::depth::{self, BitDepth};
use crate::{ConvertError, Gray16Image, Rgba64, Rgba64Image};

// ---------------------------------------------------------------------------
// Dimension check
// ---------------------------------------------------------------------------

fn check_dims(len: usize, width: usize, height: usize) -> Result<(), ConvertError> {
    match width.checked_mul(height) {
        Some(n) if n == len => Ok(()),
        _ => Err(ConvertError::PixelCountMismatch),
    }
}

// ---------------------------------------------------------------------------
// Bit-depth remapping
// ---------------------------------------------------------------------------

/// Remap every channel of an `ImgRef<Rgba<u16>>` from `from` to `to` bits.
pub fn remap_img(img: ImgRef<'_, Rgba<u16>>, from: BitDepth, to: BitDepth) -> ImgVec<Rgba<u16>> {
    let w = img.width();
    let h = img.height();
    let mut dst = ImgVec::new(vec![Rgba::new(0u16, 0, 0, 0); w * h], w, h);
    for (src_row, dst_row) in img.rows().zip(dst.rows_mut()) {
        let src_samples: &[u16] = bytemuck::cast_slice(src_row);
        let dst_samples: &mut [u16] = bytemuck::cast_slice_mut(dst_row);
        depth::remap_into(src_samples, dst_samples, from, to).expect("rows have equal width");
    }
    dst
}

/// Remap an `ImgRef<Gray<u16>>` from `from` to `to` bits.
pub fn remap_gray_img(img: ImgRef<'_, Gray<u16>>, from: BitDepth, to: BitDepth) -> ImgVec<Gray<u16>> {
    let w = img.width();
    let h = img.height();
    let mut dst = ImgVec::new(vec![Gray::new(0u16); w * h], w, h);
    for (src_row, dst_row) in img.rows().zip(dst.rows_mut()) {
        let src_samples: &[u16] = bytemuck::cast_slice(src_row);
        let dst_samples: &mut [u16] = bytemuck::cast_slice_mut(dst_row);
        depth::remap_into(src_samples, dst_samples, from, to).expect("rows have equal width");
    }
    dst
}

// ---------------------------------------------------------------------------
// Packed storage <-> imgref
// ---------------------------------------------------------------------------

/// Pack an `ImgRef<Rgba<u16>>` into an [`Rgba64Image`], channels stored as given.
pub fn rgba16_img_to_rgba64(img: ImgRef<'_, Rgba<u16>>) -> Rgba64Image {
    let mut out = Rgba64Image::new(img.width(), img.height());
    for row in img.rows() {
        out.pixels.extend(row.iter().map(|&px| Rgba64::from(px)));
    }
    out
}

/// Pack an `ImgRef<Rgba<u8>>`, widening each channel to 16 bits by replication.
pub fn rgba8_img_to_rgba64(img: ImgRef<'_, Rgba<u8>>) -> Rgba64Image {
    let mut out = Rgba64Image::new(img.width(), img.height());
    for row in img.rows() {
        out.pixels.extend(crate::typed_rgb::rgba8_to_rgba64(row));
    }
    out
}

/// Unpack an [`Rgba64Image`] into `ImgVec<Rgba<u16>>`.
///
/// Fails with [`ConvertError::PixelCountMismatch`] unless the image holds
/// exactly `width * height` pixels.
pub fn rgba64_to_img(image: &Rgba64Image) -> Result<ImgVec<Rgba<u16>>, ConvertError> {
    check_dims(image.pixels.len(), image.width, image.height)?;
    let buf: Vec<Rgba<u16>> = crate::typed_rgb::rgba64_to_rgba16(&image.pixels);
    Ok(ImgVec::new(buf, image.width, image.height))
}

/// Copy an `ImgRef<Gray<u16>>` into a [`Gray16Image`].
pub fn gray_img_to_gray16(img: ImgRef<'_, Gray<u16>>) -> Gray16Image {
    let mut out = Gray16Image::new(img.width(), img.height());
    for row in img.rows() {
        out.pixels.extend_from_slice(bytemuck::cast_slice(row));
    }
    out
}

/// Copy a [`Gray16Image`] into `ImgVec<Gray<u16>>`.
///
/// Fails with [`ConvertError::PixelCountMismatch`] unless the image holds
/// exactly `width * height` samples.
pub fn gray16_to_img(image: &Gray16Image) -> Result<ImgVec<Gray<u16>>, ConvertError> {
    gray16_into_img(image.clone())
}

/// Move a [`Gray16Image`] into `ImgVec<Gray<u16>>`, reusing its allocation.
///
/// Same checks as [`gray16_to_img`].
pub fn gray16_into_img(image: Gray16Image) -> Result<ImgVec<Gray<u16>>, ConvertError> {
    check_dims(image.pixels.len(), image.width, image.height)?;
    let buf: Vec<Gray<u16>> = bytemuck::allocation::cast_vec(image.pixels);
    Ok(ImgVec::new(buf, image.width, image.height))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_img() {
        let img = ImgVec::new(vec![Rgba::new(255u16, 1, 0, 255); 4], 2, 2);
        let wide = remap_img(img.as_ref(), BitDepth::Eight, BitDepth::Sixteen);
        assert_eq!((wide.width(), wide.height()), (2, 2));
        assert_eq!(wide.buf()[3], Rgba::new(65535, 257, 0, 65535));
    }

    #[test]
    fn test_remap_gray_img() {
        let img = ImgVec::new(vec![Gray::new(4095u16); 3], 3, 1);
        let narrow = remap_gray_img(img.as_ref(), BitDepth::Twelve, BitDepth::Ten);
        assert_eq!(narrow.buf()[0], Gray::new(1023));
    }

    #[test]
    fn test_strided_image() {
        // 2 pixels wide with stride 3; the padding column must be skipped.
        let pad = Rgba::new(9u16, 9, 9, 9);
        let buf = vec![
            Rgba::new(1u16, 2, 3, 4),
            Rgba::new(5, 6, 7, 8),
            pad,
            Rgba::new(10, 11, 12, 13),
            Rgba::new(14, 15, 16, 17),
            pad,
        ];
        let img = ImgVec::new_stride(buf, 2, 2, 3);
        let packed = rgba16_img_to_rgba64(img.as_ref());
        assert_eq!(packed.len(), 4);
        assert_eq!(packed.pixels[2], Rgba64::new(10, 11, 12, 13));

        let remapped = remap_img(img.as_ref(), BitDepth::Sixteen, BitDepth::Sixteen);
        assert_eq!(remapped.buf().len(), 4);
        assert_eq!(remapped.buf()[1], Rgba::new(5, 6, 7, 8));
    }

    #[test]
    fn test_rgba8_img_to_rgba64() {
        let img = ImgVec::new(vec![Rgba::new(255u8, 128, 0, 1); 2], 1, 2);
        let packed = rgba8_img_to_rgba64(img.as_ref());
        assert_eq!((packed.width, packed.height), (1, 2));
        assert_eq!(packed.to_rgba32(), [255, 128, 0, 1, 255, 128, 0, 1]);
    }

    #[test]
    fn test_rgba64_img_round_trip() {
        let image = Rgba64Image::from_samples(2, 1, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let img = rgba64_to_img(&image).unwrap();
        assert_eq!(img.buf()[1], Rgba::new(5, 6, 7, 8));
        assert_eq!(rgba16_img_to_rgba64(img.as_ref()), image);
    }

    #[test]
    fn test_gray_img_round_trip() {
        let mut gray = Gray16Image::new(2, 1);
        gray.push(100);
        gray.push(60000);
        let img = gray16_to_img(&gray).unwrap();
        assert_eq!(img.buf()[1], Gray::new(60000));
        assert_eq!(gray_img_to_gray16(img.as_ref()), gray);
    }

    #[test]
    fn test_gray16_into_img_keeps_samples() {
        let gray = Gray16Image {
            pixels: vec![0, 1, 4095, 65535, 300, 7],
            width: 3,
            height: 2,
        };
        let img = gray16_into_img(gray.clone()).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        let samples: &[u16] = bytemuck::cast_slice(&img.buf()[..]);
        assert_eq!(samples, &gray.pixels[..]);
        assert_eq!(
            gray16_into_img(Gray16Image::new(2, 2)).err(),
            Some(ConvertError::PixelCountMismatch)
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let image = Rgba64Image::from_samples(2, 2, &[1, 2, 3, 4]).unwrap();
        assert_eq!(rgba64_to_img(&image).err(), Some(ConvertError::PixelCountMismatch));
        let gray = Gray16Image::new(1, 1);
        assert_eq!(gray16_to_img(&gray).err(), Some(ConvertError::PixelCountMismatch));
    }
}
