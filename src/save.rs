//! Save request: validation, tier selection, and the two entry points.

use alloc::vec::Vec;

use crate::convert::{AccelTier, Source};
use crate::encode::PxmEncoder;
use crate::error::SaveError;
use crate::format::PxmFormat;
use crate::pixel::PixelLayout;

/// A single save operation: dimensions, source layout, and options.
///
/// ```no_run
/// use pxmsave::{PixelLayout, PxmFormat, SaveRequest};
///
/// let pixels = vec![0u8; 64 * 64 * 4];
/// let bytes = SaveRequest::new(64, 64, PixelLayout::Bgra32)
///     .format(PxmFormat::PpmBinary)
///     .to_memory(&pixels, 64 * 4)?;
/// # Ok::<(), pxmsave::SaveError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SaveRequest {
    width: u32,
    height: u32,
    layout: PixelLayout,
    format: Option<PxmFormat>,
    quality: Option<i32>,
    tier: Option<AccelTier>,
}

#[derive(Debug)]
pub(crate) struct Validated {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) source: Source,
    pub(crate) format: PxmFormat,
}

impl SaveRequest {
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            width,
            height,
            layout,
            format: None,
            quality: None,
            tier: None,
        }
    }

    /// Output variant. When unset, `PgmBinary` is chosen for `Gray8` input
    /// and `PpmBinary` for everything else.
    pub fn format(mut self, format: PxmFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Accepted for API parity with lossy formats; the PXM encoders ignore it.
    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Override automatic capability selection. Intended for tests and
    /// benchmarks; a tier the CPU does not support falls back to the scalar
    /// routines and still produces identical bytes.
    pub fn tier(mut self, tier: AccelTier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Encode into an owned byte buffer.
    ///
    /// `stride` is the distance in bytes between the start of consecutive
    /// source rows; padding bytes past `width × bpp` are never read.
    pub fn to_memory(&self, pixels: &[u8], stride: usize) -> Result<Vec<u8>, SaveError> {
        let v = self.validate(pixels.len(), stride)?;
        let tier = self.tier.unwrap_or_else(AccelTier::detect);
        let encoder = PxmEncoder::new(v.width, v.height, v.source, v.format, tier);
        Ok(encoder.encode(pixels, stride))
    }

    /// Encode and write the result to `path`. The file holds either the
    /// complete image or nothing observable: encoding happens in memory
    /// first, and validation failures never touch the filesystem.
    #[cfg(feature = "std")]
    pub fn to_file(&self, pixels: &[u8], stride: usize, path: impl AsRef<std::path::Path>) -> Result<(), SaveError> {
        let bytes = self.to_memory(pixels, stride)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Format defaulting runs before the layout check, so an unsupported
    /// layout with no explicit format still reports `UnsupportedLayout`.
    pub(crate) fn validate(&self, src_len: usize, stride: usize) -> Result<Validated, SaveError> {
        let format = self.format.unwrap_or(match self.layout {
            PixelLayout::Gray8 => PxmFormat::PgmBinary,
            _ => PxmFormat::PpmBinary,
        });
        let source = Source::from_layout(self.layout)
            .ok_or(SaveError::UnsupportedLayout(self.layout))?;
        // quality is carried but unused by these formats
        let _ = self.quality;

        if self.width == 0 || self.height == 0 {
            return Err(SaveError::EmptyImage);
        }
        let w = self.width as usize;
        let h = self.height as usize;
        let too_large = SaveError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        };
        // Worst case output is 4 bytes per ascii sample, 3 samples per pixel.
        w.checked_mul(h)
            .and_then(|px| px.checked_mul(12))
            .ok_or(too_large)?;

        let row = w * source.bytes_per_pixel();
        if stride < row {
            return Err(SaveError::StrideTooSmall { stride, needed: row });
        }
        let needed = (h - 1)
            .checked_mul(stride)
            .and_then(|b| b.checked_add(row))
            .ok_or(SaveError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })?;
        if src_len < needed {
            return Err(SaveError::BufferTooSmall {
                needed,
                actual: src_len,
            });
        }

        Ok(Validated {
            width: w,
            height: h,
            source,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_gray_is_pgm_binary() {
        let v = SaveRequest::new(2, 2, PixelLayout::Gray8)
            .validate(4, 2)
            .unwrap();
        assert_eq!(v.format, PxmFormat::PgmBinary);
    }

    #[test]
    fn default_format_color_is_ppm_binary() {
        for layout in [PixelLayout::Bgr24, PixelLayout::Rgb24] {
            let v = SaveRequest::new(2, 2, layout).validate(12, 6).unwrap();
            assert_eq!(v.format, PxmFormat::PpmBinary, "{layout:?}");
        }
        let v = SaveRequest::new(2, 2, PixelLayout::Bgra32)
            .validate(16, 8)
            .unwrap();
        assert_eq!(v.format, PxmFormat::PpmBinary);
    }

    #[test]
    fn unsupported_layouts_rejected() {
        for layout in [PixelLayout::Gray16, PixelLayout::Rgba32] {
            let err = SaveRequest::new(2, 2, layout).validate(16, 8).unwrap_err();
            assert!(matches!(err, SaveError::UnsupportedLayout(_)), "{layout:?}");
        }
    }

    #[test]
    fn unsupported_layout_rejected_with_explicit_format() {
        let err = SaveRequest::new(2, 2, PixelLayout::Gray16)
            .format(PxmFormat::PgmAscii)
            .validate(8, 4)
            .unwrap_err();
        assert!(matches!(err, SaveError::UnsupportedLayout(_)));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let err = SaveRequest::new(0, 2, PixelLayout::Gray8)
            .validate(4, 2)
            .unwrap_err();
        assert!(matches!(err, SaveError::EmptyImage));
        let err = SaveRequest::new(2, 0, PixelLayout::Gray8)
            .validate(4, 2)
            .unwrap_err();
        assert!(matches!(err, SaveError::EmptyImage));
    }

    #[test]
    fn short_stride_rejected() {
        let err = SaveRequest::new(4, 1, PixelLayout::Rgb24)
            .validate(12, 8)
            .unwrap_err();
        assert!(matches!(err, SaveError::StrideTooSmall { needed: 12, .. }));
    }

    #[test]
    fn short_buffer_rejected() {
        let err = SaveRequest::new(4, 2, PixelLayout::Gray8)
            .validate(7, 4)
            .unwrap_err();
        assert!(matches!(
            err,
            SaveError::BufferTooSmall {
                needed: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn padded_stride_accepted() {
        // last row only needs width*bpp bytes, not a full stride
        let v = SaveRequest::new(2, 2, PixelLayout::Gray8).validate(6, 4);
        assert!(v.is_ok());
    }

    #[test]
    fn quality_accepted_and_ignored() {
        let v = SaveRequest::new(2, 2, PixelLayout::Gray8)
            .quality(42)
            .validate(4, 2);
        assert!(v.is_ok());
    }
}
