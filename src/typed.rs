//! Typed convenience savers over [`imgref`] / [`rgb`] pixel types.
//!
//! Thin wrappers that cast the typed pixel buffer to bytes and forward to
//! [`SaveRequest`]. Strides are handled; padded images save correctly.

use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::RGB8;
use rgb::alt::{BGRA8, Gray};

use crate::{PixelLayout, PxmFormat, SaveError, SaveRequest};

/// Save an RGB8 image.
pub fn save_rgb8(img: ImgRef<'_, RGB8>, format: PxmFormat) -> Result<Vec<u8>, SaveError> {
    SaveRequest::new(img.width() as u32, img.height() as u32, PixelLayout::Rgb24)
        .format(format)
        .to_memory(bytemuck::cast_slice(img.buf()), img.stride() * 3)
}

/// Save a BGRA8 image (alpha is dropped; PPM carries no alpha).
pub fn save_bgra8(img: ImgRef<'_, BGRA8>, format: PxmFormat) -> Result<Vec<u8>, SaveError> {
    SaveRequest::new(img.width() as u32, img.height() as u32, PixelLayout::Bgra32)
        .format(format)
        .to_memory(bytemuck::cast_slice(img.buf()), img.stride() * 4)
}

/// Save a grayscale image.
pub fn save_gray8(img: ImgRef<'_, Gray<u8>>, format: PxmFormat) -> Result<Vec<u8>, SaveError> {
    SaveRequest::new(img.width() as u32, img.height() as u32, PixelLayout::Gray8)
        .format(format)
        .to_memory(bytemuck::cast_slice(img.buf()), img.stride())
}
