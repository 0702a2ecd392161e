//! # pxmsave
//!
//! PGM/PPM (PNM) saver for raw in-memory pixel buffers, with SIMD-accelerated
//! pixel-layout conversion.
//!
//! Four output variants are supported: PGM ascii (`P2`), PGM binary (`P5`),
//! PPM ascii (`P3`), PPM binary (`P6`). Source pixels may be `Gray8`, `Bgr24`,
//! `Bgra32`, or `Rgb24`, with arbitrary row stride. The conversion from the
//! source layout into the format's fixed channel order (gray, or R,G,B) is
//! selected once per save from a table of functionally identical routines,
//! one per CPU capability tier — x86-64 v2/v3/v4 on the primary chain, NEON
//! on aarch64, scalar everywhere. Every tier produces byte-identical output;
//! they differ only in speed.
//!
//! ## Usage
//!
//! ```no_run
//! use pxmsave::{PixelLayout, PxmFormat, SaveRequest};
//!
//! let pixels: &[u8] = &[]; // your raw pixel rows
//! let (width, height) = (640u32, 480u32);
//! let stride = width as usize * 3;
//!
//! // Explicit format
//! let ppm = SaveRequest::new(width, height, PixelLayout::Bgr24)
//!     .format(PxmFormat::PpmBinary)
//!     .to_memory(pixels, stride)?;
//!
//! // Default format: binary PGM for gray input, binary PPM otherwise
//! # #[cfg(feature = "std")]
//! SaveRequest::new(width, height, PixelLayout::Bgr24)
//!     .to_file(pixels, stride, "out.ppm")?;
//! # Ok::<(), pxmsave::SaveError>(())
//! ```
//!
//! ## Non-Goals
//!
//! - Decoding
//! - Compressed formats (use a real codec crate for those)
//! - Format auto-detection from file extensions
//! - Multi-threaded encoding of a single image

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod convert;
mod encode;
mod error;
mod format;
mod pixel;
mod save;
mod stream;

#[cfg(feature = "imgref")]
pub mod typed;

// Re-exports
pub use convert::AccelTier;
pub use error::SaveError;
pub use format::PxmFormat;
pub use pixel::PixelLayout;
pub use save::SaveRequest;
