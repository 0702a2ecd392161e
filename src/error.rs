/// Errors from PGM/PPM saving.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SaveError {
    #[error("unsupported pixel layout: {0:?}")]
    UnsupportedLayout(crate::PixelLayout),

    #[error("image dimensions must be nonzero")]
    EmptyImage,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("stride {stride} smaller than row width {needed}")]
    StrideTooSmall { stride: usize, needed: usize },

    #[error("source buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[cfg(feature = "std")]
    #[error("file write failed: {0}")]
    Io(#[from] std::io::Error),
}
