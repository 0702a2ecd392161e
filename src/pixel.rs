/// Source pixel memory layout.
///
/// The saver accepts `Gray8`, `Bgr24`, `Bgra32`, and `Rgb24`. The remaining
/// layouts exist so callers that carry a wider layout enum can pass it
/// through; the validator rejects them with
/// [`SaveError::UnsupportedLayout`](crate::SaveError::UnsupportedLayout).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// 3 channels, 8-bit, blue first (B,G,R per pixel).
    Bgr24,
    /// 4 channels, 8-bit, blue first (B,G,R,A per pixel).
    Bgra32,
    /// 3 channels, 8-bit RGB.
    Rgb24,
    /// Single channel, 16-bit grayscale (native endian). Not saveable.
    Gray16,
    /// 4 channels, 8-bit RGBA. Not saveable.
    Rgba32,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Bgr24 | Self::Rgb24 => 3,
            Self::Bgra32 | Self::Rgba32 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::Bgr24 | Self::Rgb24 => 3,
            Self::Bgra32 | Self::Rgba32 => 4,
        }
    }
}
