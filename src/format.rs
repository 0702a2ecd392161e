/// Which PXM variant to write.
///
/// When no format is given to [`SaveRequest`](crate::SaveRequest), the
/// binary variant matching the source layout is chosen: `PgmBinary` for
/// `Gray8`, `PpmBinary` for everything else.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PxmFormat {
    /// P2 — ascii grayscale (plain PGM).
    PgmAscii,
    /// P5 — binary grayscale (PGM).
    PgmBinary,
    /// P3 — ascii RGB (plain PPM).
    PpmAscii,
    /// P6 — binary RGB (PPM).
    PpmBinary,
}

impl PxmFormat {
    /// Magic tag written at the start of the header.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PgmAscii => "P2",
            Self::PgmBinary => "P5",
            Self::PpmAscii => "P3",
            Self::PpmBinary => "P6",
        }
    }

    /// Whether samples are written as decimal text rather than raw bytes.
    pub fn is_ascii(&self) -> bool {
        matches!(self, Self::PgmAscii | Self::PpmAscii)
    }

    /// Output channels per pixel: 1 for PGM, 3 for PPM.
    pub fn channels(&self) -> usize {
        match self {
            Self::PgmAscii | Self::PgmBinary => 1,
            Self::PpmAscii | Self::PpmBinary => 3,
        }
    }
}
