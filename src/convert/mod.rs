// ---------------------------------------------------------------------------
// Row-block pixel conversion with tiered SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops, #[arcane]
// wrappers drive the strided row loop. One routine per (destination family ×
// source layout) per tier; the dispatcher binds exactly one routine per save,
// so the hot loop pays no per-row dispatch cost. All tiers are byte-identical
// for identical inputs.
// ---------------------------------------------------------------------------

use crate::pixel::PixelLayout;

mod scalar;

#[cfg(target_arch = "x86_64")]
mod x86;

#[cfg(target_arch = "aarch64")]
mod neon;


/// Converts a block of rows from the source layout into the destination's
/// packed byte order: `(src, width, height, src_stride, dst, dst_stride)`.
///
/// Pure and reentrant; no shared mutable state.
pub(crate) type RowConvertFn =
    fn(src: &[u8], width: usize, height: usize, src_stride: usize, dst: &mut [u8], dst_stride: usize);

/// CPU capability tier for the conversion routines.
///
/// The x86-64 chain escalates `X64V2 < X64V3 < X64V4` above scalar; `Neon`
/// is the aarch64 chain. [`detect`](Self::detect) picks the highest tier the
/// running CPU supports. Forcing a tier whose CPU support is absent falls
/// back to the scalar routines rather than faulting.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelTier {
    /// Portable scalar routines, always available.
    Scalar,
    /// x86-64-v2 (SSE4.2 class).
    X64V2,
    /// x86-64-v3 (AVX2 class).
    X64V3,
    /// x86-64-v4 (AVX-512 class).
    X64V4,
    /// aarch64 NEON.
    Neon,
}

impl AccelTier {
    /// Highest tier supported by the running CPU. Detection is cached by
    /// archmage, so this is cheap to call per save.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            use archmage::SimdToken;
            if archmage::X64V4Token::summon().is_some() {
                return Self::X64V4;
            }
            if archmage::X64V3Token::summon().is_some() {
                return Self::X64V3;
            }
            if archmage::X64V2Token::summon().is_some() {
                return Self::X64V2;
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            use archmage::SimdToken;
            if archmage::NeonToken::summon().is_some() {
                return Self::Neon;
            }
        }
        Self::Scalar
    }
}

/// Source layout after validation — the closed set the routine table covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    Gray8,
    Bgr24,
    Bgra32,
    Rgb24,
}

impl Source {
    pub(crate) fn from_layout(layout: PixelLayout) -> Option<Self> {
        match layout {
            PixelLayout::Gray8 => Some(Self::Gray8),
            PixelLayout::Bgr24 => Some(Self::Bgr24),
            PixelLayout::Bgra32 => Some(Self::Bgra32),
            PixelLayout::Rgb24 => Some(Self::Rgb24),
            _ => None,
        }
    }

    pub(crate) fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Bgr24 | Self::Rgb24 => 3,
            Self::Bgra32 => 4,
        }
    }
}

/// Fixed-point BT.601-style luma, identical at every tier.
#[inline(always)]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

/// Tier-ordered routine lookup. `color` selects the 3-channel R,G,B
/// destination (PPM); otherwise the 1-channel gray destination (PGM).
///
/// The returned routine is bound once per save and never re-selected
/// mid-encode. Tiers without a specialized kernel for a given entry share the
/// scalar routine; X64V4 binds the v3 kernels (the AVX2 byte shuffles are
/// already memory-bound for these shapes).
pub(crate) fn row_converter(tier: AccelTier, source: Source, color: bool) -> RowConvertFn {
    match tier {
        #[cfg(target_arch = "x86_64")]
        AccelTier::X64V2 => x86::v2_table(source, color),
        #[cfg(target_arch = "x86_64")]
        AccelTier::X64V3 | AccelTier::X64V4 => x86::v3_table(source, color),
        #[cfg(target_arch = "aarch64")]
        AccelTier::Neon => neon::table(source, color),
        #[allow(unreachable_patterns)]
        _ => scalar_table(source, color),
    }
}

pub(crate) fn scalar_table(source: Source, color: bool) -> RowConvertFn {
    if color {
        match source {
            Source::Gray8 => scalar::rgb_from_gray8,
            Source::Bgr24 => scalar::rgb_from_bgr24,
            Source::Bgra32 => scalar::rgb_from_bgra32,
            Source::Rgb24 => scalar::copy_3bpp,
        }
    } else {
        match source {
            Source::Gray8 => scalar::copy_1bpp,
            Source::Bgr24 => scalar::gray_from_bgr24,
            Source::Bgra32 => scalar::gray_from_bgra32,
            Source::Rgb24 => scalar::gray_from_rgb24,
        }
    }
}
