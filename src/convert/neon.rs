use archmage::prelude::*;

use super::{RowConvertFn, Source, scalar};

// ===========================================================================
// ARM NEON — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn rgb_from_bgr24_row_neon(_token: NeonToken, src: &[u8], dst: &mut [u8]) {
    use core::arch::aarch64::vqtbl1q_u8;
    let mask_bytes: [u8; 16] = [2, 1, 0, 5, 4, 3, 8, 7, 6, 11, 10, 9, 12, 13, 14, 15];
    let mask = safe_unaligned_simd::aarch64::vld1q_u8(&mask_bytes);
    let (slen, dlen) = (src.len(), dst.len());
    let mut i = 0;
    while i + 16 <= slen && i + 16 <= dlen {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u8(s);
        let shuffled = vqtbl1q_u8(v, mask);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d, shuffled);
        i += 12;
    }
    for (s, d) in src[i..].chunks_exact(3).zip(dst[i..].chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

#[rite]
pub(super) fn rgb_from_bgra32_row_neon(_token: NeonToken, src: &[u8], dst: &mut [u8]) {
    use core::arch::aarch64::vqtbl1q_u8;
    let mask_bytes: [u8; 16] = [2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, 255, 255, 255, 255];
    let mask = safe_unaligned_simd::aarch64::vld1q_u8(&mask_bytes);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 12 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u8(s);
        let shuffled = vqtbl1q_u8(v, mask);
        let mut tmp = [0u8; 16];
        safe_unaligned_simd::aarch64::vst1q_u8(&mut tmp, shuffled);
        dst[id..id + 12].copy_from_slice(&tmp[..12]);
        is += 16;
        id += 12;
    }
    for (s, d) in src[is..].chunks_exact(4).zip(dst[id..].chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

// 16 grays → 48 RGB bytes via three table lookups, no partial stores needed.
#[rite]
pub(super) fn rgb_from_gray8_row_neon(_token: NeonToken, src: &[u8], dst: &mut [u8]) {
    use core::arch::aarch64::vqtbl1q_u8;
    let m0: [u8; 16] = [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5];
    let m1: [u8; 16] = [5, 5, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10];
    let m2: [u8; 16] = [10, 11, 11, 11, 12, 12, 12, 13, 13, 13, 14, 14, 14, 15, 15, 15];
    let t0 = safe_unaligned_simd::aarch64::vld1q_u8(&m0);
    let t1 = safe_unaligned_simd::aarch64::vld1q_u8(&m1);
    let t2 = safe_unaligned_simd::aarch64::vld1q_u8(&m2);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 48 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u8(s);
        let d0: &mut [u8; 16] = (&mut dst[id..id + 16]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d0, vqtbl1q_u8(v, t0));
        let d1: &mut [u8; 16] = (&mut dst[id + 16..id + 32]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d1, vqtbl1q_u8(v, t1));
        let d2: &mut [u8; 16] = (&mut dst[id + 32..id + 48]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d2, vqtbl1q_u8(v, t2));
        is += 16;
        id += 48;
    }
    for (&g, d) in src[is..].iter().zip(dst[id..].chunks_exact_mut(3)) {
        d[0] = g;
        d[1] = g;
        d[2] = g;
    }
}

// ===========================================================================
// arcane strided drivers
// ===========================================================================

#[arcane]
fn rgb_from_bgr24_strided_neon(t: NeonToken, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_bgr24_row_neon(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn rgb_from_bgra32_strided_neon(t: NeonToken, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_bgra32_row_neon(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn rgb_from_gray8_strided_neon(t: NeonToken, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_gray8_row_neon(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 3]);
    }
}

// ===========================================================================
// Table entries
// ===========================================================================

fn rgb_from_bgr24_neon(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match NeonToken::summon() {
        Some(t) => rgb_from_bgr24_strided_neon(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_bgr24(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_bgra32_neon(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match NeonToken::summon() {
        Some(t) => rgb_from_bgra32_strided_neon(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_bgra32(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_gray8_neon(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match NeonToken::summon() {
        Some(t) => rgb_from_gray8_strided_neon(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_gray8(src, w, h, ss, dst, ds),
    }
}

pub(super) fn table(source: Source, color: bool) -> RowConvertFn {
    if color {
        match source {
            Source::Gray8 => rgb_from_gray8_neon,
            Source::Bgr24 => rgb_from_bgr24_neon,
            Source::Bgra32 => rgb_from_bgra32_neon,
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
