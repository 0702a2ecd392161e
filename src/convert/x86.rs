use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{
    _mm256_loadu_si256, _mm256_storeu_si256, _mm_loadu_si128, _mm_storeu_si128,
};

use super::{RowConvertFn, Source, luma, scalar};

// ===========================================================================
// SIMD constants
// ===========================================================================

// 3bpp swap shuffle: reverse bytes 0↔2 in each 3-byte group (4 pixels per 16
// bytes). Bytes 12-15 pass through and are overwritten by the next store.
const BGR_SWAP_SHUF_SSE: [i8; 16] = [2, 1, 0, 5, 4, 3, 8, 7, 6, 11, 10, 9, 12, 13, 14, 15];

// BGRA→RGB shuffle: extract bytes 2,1,0 from each 4-byte pixel (swap + strip)
const BGRA_TO_RGB_SHUF_SSE: [i8; 16] = [
    2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, -128, -128, -128, -128,
];

const BGRA_TO_RGB_SHUF_AVX: [i8; 32] = [
    2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, -128, -128, -128, -128, 2, 1, 0, 6, 5, 4, 10, 9, 8, 14,
    13, 12, -128, -128, -128, -128,
];

// Pack permutation: merge 12 bytes from each 16-byte lane into contiguous 24 bytes
const PACK_3X4_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// Gray expansion: 8 grays (broadcast to both lanes) → 24 contiguous RGB bytes
const GRAY_TO_RGB_SHUF_AVX: [i8; 32] = [
    0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 7, 7, 7, -128, -128, -128,
    -128, -128, -128, -128, -128,
];

const GRAY_TO_RGB_SHUF_SSE: [i8; 16] = [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, -128, -128, -128, -128];

// Luma weights as i16 words [29, 150, 77, 0] matching unpacked B,G,R,A order
const LUMA_BGRA_W_AVX: [i8; 32] = [
    29, 0, -106, 0, 77, 0, 0, 0, 29, 0, -106, 0, 77, 0, 0, 0, 29, 0, -106, 0, 77, 0, 0, 0, 29, 0,
    -106, 0, 77, 0, 0, 0,
];

// Gather dwords 0 and 4 (the packed luma bytes of each lane) to the front
const PACK_LUMA_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// ===========================================================================
// x86-64-v3 (AVX2) — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn rgb_from_bgr24_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm_loadu_si128(&BGR_SWAP_SHUF_SSE);
    let (slen, dlen) = (src.len(), dst.len());
    let mut i = 0;
    while i + 16 <= slen && i + 16 <= dlen {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = _mm_loadu_si128(s);
        let shuffled = _mm_shuffle_epi8(v, mask);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(d, shuffled);
        i += 12;
    }
    for (s, d) in src[i..].chunks_exact(3).zip(dst[i..].chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

#[rite]
pub(super) fn rgb_from_bgra32_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let shuf = _mm256_loadu_si256(&BGRA_TO_RGB_SHUF_AVX);
    let pack = _mm256_loadu_si256(&PACK_3X4_PERM_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 32 <= slen && id + 24 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let stripped = _mm256_shuffle_epi8(v, shuf);
        let packed = _mm256_permutevar8x32_epi32(stripped, pack);
        let mut tmp = [0u8; 32];
        _mm256_storeu_si256(&mut tmp, packed);
        dst[id..id + 24].copy_from_slice(&tmp[..24]);
        is += 32;
        id += 24;
    }
    for (s, d) in src[is..].chunks_exact(4).zip(dst[id..].chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

#[rite]
pub(super) fn rgb_from_gray8_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let shuf = _mm256_loadu_si256(&GRAY_TO_RGB_SHUF_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 8 <= slen && id + 24 <= dlen {
        let gray8 = u64::from_ne_bytes(src[is..is + 8].try_into().unwrap());
        let grays = _mm256_set1_epi64x(gray8 as i64);
        let rgb = _mm256_shuffle_epi8(grays, shuf);
        let mut tmp = [0u8; 32];
        _mm256_storeu_si256(&mut tmp, rgb);
        dst[id..id + 24].copy_from_slice(&tmp[..24]);
        is += 8;
        id += 24;
    }
    for (&g, d) in src[is..].iter().zip(dst[id..].chunks_exact_mut(3)) {
        d[0] = g;
        d[1] = g;
        d[2] = g;
    }
}

// 8 BGRA pixels per iteration: widen to 16-bit, multiply-accumulate the luma
// weights, round, shift, pack back to 8 gray bytes. Same fixed-point formula
// as the scalar path, so the output bytes match exactly.
#[rite]
pub(super) fn gray_from_bgra32_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let weights = _mm256_loadu_si256(&LUMA_BGRA_W_AVX);
    let perm = _mm256_loadu_si256(&PACK_LUMA_PERM_AVX);
    let bias = _mm256_set1_epi32(128);
    let zero = _mm256_setzero_si256();
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 32 <= slen && id + 8 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let lo = _mm256_unpacklo_epi8(v, zero);
        let hi = _mm256_unpackhi_epi8(v, zero);
        let sums = _mm256_hadd_epi32(_mm256_madd_epi16(lo, weights), _mm256_madd_epi16(hi, weights));
        let y = _mm256_srli_epi32::<8>(_mm256_add_epi32(sums, bias));
        let packed = _mm256_packus_epi16(_mm256_packus_epi32(y, zero), zero);
        let gathered = _mm256_permutevar8x32_epi32(packed, perm);
        let mut tmp = [0u8; 32];
        _mm256_storeu_si256(&mut tmp, gathered);
        dst[id..id + 8].copy_from_slice(&tmp[..8]);
        is += 32;
        id += 8;
    }
    for (s, d) in src[is..].chunks_exact(4).zip(dst[id..].iter_mut()) {
        *d = luma(s[2], s[1], s[0]);
    }
}

// ===========================================================================
// x86-64-v2 (SSE4) — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn rgb_from_bgr24_row_v2(_token: X64V2Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm_loadu_si128(&BGR_SWAP_SHUF_SSE);
    let (slen, dlen) = (src.len(), dst.len());
    let mut i = 0;
    while i + 16 <= slen && i + 16 <= dlen {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = _mm_loadu_si128(s);
        let shuffled = _mm_shuffle_epi8(v, mask);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(d, shuffled);
        i += 12;
    }
    for (s, d) in src[i..].chunks_exact(3).zip(dst[i..].chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

#[rite]
pub(super) fn rgb_from_bgra32_row_v2(_token: X64V2Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm_loadu_si128(&BGRA_TO_RGB_SHUF_SSE);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 12 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = _mm_loadu_si128(s);
        let shuffled = _mm_shuffle_epi8(v, mask);
        let mut tmp = [0u8; 16];
        _mm_storeu_si128(&mut tmp, shuffled);
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

#[rite]
pub(super) fn rgb_from_gray8_row_v2(_token: X64V2Token, src: &[u8], dst: &mut [u8]) {
    let shuf = _mm_loadu_si128(&GRAY_TO_RGB_SHUF_SSE);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 4 <= slen && id + 12 <= dlen {
        let gray4 = u32::from_ne_bytes(src[is..is + 4].try_into().unwrap());
        let grays = _mm_set1_epi32(gray4 as i32);
        let rgb = _mm_shuffle_epi8(grays, shuf);
        let mut tmp = [0u8; 16];
        _mm_storeu_si128(&mut tmp, rgb);
        dst[id..id + 12].copy_from_slice(&tmp[..12]);
        is += 4;
        id += 12;
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
fn rgb_from_bgr24_strided_v3(t: X64V3Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_bgr24_row_v3(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn rgb_from_bgra32_strided_v3(t: X64V3Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_bgra32_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn rgb_from_gray8_strided_v3(t: X64V3Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_gray8_row_v3(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn gray_from_bgra32_strided_v3(t: X64V3Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        gray_from_bgra32_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w]);
    }
}

#[arcane]
fn rgb_from_bgr24_strided_v2(t: X64V2Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_bgr24_row_v2(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn rgb_from_bgra32_strided_v2(t: X64V2Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_bgra32_row_v2(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}

#[arcane]
fn rgb_from_gray8_strided_v2(t: X64V2Token, src: &[u8], dst: &mut [u8], w: usize, h: usize, ss: usize, ds: usize) {
    for y in 0..h {
        rgb_from_gray8_row_v2(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 3]);
    }
}

// ===========================================================================
// Table entries — summon the tier token, fall back to scalar if absent
// ===========================================================================

fn rgb_from_bgr24_v3(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V3Token::summon() {
        Some(t) => rgb_from_bgr24_strided_v3(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_bgr24(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_bgra32_v3(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V3Token::summon() {
        Some(t) => rgb_from_bgra32_strided_v3(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_bgra32(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_gray8_v3(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V3Token::summon() {
        Some(t) => rgb_from_gray8_strided_v3(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_gray8(src, w, h, ss, dst, ds),
    }
}

fn gray_from_bgra32_v3(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V3Token::summon() {
        Some(t) => gray_from_bgra32_strided_v3(t, src, dst, w, h, ss, ds),
        None => scalar::gray_from_bgra32(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_bgr24_v2(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V2Token::summon() {
        Some(t) => rgb_from_bgr24_strided_v2(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_bgr24(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_bgra32_v2(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V2Token::summon() {
        Some(t) => rgb_from_bgra32_strided_v2(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_bgra32(src, w, h, ss, dst, ds),
    }
}

fn rgb_from_gray8_v2(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    match X64V2Token::summon() {
        Some(t) => rgb_from_gray8_strided_v2(t, src, dst, w, h, ss, ds),
        None => scalar::rgb_from_gray8(src, w, h, ss, dst, ds),
    }
}

// ===========================================================================
// Tier tables
// ===========================================================================

pub(super) fn v3_table(source: Source, color: bool) -> RowConvertFn {
    if color {
        match source {
            Source::Gray8 => rgb_from_gray8_v3,
            Source::Bgr24 => rgb_from_bgr24_v3,
            Source::Bgra32 => rgb_from_bgra32_v3,
            Source::Rgb24 => scalar::copy_3bpp,
        }
    } else {
        match source {
            Source::Gray8 => scalar::copy_1bpp,
            Source::Bgr24 => scalar::gray_from_bgr24,
            Source::Bgra32 => gray_from_bgra32_v3,
            Source::Rgb24 => scalar::gray_from_rgb24,
        }
    }
}

pub(super) fn v2_table(source: Source, color: bool) -> RowConvertFn {
    if color {
        match source {
            Source::Gray8 => rgb_from_gray8_v2,
            Source::Bgr24 => rgb_from_bgr24_v2,
            Source::Bgra32 => rgb_from_bgra32_v2,
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
