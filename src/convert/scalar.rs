//! Portable baseline routines. Every tier's output must match these exactly.

use super::luma;

pub(super) fn copy_1bpp(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        dst[y * ds..][..w].copy_from_slice(&src[y * ss..][..w]);
    }
}

pub(super) fn copy_3bpp(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        dst[y * ds..][..w * 3].copy_from_slice(&src[y * ss..][..w * 3]);
    }
}

pub(super) fn gray_from_bgr24(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        let row = &src[y * ss..][..w * 3];
        let out = &mut dst[y * ds..][..w];
        for (s, d) in row.chunks_exact(3).zip(out.iter_mut()) {
            *d = luma(s[2], s[1], s[0]);
        }
    }
}

pub(super) fn gray_from_bgra32(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        let row = &src[y * ss..][..w * 4];
        let out = &mut dst[y * ds..][..w];
        for (s, d) in row.chunks_exact(4).zip(out.iter_mut()) {
            *d = luma(s[2], s[1], s[0]);
        }
    }
}

pub(super) fn gray_from_rgb24(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        let row = &src[y * ss..][..w * 3];
        let out = &mut dst[y * ds..][..w];
        for (s, d) in row.chunks_exact(3).zip(out.iter_mut()) {
            *d = luma(s[0], s[1], s[2]);
        }
    }
}

pub(super) fn rgb_from_gray8(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        let row = &src[y * ss..][..w];
        let out = &mut dst[y * ds..][..w * 3];
        for (&g, d) in row.iter().zip(out.chunks_exact_mut(3)) {
            d[0] = g;
            d[1] = g;
            d[2] = g;
        }
    }
}

pub(super) fn rgb_from_bgr24(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        let row = &src[y * ss..][..w * 3];
        let out = &mut dst[y * ds..][..w * 3];
        for (s, d) in row.chunks_exact(3).zip(out.chunks_exact_mut(3)) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
        }
    }
}

pub(super) fn rgb_from_bgra32(src: &[u8], w: usize, h: usize, ss: usize, dst: &mut [u8], ds: usize) {
    for y in 0..h {
        let row = &src[y * ss..][..w * 4];
        let out = &mut dst[y * ds..][..w * 3];
        for (s, d) in row.chunks_exact(4).zip(out.chunks_exact_mut(3)) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
        }
    }
}
