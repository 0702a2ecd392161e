use pxmsave::{AccelTier, PixelLayout, PxmFormat, SaveError, SaveRequest};

const ALL_FORMATS: &[PxmFormat] = &[
    PxmFormat::PgmAscii,
    PxmFormat::PgmBinary,
    PxmFormat::PpmAscii,
    PxmFormat::PpmBinary,
];

const ALL_TIERS: &[AccelTier] = &[
    AccelTier::Scalar,
    AccelTier::X64V2,
    AccelTier::X64V3,
    AccelTier::X64V4,
    AccelTier::Neon,
];

#[test]
fn pgm_binary_header_and_payload_exact() {
    let out = SaveRequest::new(2, 1, PixelLayout::Gray8)
        .format(PxmFormat::PgmBinary)
        .to_memory(&[10, 200], 2)
        .unwrap();
    assert_eq!(out, b"P5 2 1 255\n\x0a\xc8");
}

#[test]
fn pgm_ascii_exact() {
    let out = SaveRequest::new(2, 1, PixelLayout::Gray8)
        .format(PxmFormat::PgmAscii)
        .to_memory(&[10, 200], 2)
        .unwrap();
    assert_eq!(out, b"P2 2 1 255\n10 200");
}

#[test]
fn ppm_binary_reorders_bgr_to_rgb() {
    // B=1, G=2, R=3 must come out R,G,B = 3,2,1
    let out = SaveRequest::new(1, 1, PixelLayout::Bgr24)
        .format(PxmFormat::PpmBinary)
        .to_memory(&[1, 2, 3], 3)
        .unwrap();
    assert_eq!(out, b"P6 1 1 255\n\x03\x02\x01");
}

#[test]
fn ppm_ascii_exact() {
    let out = SaveRequest::new(2, 1, PixelLayout::Bgr24)
        .format(PxmFormat::PpmAscii)
        .to_memory(&[1, 2, 3, 4, 5, 255], 6)
        .unwrap();
    assert_eq!(out, b"P3 2 1 255\n3 2 1 255 5 4");
}

#[test]
fn ppm_binary_drops_bgra_alpha() {
    let out = SaveRequest::new(1, 1, PixelLayout::Bgra32)
        .format(PxmFormat::PpmBinary)
        .to_memory(&[1, 2, 3, 77], 4)
        .unwrap();
    assert_eq!(out, b"P6 1 1 255\n\x03\x02\x01");
}

#[test]
fn ppm_from_gray_replicates_channels() {
    let out = SaveRequest::new(2, 1, PixelLayout::Gray8)
        .format(PxmFormat::PpmBinary)
        .to_memory(&[9, 10], 2)
        .unwrap();
    assert_eq!(out, b"P6 2 1 255\n\x09\x09\x09\x0a\x0a\x0a");
}

#[test]
fn pgm_from_color_uses_fixed_point_luma() {
    // (77*3 + 150*2 + 29*1 + 128) >> 8 = (231 + 300 + 29 + 128) >> 8 = 2
    let out = SaveRequest::new(1, 1, PixelLayout::Bgr24)
        .format(PxmFormat::PgmBinary)
        .to_memory(&[1, 2, 3], 3)
        .unwrap();
    assert_eq!(out, b"P5 1 1 255\n\x02");
}

#[test]
fn default_format_gray_is_pgm_binary() {
    let out = SaveRequest::new(2, 2, PixelLayout::Gray8)
        .to_memory(&[0, 1, 2, 3], 2)
        .unwrap();
    assert!(out.starts_with(b"P5 "));
}

#[test]
fn default_format_color_is_ppm_binary() {
    let pixels = vec![0u8; 2 * 2 * 4];
    for (layout, stride) in [
        (PixelLayout::Bgr24, 6),
        (PixelLayout::Rgb24, 6),
        (PixelLayout::Bgra32, 8),
    ] {
        let out = SaveRequest::new(2, 2, layout)
            .to_memory(&pixels, stride)
            .unwrap();
        assert!(out.starts_with(b"P6 "), "{layout:?}");
    }
}

#[test]
fn unsupported_layout_rejected_for_every_format() {
    let pixels = vec![0u8; 2 * 2 * 4];
    for layout in [PixelLayout::Gray16, PixelLayout::Rgba32] {
        // default (unset) format
        let err = SaveRequest::new(2, 2, layout)
            .to_memory(&pixels, 8)
            .unwrap_err();
        assert!(matches!(err, SaveError::UnsupportedLayout(_)), "{layout:?}");
        // every explicit format
        for &format in ALL_FORMATS {
            let err = SaveRequest::new(2, 2, layout)
                .format(format)
                .to_memory(&pixels, 8)
                .unwrap_err();
            assert!(
                matches!(err, SaveError::UnsupportedLayout(_)),
                "{layout:?} {format:?}"
            );
        }
    }
}

#[test]
fn determinism() {
    let pixels: Vec<u8> = (0..31 * 17 * 3).map(|i| (i % 251) as u8).collect();
    for &format in ALL_FORMATS {
        let req = SaveRequest::new(31, 17, PixelLayout::Bgr24).format(format);
        let a = req.to_memory(&pixels, 31 * 3).unwrap();
        let b = req.to_memory(&pixels, 31 * 3).unwrap();
        assert_eq!(a, b, "{format:?}");
    }
}

#[test]
fn forced_tiers_are_byte_identical() {
    let pixels: Vec<u8> = (0..33 * 5 * 4).map(|i| (i % 241) as u8).collect();
    for &format in ALL_FORMATS {
        let baseline = SaveRequest::new(33, 5, PixelLayout::Bgra32)
            .format(format)
            .tier(AccelTier::Scalar)
            .to_memory(&pixels, 33 * 4)
            .unwrap();
        for &tier in ALL_TIERS {
            let out = SaveRequest::new(33, 5, PixelLayout::Bgra32)
                .format(format)
                .tier(tier)
                .to_memory(&pixels, 33 * 4)
                .unwrap();
            assert_eq!(out, baseline, "{format:?} {tier:?}");
        }
    }
}

#[test]
fn binary_output_size_is_header_plus_samples() {
    let cases = [
        (PixelLayout::Gray8, 1usize, PxmFormat::PgmBinary, 1usize),
        (PixelLayout::Bgr24, 3, PxmFormat::PpmBinary, 3),
        (PixelLayout::Bgra32, 4, PxmFormat::PpmBinary, 3),
        (PixelLayout::Rgb24, 3, PxmFormat::PgmBinary, 1),
    ];
    for (layout, bpp, format, channels) in cases {
        for (w, h) in [(1usize, 1usize), (7, 3), (16, 16), (33, 2)] {
            let pixels = vec![128u8; w * h * bpp];
            let out = SaveRequest::new(w as u32, h as u32, layout)
                .format(format)
                .to_memory(&pixels, w * bpp)
                .unwrap();
            let header_len = out.iter().position(|&b| b == b'\n').unwrap() + 1;
            assert_eq!(
                out.len(),
                header_len + w * h * channels,
                "{layout:?} {format:?} {w}x{h}"
            );
        }
    }
}

#[test]
fn padded_source_rows_save_identically() {
    let w = 13;
    let h = 6;
    let pad = 9;
    let tight: Vec<u8> = (0..w * h * 3).map(|i| (i % 199) as u8).collect();
    let mut padded = vec![0xEEu8; (h - 1) * (w * 3 + pad) + w * 3];
    for y in 0..h {
        padded[y * (w * 3 + pad)..][..w * 3].copy_from_slice(&tight[y * w * 3..][..w * 3]);
    }
    for &format in ALL_FORMATS {
        let a = SaveRequest::new(w as u32, h as u32, PixelLayout::Bgr24)
            .format(format)
            .to_memory(&tight, w * 3)
            .unwrap();
        let b = SaveRequest::new(w as u32, h as u32, PixelLayout::Bgr24)
            .format(format)
            .to_memory(&padded, w * 3 + pad)
            .unwrap();
        assert_eq!(a, b, "{format:?}");
    }
}

#[test]
fn large_image_chunked_blocks_match_single_block() {
    // Tall enough that the 256 KiB block target forces multiple blocks.
    let w = 4096usize;
    let h = 100usize;
    let pixels: Vec<u8> = (0..w * h).map(|i| (i % 251) as u8).collect();
    let out = SaveRequest::new(w as u32, h as u32, PixelLayout::Gray8)
        .format(PxmFormat::PpmBinary)
        .to_memory(&pixels, w)
        .unwrap();
    let header_len = out.iter().position(|&b| b == b'\n').unwrap() + 1;
    assert_eq!(out.len(), header_len + w * h * 3);
    // Spot-check a sample deep inside a later block.
    let i = (h - 1) * w + 17;
    let expected = (i % 251) as u8;
    let off = header_len + i * 3;
    assert_eq!(&out[off..off + 3], &[expected; 3]);
}

#[cfg(feature = "std")]
#[test]
fn to_file_writes_same_bytes_as_to_memory() {
    let req = SaveRequest::new(2, 1, PixelLayout::Gray8).format(PxmFormat::PgmBinary);
    let expected = req.to_memory(&[10, 200], 2).unwrap();
    let path = std::env::temp_dir().join(format!("pxmsave-save-{}.pgm", std::process::id()));
    req.to_file(&[10, 200], 2, &path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(on_disk, expected);
}

#[cfg(feature = "std")]
#[test]
fn to_file_validation_failure_creates_no_file() {
    let path = std::env::temp_dir().join(format!("pxmsave-reject-{}.pgm", std::process::id()));
    let err = SaveRequest::new(2, 2, PixelLayout::Gray16)
        .to_file(&[0u8; 8], 4, &path)
        .unwrap_err();
    assert!(matches!(err, SaveError::UnsupportedLayout(_)));
    assert!(!path.exists());
}

#[cfg(feature = "std")]
#[test]
fn to_file_unwritable_path_reports_io_error() {
    let path = std::env::temp_dir()
        .join(format!("pxmsave-no-such-dir-{}", std::process::id()))
        .join("out.pgm");
    let err = SaveRequest::new(1, 1, PixelLayout::Gray8)
        .to_file(&[0u8], 1, &path)
        .unwrap_err();
    assert!(matches!(err, SaveError::Io(_)));
}

#[cfg(feature = "imgref")]
#[test]
fn typed_rgb8_saver_matches_raw_request() {
    use imgref::Img;
    use rgb::RGB8;
    let buf = vec![RGB8 { r: 3, g: 2, b: 1 }; 4];
    let img = Img::new(buf, 2, 2);
    let out = pxmsave::typed::save_rgb8(img.as_ref(), PxmFormat::PpmBinary).unwrap();
    assert_eq!(out, b"P6 2 2 255\n\x03\x02\x01\x03\x02\x01\x03\x02\x01\x03\x02\x01");
}

#[test]
fn ascii_stream_has_no_leading_or_trailing_whitespace() {
    let out = SaveRequest::new(3, 2, PixelLayout::Gray8)
        .format(PxmFormat::PgmAscii)
        .to_memory(&[0, 255, 7, 100, 9, 30], 3)
        .unwrap();
    let body = &out[out.iter().position(|&b| b == b'\n').unwrap() + 1..];
    assert_eq!(body, b"0 255 7 100 9 30");
}
