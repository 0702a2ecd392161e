//! PXM encoder: header writing, block-wise conversion, sample serialization.

use alloc::vec;
use alloc::vec::Vec;

use crate::convert::{AccelTier, RowConvertFn, Source, row_converter};
use crate::format::PxmFormat;
use crate::stream::OutputStream;

/// Upper bound on the intermediate conversion buffer. Small images convert
/// in a single block; large ones are chunked so the buffer stays bounded
/// while amortizing the per-call overhead of the conversion routine.
const BLOCK_BYTES: usize = 256 * 1024;

/// One-shot encoder for a single validated save.
///
/// Construction binds the conversion routine for the chosen capability tier;
/// it is never re-selected mid-encode. [`encode`](Self::encode) consumes the
/// encoder and releases the output stream's backing bytes to the caller.
pub(crate) struct PxmEncoder {
    width: usize,
    height: usize,
    src_bpp: usize,
    format: PxmFormat,
    convert: RowConvertFn,
    /// Destination bytes per row: width × output channels.
    row_bytes: usize,
    block_rows: usize,
    stream: OutputStream,
}

impl PxmEncoder {
    pub(crate) fn new(
        width: usize,
        height: usize,
        source: Source,
        format: PxmFormat,
        tier: AccelTier,
    ) -> Self {
        let row_bytes = width * format.channels();
        let block_rows = (BLOCK_BYTES / row_bytes.max(1)).clamp(1, height);
        // Header is at most 27 bytes ("P2" + two 10-digit dims + "255\n");
        // ascii samples take at most 4 bytes each ("255" + separator).
        let payload = if format.is_ascii() {
            height * row_bytes * 4
        } else {
            height * row_bytes
        };
        Self {
            width,
            height,
            src_bpp: source.bytes_per_pixel(),
            format,
            convert: row_converter(tier, source, format.channels() == 3),
            row_bytes,
            block_rows,
            stream: OutputStream::with_capacity(32 + payload),
        }
    }

    pub(crate) fn encode(mut self, src: &[u8], src_stride: usize) -> Vec<u8> {
        self.write_header();
        let mut block = vec![0u8; self.block_rows * self.row_bytes];
        let mut first = true;
        let mut y = 0;
        while y < self.height {
            let rows = self.block_rows.min(self.height - y);
            let start = y * src_stride;
            let end = start + (rows - 1) * src_stride + self.width * self.src_bpp;
            (self.convert)(
                &src[start..end],
                self.width,
                rows,
                src_stride,
                &mut block[..rows * self.row_bytes],
                self.row_bytes,
            );
            let converted = &block[..rows * self.row_bytes];
            if self.format.is_ascii() {
                for &sample in converted {
                    if first {
                        first = false;
                    } else {
                        self.stream.write_u8(b' ');
                    }
                    self.stream.write_decimal(sample);
                }
            } else {
                self.stream.write(converted);
            }
            y += rows;
        }
        self.stream.release()
    }

    /// `<tag> <width> <height> 255\n` — one line, single spaces, exactly one
    /// trailing newline. Maxval is written for PPM as well; viewers require
    /// it for P3/P6.
    fn write_header(&mut self) {
        let header = alloc::format!(
            "{} {} {} 255\n",
            self.format.tag(),
            self.width,
            self.height
        );
        self.stream.write(header.as_bytes());
    }
}
