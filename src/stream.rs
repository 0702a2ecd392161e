use alloc::vec::Vec;

/// Append-only output buffer with ownership-transfer release.
///
/// Owned exclusively by the encoder while writing; [`release`](Self::release)
/// consumes the stream and hands the backing bytes to the caller, so the
/// encoder cannot touch them afterward.
pub(crate) struct OutputStream {
    buf: Vec<u8>,
}

impl OutputStream {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub(crate) fn write_u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Append a sample value as decimal ascii (0..=255, at most 3 digits).
    pub(crate) fn write_decimal(&mut self, value: u8) {
        if value >= 100 {
            self.buf.push(b'0' + value / 100);
        }
        if value >= 10 {
            self.buf.push(b'0' + (value / 10) % 10);
        }
        self.buf.push(b'0' + value % 10);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn release(self) -> Vec<u8> {
        self.buf
    }
}
