//! Delimited-message reassembly over a bounded inbound buffer.
//!
//! The wire carries plain text messages terminated by `\r\n` with no other
//! framing. Reads arrive arbitrarily fragmented, so bytes accumulate here
//! until a terminator completes a message; the unterminated tail stays in
//! the buffer for the next read. No data is dropped across call
//! boundaries, and no message is ever split once delimited.

/// Fixed inbound buffer capacity in bytes.
///
/// A single message far exceeding this is a protocol violation upstream;
/// the buffer never grows.
pub const INBOUND_CAPACITY: usize = 4096;

/// The two-byte message terminator.
pub const TERMINATOR: &[u8] = b"\r\n";

/// Accumulates inbound bytes and splits them into terminator-delimited
/// messages.
#[derive(Clone, Debug)]
pub struct LineFramer {
    buf: Vec<u8>,
    len: usize,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Create an empty framer with the fixed capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0; INBOUND_CAPACITY],
            len: 0,
        }
    }

    /// Total buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes currently buffered (undelimited tail).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no bytes are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the buffer has no free space left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// The writable free region. The caller reads into this slice and then
    /// reports how much it filled via [`LineFramer::commit`].
    pub fn free_space(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    /// Record that `n` bytes of the free region were filled.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the free space; the caller must never read
    /// more than `free_space().len()` bytes.
    pub fn commit(&mut self, n: usize) {
        assert!(n <= self.buf.len() - self.len, "committed past capacity");
        self.len += n;
    }

    /// Extract every complete message currently buffered.
    ///
    /// Each message is returned terminator-stripped, in arrival order. The
    /// remaining tail is moved to the front of the buffer and kept for the
    /// next call.
    pub fn drain_messages(&mut self) -> Vec<Vec<u8>> {
        let mut messages = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i + 1 < self.len {
            if self.buf[i] == TERMINATOR[0] && self.buf[i + 1] == TERMINATOR[1] {
                messages.push(self.buf[start..i].to_vec());
                i += 2;
                start = i;
            } else {
                i += 1;
            }
        }

        if start > 0 {
            self.buf.copy_within(start..self.len, 0);
            self.len -= start;
        }
        messages
    }

    /// Discard all buffered bytes.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}
