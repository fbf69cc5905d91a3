use bytes::BytesMut;
use tracing::trace;

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Reassembles complete text lines from a fragmented byte stream.
///
/// Holds exactly one pending-fragment buffer: everything received since the
/// last `\n`. Bytes are buffered raw and only split at line terminators, so
/// a multi-byte character divided across two chunks is whole again by the
/// time it is decoded.
///
/// The trailing fragment is never force-flushed; it waits for a later chunk
/// to complete it or is discarded with the framer when the session ends.
#[derive(Debug)]
pub struct LineFramer {
    buf: BytesMut,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Append a chunk and iterate the complete lines it unlocked.
    ///
    /// Each emitted line has its terminator stripped and surrounding
    /// whitespace trimmed (which also absorbs `\r` from CRLF peers). A
    /// chunk containing no terminator grows the buffer and emits nothing.
    pub fn feed<'a>(&'a mut self, chunk: &[u8]) -> Lines<'a> {
        self.buf.extend_from_slice(chunk);
        Lines { framer: self }
    }

    /// The incomplete trailing fragment, if any.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let raw = self.buf.split_to(pos + 1);
        let line = &raw[..pos];
        // Lossy decode: the protocol is ASCII, but a corrupted line must
        // classify as unrecognized downstream, not kill the framer.
        let line = String::from_utf8_lossy(line).trim().to_string();
        trace!(line = %line, pending = self.buf.len(), "line framed");
        Some(line)
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy line iterator borrowed from a [`LineFramer`] for one `feed` call.
///
/// Lines not consumed before the iterator is dropped stay buffered and are
/// emitted by the next `feed`.
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.framer.next_line()
    }
}
