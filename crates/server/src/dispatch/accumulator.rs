use bytes::BytesMut;

/// Collects a request body across chunk invocations.
///
/// Append-only. The length is tracked by the buffer itself, nothing relies on
/// a terminator, so arbitrary bytes are kept as delivered.
#[derive(Debug, Default)]
pub struct BodyAccumulator {
    buf: BytesMut,
}

impl BodyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }

    #[inline]
    pub fn append(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
