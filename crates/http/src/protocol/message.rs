use bytes::Bytes;

/// One invocation of a request's call sequence.
///
/// The engine delivers exactly one `Header` first, then zero or more
/// `Payload(PayloadItem::Chunk(_))`, then a single `Payload(PayloadItem::Eof)`.
#[derive(Debug)]
pub enum Message<T> {
    /// Contains the header information of type `T`
    Header(T),
    /// Contains a chunk of payload data or EOF marker
    Payload(PayloadItem),
}

/// Represents an item in the request payload stream.
///
/// `Eof` is the terminal "body complete" signal. A `Chunk` is never empty:
/// zero-length data frames are swallowed by the engine so that an empty chunk
/// can not be confused with the end of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    /// A non-empty chunk of payload data
    Chunk(Bytes),
    /// Marks the end of the payload stream
    Eof,
}

impl<T> Message<T> {
    /// Returns true if this message contains payload data
    #[inline]
    pub fn is_payload(&self) -> bool {
        matches!(self, Message::Payload(_))
    }

    /// Returns true if this message contains header information
    #[inline]
    pub fn is_header(&self) -> bool {
        matches!(self, Message::Header(_))
    }

    /// Converts the message into a `PayloadItem` if it contains payload data
    ///
    /// Returns None if the message contains header information
    pub fn into_payload_item(self) -> Option<PayloadItem> {
        match self {
            Message::Header(_) => None,
            Message::Payload(payload_item) => Some(payload_item),
        }
    }
}

impl<T> From<PayloadItem> for Message<T> {
    fn from(item: PayloadItem) -> Self {
        Self::Payload(item)
    }
}

impl PayloadItem {
    /// Builds a chunk item, mapping empty data to `None`.
    pub fn chunk(bytes: Bytes) -> Option<Self> {
        if bytes.is_empty() { None } else { Some(Self::Chunk(bytes)) }
    }

    /// Returns true if this item represents the end of the payload stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    /// Returns a reference to the contained bytes if this is a Chunk
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }

    /// Length of the carried data, `0` for `Eof`.
    pub fn data_len(&self) -> usize {
        self.as_bytes().map_or(0, Bytes::len)
    }

    /// Consumes the `PayloadItem` and returns the contained bytes if this is a Chunk
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_is_not_a_chunk() {
        assert_eq!(PayloadItem::chunk(Bytes::new()), None);
        assert_eq!(PayloadItem::chunk(Bytes::from_static(b"{}")), Some(PayloadItem::Chunk(Bytes::from_static(b"{}"))));
    }

    #[test]
    fn eof_carries_nothing() {
        let eof = PayloadItem::Eof;
        assert!(eof.is_eof());
        assert_eq!(eof.data_len(), 0);
        assert_eq!(eof.into_bytes(), None);
    }

    #[test]
    fn message_kinds() {
        let header: Message<&str> = Message::Header("GET /targets/");
        assert!(header.is_header());
        assert_eq!(header.into_payload_item(), None);

        let payload: Message<&str> = PayloadItem::Chunk(Bytes::from_static(b"abc")).into();
        assert!(payload.is_payload());
        assert_eq!(payload.into_payload_item().map(|item| item.data_len()), Some(3));
    }
}
