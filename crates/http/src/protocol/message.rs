//! HTTP message aggregate combining a header section and an owned body.
//!
//! The message keeps one invariant at all times: a non-empty body implies a
//! `content-length` field whose value is the exact decimal byte length of the
//! body, and clearing the body erases that field. Both body mutators rewrite
//! the field in place, so repeated body updates never accumulate duplicate
//! entries.

use bytes::{Bytes, BytesMut};
use http::HeaderName;

use crate::protocol::{Header, Token};

// Borrowing through a static item gives the name a 'static lifetime, which
// lets the field token view it without copying.
static CONTENT_LENGTH: HeaderName = http::header::CONTENT_LENGTH;

/// Initial buffer capacity reserved when serializing a whole message.
pub(crate) const INIT_ENCODE_SIZE: usize = 4 * 1024;

/// A header section plus an owned message body.
///
/// Header fields are zero-copy [`Token`] pairs; the body is owned and
/// growable so it can be assembled chunk by chunk during parsing.
#[derive(Debug, Clone, Default)]
pub struct Message {
    header: Header,
    body: BytesMut,
}

impl Message {
    /// Creates an empty message with the default field capacity.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an empty message whose header section holds at most `limit`
    /// fields. A limit of zero falls back to the default capacity.
    pub fn with_limit(limit: usize) -> Self {
        Self { header: Header::with_limit(limit), body: BytesMut::new() }
    }

    /// Returns the header section.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Appends a header field. See [`Header::add_field`].
    pub fn add_header(&mut self, name: Token, value: Token) -> bool {
        self.header.add_field(name, value)
    }

    /// Sets or appends a header field. See [`Header::set_field`].
    pub fn set_header(&mut self, name: Token, value: Token) -> bool {
        self.header.set_field(name, value)
    }

    /// Appends a batch of header fields, subject to the usual capacity and
    /// empty-name rules.
    pub fn add_headers<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (Token, Token)>,
    {
        self.header.extend(pairs);
    }

    /// Returns the value of the first header field matching `name`.
    pub fn header_value(&self, name: impl AsRef<[u8]>) -> Option<&Token> {
        self.header.value(name)
    }

    /// Returns true if a header field matching `name` exists.
    pub fn has_header(&self, name: impl AsRef<[u8]>) -> bool {
        self.header.contains(name)
    }

    /// Returns the number of header fields.
    #[inline]
    pub fn header_size(&self) -> usize {
        self.header.len()
    }

    /// Returns true if the header section holds no fields.
    #[inline]
    pub fn is_header_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Returns the header field capacity.
    #[inline]
    pub fn header_limit(&self) -> usize {
        self.header.limit()
    }

    /// Removes the first header field matching `name`.
    pub fn erase_header(&mut self, name: impl AsRef<[u8]>) {
        self.header.remove(name);
    }

    /// Removes every header field.
    pub fn clear_headers(&mut self) {
        self.header.clear();
    }

    /// Replaces the body wholesale and rewrites the `content-length` field.
    ///
    /// An empty input leaves the message untouched.
    pub fn add_body(&mut self, body: impl AsRef<[u8]>) {
        let body = body.as_ref();
        if body.is_empty() {
            return;
        }
        self.body.clear();
        self.body.extend_from_slice(body);
        self.sync_content_length();
    }

    /// Appends a chunk to the body and rewrites the `content-length` field.
    ///
    /// This is the streaming path used while a body arrives in pieces.
    pub fn add_chunk(&mut self, chunk: impl AsRef<[u8]>) {
        let chunk = chunk.as_ref();
        if chunk.is_empty() {
            return;
        }
        self.body.extend_from_slice(chunk);
        self.sync_content_length();
    }

    /// Returns true if the body holds any bytes.
    #[inline]
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Returns the body bytes.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Empties the body and erases the `content-length` field.
    pub fn clear_body(&mut self) {
        self.body.clear();
        self.header.remove(CONTENT_LENGTH.as_str());
    }

    /// Returns the message to its empty state, keeping the field capacity.
    pub fn reset(&mut self) {
        self.header.clear();
        self.body.clear();
    }

    /// Serializes the header section followed by the raw body.
    pub fn encode_to(&self, dst: &mut BytesMut) {
        self.header.encode_to(dst);
        dst.extend_from_slice(&self.body);
    }

    /// Serializes the message into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(INIT_ENCODE_SIZE);
        self.encode_to(&mut dst);
        dst.freeze()
    }

    /// Renders the message as text, replacing invalid UTF-8 in the body.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    fn sync_content_length(&mut self) {
        let name = Token::from_static(CONTENT_LENGTH.as_str());
        let value = Token::from(self.body.len().to_string());
        self.header.set_field(name, value);
    }
}
