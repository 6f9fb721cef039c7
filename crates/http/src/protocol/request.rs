//! HTTP request model.
//!
//! A [`Request`] is a [`Message`] plus the request line: method, target URI
//! and version. It can be assembled field by field, or parsed in one shot
//! from a complete buffer through [`Request::parse`], which drives the
//! request decoder in [`crate::codec`] with the request itself as the event
//! sink.

use bytes::{BufMut, Bytes, BytesMut};
use http::{Method, Uri, Version};

use crate::codec::{decode_request, MessageSink, StartLine};
use crate::protocol::{INIT_ENCODE_SIZE, Message, ParseError, Token};
use crate::utils::{ensure, version_bytes};

/// An HTTP request.
///
/// Defaults to `GET / HTTP/1.1` with no header fields and no body. Failed
/// parses never produce a request value; a request in hand is always
/// well-formed.
#[derive(Debug, Clone, Default)]
pub struct Request {
    message: Message,
    method: Method,
    uri: Uri,
    version: Version,
    pending_field: Option<Token>,
}

impl Request {
    /// Creates the default request, `GET / HTTP/1.1`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses one complete request out of `buf`.
    ///
    /// The whole message must be present; see
    /// [`decode_request`](crate::codec::decode_request) for the errors a
    /// malformed or truncated buffer produces.
    pub fn parse(buf: impl Into<Bytes>) -> Result<Self, ParseError> {
        Self::parse_with_limit(buf, 0)
    }

    /// Parses like [`parse`](Request::parse) with an explicit header field
    /// capacity. Fields beyond the capacity are dropped silently, matching
    /// the collection contract. A limit of zero means the default capacity.
    pub fn parse_with_limit(buf: impl Into<Bytes>, limit: usize) -> Result<Self, ParseError> {
        let buf = buf.into();
        let mut request = Self { message: Message::with_limit(limit), ..Default::default() };
        decode_request(&buf, &mut request)?;
        Ok(request)
    }

    /// Returns the request method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Sets the request method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Returns the target URI.
    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Sets the target URI.
    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = uri;
    }

    /// Returns the HTTP version.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Sets the HTTP version.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Returns the message carrying the header fields and the body.
    #[inline]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the message mutably.
    #[inline]
    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    /// Looks up `name` in the query string of the target URI.
    ///
    /// This is a plain substring search. The first occurrence of `name` is
    /// taken; the value is the text after the first `=` between the match
    /// and the next `&`. No percent-decoding is performed.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        let query = self.uri.query()?;
        find_form_value(query, name)
    }

    /// Looks up `name` in a form-encoded body, with the same substring
    /// search as [`query_value`](Request::query_value).
    ///
    /// Returns `None` unless the method is POST and the body is valid UTF-8.
    pub fn post_value(&self, name: &str) -> Option<&str> {
        if self.method != Method::POST {
            return None;
        }
        let body = std::str::from_utf8(self.message.body()).ok()?;
        find_form_value(body, name)
    }

    /// Returns the request to its default state: `GET / HTTP/1.1`, no
    /// fields, no body. The header field capacity is kept.
    pub fn reset(&mut self) {
        self.method = Method::GET;
        self.uri = Uri::default();
        self.version = Version::HTTP_11;
        self.pending_field = None;
        self.message.reset();
    }

    /// Serializes the request line followed by the message.
    pub fn encode_to(&self, dst: &mut BytesMut) {
        dst.put_slice(self.method.as_str().as_bytes());
        dst.put_slice(b" ");
        dst.put_slice(self.uri.to_string().as_bytes());
        dst.put_slice(b" ");
        dst.put_slice(version_bytes(self.version));
        dst.put_slice(b"\r\n");
        self.message.encode_to(dst);
    }

    /// Serializes the request into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(INIT_ENCODE_SIZE);
        self.encode_to(&mut dst);
        dst.freeze()
    }

    /// Renders the request as text, replacing invalid UTF-8 in the body.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

/// Builds the request from the decode event stream.
///
/// Header field and value events must alternate strictly; a second field
/// event before a value, or a value event with no field pending, is a
/// malformed stream and fails the parse.
impl MessageSink for Request {
    fn on_message_begin(&mut self) -> Result<(), ParseError> {
        self.method = Method::GET;
        self.pending_field = None;
        Ok(())
    }

    fn on_url(&mut self, url: Token) -> Result<(), ParseError> {
        // keeps the target zero-copy, the uri shares the parse buffer
        self.uri = Uri::from_maybe_shared(url.into_bytes()).map_err(|_e| ParseError::InvalidUri)?;
        Ok(())
    }

    fn on_header_field(&mut self, name: Token) -> Result<(), ParseError> {
        ensure!(self.pending_field.is_none(), ParseError::invalid_header("field name arrived while another was pending"));
        self.pending_field = Some(name);
        Ok(())
    }

    fn on_header_value(&mut self, value: Token) -> Result<(), ParseError> {
        match self.pending_field.take() {
            // capacity overflow drops the pair silently, per the collection contract
            Some(name) => {
                self.message.add_header(name, value);
                Ok(())
            }
            None => Err(ParseError::invalid_header("field value arrived with no field name pending")),
        }
    }

    fn on_headers_complete(&mut self, start_line: StartLine) -> Result<(), ParseError> {
        ensure!(self.pending_field.is_none(), ParseError::invalid_header("field name still pending at end of headers"));
        self.version = start_line.version();
        if let Some(method) = start_line.method() {
            self.method = method.clone();
        }
        Ok(())
    }

    fn on_body(&mut self, chunk: Token) -> Result<(), ParseError> {
        self.message.add_chunk(chunk.as_bytes());
        Ok(())
    }
}

/// The shared substring lookup behind query and form value access.
fn find_form_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    let start = raw.find(name)?;
    // the pair runs to the next `&`; the `=` may sit anywhere after the match
    let segment = &raw[start..];
    let segment = segment.find('&').map_or(segment, |end| &segment[..end]);
    let eq = segment.find('=')?;
    Some(&segment[eq + 1..])
}
