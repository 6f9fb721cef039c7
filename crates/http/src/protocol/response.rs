//! HTTP response model.
//!
//! A [`Response`] is a [`Message`] plus the status line: version, status
//! code and reason phrase. Like [`Request`](crate::protocol::Request) it
//! doubles as the event sink for its own decoder, so
//! [`Response::parse`] assembles a complete value from a buffer in one
//! call.

use bytes::{BufMut, Bytes, BytesMut};
use http::{StatusCode, Version};

use crate::codec::{decode_response, MessageSink, StartLine};
use crate::protocol::{INIT_ENCODE_SIZE, Message, ParseError, Token};
use crate::utils::{ensure, version_bytes};

/// An HTTP response.
///
/// Defaults to `HTTP/1.1 200 OK` with no header fields and no body.
#[derive(Debug, Clone, Default)]
pub struct Response {
    message: Message,
    status: StatusCode,
    version: Version,
    pending_field: Option<Token>,
}

impl Response {
    /// Creates a response with the given status line and no fields.
    pub fn new(status: StatusCode, version: Version) -> Self {
        Self { status, version, ..Default::default() }
    }

    /// Parses one complete response out of `buf`.
    ///
    /// See [`decode_response`](crate::codec::decode_response) for the
    /// errors a malformed or truncated buffer produces.
    pub fn parse(buf: impl Into<Bytes>) -> Result<Self, ParseError> {
        Self::parse_with_limit(buf, 0)
    }

    /// Parses like [`parse`](Response::parse) with an explicit header field
    /// capacity. A limit of zero means the default capacity.
    pub fn parse_with_limit(buf: impl Into<Bytes>, limit: usize) -> Result<Self, ParseError> {
        let buf = buf.into();
        let mut response = Self { message: Message::with_limit(limit), ..Default::default() };
        decode_response(&buf, &mut response)?;
        Ok(response)
    }

    /// Returns the status code.
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    pub fn set_status_code(&mut self, status: StatusCode) {
        self.status = status;
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

    /// Clears the fields and the body and restores the status to `200 OK`.
    ///
    /// The version is left as it is, so a recycled response keeps speaking
    /// whatever the previous exchange negotiated.
    pub fn reset(&mut self) {
        self.status = StatusCode::OK;
        self.pending_field = None;
        self.message.reset();
    }

    /// Serializes the status line followed by the message.
    ///
    /// The reason phrase is the canonical one for the code, or `Unknown`
    /// for codes without one.
    pub fn encode_to(&self, dst: &mut BytesMut) {
        dst.put_slice(version_bytes(self.version));
        dst.put_slice(b" ");
        dst.put_slice(self.status.as_str().as_bytes());
        dst.put_slice(b" ");
        dst.put_slice(self.status.canonical_reason().unwrap_or("Unknown").as_bytes());
        dst.put_slice(b"\r\n");
        self.message.encode_to(dst);
    }

    /// Serializes the response into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(INIT_ENCODE_SIZE);
        self.encode_to(&mut dst);
        dst.freeze()
    }

    /// Renders the response as text, replacing invalid UTF-8 in the body.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

/// Builds the response from the decode event stream, with the same strict
/// field/value alternation as the request sink.
impl MessageSink for Response {
    fn on_message_begin(&mut self) -> Result<(), ParseError> {
        self.pending_field = None;
        Ok(())
    }

    fn on_header_field(&mut self, name: Token) -> Result<(), ParseError> {
        ensure!(self.pending_field.is_none(), ParseError::invalid_header("field name arrived while another was pending"));
        self.pending_field = Some(name);
        Ok(())
    }

    fn on_header_value(&mut self, value: Token) -> Result<(), ParseError> {
        match self.pending_field.take() {
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
        if let Some(status) = start_line.status() {
            self.status = status;
        }
        Ok(())
    }

    fn on_body(&mut self, chunk: Token) -> Result<(), ParseError> {
        self.message.add_chunk(chunk.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn default_is_ok() {
        let response = Response::default();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.version(), Version::HTTP_11);
        assert!(response.message().is_header_empty());
        assert!(!response.message().has_body());
    }

    #[test]
    fn parse_fills_every_part() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 12\r\n\r\nHello world!";
        let response = Response::parse(raw).unwrap();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.version(), Version::HTTP_11);
        assert_eq!(response.message().header_value("content-type").unwrap(), "text/plain");
        assert_eq!(response.message().body(), b"Hello world!");
    }

    #[test]
    fn parse_assembles_chunked_body() {
        let raw = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n6\r\nhello \r\n6\r\nworld!\r\n0\r\n\r\n";
        let response = Response::parse(raw).unwrap();

        assert_eq!(response.message().body(), b"hello world!");
        assert_eq!(response.message().header_value("content-length").unwrap(), "12");
    }

    #[test]
    fn parse_discards_trailers() {
        let raw = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n2\r\nok\r\n0\r\nExpires: never\r\n\r\n";
        let response = Response::parse(raw).unwrap();

        assert_eq!(response.message().body(), b"ok");
        assert!(!response.message().has_header("Expires"));
    }

    #[test]
    fn unframed_body_reads_to_the_end() {
        let raw = "HTTP/1.0 200 OK\r\n\r\neverything until close";
        let response = Response::parse(raw).unwrap();

        assert_eq!(response.version(), Version::HTTP_10);
        assert_eq!(response.message().body(), b"everything until close");
    }

    #[test]
    fn conflicting_framing_headers_fail() {
        let str = indoc! {r"
        HTTP/1.1 200 OK
        Transfer-Encoding: chunked
        Content-Length: 5

        ruins"};

        let err = Response::parse(Bytes::copy_from_slice(str.as_bytes())).unwrap_err();
        assert!(matches!(err, ParseError::InvalidContentLength { .. }));
    }

    #[test]
    fn reset_keeps_the_version() {
        let mut response = Response::parse("HTTP/1.0 404 Not Found\r\nServer: old\r\n\r\n").unwrap();
        response.message_mut().add_body("gone");

        response.reset();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.version(), Version::HTTP_10);
        assert!(response.message().is_header_empty());
        assert!(!response.message().has_body());
    }

    #[test]
    fn encode_uses_canonical_reason() {
        let response = Response::new(StatusCode::NOT_FOUND, Version::HTTP_11);
        assert_eq!(response.to_text(), "HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn encode_falls_back_for_unknown_codes() {
        let status = StatusCode::from_u16(599).unwrap();
        let response = Response::new(status, Version::HTTP_11);
        assert_eq!(response.to_text(), "HTTP/1.1 599 Unknown\r\n\r\n");
    }

    #[test]
    fn encode_then_parse_round_trips() {
        let mut response = Response::new(StatusCode::CREATED, Version::HTTP_11);
        response.message_mut().add_header("Location".into(), "/items/7".into());
        response.message_mut().add_body("created");

        let reparsed = Response::parse(response.to_bytes()).unwrap();

        assert_eq!(reparsed.status_code(), StatusCode::CREATED);
        assert_eq!(reparsed.message().header_value("location").unwrap(), "/items/7");
        assert_eq!(reparsed.message().body(), b"created");
    }

    #[test]
    fn parse_rejects_out_of_range_status() {
        let err = Response::parse("HTTP/1.1 099 Odd\r\n\r\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStatus(Some(99))));
    }
}
