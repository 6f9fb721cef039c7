//! Request decode driver.
//!
//! Scans a complete request buffer and replays it into a [`MessageSink`] as
//! the fixed event sequence: message begin, the request target, alternating
//! header field and value events in wire order, headers complete with the
//! start line, body events per the framing headers, message complete.
//!
//! # Implementation Details
//!
//! The head is parsed in one shot with `httparse` over an uninitialized
//! header scratch array. Header tokens are recovered from the parser's
//! borrowed slices by pointer arithmetic against the source buffer, so no
//! header byte is ever copied.

use std::mem::MaybeUninit;

use bytes::Bytes;
use http::{Method, Version};
use httparse::{Error, Status};
use tracing::trace;

use crate::codec::{emit_chunked_body, emit_fixed_body, parse_payload, slice_of};
use crate::codec::{MessageSink, PayloadSize, StartLine, MAX_DECODE_HEADERS};
use crate::protocol::{ParseError, Token};

/// Decodes one complete request from `buf` into `sink`.
///
/// The buffer must hold the entire message: a head that `httparse` reports
/// as partial is [`ParseError::Incomplete`]. Requests without framing
/// headers have no body; trailing bytes after such a head are ignored.
///
/// # Errors
///
/// Returns `ParseError` if:
/// - The number of headers exceeds the decoder scratch capacity
/// - The head is truncated or syntactically invalid
/// - The HTTP version is not 1.0 or 1.1
/// - The framing headers conflict or carry an unparsable length
/// - The sink rejects an event
pub fn decode_request<S: MessageSink>(buf: &Bytes, sink: &mut S) -> Result<(), ParseError> {
    sink.on_message_begin()?;

    // Create an empty HTTP request parser and uninitialized headers array
    let mut req = httparse::Request::new(&mut []);
    let mut headers: [MaybeUninit<httparse::Header>; MAX_DECODE_HEADERS] = unsafe { MaybeUninit::uninit().assume_init() };

    // Parse request headers using httparse, return error if exceeds max headers or invalid format
    let parsed_result = req.parse_with_uninit_headers(buf, &mut headers).map_err(|e| match e {
        Error::TooManyHeaders => ParseError::too_many_headers(MAX_DECODE_HEADERS),
        e => ParseError::invalid_header(e.to_string()),
    });

    let body_offset = match parsed_result? {
        Status::Complete(body_offset) => body_offset,
        Status::Partial => return Err(ParseError::Incomplete),
    };
    trace!(head_size = body_offset, "parsed request head");

    let version = match req.version {
        Some(0) => Version::HTTP_10,
        Some(1) => Version::HTTP_11,
        // HTTP/2 and HTTP/3 heads never reach this decoder
        _ => return Err(ParseError::InvalidVersion(req.version)),
    };

    let method = match req.method {
        Some(method) => Method::from_bytes(method.as_bytes()).map_err(|_e| ParseError::InvalidMethod)?,
        None => return Err(ParseError::InvalidMethod),
    };

    let path = req.path.ok_or(ParseError::InvalidUri)?;
    sink.on_url(Token::from(slice_of(buf, path.as_bytes())))?;

    for header in req.headers.iter() {
        sink.on_header_field(Token::from(slice_of(buf, header.name.as_bytes())))?;
        sink.on_header_value(Token::from(slice_of(buf, header.value)))?;
    }

    let payload_size = parse_payload(req.headers)?;
    sink.on_headers_complete(StartLine::request(version, method))?;

    let mut rest = buf.slice(body_offset..);
    match payload_size {
        PayloadSize::Empty => {}
        PayloadSize::Length(length) => emit_fixed_body(length, &rest, sink)?,
        PayloadSize::Chunked => emit_chunked_body(&mut rest, sink)?,
    }

    sink.on_message_complete()
}
