//! Response decode driver.
//!
//! Mirrors the request driver without the target event: message begin,
//! alternating header field and value events, headers complete with version
//! and status, body events, message complete.
//!
//! Responses differ from requests in one framing rule: a head with neither
//! Content-Length nor a chunked Transfer-Encoding takes the whole remainder
//! of the buffer as its body, the read-until-close convention of HTTP/1.0
//! style responses.

use bytes::Bytes;
use http::{StatusCode, Version};
use httparse::{Error, Status};
use tracing::trace;

use crate::codec::{emit_chunked_body, emit_fixed_body, parse_payload, slice_of};
use crate::codec::{MessageSink, PayloadSize, StartLine, MAX_DECODE_HEADERS};
use crate::protocol::{ParseError, Token};

/// Decodes one complete response from `buf` into `sink`.
///
/// The buffer must hold the entire message: a head that `httparse` reports
/// as partial is [`ParseError::Incomplete`].
///
/// # Errors
///
/// Returns `ParseError` if:
/// - The number of headers exceeds the decoder scratch capacity
/// - The head is truncated or syntactically invalid
/// - The HTTP version is not 1.0 or 1.1
/// - The status code is missing or out of range
/// - The framing headers conflict or carry an unparsable length
/// - The sink rejects an event
pub fn decode_response<S: MessageSink>(buf: &Bytes, sink: &mut S) -> Result<(), ParseError> {
    sink.on_message_begin()?;

    let mut headers = [httparse::EMPTY_HEADER; MAX_DECODE_HEADERS];
    let mut resp = httparse::Response::new(&mut headers);

    let parsed_result = resp.parse(buf).map_err(|e| match e {
        Error::TooManyHeaders => ParseError::too_many_headers(MAX_DECODE_HEADERS),
        e => ParseError::invalid_header(e.to_string()),
    });

    let body_offset = match parsed_result? {
        Status::Complete(body_offset) => body_offset,
        Status::Partial => return Err(ParseError::Incomplete),
    };
    trace!(head_size = body_offset, "parsed response head");

    let version = match resp.version {
        Some(0) => Version::HTTP_10,
        Some(1) => Version::HTTP_11,
        _ => return Err(ParseError::InvalidVersion(resp.version)),
    };

    let status = match resp.code {
        Some(code) => StatusCode::from_u16(code).map_err(|_e| ParseError::InvalidStatus(resp.code))?,
        None => return Err(ParseError::InvalidStatus(None)),
    };

    for header in resp.headers.iter() {
        sink.on_header_field(Token::from(slice_of(buf, header.name.as_bytes())))?;
        sink.on_header_value(Token::from(slice_of(buf, header.value)))?;
    }

    let payload_size = parse_payload(resp.headers)?;
    sink.on_headers_complete(StartLine::response(version, status))?;

    let mut rest = buf.slice(body_offset..);
    match payload_size {
        // read until close: the rest of the buffer is the body
        PayloadSize::Empty => {
            if !rest.is_empty() {
                trace!(len = rest.len(), "emitting rest of buffer as body");
                sink.on_body(Token::from(rest))?;
            }
        }
        PayloadSize::Length(length) => emit_fixed_body(length, &rest, sink)?,
        PayloadSize::Chunked => emit_chunked_body(&mut rest, sink)?,
    }

    sink.on_message_complete()
}
