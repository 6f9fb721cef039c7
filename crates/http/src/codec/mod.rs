//! Decode machinery binding the external head parser to the message model.
//!
//! This module scans complete message buffers and replays them into a
//! [`MessageSink`] as a fixed event sequence. Head scanning is delegated to
//! `httparse`; body framing follows the Transfer-Encoding and Content-Length
//! rules of RFC 9112.
//!
//! # Architecture
//!
//! - [`decode_request`]: drives a request buffer into a sink
//! - [`decode_response`]: drives a response buffer into a sink
//! - [`MessageSink`] / [`StartLine`]: the event contract
//! - [`ChunkedDecoder`]: the chunked transfer encoding state machine
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use zc_http::codec::decode_request;
//! use zc_http::protocol::Request;
//!
//! let buf = Bytes::from_static(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
//! let mut request = Request::new();
//! decode_request(&buf, &mut request).unwrap();
//! assert_eq!(request.message().header_value("host").unwrap(), "example.com");
//! ```

use bytes::Bytes;
use tracing::trace;

use crate::protocol::{ParseError, Token};

mod chunked_decoder;
mod request_decoder;
mod response_decoder;
mod sink;

pub use chunked_decoder::ChunkItem;
pub use chunked_decoder::ChunkedDecoder;
pub use request_decoder::decode_request;
pub use response_decoder::decode_response;
pub use sink::MessageSink;
pub use sink::StartLine;

/// Scratch capacity for the head parser. Wire messages with more header
/// lines than this fail with [`ParseError::TooManyHeaders`] before the
/// collection capacity is even consulted.
pub(crate) const MAX_DECODE_HEADERS: usize = 128;

/// Body framing derived from the Transfer-Encoding and Content-Length
/// headers of a parsed head.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// No framing headers present
    Empty,
}

impl PayloadSize {
    /// Returns true if the payload uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    /// Returns true if no framing headers were present
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}

/// Classifies the body framing of a parsed head.
///
/// Follows RFC 9112: chunked wins when Transfer-Encoding names it as the
/// final encoding, Content-Length gives a fixed length, and both present at
/// once is an error.
pub(crate) fn parse_payload(headers: &[httparse::Header<'_>]) -> Result<PayloadSize, ParseError> {
    let mut te_value = None;
    let mut cl_value = None;
    for header in headers {
        if header.name.eq_ignore_ascii_case(http::header::TRANSFER_ENCODING.as_str()) {
            te_value = Some(header.value);
        } else if header.name.eq_ignore_ascii_case(http::header::CONTENT_LENGTH.as_str()) {
            cl_value = Some(header.value);
        }
    }

    match (te_value, cl_value) {
        (None, None) => Ok(PayloadSize::Empty),

        (Some(te), None) => {
            if is_chunked(te) {
                Ok(PayloadSize::Chunked)
            } else {
                Ok(PayloadSize::Empty)
            }
        }

        (None, Some(cl)) => {
            let cl_str =
                std::str::from_utf8(cl).map_err(|_e| ParseError::invalid_content_length("value is not valid utf8"))?;

            let length = cl_str
                .trim()
                .parse::<u64>()
                .map_err(|_e| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;

            Ok(PayloadSize::Length(length))
        }

        (Some(_), Some(_)) => Err(ParseError::invalid_content_length("transfer_encoding and content_length both present in headers")),
    }
}

/// Checks if the Transfer-Encoding value indicates chunked encoding.
///
/// According to RFC 7230, chunked must be the last encoding if present.
fn is_chunked(value: &[u8]) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    if let Some(bytes) = value.rsplit(|b| *b == b',').next() {
        return bytes.trim_ascii() == CHUNKED;
    }
    false
}

/// Emits the single body event of a fixed-length payload.
///
/// A buffer shorter than the declared length yields whatever bytes remain;
/// truncation of a fixed-length body is not a parse error here.
pub(crate) fn emit_fixed_body<S: MessageSink>(length: u64, rest: &Bytes, sink: &mut S) -> Result<(), ParseError> {
    let expected = match length {
        r if r > usize::MAX as u64 => usize::MAX,
        r => r as usize,
    };
    let take = std::cmp::min(expected, rest.len());
    trace!(declared = length, take, "emitting fixed length body");
    if take > 0 {
        sink.on_body(Token::from(rest.slice(..take)))?;
    }
    Ok(())
}

/// Runs the chunked decoder over the remainder of the buffer, emitting one
/// body event per chunk data run. Running out of buffer before the
/// terminating chunk is [`ParseError::Incomplete`].
pub(crate) fn emit_chunked_body<S: MessageSink>(rest: &mut Bytes, sink: &mut S) -> Result<(), ParseError> {
    let mut decoder = ChunkedDecoder::new();
    loop {
        match decoder.decode(rest)? {
            Some(ChunkItem::Data(bytes)) => sink.on_body(Token::from(bytes))?,
            Some(ChunkItem::Eof) => return Ok(()),
            None => return Err(ParseError::Incomplete),
        }
    }
}

/// Slices `part` back out of `buf` without copying.
///
/// `part` must be a subslice of `buf`, which holds for everything the head
/// parser hands back.
pub(crate) fn slice_of(buf: &Bytes, part: &[u8]) -> Bytes {
    let start = part.as_ptr() as usize - buf.as_ptr() as usize;
    buf.slice(start..start + part.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(name: &'a str, value: &'a [u8]) -> httparse::Header<'a> {
        httparse::Header { name, value }
    }

    #[test]
    fn check_is_chunked() {
        assert!(is_chunked(b"chunked"));
        assert!(is_chunked(b"gzip, chunked"));
        assert!(is_chunked(b" chunked "));
        assert!(!is_chunked(b"chunked, gzip"));
        assert!(!is_chunked(b"gzip"));
        assert!(!is_chunked(b""));
    }

    #[test]
    fn classify_no_framing_headers() {
        let headers = [header("Host", b"example.com")];
        assert_eq!(parse_payload(&headers).unwrap(), PayloadSize::Empty);
    }

    #[test]
    fn classify_content_length() {
        let headers = [header("Content-Length", b" 42 ")];
        assert_eq!(parse_payload(&headers).unwrap(), PayloadSize::Length(42));
    }

    #[test]
    fn classify_chunked_last_encoding() {
        let headers = [header("Transfer-Encoding", b"gzip, chunked")];
        assert_eq!(parse_payload(&headers).unwrap(), PayloadSize::Chunked);

        let not_last = [header("Transfer-Encoding", b"chunked, gzip")];
        assert_eq!(parse_payload(&not_last).unwrap(), PayloadSize::Empty);
    }

    #[test]
    fn classify_conflicting_framing_is_an_error() {
        let headers = [header("Transfer-Encoding", b"chunked"), header("Content-Length", b"5")];
        let err = parse_payload(&headers).unwrap_err();
        assert!(matches!(err, ParseError::InvalidContentLength { .. }));
    }

    #[test]
    fn classify_bad_content_length_is_an_error() {
        let headers = [header("Content-Length", b"five")];
        let err = parse_payload(&headers).unwrap_err();
        assert!(matches!(err, ParseError::InvalidContentLength { .. }));
    }

    #[test]
    fn slice_of_shares_the_buffer() {
        let buf = Bytes::from_static(b"abcdef");
        let part = &buf[2..5];

        let sliced = slice_of(&buf, part);
        assert_eq!(&sliced[..], b"cde");
        assert_eq!(sliced.as_ptr(), part.as_ptr());
    }
}
