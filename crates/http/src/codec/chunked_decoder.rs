//! Decoder for HTTP chunked transfer encoding.
//!
//! This module provides functionality to decode message bodies that use
//! chunked transfer encoding as specified in
//! [RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1).
//!
//! The decoder walks the buffer byte by byte through a state machine and
//! hands chunk data out as zero-copy slices of the source buffer. Trailer
//! fields after the last chunk are validated and discarded.

use crate::protocol::ParseError;
use bytes::{Buf, Bytes};
use std::io;
use std::io::ErrorKind;
use tracing::trace;
use ChunkedState::*;

/// One step of decoded chunked output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkItem {
    /// A run of chunk data, sliced out of the source buffer.
    Data(Bytes),
    /// The terminating zero-sized chunk and its trailers were consumed.
    Eof,
}

impl ChunkItem {
    /// Returns true if this item marks the end of the chunked body.
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, ChunkItem::Eof)
    }

    /// Returns the contained bytes if this is a data item.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ChunkItem::Data(bytes) => Some(bytes),
            ChunkItem::Eof => None,
        }
    }

    /// Consumes the item and returns the contained bytes if this is a data
    /// item.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            ChunkItem::Data(bytes) => Some(bytes),
            ChunkItem::Eof => None,
        }
    }
}

/// A decoder for HTTP chunked transfer encoding.
///
/// The decoder processes incoming bytes according to the chunked format:
/// - Each chunk starts with its size in hexadecimal
/// - Followed by optional extensions and CRLF
/// - Then the chunk data and CRLF
/// - A zero-sized chunk indicates the end of the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
    remaining_size: u64,
}

impl ChunkedDecoder {
    /// Creates a new decoder positioned at the size line of the first chunk.
    pub fn new() -> Self {
        Self { state: Size, remaining_size: 0 }
    }

    /// Returns true once the terminating chunk has been consumed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == End
    }

    /// Decodes the next piece of chunked data from the buffer.
    ///
    /// # Returns
    /// - `Ok(Some(ChunkItem::Data(bytes)))` when a run of chunk data was decoded
    /// - `Ok(Some(ChunkItem::Eof))` when the final chunk was processed
    /// - `Ok(None)` when the buffer ran out before the encoding completed
    /// - `Err(ParseError)` if the chunked framing is invalid
    pub fn decode(&mut self, src: &mut Bytes) -> Result<Option<ChunkItem>, ParseError> {
        loop {
            if self.state == End {
                trace!("finished reading chunked data");
                return Ok(Some(ChunkItem::Eof));
            }

            if src.is_empty() {
                // need more data
                return Ok(None);
            }

            let mut buf = None;

            self.state = match self.state.step(src, &mut self.remaining_size, &mut buf) {
                Ok(Some(new_state)) => new_state,
                Ok(None) => return Ok(None),
                Err(e) => return Err(ParseError::io(e)),
            };

            if let Some(bytes) = buf {
                trace!(len = bytes.len(), "read chunked bytes");
                return Ok(Some(ChunkItem::Data(bytes)));
            }
        }
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    /// Read the chunk size in hex
    Size,
    /// Handle whitespace after size
    SizeLws,
    /// Skip chunk extensions
    Extension,
    /// Read LF after chunk size
    SizeLf,
    /// Read chunk data
    Body,
    /// Read CR after chunk data
    BodyCr,
    /// Read LF after chunk data
    BodyLf,
    /// Read optional trailer fields
    Trailer,
    /// Read LF after trailer
    TrailerLf,
    /// Read final CR
    EndCr,
    /// Read final LF
    EndLf,
    /// Final state after reading last chunk
    End,
}

macro_rules! try_next_byte {
    ($src:ident) => {{
        if $src.len() > 0 {
            $src.get_u8()
        } else {
            return Ok(None);
        }
    }};
}

impl ChunkedState {
    /// Processes the next step in the chunked decoding state machine.
    ///
    /// # Arguments
    /// * `src` - Source buffer containing the chunked data
    /// * `remaining_size` - Tracks remaining bytes in current chunk
    /// * `buf` - Receives decoded chunk data
    ///
    /// # Returns
    /// The next state, `Ok(None)` when the buffer ran dry mid-step, or an
    /// error if invalid encoding is detected.
    fn step(
        &self,
        src: &mut Bytes,
        remaining_size: &mut u64,
        buf: &mut Option<Bytes>,
    ) -> Result<Option<ChunkedState>, io::Error> {
        match self {
            Size => ChunkedState::read_size(src, remaining_size),
            SizeLws => ChunkedState::read_size_lws(src),
            Extension => ChunkedState::read_extension(src),
            SizeLf => ChunkedState::read_size_lf(src, remaining_size),
            Body => ChunkedState::read_body(src, remaining_size, buf),
            BodyCr => ChunkedState::read_body_cr(src),
            BodyLf => ChunkedState::read_body_lf(src),
            Trailer => ChunkedState::read_trailer(src),
            TrailerLf => ChunkedState::read_trailer_lf(src),
            EndCr => ChunkedState::read_end_cr(src),
            EndLf => ChunkedState::read_end_lf(src),
            End => Ok(Some(End)),
        }
    }

    /// Reads and parses the chunk size in hexadecimal format.
    ///
    /// The size is read digit by digit until a delimiter is encountered.
    /// Supports both uppercase and lowercase hex digits.
    fn read_size(src: &mut Bytes, size_per_chunk: &mut u64) -> Result<Option<ChunkedState>, io::Error> {
        macro_rules! or_overflow {
            ($e:expr) => {
                match $e {
                    Some(val) => val,
                    None => {
                        return Err(io::Error::new(ErrorKind::InvalidInput, "invalid overflow chunked length"))
                    }
                }
            };
        }

        let radix = 16;
        match try_next_byte!(src) {
            b @ b'0'..=b'9' => {
                *size_per_chunk = or_overflow!(size_per_chunk.checked_mul(radix));
                *size_per_chunk = or_overflow!(size_per_chunk.checked_add((b - b'0') as u64));
            }

            b @ b'a'..=b'f' => {
                *size_per_chunk = or_overflow!(size_per_chunk.checked_mul(radix));
                *size_per_chunk = or_overflow!(size_per_chunk.checked_add((b + 10 - b'a') as u64));
            }
            b @ b'A'..=b'F' => {
                *size_per_chunk = or_overflow!(size_per_chunk.checked_mul(radix));
                *size_per_chunk = or_overflow!(size_per_chunk.checked_add((b + 10 - b'A') as u64));
            }
            b'\t' | b' ' => return Ok(Some(SizeLws)),
            b';' => return Ok(Some(Extension)),
            b'\r' => return Ok(Some(SizeLf)),

            _ => return Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk size line: Invalid Size")),
        }

        Ok(Some(Size))
    }

    /// Processes linear whitespace after the chunk size. Only tabs and
    /// spaces may follow the size digits before the extension or the CR.
    fn read_size_lws(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            // LWS can follow the chunk size, but no more digits can come
            b'\t' | b' ' => Ok(Some(SizeLws)),
            b';' => Ok(Some(Extension)),
            b'\r' => Ok(Some(SizeLf)),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk size linear white space")),
        }
    }

    fn read_extension(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        // We don't care about extensions really at all. Just ignore them.
        // They "end" at the next CRLF.
        //
        // However, some implementations may not check for the CR, so to save
        // them from themselves, we reject extensions containing plain LF as
        // well.
        match try_next_byte!(src) {
            b'\r' => Ok(Some(SizeLf)),
            b'\n' => Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk extension contains newline")),
            _ => Ok(Some(Extension)), // no supported extensions
        }
    }

    /// Validates the LF that ends the size line and decides whether chunk
    /// data or the message trailer comes next.
    fn read_size_lf(src: &mut Bytes, size_per_chunk: &mut u64) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\n' => {
                if *size_per_chunk == 0 {
                    Ok(Some(EndCr))
                } else {
                    Ok(Some(Body))
                }
            }

            _ => Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk size LF")),
        }
    }

    /// Slices up to `size_per_chunk` bytes of chunk data out of the buffer.
    fn read_body(
        src: &mut Bytes,
        size_per_chunk: &mut u64,
        buf: &mut Option<Bytes>,
    ) -> Result<Option<ChunkedState>, io::Error> {
        if src.is_empty() {
            return Ok(Some(Body));
        }

        if *size_per_chunk == 0 {
            return Ok(Some(BodyCr));
        }

        // cap remaining bytes at the max capacity of usize
        let remaining = match *size_per_chunk {
            r if r > usize::MAX as u64 => usize::MAX,
            r => r as usize,
        };

        let read_size = std::cmp::min(remaining, src.len());

        *size_per_chunk -= read_size as u64;
        let bytes = src.split_to(read_size);
        *buf = Some(bytes);

        if *size_per_chunk > 0 {
            Ok(Some(Body))
        } else {
            Ok(Some(BodyCr))
        }
    }

    fn read_body_cr(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\r' => Ok(Some(BodyLf)),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk body CR")),
        }
    }

    fn read_body_lf(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\n' => Ok(Some(Size)),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk body LF")),
        }
    }

    /// Consumes trailer field bytes after the last chunk. The content is
    /// discarded, only the framing is validated.
    fn read_trailer(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\r' => Ok(Some(TrailerLf)),
            _ => Ok(Some(Trailer)),
        }
    }

    fn read_trailer_lf(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\n' => Ok(Some(EndCr)),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, "invalid trailer end LF")),
        }
    }

    fn read_end_cr(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\r' => Ok(Some(EndLf)),
            _ => Ok(Some(Trailer)),
        }
    }

    fn read_end_lf(src: &mut Bytes) -> Result<Option<ChunkedState>, io::Error> {
        match try_next_byte!(src) {
            b'\n' => Ok(Some(End)),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, "invalid chunk end LF")),
        }
    }
}
