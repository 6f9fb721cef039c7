//! A complete HTTP/2 frame: header plus payload.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::h2::frame_header::{FrameHeader, FrameKind, FRAME_HEADER_SIZE, MAX_FRAME_SIZE};
use crate::h2::FrameError;
use crate::utils::ensure;

/// An HTTP/2 frame.
///
/// Unlike [`FrameHeader`], which tolerates nonsense by entering a marker
/// state, a frame owns its payload and construction is checked: a payload
/// larger than the 24-bit length field can describe is refused outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: FrameHeader,
    payload: Bytes,
}

impl Frame {
    /// Creates a frame around `payload`, deriving the header length from
    /// the payload size.
    pub fn new(kind: FrameKind, flags: u8, stream_id: u32, payload: Bytes) -> Result<Self, FrameError> {
        ensure!(
            payload.len() <= MAX_FRAME_SIZE as usize,
            FrameError::payload_too_large(payload.len(), MAX_FRAME_SIZE)
        );
        let header = FrameHeader::new(payload.len() as u32, kind, flags, stream_id);
        Ok(Self { header, payload })
    }

    /// Returns the frame header.
    #[inline]
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the payload length in octets.
    #[inline]
    pub fn length(&self) -> u32 {
        self.header.length()
    }

    /// Returns the frame kind.
    #[inline]
    pub fn kind(&self) -> FrameKind {
        self.header.kind()
    }

    /// Returns the flags octet.
    #[inline]
    pub fn flags(&self) -> u8 {
        self.header.flags()
    }

    /// Returns the 31-bit stream identifier.
    #[inline]
    pub fn stream_id(&self) -> u32 {
        self.header.stream_id()
    }

    /// Returns the payload.
    #[inline]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Writes the header octets followed by the payload to `dst`.
    pub fn encode_to(&self, dst: &mut BytesMut) -> Result<(), FrameError> {
        self.header.encode_to(dst)?;
        dst.put_slice(&self.payload);
        Ok(())
    }

    /// Reads one complete frame off the front of `src`.
    ///
    /// Returns `Ok(None)` when `src` does not yet hold the whole frame,
    /// leaving the buffer untouched. On success the frame is consumed from
    /// `src` and the payload shares its storage. A frame of unassigned
    /// type decodes with the invalid marker kind rather than failing.
    pub fn decode(src: &mut Bytes) -> Result<Option<Self>, FrameError> {
        if src.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }
        let header = FrameHeader::decode(src)?;
        let frame_end = FRAME_HEADER_SIZE + header.length() as usize;
        if src.len() < frame_end {
            return Ok(None);
        }

        src.advance(FRAME_HEADER_SIZE);
        let payload = src.split_to(header.length() as usize);
        Ok(Some(Self { header, payload }))
    }
}
