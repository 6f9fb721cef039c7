//! The 9-octet HTTP/2 frame header.
//!
//! Wire layout per RFC 9113 section 4.1: a 24-bit big-endian payload
//! length, a type octet, a flags octet and a 31-bit stream identifier
//! whose high bit is reserved.

use bytes::{BufMut, BytesMut};

use crate::h2::FrameError;
use crate::utils::ensure;

/// Largest payload length the 24-bit length field can carry.
pub const MAX_FRAME_SIZE: u32 = (1 << 24) - 1;

/// Wire size of a frame header in octets.
pub const FRAME_HEADER_SIZE: usize = 9;

/// Acknowledgement flag of SETTINGS and PING frames.
pub const FLAG_ACK: u8 = 0x01;
/// End-of-stream flag of DATA and HEADERS frames.
pub const FLAG_END_STREAM: u8 = 0x01;
/// Final-header-block flag of HEADERS, PUSH_PROMISE and CONTINUATION.
pub const FLAG_END_HEADERS: u8 = 0x04;
/// Padding-present flag of DATA, HEADERS and PUSH_PROMISE frames.
pub const FLAG_PADDED: u8 = 0x08;
/// Priority-fields-present flag of HEADERS frames.
pub const FLAG_PRIORITY: u8 = 0x20;

/// Frame type per RFC 9113 section 6, plus a marker for anything else.
///
/// The marker lets a header describe a frame of unknown type without
/// failing the decode; whether that matters is the caller's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameKind {
    Data = 0x0,
    Headers = 0x1,
    Priority = 0x2,
    RstStream = 0x3,
    Settings = 0x4,
    PushPromise = 0x5,
    Ping = 0x6,
    Goaway = 0x7,
    WindowUpdate = 0x8,
    Continuation = 0x9,
    Invalid = 0xff,
}

impl FrameKind {
    /// Maps a wire type octet to a kind. Unassigned octets map to
    /// [`FrameKind::Invalid`].
    pub fn from_code(code: u8) -> Self {
        match code {
            0x0 => Self::Data,
            0x1 => Self::Headers,
            0x2 => Self::Priority,
            0x3 => Self::RstStream,
            0x4 => Self::Settings,
            0x5 => Self::PushPromise,
            0x6 => Self::Ping,
            0x7 => Self::Goaway,
            0x8 => Self::WindowUpdate,
            0x9 => Self::Continuation,
            _ => Self::Invalid,
        }
    }

    /// Returns the wire type octet, or `None` for the invalid marker.
    pub fn code(self) -> Option<u8> {
        match self {
            Self::Invalid => None,
            kind => Some(kind as u8),
        }
    }
}

/// A parsed or constructed frame header.
///
/// A header is a plain record: it states the length of the payload that
/// follows but holds no payload itself. Construction never fails; a
/// length that cannot be represented in 24 bits turns the header into
/// the invalid marker state instead, with the length zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    length: u32,
    kind: FrameKind,
    flags: u8,
    stream_id: u32,
}

impl FrameHeader {
    /// Creates a frame header. The reserved high bit of `stream_id` is
    /// cleared; an oversize `length` yields an invalid header with length
    /// zero.
    pub fn new(length: u32, kind: FrameKind, flags: u8, stream_id: u32) -> Self {
        let (length, kind) = if length > MAX_FRAME_SIZE { (0, FrameKind::Invalid) } else { (length, kind) };
        Self { length, kind, flags, stream_id: stream_id & 0x7fff_ffff }
    }

    /// Returns the payload length this header announces.
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the frame kind.
    #[inline]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Returns the flags octet.
    #[inline]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns the 31-bit stream identifier.
    #[inline]
    pub fn stream_id(&self) -> u32 {
        self.stream_id
    }

    /// Returns true unless this header is in the invalid marker state.
    #[inline]
    pub fn valid(&self) -> bool {
        self.kind != FrameKind::Invalid
    }

    /// Returns true if every bit of `flag` is set in the flags octet.
    #[inline]
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag == flag
    }

    /// Reads a frame header from the first nine octets of `buf`.
    ///
    /// A shorter buffer is an error. An unassigned type octet is not: it
    /// decodes into the invalid marker state. The reserved bit of the
    /// stream identifier is masked off.
    pub fn decode(buf: &[u8]) -> Result<Self, FrameError> {
        ensure!(buf.len() >= FRAME_HEADER_SIZE, FrameError::short_header(buf.len()));

        let length = (u32::from(buf[0]) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]);
        let kind = FrameKind::from_code(buf[3]);
        let flags = buf[4];
        let stream_id = ((u32::from(buf[5]) & 0x7f) << 24)
            | (u32::from(buf[6]) << 16)
            | (u32::from(buf[7]) << 8)
            | u32::from(buf[8]);

        Ok(Self { length, kind, flags, stream_id })
    }

    /// Writes the nine wire octets to `dst`.
    ///
    /// A header in the invalid marker state has no type octet and refuses
    /// to encode.
    pub fn encode_to(&self, dst: &mut BytesMut) -> Result<(), FrameError> {
        let code = self.kind.code().ok_or(FrameError::InvalidKind)?;

        dst.put_u8((self.length >> 16) as u8);
        dst.put_u8((self.length >> 8) as u8);
        dst.put_u8(self.length as u8);
        dst.put_u8(code);
        dst.put_u8(self.flags);
        dst.put_u32(self.stream_id & 0x7fff_ffff);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip() {
        for code in 0x0..=0x9 {
            assert_eq!(FrameKind::from_code(code).code(), Some(code));
        }
    }

    #[test]
    fn unassigned_codes_are_invalid() {
        assert_eq!(FrameKind::from_code(0x0a), FrameKind::Invalid);
        assert_eq!(FrameKind::from_code(0xff), FrameKind::Invalid);
        assert_eq!(FrameKind::Invalid.code(), None);
    }

    #[test]
    fn length_limit_is_exactly_24_bits() {
        let largest = FrameHeader::new(MAX_FRAME_SIZE, FrameKind::Data, 0, 1);
        assert!(largest.valid());
        assert_eq!(largest.length(), (1 << 24) - 1);

        let oversize = FrameHeader::new(1 << 24, FrameKind::Data, 0, 1);
        assert!(!oversize.valid());
        assert_eq!(oversize.kind(), FrameKind::Invalid);
        assert_eq!(oversize.length(), 0);
    }

    #[test]
    fn new_clears_the_reserved_bit() {
        let header = FrameHeader::new(0, FrameKind::Ping, 0, 0x8000_0001);
        assert_eq!(header.stream_id(), 1);
    }

    #[test]
    fn wire_round_trip() {
        let header = FrameHeader::new(5, FrameKind::Headers, FLAG_END_HEADERS, 7);

        let mut dst = BytesMut::new();
        header.encode_to(&mut dst).unwrap();
        assert_eq!(dst.as_ref(), [0, 0, 5, 0x1, 0x4, 0, 0, 0, 7]);

        assert_eq!(FrameHeader::decode(&dst).unwrap(), header);
    }

    #[test]
    fn decode_masks_the_reserved_bit() {
        let wire = [0, 0, 0, 0x6, 0x0, 0x80, 0, 0, 9];
        let header = FrameHeader::decode(&wire).unwrap();
        assert_eq!(header.stream_id(), 9);
    }

    #[test]
    fn decode_keeps_unassigned_kinds_as_invalid() {
        let wire = [0, 0, 0, 0x0b, 0x0, 0, 0, 0, 1];
        let header = FrameHeader::decode(&wire).unwrap();

        assert!(!header.valid());
        let mut dst = BytesMut::new();
        assert_eq!(header.encode_to(&mut dst), Err(FrameError::InvalidKind));
    }

    #[test]
    fn decode_needs_all_nine_octets() {
        let err = FrameHeader::decode(&[0; 8]).unwrap_err();
        assert_eq!(err, FrameError::ShortHeader { got: 8 });
    }

    #[test]
    fn flag_queries_match_exact_bits() {
        let header = FrameHeader::new(0, FrameKind::Settings, FLAG_ACK, 0);
        assert!(header.has_flag(FLAG_ACK));
        assert!(!header.has_flag(FLAG_END_HEADERS));
        assert!(!header.has_flag(FLAG_ACK | FLAG_END_HEADERS));
    }
}
