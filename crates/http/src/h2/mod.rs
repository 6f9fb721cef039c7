//! Structural model of HTTP/2 framing.
//!
//! This module stops at the frame layer: the 9-octet [`FrameHeader`], the
//! [`FrameKind`] type registry and the [`Frame`] record that pairs a header
//! with its payload. Streams, settings state, HPACK and flow control live
//! above this layer and are out of scope here.
//!
//! [`FrameHeader`] and [`Frame`] split the error handling between them.
//! A header is a description and may describe garbage: oversize lengths
//! and unassigned type octets put it in an invalid marker state that
//! [`FrameHeader::valid`] reports. A [`Frame`] is the real thing and
//! refuses to exist in that state.

mod error;
mod frame;
mod frame_header;

pub use error::FrameError;
pub use frame::Frame;
pub use frame_header::FrameHeader;
pub use frame_header::FrameKind;
pub use frame_header::FLAG_ACK;
pub use frame_header::FLAG_END_HEADERS;
pub use frame_header::FLAG_END_STREAM;
pub use frame_header::FLAG_PADDED;
pub use frame_header::FLAG_PRIORITY;
pub use frame_header::FRAME_HEADER_SIZE;
pub use frame_header::MAX_FRAME_SIZE;
