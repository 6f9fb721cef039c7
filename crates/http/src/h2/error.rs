//! Frame error type for the HTTP/2 module.

use thiserror::Error;

/// Errors produced while building or encoding HTTP/2 frames.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// The payload does not fit in a single frame.
    #[error("frame payload length {length} exceed the limit {max_size}")]
    PayloadTooLarge { length: usize, max_size: u32 },

    /// The buffer is shorter than the 9-octet frame header.
    #[error("frame header needs 9 octets, got {got}")]
    ShortHeader { got: usize },

    /// The frame carries the invalid kind marker and cannot go on the wire.
    #[error("invalid frame kind cannot be encoded")]
    InvalidKind,
}

impl FrameError {
    pub(crate) fn payload_too_large(length: usize, max_size: u32) -> Self {
        Self::PayloadTooLarge { length, max_size }
    }

    pub(crate) fn short_header(got: usize) -> Self {
        Self::ShortHeader { got }
    }
}
