//! Core HTTP message model.
//!
//! This module provides the value types a parsed message is made of. The
//! design keeps parsing zero-copy: header names, header values and body
//! chunks are [`Token`]s viewing the buffer the message arrived in, while the
//! assembled body is owned by the message so it can outlive the parse.
//!
//! # Architecture
//!
//! - **Tokens** ([`token`]): [`Token`], the borrowed-slice primitive
//! - **Fields** ([`header`]): [`Header`], the bounded, insertion-ordered,
//!   case-insensitive field collection
//! - **Messages** ([`message`]): [`Message`], a header section plus an owned
//!   body kept in sync with its `content-length` field
//! - **Requests** ([`request`]): [`Request`], a message with method, target
//!   and version
//! - **Responses** ([`response`]): [`Response`], a message with status code
//!   and version
//! - **Errors** ([`error`]): [`ParseError`], the parse failure taxonomy
//!
//! [`Request`] and [`Response`] are built incrementally by the drivers in
//! [`crate::codec`] through the [`crate::codec::MessageSink`] event contract,
//! or field by field through their own mutators.

mod token;
pub use token::Token;

mod header;
pub use header::DEFAULT_FIELD_LIMIT;
pub use header::Header;

mod message;
pub use message::Message;
pub(crate) use message::INIT_ENCODE_SIZE;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod error;
pub use error::ParseError;
