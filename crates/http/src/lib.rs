//! A zero-copy HTTP message model
//!
//! This crate provides a compact representation of HTTP/1.x messages plus a
//! structural model of HTTP/2 frames. It contains no sockets and no runtime:
//! buffers go in, typed messages come out, and every token a parse produces
//! is a reference-counted view into the original buffer rather than a copy.
//!
//! # Features
//!
//! - Request and response types assembled from complete buffers in one call
//! - Zero-copy header names, values and URI targets backed by [`bytes::Bytes`]
//! - Bounded header collections that enforce a field capacity on insert
//! - Automatic content-length synchronization when bodies change
//! - Chunked transfer decoding with chunk-boundary-independent reassembly
//! - An event-sink decoding contract for callers that want raw parse events
//! - HTTP/2 frame headers and frames with a checked 24-bit length domain
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use tracing::Level;
//! use tracing_subscriber::FmtSubscriber;
//! use zc_http::protocol::{Request, Response};
//!
//! // Initialize logging; the decoders emit trace-level events.
//! let subscriber = FmtSubscriber::builder()
//!     .with_max_level(Level::INFO)
//!     .finish();
//! tracing::subscriber::set_global_default(subscriber)
//!     .expect("setting default subscriber failed");
//!
//! let raw = "POST /greet?lang=en HTTP/1.1\r\n\
//!            Host: example.com\r\n\
//!            Content-Length: 5\r\n\
//!            \r\n\
//!            hello";
//!
//! let request = Request::parse(raw).expect("well-formed request");
//! assert_eq!(request.uri().path(), "/greet");
//! assert_eq!(request.query_value("lang"), Some("en"));
//! assert_eq!(request.message().header_value("host").unwrap(), "example.com");
//! assert_eq!(request.message().body(), b"hello");
//!
//! let mut response = Response::new(StatusCode::OK, request.version());
//! response.message_mut().add_header("Content-Type".into(), "text/plain".into());
//! response.message_mut().add_body("hello yourself");
//!
//! let wire = response.to_bytes();
//! assert!(wire.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`protocol`]: the message model ([`protocol::Token`], [`protocol::Header`],
//!   [`protocol::Message`], [`protocol::Request`], [`protocol::Response`])
//! - [`codec`]: decoding drivers and the [`codec::MessageSink`] event contract
//! - [`h2`]: HTTP/2 frame kinds, the 9-octet frame header and whole frames
//!
//! # Core Components
//!
//! ## Message Model
//!
//! A [`protocol::Message`] pairs a bounded header collection with a body
//! buffer and keeps the `content-length` field in sync whenever the body is
//! replaced, appended to or cleared. [`protocol::Request`] and
//! [`protocol::Response`] wrap a message with their start-line fields, using
//! the [`http`] crate's `Method`, `Uri`, `Version` and `StatusCode` types.
//!
//! ## Parsing
//!
//! [`codec::decode_request`] and [`codec::decode_response`] scan a message
//! head with `httparse` and deliver a fixed sequence of events to a
//! [`codec::MessageSink`]: message begin, the url (requests), strictly
//! alternating header field and value tokens, a headers-complete snapshot,
//! body chunks and message complete. The request and response types are
//! themselves sinks, so `parse` is just the driver running over the value
//! under construction.
//!
//! ## HTTP/2 Frames
//!
//! The [`h2`] module stops at the framing layer. [`h2::FrameHeader`] is a
//! permissive record that marks oversize lengths and unassigned type octets
//! as invalid instead of failing; [`h2::Frame`] is checked at construction
//! and refuses payloads the 24-bit length field cannot describe.
//!
//! ## Error Handling
//!
//! Fallible operations return custom error types that implement
//! `std::error::Error`:
//!
//! - [`protocol::ParseError`]: malformed or truncated HTTP/1.x input
//! - [`h2::FrameError`]: frame construction and codec failures
//!
//! Capacity misses are not errors: inserting into a full header collection
//! reports `false` and leaves the collection unchanged.
//!
//! # Performance Considerations
//!
//! - Header tokens, URI targets and single-run bodies alias the parse buffer
//! - Chunked bodies are reassembled with `Bytes::split_to`, not memcpy loops
//! - The backing buffer stays alive exactly as long as some token needs it
//!
//! # Limitations
//!
//! - Parsing works on complete buffers; there is no incremental feed
//! - Maximum number of wire headers per message: 128
//! - HTTP/2 support is structural framing only, with no stream state,
//!   settings tracking, HPACK or flow control
//!
//! # Safety
//!
//! The crate uses unsafe code in one well-documented place to avoid zeroing
//! the header scratch space before parsing. All unsafe usage is carefully
//! reviewed and tested.

pub mod codec;
pub mod h2;
pub mod protocol;

mod utils;
