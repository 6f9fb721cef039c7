//! Event contract between the decode drivers and the message model.
//!
//! The drivers in this module tree scan a complete buffer and replay it as a
//! fixed sequence of events: message begin, the request target (requests
//! only), strictly alternating header field and value events in wire order,
//! a headers-complete event carrying the start line, zero or more body
//! events, and message complete. Every token handed to the sink is a
//! zero-copy view of the scanned buffer.
//!
//! A sink stops the driver by returning an error from any event; the driver
//! delivers no further events after that.

use http::{Method, StatusCode, Version};

use crate::protocol::{ParseError, Token};

/// Start line data delivered at the headers-complete event.
///
/// For requests the method is present and the status is `None`; for
/// responses it is the other way around.
#[derive(Debug, Clone)]
pub struct StartLine {
    version: Version,
    method: Option<Method>,
    status: Option<StatusCode>,
}

impl StartLine {
    /// Creates the start line snapshot of a request head.
    pub fn request(version: Version, method: Method) -> Self {
        Self { version, method: Some(method), status: None }
    }

    /// Creates the start line snapshot of a response head.
    pub fn response(version: Version, status: StatusCode) -> Self {
        Self { version, method: None, status: Some(status) }
    }

    /// Returns the HTTP version of the start line.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the request method, if this is a request start line.
    #[inline]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Returns the response status, if this is a response start line.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

/// Receiver for the decode event sequence.
///
/// Every method defaults to accepting the event and doing nothing, so a sink
/// only implements the events it cares about. [`Request`](crate::protocol::Request)
/// and [`Response`](crate::protocol::Response) implement this trait to build
/// themselves during parsing; custom sinks can observe a buffer without
/// materializing a message at all.
pub trait MessageSink {
    /// A new message is about to be delivered.
    fn on_message_begin(&mut self) -> Result<(), ParseError> {
        Ok(())
    }

    /// The request target, exactly as it appeared on the wire. Never
    /// delivered for responses.
    fn on_url(&mut self, url: Token) -> Result<(), ParseError> {
        let _ = url;
        Ok(())
    }

    /// A header field name. Always followed by the matching
    /// [`on_header_value`](MessageSink::on_header_value) before the next
    /// field event.
    fn on_header_field(&mut self, name: Token) -> Result<(), ParseError> {
        let _ = name;
        Ok(())
    }

    /// A header field value pairing with the most recent field event.
    fn on_header_value(&mut self, value: Token) -> Result<(), ParseError> {
        let _ = value;
        Ok(())
    }

    /// The head is complete; `start_line` carries version and method or
    /// status. Body events, if any, follow.
    fn on_headers_complete(&mut self, start_line: StartLine) -> Result<(), ParseError> {
        let _ = start_line;
        Ok(())
    }

    /// A run of body bytes. Chunked bodies produce one event per chunk data
    /// run; fixed-length bodies produce a single event.
    fn on_body(&mut self, chunk: Token) -> Result<(), ParseError> {
        let _ = chunk;
        Ok(())
    }

    /// The message ended; no further events follow.
    fn on_message_complete(&mut self) -> Result<(), ParseError> {
        Ok(())
    }
}
