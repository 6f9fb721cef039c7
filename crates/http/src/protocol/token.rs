//! Zero-copy token primitive used throughout the message model.
//!
//! A [`Token`] is a cheap view over a region of some backing buffer, typically
//! the receive buffer a message was parsed from. Tokens are backed by [`Bytes`],
//! so slicing a token out of a buffer never copies the underlying data and the
//! buffer allocation stays alive for as long as any token still references it.

use bytes::Bytes;

/// A borrowed region of a backing buffer.
///
/// Header names, header values and body chunks are all delivered as tokens
/// during parsing. Cloning a token is a reference count bump, comparing tokens
/// is exact byte equality with no case folding, and an empty token compares
/// equal to any other empty token regardless of where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Token {
    data: Bytes,
}

impl Token {
    /// Creates an empty token.
    pub const fn new() -> Self {
        Self { data: Bytes::new() }
    }

    /// Creates a token viewing a static string without copying it.
    pub fn from_static(value: &'static str) -> Self {
        Self { data: Bytes::from_static(value.as_bytes()) }
    }

    /// Creates a token by copying the given bytes into a fresh allocation.
    ///
    /// This is the explicit escape hatch for data that has no backing buffer
    /// to borrow from.
    pub fn copy_from_slice(value: &[u8]) -> Self {
        Self { data: Bytes::copy_from_slice(value) }
    }

    /// Returns the number of bytes this token views.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this token views no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the viewed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the viewed bytes as a string slice if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Unwraps the token into its backing [`Bytes`].
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Resets this token to the empty token, releasing its hold on the
    /// backing buffer.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Renders the viewed bytes as owned text.
    ///
    /// Invalid UTF-8 sequences are replaced with the replacement character.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl From<Bytes> for Token {
    fn from(data: Bytes) -> Self {
        Self { data }
    }
}

impl From<&'static str> for Token {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<&'static [u8]> for Token {
    fn from(value: &'static [u8]) -> Self {
        Self { data: Bytes::from_static(value) }
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self { data: Bytes::from(value.into_bytes()) }
    }
}

impl From<Vec<u8>> for Token {
    fn from(value: Vec<u8>) -> Self {
        Self { data: Bytes::from(value) }
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl PartialEq<[u8]> for Token {
    fn eq(&self, other: &[u8]) -> bool {
        self.data.as_ref() == other
    }
}

impl PartialEq<&[u8]> for Token {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data.as_ref() == *other
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.data.as_ref() == other.as_bytes()
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.data.as_ref() == other.as_bytes()
    }
}
