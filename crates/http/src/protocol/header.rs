//! Bounded, insertion-ordered collection of HTTP header fields.
//!
//! The collection keeps fields in arrival order and enforces a fixed capacity
//! chosen at construction time. Name lookups fold ASCII case, everything else
//! is exact bytes. Lookup is a linear scan over the field list, which is the
//! right trade for the small field counts real messages carry.

use bytes::{BufMut, BytesMut};

use crate::protocol::Token;

/// Field capacity used when none is given at construction time.
pub const DEFAULT_FIELD_LIMIT: usize = 100;

/// An ordered set of header fields with a fixed capacity.
///
/// Mutations that would violate the capacity or the field shape fail by
/// returning `false` and leave the collection untouched. Duplicate names are
/// allowed through [`add_field`](Header::add_field); lookups and removals
/// always act on the first field whose name matches case-insensitively.
#[derive(Debug, Clone)]
pub struct Header {
    fields: Vec<(Token, Token)>,
    limit: usize,
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    /// Creates an empty collection with the default capacity.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_FIELD_LIMIT)
    }

    /// Creates an empty collection holding at most `limit` fields.
    ///
    /// A limit of zero falls back to the default capacity.
    pub fn with_limit(limit: usize) -> Self {
        let limit = if limit == 0 { DEFAULT_FIELD_LIMIT } else { limit };
        Self { fields: Vec::new(), limit }
    }

    /// Appends a field, preserving arrival order.
    ///
    /// Returns `false` without mutating when the name is empty or the
    /// collection is at capacity. An empty value is accepted.
    pub fn add_field(&mut self, name: Token, value: Token) -> bool {
        if name.is_empty() || self.fields.len() >= self.limit {
            return false;
        }
        self.fields.push((name, value));
        true
    }

    /// Sets the value of the first field matching `name`, or appends the
    /// field when no match exists.
    ///
    /// An in-place update keeps the stored name token and the field position
    /// unchanged. Returns `false` without mutating when the name or the value
    /// is empty, or when the append path hits the capacity.
    pub fn set_field(&mut self, name: Token, value: Token) -> bool {
        if name.is_empty() || value.is_empty() {
            return false;
        }
        match self.position(name.as_bytes()) {
            Some(idx) => {
                self.fields[idx].1 = value;
                true
            }
            None => self.add_field(name, value),
        }
    }

    /// Returns the value of the first field matching `name`.
    pub fn value(&self, name: impl AsRef<[u8]>) -> Option<&Token> {
        self.position(name.as_ref()).map(|idx| &self.fields[idx].1)
    }

    /// Returns true if a field matching `name` exists.
    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.position(name.as_ref()).is_some()
    }

    /// Removes the first field matching `name`. Does nothing when no field
    /// matches.
    pub fn remove(&mut self, name: impl AsRef<[u8]>) {
        if let Some(idx) = self.position(name.as_ref()) {
            self.fields.remove(idx);
        }
    }

    /// Removes every field. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns the number of fields currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the capacity chosen at construction time.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Iterates the fields in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Token, Token)> {
        self.fields.iter()
    }

    /// Serializes the fields as `name: value` lines followed by the blank
    /// line that terminates a header section.
    pub fn encode_to(&self, dst: &mut BytesMut) {
        for (name, value) in &self.fields {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
    }

    fn position(&self, name: &[u8]) -> Option<usize> {
        self.fields.iter().position(|(field_name, _)| field_name.as_bytes().eq_ignore_ascii_case(name))
    }
}

impl Extend<(Token, Token)> for Header {
    /// Appends each pair through [`add_field`](Header::add_field), so the
    /// capacity and the empty-name rule still apply.
    fn extend<T: IntoIterator<Item = (Token, Token)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.add_field(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a (Token, Token);
    type IntoIter = std::slice::Iter<'a, (Token, Token)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_lookup_is_case_insensitive() {
        let mut header = Header::new();
        assert!(header.add_field("Content-Type".into(), "text/html".into()));

        assert_eq!(header.value("content-type").map(Token::as_bytes), Some(&b"text/html"[..]));
        assert_eq!(header.value("CONTENT-TYPE").map(Token::as_bytes), Some(&b"text/html"[..]));
        assert!(header.contains("CoNtEnT-tYpE"));
        assert_eq!(header.value("content-length"), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut header = Header::new();
        assert!(!header.add_field(Token::new(), "value".into()));
        assert!(!header.set_field(Token::new(), "value".into()));
        assert!(header.is_empty());
    }

    #[test]
    fn empty_value_add_ok_set_rejected() {
        let mut header = Header::new();
        assert!(header.add_field("X-Empty".into(), Token::new()));
        assert_eq!(header.len(), 1);

        assert!(!header.set_field("X-Empty".into(), Token::new()));
        assert_eq!(header.value("x-empty").map(Token::as_bytes), Some(&b""[..]));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut header = Header::with_limit(2);
        assert!(header.add_field("A".into(), "1".into()));
        assert!(header.add_field("B".into(), "2".into()));
        assert!(!header.add_field("C".into(), "3".into()));

        assert_eq!(header.len(), 2);
        assert!(!header.contains("C"));

        // overwriting an existing field still works at capacity
        assert!(header.set_field("a".into(), "9".into()));
        assert_eq!(header.value("A").map(Token::as_bytes), Some(&b"9"[..]));
        // appending through set_field does not
        assert!(!header.set_field("D".into(), "4".into()));
        assert_eq!(header.len(), 2);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let header = Header::with_limit(0);
        assert_eq!(header.limit(), DEFAULT_FIELD_LIMIT);
    }

    #[test]
    fn set_field_overwrites_in_place() {
        let mut header = Header::new();
        header.add_field("Host".into(), "a".into());
        header.add_field("Accept".into(), "*/*".into());
        header.add_field("Connection".into(), "close".into());

        assert!(header.set_field("ACCEPT".into(), "text/plain".into()));

        let names: Vec<&str> = header.iter().map(|(name, _)| name.as_str().unwrap()).collect();
        assert_eq!(names, vec!["Host", "Accept", "Connection"]);
        assert_eq!(header.value("accept").map(Token::as_bytes), Some(&b"text/plain"[..]));
    }

    #[test]
    fn set_field_appends_when_absent() {
        let mut header = Header::new();
        assert!(header.set_field("Server".into(), "nginx/1.25.3".into()));
        assert_eq!(header.len(), 1);
        assert_eq!(header.value("server").map(Token::as_bytes), Some(&b"nginx/1.25.3"[..]));
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut header = Header::new();
        header.add_field("Set-Cookie".into(), "a=1".into());
        header.add_field("set-cookie".into(), "b=2".into());

        header.remove("SET-COOKIE");
        assert_eq!(header.len(), 1);
        assert_eq!(header.value("set-cookie").map(Token::as_bytes), Some(&b"b=2"[..]));

        // removing a missing name is a no-op
        header.remove("Host");
        assert_eq!(header.len(), 1);
    }

    #[test]
    fn clear_keeps_limit() {
        let mut header = Header::with_limit(3);
        header.add_field("A".into(), "1".into());
        header.clear();

        assert!(header.is_empty());
        assert_eq!(header.limit(), 3);
        assert!(header.add_field("B".into(), "2".into()));
    }

    #[test]
    fn extend_respects_capacity() {
        let mut header = Header::with_limit(2);
        header.extend(vec![
            ("A".into(), "1".into()),
            ("B".into(), "2".into()),
            ("C".into(), "3".into()),
        ]);

        assert_eq!(header.len(), 2);
        assert!(header.contains("B"));
        assert!(!header.contains("C"));
    }

    #[test]
    fn encode_renders_fields_in_order() {
        let mut header = Header::new();
        header.add_field("Host".into(), "example.com".into());
        header.add_field("Accept".into(), "*/*".into());

        let mut dst = BytesMut::new();
        header.encode_to(&mut dst);

        assert_eq!(&dst[..], &b"Host: example.com\r\nAccept: */*\r\n\r\n"[..]);
    }

    #[test]
    fn re_adding_iterated_fields_reproduces_the_encoding() {
        let mut header = Header::new();
        header.add_field("Host".into(), "example.com".into());
        header.add_field("Set-Cookie".into(), "id=1".into());
        header.add_field("Set-Cookie".into(), "theme=dark".into());
        header.add_field("X-Empty".into(), Token::new());
        header.add_field("Accept".into(), "*/*".into());

        let mut first = BytesMut::new();
        header.encode_to(&mut first);

        let mut rebuilt = Header::new();
        for (name, value) in header.iter() {
            assert!(rebuilt.add_field(name.clone(), value.clone()));
        }

        let mut second = BytesMut::new();
        rebuilt.encode_to(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn encode_empty_is_blank_line() {
        let mut dst = BytesMut::new();
        Header::new().encode_to(&mut dst);
        assert_eq!(&dst[..], &b"\r\n"[..]);
    }
}
