//! Typed CloudEvent attribute values.
//!
//! An attribute is a named side-value carried next to the mandatory envelope
//! header fields. Its value is always exactly one of the variants of
//! [`AttributeValue`]; [`AttributeKind`] names the variant without its payload.

use bytes::Bytes;
use prost_types::Timestamp;

use crate::error::TypeMismatch;

/// The variant tag of an [`AttributeValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    String,
    Integer,
    Boolean,
    Bytes,
    Uri,
    UriRef,
    Timestamp,
    Unset,
}

impl AttributeKind {
    /// Get the name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::String => "String",
            AttributeKind::Integer => "Integer",
            AttributeKind::Boolean => "Boolean",
            AttributeKind::Bytes => "Bytes",
            AttributeKind::Uri => "Uri",
            AttributeKind::UriRef => "UriRef",
            AttributeKind::Timestamp => "Timestamp",
            AttributeKind::Unset => "Unset",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed attribute value.
///
/// `Unset` is a value in its own right: an attribute mapped to `Unset` is
/// present in the envelope, it just carries no payload. Equality compares the
/// variant and the payload.
///
/// # Example
///
/// ```
/// use up_cloudevent_core::{AttributeKind, AttributeValue};
///
/// let ttl = AttributeValue::Integer(88);
/// assert_eq!(ttl.kind(), AttributeKind::Integer);
/// assert_eq!(ttl.as_integer(), Ok(88));
/// assert!(ttl.as_str().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i32),
    Boolean(bool),
    Bytes(Bytes),
    Uri(String),
    UriRef(String),
    Timestamp(Timestamp),
    Unset,
}

impl AttributeValue {
    /// Create a string attribute.
    pub fn string<S: Into<String>>(value: S) -> Self {
        AttributeValue::String(value.into())
    }

    /// Create a URI attribute.
    pub fn uri<S: Into<String>>(value: S) -> Self {
        AttributeValue::Uri(value.into())
    }

    /// Create a URI-reference attribute.
    pub fn uri_ref<S: Into<String>>(value: S) -> Self {
        AttributeValue::UriRef(value.into())
    }

    /// Get the active variant tag.
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::String(_) => AttributeKind::String,
            AttributeValue::Integer(_) => AttributeKind::Integer,
            AttributeValue::Boolean(_) => AttributeKind::Boolean,
            AttributeValue::Bytes(_) => AttributeKind::Bytes,
            AttributeValue::Uri(_) => AttributeKind::Uri,
            AttributeValue::UriRef(_) => AttributeKind::UriRef,
            AttributeValue::Timestamp(_) => AttributeKind::Timestamp,
            AttributeValue::Unset => AttributeKind::Unset,
        }
    }

    /// Returns true if this is the `Unset` variant.
    pub fn is_unset(&self) -> bool {
        matches!(self, AttributeValue::Unset)
    }

    /// Read a `String` payload.
    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            AttributeValue::String(s) => Ok(s),
            other => Err(other.mismatch(AttributeKind::String)),
        }
    }

    /// Read an `Integer` payload.
    pub fn as_integer(&self) -> Result<i32, TypeMismatch> {
        match self {
            AttributeValue::Integer(i) => Ok(*i),
            other => Err(other.mismatch(AttributeKind::Integer)),
        }
    }

    /// Read a `Boolean` payload.
    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            AttributeValue::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(AttributeKind::Boolean)),
        }
    }

    /// Read a `Bytes` payload.
    pub fn as_bytes(&self) -> Result<&Bytes, TypeMismatch> {
        match self {
            AttributeValue::Bytes(b) => Ok(b),
            other => Err(other.mismatch(AttributeKind::Bytes)),
        }
    }

    /// Read a `Uri` payload.
    pub fn as_uri(&self) -> Result<&str, TypeMismatch> {
        match self {
            AttributeValue::Uri(s) => Ok(s),
            other => Err(other.mismatch(AttributeKind::Uri)),
        }
    }

    /// Read a `UriRef` payload.
    pub fn as_uri_ref(&self) -> Result<&str, TypeMismatch> {
        match self {
            AttributeValue::UriRef(s) => Ok(s),
            other => Err(other.mismatch(AttributeKind::UriRef)),
        }
    }

    /// Read a `Timestamp` payload.
    pub fn as_timestamp(&self) -> Result<&Timestamp, TypeMismatch> {
        match self {
            AttributeValue::Timestamp(ts) => Ok(ts),
            other => Err(other.mismatch(AttributeKind::Timestamp)),
        }
    }

    fn mismatch(&self, expected: AttributeKind) -> TypeMismatch {
        TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<Bytes> for AttributeValue {
    fn from(value: Bytes) -> Self {
        AttributeValue::Bytes(value)
    }
}

impl From<Timestamp> for AttributeValue {
    fn from(value: Timestamp) -> Self {
        AttributeValue::Timestamp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(AttributeValue::string("a").kind(), AttributeKind::String);
        assert_eq!(AttributeValue::Integer(1).kind(), AttributeKind::Integer);
        assert_eq!(AttributeValue::Boolean(true).kind(), AttributeKind::Boolean);
        assert_eq!(
            AttributeValue::Bytes(Bytes::from_static(b"x")).kind(),
            AttributeKind::Bytes
        );
        assert_eq!(AttributeValue::uri("up://a").kind(), AttributeKind::Uri);
        assert_eq!(AttributeValue::uri_ref("/a").kind(), AttributeKind::UriRef);
        assert_eq!(
            AttributeValue::Timestamp(Timestamp::default()).kind(),
            AttributeKind::Timestamp
        );
        assert_eq!(AttributeValue::Unset.kind(), AttributeKind::Unset);
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(AttributeValue::string("sink").as_str(), Ok("sink"));
        assert_eq!(AttributeValue::Integer(88).as_integer(), Ok(88));
        assert_eq!(AttributeValue::Boolean(false).as_bool(), Ok(false));
        assert_eq!(AttributeValue::uri("up://x").as_uri(), Ok("up://x"));
        assert_eq!(AttributeValue::uri_ref("#frag").as_uri_ref(), Ok("#frag"));
    }

    #[test]
    fn test_accessor_type_mismatch() {
        let err = AttributeValue::string("88").as_integer().unwrap_err();
        assert_eq!(err.expected, AttributeKind::Integer);
        assert_eq!(err.actual, AttributeKind::String);

        let err = AttributeValue::Unset.as_str().unwrap_err();
        assert_eq!(err.actual, AttributeKind::Unset);
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(AttributeValue::string("1"), AttributeValue::from("1"));
        assert_ne!(AttributeValue::string("1"), AttributeValue::Integer(1));
        // Same payload, different tag
        assert_ne!(AttributeValue::string("up://x"), AttributeValue::uri("up://x"));
        assert_eq!(AttributeValue::Unset, AttributeValue::Unset);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AttributeKind::Integer.to_string(), "Integer");
        assert_eq!(AttributeKind::UriRef.to_string(), "UriRef");
    }
}
