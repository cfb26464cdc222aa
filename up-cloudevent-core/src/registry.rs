//! Lookup tables for the envelope header strings.
//!
//! - [`KindRegistry`]: `type` header → [`MessageKind`]
//! - [`SpecVersionRegistry`]: `specversion` header → [`SpecVersion`]
//!
//! Both resolve unknown input to a sentinel variant instead of failing. The
//! built-in tables come from `Default`; extra entries are added at construction
//! time with `with_entry`, never through shared mutable state.

use std::collections::HashMap;

/// Message kind token for publish messages.
pub const PUBLISH_MSG_TYPE_V1: &str = "pub.v1";
/// Message kind token for file messages.
pub const FILE_MSG_TYPE_V1: &str = "file.v1";
/// Message kind token for RPC requests.
pub const REQUEST_MSG_TYPE_V1: &str = "req.v1";
/// Message kind token for RPC responses.
pub const RESPONSE_MSG_TYPE_V1: &str = "res.v1";

/// Spec version token for version 1.
pub const SPEC_VERSION_V1: &str = "v1";

/// The declared category of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    #[default]
    Unspecified,
    Publish,
    File,
    Request,
    Response,
}

impl MessageKind {
    /// Get the canonical header token, or `None` for `Unspecified`.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            MessageKind::Unspecified => None,
            MessageKind::Publish => Some(PUBLISH_MSG_TYPE_V1),
            MessageKind::File => Some(FILE_MSG_TYPE_V1),
            MessageKind::Request => Some(REQUEST_MSG_TYPE_V1),
            MessageKind::Response => Some(RESPONSE_MSG_TYPE_V1),
        }
    }

    /// Returns true unless this is the `Unspecified` sentinel.
    pub fn is_specified(&self) -> bool {
        !matches!(self, MessageKind::Unspecified)
    }
}

/// Known CloudEvent spec versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SpecVersion {
    V1,
    #[default]
    NotDefined,
}

impl SpecVersion {
    /// Returns true unless this is the `NotDefined` sentinel.
    pub fn is_defined(&self) -> bool {
        !matches!(self, SpecVersion::NotDefined)
    }
}

/// Resolves the `type` header to a [`MessageKind`].
///
/// # Example
///
/// ```
/// use up_cloudevent_core::{KindRegistry, MessageKind};
///
/// let registry = KindRegistry::default();
/// assert_eq!(registry.resolve("req.v1"), MessageKind::Request);
/// assert_eq!(registry.resolve("req.v2"), MessageKind::Unspecified);
///
/// let registry = registry.with_entry("req.v2", MessageKind::Request);
/// assert_eq!(registry.resolve("req.v2"), MessageKind::Request);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindRegistry {
    entries: HashMap<String, MessageKind>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        let entries = [
            MessageKind::Publish,
            MessageKind::File,
            MessageKind::Request,
            MessageKind::Response,
        ]
        .into_iter()
        .filter_map(|kind| kind.as_str().map(|token| (token.to_string(), kind)))
        .collect();
        Self { entries }
    }
}

impl KindRegistry {
    /// Create a registry with no entries; every token resolves to `Unspecified`.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add (or replace) a token mapping.
    pub fn with_entry<S: Into<String>>(mut self, token: S, kind: MessageKind) -> Self {
        self.entries.insert(token.into(), kind);
        self
    }

    /// Resolve a header token. Unknown tokens resolve to `Unspecified`.
    pub fn resolve(&self, token: &str) -> MessageKind {
        self.entries.get(token).copied().unwrap_or_default()
    }
}

/// Resolves the `specversion` header to a [`SpecVersion`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecVersionRegistry {
    entries: HashMap<String, SpecVersion>,
}

impl Default for SpecVersionRegistry {
    fn default() -> Self {
        Self::empty().with_entry(SPEC_VERSION_V1, SpecVersion::V1)
    }
}

impl SpecVersionRegistry {
    /// Create a registry with no entries; every token resolves to `NotDefined`.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add (or replace) a token mapping.
    pub fn with_entry<S: Into<String>>(mut self, token: S, version: SpecVersion) -> Self {
        self.entries.insert(token.into(), version);
        self
    }

    /// Resolve a header token. Unknown tokens resolve to `NotDefined`.
    pub fn resolve(&self, token: &str) -> SpecVersion {
        self.entries.get(token).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_tokens() {
        let registry = KindRegistry::default();
        assert_eq!(registry.resolve("pub.v1"), MessageKind::Publish);
        assert_eq!(registry.resolve("file.v1"), MessageKind::File);
        assert_eq!(registry.resolve("req.v1"), MessageKind::Request);
        assert_eq!(registry.resolve("res.v1"), MessageKind::Response);
    }

    #[test]
    fn test_unknown_kind_is_unspecified() {
        let registry = KindRegistry::default();
        assert_eq!(registry.resolve(""), MessageKind::Unspecified);
        assert_eq!(registry.resolve("REQ.V1"), MessageKind::Unspecified);
        assert!(!registry.resolve("bogus").is_specified());
    }

    #[test]
    fn test_empty_kind_registry() {
        let registry = KindRegistry::empty();
        assert_eq!(registry.resolve("pub.v1"), MessageKind::Unspecified);
    }

    #[test]
    fn test_spec_version_tokens() {
        let registry = SpecVersionRegistry::default();
        assert_eq!(registry.resolve("v1"), SpecVersion::V1);
        assert_eq!(registry.resolve("1.0"), SpecVersion::NotDefined);
        assert!(!registry.resolve("").is_defined());

        let registry = registry.with_entry("1.0", SpecVersion::V1);
        assert!(registry.resolve("1.0").is_defined());
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(MessageKind::Response.as_str(), Some("res.v1"));
        assert_eq!(MessageKind::Unspecified.as_str(), None);
    }
}
