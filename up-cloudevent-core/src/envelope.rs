//! The CloudEvent envelope.
//!
//! An [`Envelope`] carries four mandatory header fields (`id`, `source`,
//! `spec_version`, `kind`), an optional inline payload and a map of named
//! [`AttributeValue`]s. Validators and codecs only ever borrow it.

use std::collections::HashMap;

use bytes::Bytes;

use crate::attributes::{
    CloudEventAttributes, HASH_KEY, PRIORITY_KEY, Priority, TOKEN_KEY, TRACEPARENT_KEY, TTL_KEY,
};
use crate::value::AttributeValue;

/// Inline envelope payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Bytes),
}

impl Payload {
    /// Get the text, if this is a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Binary(_) => None,
        }
    }
}

/// A CloudEvent header plus its attributes.
///
/// # Example
///
/// ```
/// use up_cloudevent_core::{AttributeValue, Envelope};
///
/// let envelope = Envelope::new("id-88", "up://x", "v1", "req.v1")
///     .with_attribute("sink", AttributeValue::string("1"))
///     .with_attribute("ttl", AttributeValue::Integer(88));
///
/// assert!(envelope.is_structurally_complete());
/// assert_eq!(envelope.attribute("ttl"), Some(&AttributeValue::Integer(88)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope {
    pub id: String,
    pub source: String,
    pub spec_version: String,
    /// The `type` header; resolved to a [`MessageKind`](crate::MessageKind) during validation.
    pub kind: String,
    pub payload: Option<Payload>,
    pub attributes: HashMap<String, AttributeValue>,
}

impl Envelope {
    /// Create an envelope with the four mandatory header fields and no attributes.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        spec_version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            spec_version: spec_version.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Insert (or replace) an attribute.
    pub fn with_attribute<S: Into<String>>(mut self, name: S, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_text_data<S: Into<String>>(mut self, data: S) -> Self {
        self.payload = Some(Payload::Text(data.into()));
        self
    }

    pub fn with_binary_data<B: Into<Bytes>>(mut self, data: B) -> Self {
        self.payload = Some(Payload::Binary(data.into()));
        self
    }

    /// Insert every non-default field of a common attribute set.
    ///
    /// `priority` is stored as its enumerant name, `ttl` as an integer
    /// (saturating at `i32::MAX`), the rest as strings.
    pub fn with_common_attributes(mut self, common: &CloudEventAttributes) -> Self {
        if !common.hash().is_empty() {
            self.attributes
                .insert(HASH_KEY.to_string(), AttributeValue::string(common.hash()));
        }
        if common.priority() != Priority::Unspecified {
            self.attributes.insert(
                PRIORITY_KEY.to_string(),
                AttributeValue::string(common.priority().as_str_name()),
            );
        }
        if common.ttl() > 0 {
            let ttl = i32::try_from(common.ttl()).unwrap_or(i32::MAX);
            self.attributes
                .insert(TTL_KEY.to_string(), AttributeValue::Integer(ttl));
        }
        if !common.token().is_empty() {
            self.attributes
                .insert(TOKEN_KEY.to_string(), AttributeValue::string(common.token()));
        }
        if !common.traceparent().is_empty() {
            self.attributes.insert(
                TRACEPARENT_KEY.to_string(),
                AttributeValue::string(common.traceparent()),
            );
        }
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Returns the first empty mandatory header field, in header order.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("id", &self.id),
            ("source", &self.source),
            ("spec_version", &self.spec_version),
            ("type", &self.kind),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }

    /// Returns true if all four mandatory header fields are non-empty.
    pub fn is_structurally_complete(&self) -> bool {
        self.first_missing_field().is_none()
    }
}
