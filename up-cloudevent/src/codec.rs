//! Envelope codec trait and implementations.
//!
//! This module provides the [`EnvelopeCodec`] trait and two strategies:
//! - [`ProtobufCodec`]: `io.cloudevents.v1.CloudEvent` protobuf encoding
//! - [`JsonCodec`]: flat JSON object encoding
//!
//! Every codec validates on both paths: `encode` refuses an invalid envelope
//! and `decode` never returns one.

use std::sync::Arc;

use bytes::Bytes;
use up_cloudevent_core::{CodecError, Envelope};

use crate::validator::EnvelopeValidator;

mod json;
mod protobuf;

pub use json::JsonCodec;
pub use protobuf::ProtobufCodec;

/// Content type of protobuf-encoded envelopes.
pub const PROTOBUF_CONTENT_TYPE: &str = "application/cloudevents+protobuf";
/// Content type of JSON-encoded envelopes.
pub const JSON_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Converts envelopes to and from bytes.
///
/// # Example
///
/// ```ignore
/// use up_cloudevent::{CodecError, Envelope, EnvelopeCodec};
/// use bytes::Bytes;
///
/// struct CborCodec;
///
/// impl EnvelopeCodec for CborCodec {
///     fn name(&self) -> &'static str { "cbor" }
///
///     fn content_type(&self) -> &'static str { "application/cloudevents+cbor" }
///
///     fn encode(&self, envelope: &Envelope) -> Result<Bytes, CodecError> {
///         // ... validate, then encode
///     }
///
///     fn decode(&self, data: &[u8]) -> Result<Envelope, CodecError> {
///         // ... decode, then validate
///     }
/// }
/// ```
pub trait EnvelopeCodec: Send + Sync + 'static {
    /// Short format name (e.g. "protobuf", "json").
    fn name(&self) -> &'static str;

    /// MIME content type of the encoded form.
    fn content_type(&self) -> &'static str;

    /// Encode a valid envelope.
    fn encode(&self, envelope: &Envelope) -> Result<Bytes, CodecError>;

    /// Decode bytes into a valid envelope.
    fn decode(&self, data: &[u8]) -> Result<Envelope, CodecError>;
}

/// A boxed codec for type-erased storage.
#[derive(Clone)]
pub struct BoxedCodec(Arc<dyn EnvelopeCodec>);

impl BoxedCodec {
    /// Create a new boxed codec.
    pub fn new<C: EnvelopeCodec>(codec: C) -> Self {
        BoxedCodec(Arc::new(codec))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn content_type(&self) -> &'static str {
        self.0.content_type()
    }

    pub fn encode(&self, envelope: &Envelope) -> Result<Bytes, CodecError> {
        self.0.encode(envelope)
    }

    pub fn decode(&self, data: &[u8]) -> Result<Envelope, CodecError> {
        self.0.decode(data)
    }
}

impl std::fmt::Debug for BoxedCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoxedCodec").field(&self.name()).finish()
    }
}

/// Supported envelope formats.
///
/// Used to pick a codec from a content type. Use [`CodecFormat::codec()`] to
/// get a codec with the default validator and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecFormat {
    #[default]
    Protobuf,
    Json,
}

impl CodecFormat {
    /// Parse from a content type, ignoring parameters such as `; charset=utf-8`.
    /// Returns None for unsupported content types.
    pub fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        match essence {
            PROTOBUF_CONTENT_TYPE | "application/x-protobuf" => Some(Self::Protobuf),
            JSON_CONTENT_TYPE => Some(Self::Json),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Protobuf => PROTOBUF_CONTENT_TYPE,
            Self::Json => JSON_CONTENT_TYPE,
        }
    }

    /// Get a codec for this format.
    pub fn codec(&self) -> BoxedCodec {
        match self {
            Self::Protobuf => BoxedCodec::new(ProtobufCodec::default()),
            Self::Json => BoxedCodec::new(JsonCodec::default()),
        }
    }
}

/// Reject an envelope before encoding it.
fn check_before_encode(
    validator: &EnvelopeValidator,
    codec: &'static str,
    envelope: &Envelope,
) -> Result<(), CodecError> {
    validator.validate(envelope).map_err(|e| {
        tracing::warn!(
            target: "up_cloudevent::codec",
            codec,
            error = %e,
            "invalid input envelope"
        );
        CodecError::from(e)
    })
}

/// Reject a freshly decoded envelope that fails validation.
fn check_after_decode(
    validator: &EnvelopeValidator,
    codec: &'static str,
    envelope: Envelope,
) -> Result<Envelope, CodecError> {
    match validator.validate(&envelope) {
        Ok(()) => Ok(envelope),
        Err(e) => {
            tracing::warn!(
                target: "up_cloudevent::codec",
                codec,
                error = %e,
                "invalid decoded envelope"
            );
            Err(e.into())
        }
    }
}

/// Log and build a `MalformedInput` error.
fn malformed(codec: &'static str, reason: impl Into<String>) -> CodecError {
    let reason = reason.into();
    tracing::warn!(target: "up_cloudevent::codec", codec, %reason, "failed to parse envelope");
    CodecError::MalformedInput(reason)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use up_cloudevent_core::{AttributeValue, Envelope};

    /// A request envelope that passes validation.
    pub fn valid_request() -> Envelope {
        Envelope::new("id 88", "up://blabla", "v1", "req.v1")
            .with_text_data("hfgljhgljhghhhhhhhhhhhhhh")
            .with_attribute("sink", AttributeValue::string("1"))
            .with_attribute("ttl", AttributeValue::Integer(88))
    }

    /// A request envelope whose `ttl` has the wrong type.
    pub fn bad_request() -> Envelope {
        Envelope::new("id 88", "up://blabla", "v1", "req.v1")
            .with_attribute("sink", AttributeValue::string("1"))
            .with_attribute("ttl", AttributeValue::string("88"))
    }
}
