//! Validation and serialization of uProtocol CloudEvents.
//!
//! An [`Envelope`] is checked by an [`EnvelopeValidator`] and converted to and
//! from bytes by an [`EnvelopeCodec`]. Codecs validate on both paths, so a
//! successful `decode` always yields a valid envelope.
//!
//! ## Example
//!
//! ```rust
//! use up_cloudevent::{
//!     AttributeValue, CodecError, CodecFormat, Envelope, EnvelopeValidator,
//! };
//!
//! let envelope = Envelope::new("id-88", "up://x", "v1", "req.v1")
//!     .with_attribute("sink", AttributeValue::string("1"))
//!     .with_attribute("ttl", AttributeValue::Integer(88));
//! assert!(EnvelopeValidator::default().is_valid(&envelope));
//!
//! let codec = CodecFormat::Protobuf.codec();
//! let bytes = codec.encode(&envelope)?;
//! assert_eq!(codec.decode(&bytes)?, envelope);
//!
//! let err = codec.decode(&[]).unwrap_err();
//! assert!(matches!(err, CodecError::MalformedInput(_)));
//! # Ok::<(), CodecError>(())
//! ```
//!
//! ## Logging
//!
//! Rejections are reported through [`tracing`] under the `up_cloudevent`
//! targets. Install any subscriber to see them; outcomes do not depend on it.

pub mod codec;
pub mod limits;
pub mod proto;
pub mod validator;

pub use codec::{
    BoxedCodec, CodecFormat, EnvelopeCodec, JSON_CONTENT_TYPE, JsonCodec, PROTOBUF_CONTENT_TYPE,
    ProtobufCodec,
};
pub use limits::{DEFAULT_MAX_MESSAGE_SIZE, DecodeLimits};
pub use validator::{AttributeRules, EnvelopeValidator, MandatoryAttributeRule, ValidatorConfig};

// Re-export the data model so users only need one crate.
pub use up_cloudevent_core::*;

// Re-export several crates
pub use bytes;
pub use prost;
pub use prost_types;

pub mod prelude {
    //! A prelude providing the most common types.
    pub use crate::codec::{CodecFormat, EnvelopeCodec, JsonCodec, ProtobufCodec};
    pub use crate::validator::EnvelopeValidator;
    pub use up_cloudevent_core::{
        AttributeValue, CloudEventAttributes, CodecError, Envelope, Payload, Priority,
        ValidationError,
    };
}
