//! CloudEvent error types.
//!
//! This module provides the error taxonomy shared by the validator and codecs:
//! - [`ValidationError`]: Why an envelope was rejected by validation
//! - [`CodecError`]: Why an encode or decode call failed
//! - [`TypeMismatch`]: Typed access to the wrong [`AttributeValue`](crate::AttributeValue) variant

use serde::{Serialize, Serializer};

use crate::value::AttributeKind;

/// Returned by the typed accessors of [`AttributeValue`](crate::AttributeValue)
/// when the requested variant is not the active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("attribute type mismatch: expected {expected}, found {actual}")]
pub struct TypeMismatch {
    pub expected: AttributeKind,
    pub actual: AttributeKind,
}

/// Envelope validation failures.
///
/// Only the first failing check is reported; see the validator for the order.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One of `id`, `source`, `spec_version` or `type` is empty.
    #[error("mandatory header field `{field}` is missing")]
    MissingMandatoryField { field: &'static str },

    /// The kind string does not resolve to a known message kind.
    #[error("message type `{0}` is not supported")]
    UnsupportedKind(String),

    /// The spec version string does not resolve to a known version.
    #[error("spec version `{0}` is not supported")]
    UnsupportedSpecVersion(String),

    /// A required attribute is absent.
    #[error("required attribute `{name}` of type {expected} for message `{kind}` is missing")]
    MissingAttribute {
        name: String,
        expected: AttributeKind,
        kind: String,
    },

    /// A required attribute is present with the wrong variant.
    #[error(
        "required attribute `{name}` of type {expected} for message `{kind}` has type {actual}"
    )]
    AttributeTypeMismatch {
        name: String,
        expected: AttributeKind,
        actual: AttributeKind,
        kind: String,
    },
}

impl ValidationError {
    /// Get the stable snake_case code for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationError::MissingMandatoryField { .. } => "missing_mandatory_field",
            ValidationError::UnsupportedKind(_) => "unsupported_kind",
            ValidationError::UnsupportedSpecVersion(_) => "unsupported_spec_version",
            ValidationError::MissingAttribute { .. } => "missing_attribute",
            ValidationError::AttributeTypeMismatch { .. } => "attribute_type_mismatch",
        }
    }

    /// Name of the attribute or header field the error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingMandatoryField { field } => Some(field),
            ValidationError::MissingAttribute { name, .. }
            | ValidationError::AttributeTypeMismatch { name, .. } => Some(name),
            ValidationError::UnsupportedKind(_) | ValidationError::UnsupportedSpecVersion(_) => {
                None
            }
        }
    }
}

/// Encode and decode failures.
///
/// A codec never returns a partial buffer or an unvalidated envelope; every
/// failure surfaces as one of these variants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input could not be parsed into an envelope.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A value cannot be carried by the codec's representation.
    #[error("unsupported encoding for `{name}`: {found}")]
    UnsupportedAttributeEncoding { name: String, found: String },

    /// The envelope (input to encode, or result of decode) failed validation.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// The input exceeds the configured decode limit.
    #[error("message size {size} bytes exceeds maximum allowed size of {max} bytes")]
    MessageTooLarge { size: usize, max: usize },

    /// The codec does not implement this operation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl CodecError {
    /// Get the stable snake_case code for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodecError::MalformedInput(_) => "malformed_input",
            CodecError::UnsupportedAttributeEncoding { .. } => "unsupported_attribute_encoding",
            CodecError::ValidationFailed(_) => "validation_failed",
            CodecError::MessageTooLarge { .. } => "message_too_large",
            CodecError::NotImplemented(_) => "not_implemented",
        }
    }

    /// Get the validation error, if this failure came from validation.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            CodecError::ValidationFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// JSON body used when reporting a [`CodecError`].
#[derive(Serialize)]
struct ErrorReport {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

impl Serialize for CodecError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ErrorReport {
            code: self.as_str(),
            message: self.to_string(),
            reason: self.validation_error().map(ValidationError::as_str),
        }
        .serialize(serializer)
    }
}
