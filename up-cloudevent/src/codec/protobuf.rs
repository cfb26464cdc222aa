//! Binary strategy: `io.cloudevents.v1.CloudEvent` via prost.

use bytes::Bytes;
use prost::Message;
use up_cloudevent_core::{CodecError, Envelope};

use super::{
    EnvelopeCodec, PROTOBUF_CONTENT_TYPE, check_after_decode, check_before_encode, malformed,
};
use crate::limits::DecodeLimits;
use crate::proto::CloudEvent;
use crate::validator::EnvelopeValidator;

const NAME: &str = "protobuf";

/// Protobuf envelope codec.
///
/// The byte layout is entirely prost's; this codec only sequences validation
/// around it and maps parse failures to [`CodecError::MalformedInput`].
///
/// # Example
///
/// ```
/// use up_cloudevent::{AttributeValue, Envelope, EnvelopeCodec, ProtobufCodec};
///
/// let codec = ProtobufCodec::default();
/// let envelope = Envelope::new("id-88", "up://x", "v1", "req.v1")
///     .with_attribute("sink", AttributeValue::string("1"))
///     .with_attribute("ttl", AttributeValue::Integer(88));
///
/// let bytes = codec.encode(&envelope).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), envelope);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProtobufCodec {
    validator: EnvelopeValidator,
    limits: DecodeLimits,
}

impl ProtobufCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(mut self, validator: EnvelopeValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl EnvelopeCodec for ProtobufCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn content_type(&self) -> &'static str {
        PROTOBUF_CONTENT_TYPE
    }

    fn encode(&self, envelope: &Envelope) -> Result<Bytes, CodecError> {
        check_before_encode(&self.validator, NAME, envelope)?;
        Ok(Bytes::from(CloudEvent::from(envelope).encode_to_vec()))
    }

    fn decode(&self, data: &[u8]) -> Result<Envelope, CodecError> {
        // prost accepts an empty buffer as the default message
        if data.is_empty() {
            return Err(malformed(NAME, "empty input"));
        }
        self.limits.check_size(data.len())?;

        let event = CloudEvent::decode(data)
            .map_err(|e| malformed(NAME, format!("failed to decode protobuf message: {e}")))?;

        check_after_decode(&self.validator, NAME, Envelope::from(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fixtures::{bad_request, valid_request};
    use crate::validator::ValidatorConfig;
    use up_cloudevent_core::{AttributeValue, KindRegistry, MessageKind, ValidationError};

    #[test]
    fn test_encode_invalid_envelope() {
        let result = ProtobufCodec::default().encode(&bad_request());
        assert!(matches!(
            result,
            Err(CodecError::ValidationFailed(
                ValidationError::AttributeTypeMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_encode_empty_envelope() {
        let result = ProtobufCodec::default().encode(&Envelope::default());
        assert_eq!(
            result,
            Err(CodecError::ValidationFailed(
                ValidationError::MissingMandatoryField { field: "id" }
            ))
        );
    }

    #[test]
    fn test_roundtrip_valid_envelope() {
        let codec = ProtobufCodec::default();
        let envelope = valid_request();

        let data = codec.encode(&envelope).unwrap();
        assert!(!data.is_empty());
        assert_eq!(codec.decode(&data).unwrap(), envelope);
    }

    #[test]
    fn test_roundtrip_every_attribute_variant() {
        let codec = ProtobufCodec::default();
        let envelope = valid_request()
            .with_binary_data(Bytes::from_static(b"\x00\x01\x02"))
            .with_attribute("flag", AttributeValue::Boolean(false))
            .with_attribute("blob", AttributeValue::Bytes(Bytes::from_static(b"\xde\xad")))
            .with_attribute("origin", AttributeValue::uri("up://origin/1"))
            .with_attribute("ref", AttributeValue::uri_ref("#part"))
            .with_attribute(
                "time",
                AttributeValue::Timestamp(prost_types::Timestamp {
                    seconds: 1_700_000_000,
                    nanos: 42,
                }),
            )
            .with_attribute("nothing", AttributeValue::Unset);

        let data = codec.encode(&envelope).unwrap();
        assert_eq!(codec.decode(&data).unwrap(), envelope);
    }

    #[test]
    fn test_decode_trailing_byte() {
        let codec = ProtobufCodec::default();
        let mut data = codec.encode(&valid_request()).unwrap().to_vec();
        data.push(0x77);

        let result = codec.decode(&data);
        assert!(matches!(result, Err(CodecError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_truncated() {
        let codec = ProtobufCodec::default();
        let data = codec.encode(&valid_request()).unwrap();

        let result = codec.decode(&data[..data.len() - 1]);
        assert!(matches!(result, Err(CodecError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_empty_data() {
        let result = ProtobufCodec::default().decode(&[]);
        assert_eq!(result, Err(CodecError::MalformedInput("empty input".into())));
    }

    #[test]
    fn test_decode_invalid_envelope() {
        // Encode with a validator that accepts anything the default rejects
        let lenient = EnvelopeValidator::new(
            ValidatorConfig::default()
                .with_kinds(KindRegistry::default().with_entry("req.v1", MessageKind::Publish)),
        );
        let data = ProtobufCodec::new()
            .with_validator(lenient)
            .encode(&bad_request())
            .unwrap();

        let err = ProtobufCodec::default().decode(&data).unwrap_err();
        assert_eq!(err.as_str(), "validation_failed");
        assert_eq!(err.validation_error().and_then(|e| e.field()), Some("ttl"));
    }

    #[test]
    fn test_decode_respects_limits() {
        let codec = ProtobufCodec::default();
        let data = codec.encode(&valid_request()).unwrap();

        let limited = ProtobufCodec::new().with_limits(DecodeLimits::new(data.len() - 1));
        assert!(matches!(
            limited.decode(&data),
            Err(CodecError::MessageTooLarge { .. })
        ));

        let exact = ProtobufCodec::new().with_limits(DecodeLimits::new(data.len()));
        assert!(exact.decode(&data).is_ok());
    }

    #[test]
    fn test_encode_does_not_mutate_input() {
        let envelope = valid_request();
        let before = envelope.clone();
        let _ = ProtobufCodec::default().encode(&envelope).unwrap();
        assert_eq!(envelope, before);
    }
}
