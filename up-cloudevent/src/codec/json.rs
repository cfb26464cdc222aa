//! Textual strategy: a flat JSON object.
//!
//! ```text
//! {"id": "...", "source": "...", "specversion": "...", "type": "...", "data": "...", "<attr>": "..." | 123}
//! ```
//!
//! Only string and integer attributes have a JSON form; the header keys are
//! reserved and cannot be used as attribute names.

use bytes::Bytes;
use serde_json::{Map, Number, Value};
use up_cloudevent_core::{AttributeValue, CodecError, Envelope, Payload};

use super::{EnvelopeCodec, JSON_CONTENT_TYPE, check_after_decode, check_before_encode, malformed};
use crate::limits::DecodeLimits;
use crate::validator::EnvelopeValidator;

const NAME: &str = "json";

const ID_KEY: &str = "id";
const SOURCE_KEY: &str = "source";
const SPEC_VERSION_KEY: &str = "specversion";
const TYPE_KEY: &str = "type";
const DATA_KEY: &str = "data";

const RESERVED_KEYS: [&str; 5] = [ID_KEY, SOURCE_KEY, SPEC_VERSION_KEY, TYPE_KEY, DATA_KEY];

/// JSON envelope codec.
///
/// # Example
///
/// ```
/// use up_cloudevent::{Envelope, EnvelopeCodec, JsonCodec};
///
/// let codec = JsonCodec::default();
/// let json = br#"{"id":"id-1","source":"up://x","specversion":"v1","type":"pub.v1","hash":"abc"}"#;
///
/// let envelope = codec.decode(json).unwrap();
/// assert_eq!(envelope.kind, "pub.v1");
/// assert_eq!(codec.decode(&codec.encode(&envelope).unwrap()).unwrap(), envelope);
/// ```
#[derive(Clone, Debug, Default)]
pub struct JsonCodec {
    validator: EnvelopeValidator,
    limits: DecodeLimits,
}

impl JsonCodec {
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

impl EnvelopeCodec for JsonCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    fn encode(&self, envelope: &Envelope) -> Result<Bytes, CodecError> {
        check_before_encode(&self.validator, NAME, envelope)?;

        let object = to_json_object(envelope)?;
        let data = serde_json::to_vec(&Value::Object(object))
            .map_err(|e| malformed(NAME, format!("failed to encode JSON: {e}")))?;
        Ok(Bytes::from(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Envelope, CodecError> {
        if data.is_empty() {
            return Err(malformed(NAME, "empty input"));
        }
        self.limits.check_size(data.len())?;

        let value: Value = serde_json::from_slice(data)
            .map_err(|e| malformed(NAME, format!("failed to decode JSON message: {e}")))?;
        let Value::Object(object) = value else {
            return Err(malformed(NAME, "top-level JSON value is not an object"));
        };

        let envelope = from_json_object(object)?;
        check_after_decode(&self.validator, NAME, envelope)
    }
}

fn to_json_object(envelope: &Envelope) -> Result<Map<String, Value>, CodecError> {
    let mut object = Map::new();
    object.insert(ID_KEY.into(), Value::String(envelope.id.clone()));
    object.insert(SOURCE_KEY.into(), Value::String(envelope.source.clone()));
    object.insert(SPEC_VERSION_KEY.into(), Value::String(envelope.spec_version.clone()));
    object.insert(TYPE_KEY.into(), Value::String(envelope.kind.clone()));

    match &envelope.payload {
        None => {}
        Some(Payload::Text(text)) => {
            object.insert(DATA_KEY.into(), Value::String(text.clone()));
        }
        Some(Payload::Binary(_)) => {
            return Err(unsupported(DATA_KEY, "binary payload"));
        }
    }

    for (name, value) in &envelope.attributes {
        if RESERVED_KEYS.contains(&name.as_str()) {
            return Err(unsupported(name, "attribute name collides with a header key"));
        }
        let json = match value {
            AttributeValue::String(s) => Value::String(s.clone()),
            AttributeValue::Integer(i) => Value::Number(Number::from(*i)),
            other => return Err(unsupported(name, other.kind().as_str())),
        };
        object.insert(name.clone(), json);
    }

    Ok(object)
}

fn from_json_object(object: Map<String, Value>) -> Result<Envelope, CodecError> {
    let mut envelope = Envelope::default();

    for (name, value) in object {
        let value = match value {
            Value::String(_) | Value::Number(_) => value,
            other => return Err(unsupported(&name, json_type_name(&other))),
        };

        match name.as_str() {
            ID_KEY => envelope.id = header_string(&name, value)?,
            SOURCE_KEY => envelope.source = header_string(&name, value)?,
            SPEC_VERSION_KEY => envelope.spec_version = header_string(&name, value)?,
            TYPE_KEY => envelope.kind = header_string(&name, value)?,
            DATA_KEY => envelope.payload = Some(Payload::Text(header_string(&name, value)?)),
            _ => {
                let attribute = attribute_value(&name, value)?;
                envelope.attributes.insert(name, attribute);
            }
        }
    }

    Ok(envelope)
}

fn header_string(name: &str, value: Value) -> Result<String, CodecError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(malformed(
            NAME,
            format!("`{name}` must be a string, found {}", json_type_name(&other)),
        )),
    }
}

fn attribute_value(name: &str, value: Value) -> Result<AttributeValue, CodecError> {
    match value {
        Value::String(s) => Ok(AttributeValue::String(s)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(AttributeValue::Integer)
            .ok_or_else(|| unsupported(name, &format!("number {n} is not a 32-bit integer"))),
        other => Err(unsupported(name, json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unsupported(name: &str, found: &str) -> CodecError {
    tracing::warn!(
        target: "up_cloudevent::codec",
        codec = NAME,
        attribute = name,
        found,
        "unsupported value encoding"
    );
    CodecError::UnsupportedAttributeEncoding {
        name: name.to_string(),
        found: found.to_string(),
    }
}
