//! Protobuf messages for `io.cloudevents.v1.CloudEvent`.
//!
//! These mirror the upstream `cloudevents.proto` definition (without the
//! `proto_data` arm, which envelopes cannot carry) and convert to and from the
//! [`Envelope`] data model.

use std::collections::HashMap;

use bytes::Bytes;
use up_cloudevent_core::{AttributeValue, Envelope, Payload};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CloudEvent {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub source: String,
    #[prost(string, tag = "3")]
    pub spec_version: String,
    #[prost(string, tag = "4")]
    pub r#type: String,
    #[prost(map = "string, message", tag = "5")]
    pub attributes: HashMap<String, CloudEventAttributeValue>,
    #[prost(oneof = "cloud_event::Data", tags = "6, 7")]
    pub data: Option<cloud_event::Data>,
}

pub mod cloud_event {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(bytes = "bytes", tag = "6")]
        BinaryData(::bytes::Bytes),
        #[prost(string, tag = "7")]
        TextData(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CloudEventAttributeValue {
    #[prost(oneof = "cloud_event_attribute_value::Attr", tags = "1, 2, 3, 4, 5, 6, 7")]
    pub attr: Option<cloud_event_attribute_value::Attr>,
}

pub mod cloud_event_attribute_value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Attr {
        #[prost(bool, tag = "1")]
        CeBoolean(bool),
        #[prost(int32, tag = "2")]
        CeInteger(i32),
        #[prost(string, tag = "3")]
        CeString(String),
        #[prost(bytes = "bytes", tag = "4")]
        CeBytes(::bytes::Bytes),
        #[prost(string, tag = "5")]
        CeUri(String),
        #[prost(string, tag = "6")]
        CeUriRef(String),
        #[prost(message, tag = "7")]
        CeTimestamp(::prost_types::Timestamp),
    }
}

use cloud_event::Data;
use cloud_event_attribute_value::Attr;

impl From<&AttributeValue> for CloudEventAttributeValue {
    fn from(value: &AttributeValue) -> Self {
        let attr = match value {
            AttributeValue::String(s) => Some(Attr::CeString(s.clone())),
            AttributeValue::Integer(i) => Some(Attr::CeInteger(*i)),
            AttributeValue::Boolean(b) => Some(Attr::CeBoolean(*b)),
            AttributeValue::Bytes(b) => Some(Attr::CeBytes(b.clone())),
            AttributeValue::Uri(s) => Some(Attr::CeUri(s.clone())),
            AttributeValue::UriRef(s) => Some(Attr::CeUriRef(s.clone())),
            AttributeValue::Timestamp(ts) => Some(Attr::CeTimestamp(*ts)),
            AttributeValue::Unset => None,
        };
        Self { attr }
    }
}

impl From<CloudEventAttributeValue> for AttributeValue {
    fn from(value: CloudEventAttributeValue) -> Self {
        match value.attr {
            Some(Attr::CeString(s)) => AttributeValue::String(s),
            Some(Attr::CeInteger(i)) => AttributeValue::Integer(i),
            Some(Attr::CeBoolean(b)) => AttributeValue::Boolean(b),
            Some(Attr::CeBytes(b)) => AttributeValue::Bytes(b),
            Some(Attr::CeUri(s)) => AttributeValue::Uri(s),
            Some(Attr::CeUriRef(s)) => AttributeValue::UriRef(s),
            Some(Attr::CeTimestamp(ts)) => AttributeValue::Timestamp(ts),
            None => AttributeValue::Unset,
        }
    }
}

impl From<&Envelope> for CloudEvent {
    fn from(envelope: &Envelope) -> Self {
        let data = envelope.payload.as_ref().map(|payload| match payload {
            Payload::Text(s) => Data::TextData(s.clone()),
            Payload::Binary(b) => Data::BinaryData(Bytes::clone(b)),
        });

        Self {
            id: envelope.id.clone(),
            source: envelope.source.clone(),
            spec_version: envelope.spec_version.clone(),
            r#type: envelope.kind.clone(),
            attributes: envelope
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.into()))
                .collect(),
            data,
        }
    }
}

impl From<CloudEvent> for Envelope {
    fn from(event: CloudEvent) -> Self {
        let payload = event.data.map(|data| match data {
            Data::TextData(s) => Payload::Text(s),
            Data::BinaryData(b) => Payload::Binary(b),
        });

        Self {
            id: event.id,
            source: event.source,
            spec_version: event.spec_version,
            kind: event.r#type,
            payload,
            attributes: event
                .attributes
                .into_iter()
                .map(|(name, value)| (name, value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;
    use prost_types::Timestamp;

    #[test]
    fn test_attribute_conversion_preserves_variant() {
        let values = [
            AttributeValue::string("s"),
            AttributeValue::Integer(-7),
            AttributeValue::Boolean(true),
            AttributeValue::Bytes(Bytes::from_static(b"\x00\xff")),
            AttributeValue::uri("up://x/1"),
            AttributeValue::uri_ref("/1"),
            AttributeValue::Timestamp(Timestamp {
                seconds: 1_700_000_000,
                nanos: 5,
            }),
            AttributeValue::Unset,
        ];

        for value in values {
            let proto = CloudEventAttributeValue::from(&value);
            assert_eq!(AttributeValue::from(proto), value);
        }
    }

    #[test]
    fn test_unset_has_no_oneof() {
        let proto = CloudEventAttributeValue::from(&AttributeValue::Unset);
        assert!(proto.attr.is_none());
        assert!(proto.encode_to_vec().is_empty());
    }

    #[test]
    fn test_envelope_field_mapping() {
        let envelope = Envelope::new("id", "up://x", "v1", "pub.v1").with_text_data("hi");
        let event = CloudEvent::from(&envelope);

        assert_eq!(event.id, "id");
        assert_eq!(event.source, "up://x");
        assert_eq!(event.spec_version, "v1");
        assert_eq!(event.r#type, "pub.v1");
        assert_eq!(event.data, Some(Data::TextData("hi".into())));
        assert_eq!(Envelope::from(event), envelope);
    }

    #[test]
    fn test_wire_tags() {
        let event = CloudEvent {
            id: "a".into(),
            ..Default::default()
        };
        // field 1, wire type 2, length 1
        assert_eq!(event.encode_to_vec(), vec![0x0a, 0x01, b'a']);

        let event = CloudEvent {
            data: Some(Data::TextData("b".into())),
            ..Default::default()
        };
        // field 7, wire type 2, length 1
        assert_eq!(event.encode_to_vec(), vec![0x3a, 0x01, b'b']);
    }
}
