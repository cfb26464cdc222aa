use up_cloudevent::{AttributeValue, CloudEventAttributes, Envelope, Priority};

/// Sample envelopes shared by the example binaries, one per message kind.
///
/// # Example
///
/// ```ignore
/// for (label, envelope) in up_cloudevent_examples::samples() {
///     println!("{label}: {}", envelope.id);
/// }
/// ```
pub fn samples() -> Vec<(&'static str, Envelope)> {
    let common = CloudEventAttributes::builder()
        .with_priority(Priority::Cs4)
        .with_ttl(3000)
        .with_hash("somehash")
        .build();

    vec![
        (
            "publish",
            Envelope::new("pub-1", "up://device/body.access/1/door.front_left#Door", "v1", "pub.v1")
                .with_text_data("open")
                .with_common_attributes(&common),
        ),
        (
            "file",
            Envelope::new("file-1", "up://device/logs/1/upload", "v1", "file.v1")
                .with_binary_data(vec![0x1f, 0x8b, 0x08, 0x00]),
        ),
        (
            "request",
            Envelope::new("req-1", "up://device/core.usubscription/3/rpc.Subscribe", "v1", "req.v1")
                .with_text_data("subscribe")
                .with_attribute("sink", AttributeValue::string("up://cloud/core.usubscription/3"))
                .with_attribute("ttl", AttributeValue::Integer(1000)),
        ),
        (
            "response",
            Envelope::new("res-1", "up://cloud/core.usubscription/3/rpc.Subscribe", "v1", "res.v1")
                .with_text_data("subscribed")
                .with_attribute("sink", AttributeValue::string("up://device/core.usubscription/3"))
                .with_attribute("ttl", AttributeValue::Integer(1000))
                .with_attribute("data", AttributeValue::string("subscribed"))
                .with_attribute("reqid", AttributeValue::string("req-1"))
                .with_attribute("dataschema", AttributeValue::string("type.googleapis.com/Ack")),
        ),
    ]
}
