//! Example: Validate sample envelopes and round-trip them through every codec
//!
//! Each sample envelope is validated, then encoded and decoded with both the
//! protobuf and JSON codecs. Response envelopes carry a `data` attribute,
//! which collides with the JSON payload key, so the JSON codec refuses them.
//!
//! Run with: cargo run --bin roundtrip
//! Verbose:  RUST_LOG=up_cloudevent=debug cargo run --bin roundtrip

use tracing_subscriber::EnvFilter;
use up_cloudevent::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let validator = EnvelopeValidator::default();

    for (label, envelope) in up_cloudevent_examples::samples() {
        match validator.validate(&envelope) {
            Ok(()) => println!("{label}: valid"),
            Err(e) => {
                println!("{label}: invalid ({e})");
                continue;
            }
        }

        for format in [CodecFormat::Protobuf, CodecFormat::Json] {
            let codec = format.codec();
            match codec.encode(&envelope) {
                Ok(bytes) => {
                    let decoded = codec.decode(&bytes)?;
                    anyhow::ensure!(
                        decoded == envelope,
                        "{} round-trip changed {label}",
                        codec.name()
                    );
                    println!("  {:<8} {} bytes, round-trip ok", codec.name(), bytes.len());
                }
                Err(e) => println!("  {:<8} refused: {e}", codec.name()),
            }
        }
    }

    // A request without its mandatory ttl
    let broken = Envelope::new("req-2", "up://device/x/1/rpc.Get", "v1", "req.v1")
        .with_attribute("sink", AttributeValue::string("up://cloud/x/1"));
    match ProtobufCodec::default().encode(&broken) {
        Ok(_) => anyhow::bail!("request without ttl was encoded"),
        Err(e) => println!("broken request: {} ({e})", e.as_str()),
    }

    Ok(())
}
