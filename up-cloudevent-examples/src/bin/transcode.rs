//! Example: Convert an envelope between the protobuf and JSON encodings
//!
//! Reads an encoded envelope from stdin, decodes it with the codec selected by
//! the content type argument, and writes it to stdout in the other encoding.
//! On failure a JSON error report is printed to stderr.
//!
//! Run with: cargo run --bin transcode -- <content-type>
//! Test with:
//!   echo -n '{"id":"1","source":"up://x","specversion":"v1","type":"req.v1","sink":"s","ttl":5}' \
//!     | cargo run --bin transcode -- application/cloudevents+json > event.pb
//!   cargo run --bin transcode -- application/cloudevents+protobuf < event.pb

use std::io::{Read, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use up_cloudevent::CodecFormat;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let content_type = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CodecFormat::Json.content_type().to_string());
    let input = CodecFormat::from_content_type(&content_type)
        .with_context(|| format!("unsupported content type: {content_type}"))?;
    let output = match input {
        CodecFormat::Protobuf => CodecFormat::Json,
        CodecFormat::Json => CodecFormat::Protobuf,
    };

    let mut data = Vec::new();
    std::io::stdin()
        .read_to_end(&mut data)
        .context("failed to read stdin")?;

    let result = input
        .codec()
        .decode(&data)
        .and_then(|envelope| output.codec().encode(&envelope));

    match result {
        Ok(bytes) => {
            tracing::info!(from = input.content_type(), to = output.content_type(), "transcoded");
            std::io::stdout().write_all(&bytes)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e)?);
            std::process::exit(1);
        }
    }
}
