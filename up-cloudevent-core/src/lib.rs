//! Core CloudEvent types for uProtocol.
//!
//! This crate provides the data model shared by the validator and the codecs
//! in `up-cloudevent`.
//!
//! ## Modules
//!
//! - `value`: Typed attribute values
//! - `envelope`: The envelope header, payload and attribute map
//! - `registry`: Message kind and spec version lookup tables
//! - `attributes`: Common attribute set and its builder
//! - `error`: Validation and codec error types

mod attributes;
mod envelope;
mod error;
mod registry;
mod value;

pub use attributes::*;
pub use envelope::*;
pub use error::*;
pub use registry::*;
pub use value::*;
