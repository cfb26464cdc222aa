//! Common uProtocol attributes and their builder.
//!
//! [`CloudEventAttributes`] is the reduced attribute set most producers attach
//! to an envelope: hash, priority, ttl, token and traceparent. It is assembled
//! with [`CloudEventAttributesBuilder`] and applied to an envelope with
//! [`Envelope::with_common_attributes`](crate::Envelope::with_common_attributes).

/// Attribute key for the time-to-live in milliseconds.
pub const TTL_KEY: &str = "ttl";
/// Attribute key for the destination URI of a request or response.
pub const SINK_KEY: &str = "sink";
/// Attribute key for the payload schema.
pub const DATA_SCHEMA_KEY: &str = "dataschema";
/// Attribute key for the payload content type.
pub const DATA_CONTENT_TYPE_KEY: &str = "datacontenttype";
/// Attribute key for the id of the request a response answers.
pub const REQ_ID_KEY: &str = "reqid";
/// Attribute key for inline data.
pub const DATA_KEY: &str = "data";
/// Attribute key for the payload hash.
pub const HASH_KEY: &str = "hash";
/// Attribute key for the priority class.
pub const PRIORITY_KEY: &str = "priority";
/// Attribute key for the access token.
pub const TOKEN_KEY: &str = "token";
/// Attribute key for the W3C trace context.
pub const TRACEPARENT_KEY: &str = "traceparent";

/// uProtocol message priority classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Priority {
    #[default]
    Unspecified = 0,
    Cs0 = 1,
    Cs1 = 2,
    Cs2 = 3,
    Cs3 = 4,
    Cs4 = 5,
    Cs5 = 6,
    Cs6 = 7,
}

impl Priority {
    /// Get the enumerant name as carried in the `priority` attribute.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Priority::Unspecified => "UPRIORITY_UNSPECIFIED",
            Priority::Cs0 => "UPRIORITY_CS0",
            Priority::Cs1 => "UPRIORITY_CS1",
            Priority::Cs2 => "UPRIORITY_CS2",
            Priority::Cs3 => "UPRIORITY_CS3",
            Priority::Cs4 => "UPRIORITY_CS4",
            Priority::Cs5 => "UPRIORITY_CS5",
            Priority::Cs6 => "UPRIORITY_CS6",
        }
    }

    /// Parse an enumerant name produced by [`Priority::as_str_name`].
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UPRIORITY_UNSPECIFIED" => Some(Priority::Unspecified),
            "UPRIORITY_CS0" => Some(Priority::Cs0),
            "UPRIORITY_CS1" => Some(Priority::Cs1),
            "UPRIORITY_CS2" => Some(Priority::Cs2),
            "UPRIORITY_CS3" => Some(Priority::Cs3),
            "UPRIORITY_CS4" => Some(Priority::Cs4),
            "UPRIORITY_CS5" => Some(Priority::Cs5),
            "UPRIORITY_CS6" => Some(Priority::Cs6),
            _ => None,
        }
    }
}

/// Immutable snapshot of the common attribute set.
///
/// Empty means every field holds its default. Equality compares every field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloudEventAttributes {
    hash: String,
    priority: Priority,
    ttl: u32,
    token: String,
    traceparent: String,
}

impl CloudEventAttributes {
    /// Start a new builder with every field at its default.
    pub fn builder() -> CloudEventAttributesBuilder {
        CloudEventAttributesBuilder::default()
    }

    /// Returns true if every field holds its default value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn traceparent(&self) -> &str {
        &self.traceparent
    }
}

impl std::fmt::Display for CloudEventAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CloudEventAttributes{{hash={}, priority={}, ttl={}, token={}, traceparent={}}}",
            self.hash, self.priority as i32, self.ttl, self.token, self.traceparent
        )
    }
}

/// Accumulates common attributes.
///
/// Setters mutate the builder in place and return it for chaining. `build`
/// takes a snapshot without resetting anything, so a builder can be reused:
///
/// ```
/// use up_cloudevent_core::CloudEventAttributes;
///
/// let mut builder = CloudEventAttributes::builder();
/// let first = builder.with_hash("h").build();
/// let second = builder.with_ttl(5).build();
///
/// assert_eq!(first.ttl(), 0);
/// assert_eq!(second.hash(), "h");
/// assert_eq!(second.ttl(), 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CloudEventAttributesBuilder {
    attributes: CloudEventAttributes,
}

impl CloudEventAttributesBuilder {
    pub fn with_hash<S: Into<String>>(&mut self, hash: S) -> &mut Self {
        self.attributes.hash = hash.into();
        self
    }

    pub fn with_priority(&mut self, priority: Priority) -> &mut Self {
        self.attributes.priority = priority;
        self
    }

    pub fn with_ttl(&mut self, ttl: u32) -> &mut Self {
        self.attributes.ttl = ttl;
        self
    }

    pub fn with_token<S: Into<String>>(&mut self, token: S) -> &mut Self {
        self.attributes.token = token.into();
        self
    }

    pub fn with_traceparent<S: Into<String>>(&mut self, traceparent: S) -> &mut Self {
        self.attributes.traceparent = traceparent.into();
        self
    }

    /// Snapshot the fields set so far.
    pub fn build(&self) -> CloudEventAttributes {
        self.attributes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_attributes() -> CloudEventAttributes {
        CloudEventAttributes::builder()
            .with_hash("hash")
            .with_priority(Priority::Cs1)
            .with_ttl(100)
            .with_token("token")
            .with_traceparent("traceparent")
            .build()
    }

    #[test]
    fn test_builder_defaults_are_empty() {
        let attributes = CloudEventAttributes::builder().build();
        assert!(attributes.is_empty());
        assert!(attributes.hash().is_empty());
        assert_eq!(attributes.priority(), Priority::Unspecified);
        assert_eq!(attributes.ttl(), 0);
        assert!(attributes.token().is_empty());
        assert!(attributes.traceparent().is_empty());
        assert_eq!(attributes, CloudEventAttributes::default());
    }

    #[test]
    fn test_single_setter_makes_non_empty() {
        assert!(!CloudEventAttributes::builder().with_hash("h").build().is_empty());
        assert!(
            !CloudEventAttributes::builder()
                .with_priority(Priority::Cs0)
                .build()
                .is_empty()
        );
        assert!(!CloudEventAttributes::builder().with_ttl(1).build().is_empty());
        assert!(!CloudEventAttributes::builder().with_token("t").build().is_empty());
        assert!(
            !CloudEventAttributes::builder()
                .with_traceparent("tp")
                .build()
                .is_empty()
        );
    }

    #[test]
    fn test_accessors() {
        let attributes = full_attributes();
        assert_eq!(attributes.hash(), "hash");
        assert_eq!(attributes.priority(), Priority::Cs1);
        assert_eq!(attributes.ttl(), 100);
        assert_eq!(attributes.token(), "token");
        assert_eq!(attributes.traceparent(), "traceparent");
    }

    #[test]
    fn test_builder_accumulates_across_builds() {
        let expected = CloudEventAttributes::builder()
            .with_hash("hash")
            .with_priority(Priority::Cs1)
            .with_ttl(100)
            .build();

        let mut builder = CloudEventAttributes::builder();
        assert_ne!(expected, builder.build());

        let second = builder
            .with_hash("hash")
            .with_priority(Priority::Cs1)
            .with_token("token")
            .build();
        assert_ne!(expected, second);

        // Clearing the token and adding ttl converges on the expected set
        let third = builder.with_ttl(100).with_token("").build();
        assert_eq!(expected, third);

        let fourth = builder.with_hash("different hash").build();
        assert_ne!(expected, fourth);
        assert_eq!(fourth.ttl(), 100);
    }

    #[test]
    fn test_display() {
        let attributes = CloudEventAttributes::builder()
            .with_hash("hash")
            .with_priority(Priority::Cs1)
            .with_ttl(100)
            .with_token("value1")
            .with_traceparent("value2")
            .build();
        assert_eq!(
            attributes.to_string(),
            "CloudEventAttributes{hash=hash, priority=2, ttl=100, token=value1, traceparent=value2}"
        );
    }

    #[test]
    fn test_priority_names() {
        assert_eq!(Priority::Cs4.as_str_name(), "UPRIORITY_CS4");
        assert_eq!(Priority::from_str_name("UPRIORITY_CS4"), Some(Priority::Cs4));
        assert_eq!(Priority::from_str_name("CS4"), None);
    }
}
