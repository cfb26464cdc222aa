//! Envelope validation.
//!
//! An envelope is valid when, in this order:
//! 1. `id`, `source`, `spec_version` and `type` are all non-empty
//! 2. `type` resolves to a known [`MessageKind`]
//! 3. `spec_version` resolves to a known [`SpecVersion`](up_cloudevent_core::SpecVersion)
//! 4. every [`MandatoryAttributeRule`] registered for the kind is satisfied
//!
//! Checking stops at the first failure, which is the one reported.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use up_cloudevent_core::{
    AttributeKind, DATA_KEY, DATA_SCHEMA_KEY, Envelope, KindRegistry, MessageKind, REQ_ID_KEY,
    SINK_KEY, SpecVersionRegistry, TTL_KEY, ValidationError,
};

static DEFAULT_CONFIG: LazyLock<Arc<ValidatorConfig>> =
    LazyLock::new(|| Arc::new(ValidatorConfig::default()));

/// An attribute that must be present, with a given variant, for some message kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MandatoryAttributeRule {
    pub name: String,
    pub kind: AttributeKind,
}

impl MandatoryAttributeRule {
    pub fn new<S: Into<String>>(name: S, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Per message kind table of mandatory attributes.
///
/// Kinds without an entry have no mandatory attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRules {
    rules: HashMap<MessageKind, Vec<MandatoryAttributeRule>>,
}

impl Default for AttributeRules {
    fn default() -> Self {
        let request = vec![
            MandatoryAttributeRule::new(TTL_KEY, AttributeKind::Integer),
            MandatoryAttributeRule::new(SINK_KEY, AttributeKind::String),
        ];
        let mut response = request.clone();
        response.extend([
            MandatoryAttributeRule::new(DATA_KEY, AttributeKind::String),
            MandatoryAttributeRule::new(REQ_ID_KEY, AttributeKind::String),
            MandatoryAttributeRule::new(DATA_SCHEMA_KEY, AttributeKind::String),
        ]);

        Self::empty()
            .with_kind(MessageKind::Publish, Vec::new())
            .with_kind(MessageKind::File, Vec::new())
            .with_kind(MessageKind::Request, request)
            .with_kind(MessageKind::Response, response)
    }
}

impl AttributeRules {
    /// Create a table with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Replace the rules for one message kind.
    pub fn with_kind(mut self, kind: MessageKind, rules: Vec<MandatoryAttributeRule>) -> Self {
        self.rules.insert(kind, rules);
        self
    }

    /// Get the rules for a message kind, in check order.
    pub fn for_kind(&self, kind: MessageKind) -> &[MandatoryAttributeRule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Lookup tables and rules a validator checks against.
///
/// Built once and shared read-only; `Default` carries the uProtocol v1 tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub kinds: KindRegistry,
    pub spec_versions: SpecVersionRegistry,
    pub rules: AttributeRules,
}

impl ValidatorConfig {
    pub fn with_kinds(mut self, kinds: KindRegistry) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_spec_versions(mut self, spec_versions: SpecVersionRegistry) -> Self {
        self.spec_versions = spec_versions;
        self
    }

    pub fn with_rules(mut self, rules: AttributeRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Checks envelopes against a [`ValidatorConfig`].
///
/// Cloning is cheap (the config is reference counted) and validation never
/// mutates anything, so one validator can be shared across threads.
///
/// # Example
///
/// ```
/// use up_cloudevent::{AttributeValue, Envelope, EnvelopeValidator};
///
/// let validator = EnvelopeValidator::default();
/// let envelope = Envelope::new("id-88", "up://x", "v1", "req.v1")
///     .with_attribute("sink", AttributeValue::string("1"))
///     .with_attribute("ttl", AttributeValue::Integer(88));
/// assert!(validator.is_valid(&envelope));
///
/// let envelope = envelope.with_attribute("ttl", AttributeValue::string("88"));
/// assert!(!validator.is_valid(&envelope));
/// ```
#[derive(Clone, Debug)]
pub struct EnvelopeValidator {
    config: Arc<ValidatorConfig>,
}

impl Default for EnvelopeValidator {
    fn default() -> Self {
        Self {
            config: Arc::clone(&DEFAULT_CONFIG),
        }
    }
}

impl EnvelopeValidator {
    /// Create a validator with a custom configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns true if the envelope passes every check.
    pub fn is_valid(&self, envelope: &Envelope) -> bool {
        self.validate(envelope).is_ok()
    }

    /// Validate an envelope, returning the first failing check.
    pub fn validate(&self, envelope: &Envelope) -> Result<(), ValidationError> {
        if let Some(field) = envelope.first_missing_field() {
            tracing::debug!(
                target: "up_cloudevent::validator",
                field,
                "one of the mandatory header values is missing"
            );
            return Err(ValidationError::MissingMandatoryField { field });
        }

        let kind = self.config.kinds.resolve(&envelope.kind);
        if !kind.is_specified() {
            tracing::debug!(
                target: "up_cloudevent::validator",
                kind = %envelope.kind,
                "message type not supported"
            );
            return Err(ValidationError::UnsupportedKind(envelope.kind.clone()));
        }

        if !self
            .config
            .spec_versions
            .resolve(&envelope.spec_version)
            .is_defined()
        {
            tracing::debug!(
                target: "up_cloudevent::validator",
                spec_version = %envelope.spec_version,
                "spec version not supported"
            );
            return Err(ValidationError::UnsupportedSpecVersion(
                envelope.spec_version.clone(),
            ));
        }

        for rule in self.config.rules.for_kind(kind) {
            check_rule(envelope, rule)?;
        }

        Ok(())
    }
}

fn check_rule(envelope: &Envelope, rule: &MandatoryAttributeRule) -> Result<(), ValidationError> {
    let Some(value) = envelope.attribute(&rule.name) else {
        tracing::debug!(
            target: "up_cloudevent::validator",
            attribute = %rule.name,
            expected = %rule.kind,
            kind = %envelope.kind,
            "required attribute is missing"
        );
        return Err(ValidationError::MissingAttribute {
            name: rule.name.clone(),
            expected: rule.kind,
            kind: envelope.kind.clone(),
        });
    };

    let actual = value.kind();
    if actual != rule.kind {
        tracing::debug!(
            target: "up_cloudevent::validator",
            attribute = %rule.name,
            expected = %rule.kind,
            actual = %actual,
            kind = %envelope.kind,
            "required attribute has the wrong type"
        );
        return Err(ValidationError::AttributeTypeMismatch {
            name: rule.name.clone(),
            expected: rule.kind,
            actual,
            kind: envelope.kind.clone(),
        });
    }

    Ok(())
}
