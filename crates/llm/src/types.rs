//! Model and generation parameter types.
//!
//! This module defines the model catalogue and the per-request generation
//! parameters, including the rule that selects between direct and
//! retrieval-augmented invocation.

use kbbot_core::config::{GenerationDefaults, MAX_TOKENS_RANGE, UNIT_RANGE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Foundation model identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelId {
    /// Amazon Nova Pro, the recommended default
    NovaPro,
    /// Amazon Nova Lite
    NovaLite,
    /// Any other provider model id
    Other(String),
}

impl ModelId {
    /// Parse a model id. Unknown ids are preserved as `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "amazon.nova-pro-v1:0" => Self::NovaPro,
            "amazon.nova-lite-v1:0" => Self::NovaLite,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the provider model id.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NovaPro => "amazon.nova-pro-v1:0",
            Self::NovaLite => "amazon.nova-lite-v1:0",
            Self::Other(id) => id,
        }
    }

    /// Whether this model accepts the direct messages payload.
    ///
    /// Only the Nova family is wired for direct invocation; the
    /// retrieval-augmented path accepts any model.
    pub fn supports_direct(&self) -> bool {
        self.as_str().starts_with("amazon.nova")
    }

    /// Fully-qualified model reference for the given region.
    pub fn arn(&self, region: &str) -> String {
        format!(
            "arn:aws:bedrock:{}::foundation-model/{}",
            region,
            self.as_str()
        )
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.as_str().to_string()
    }
}

/// Which of the two mutually exclusive invocation paths a turn uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationMode {
    /// Single user message straight to the model
    Direct,
    /// Retrieve from the knowledge base, then generate
    RetrievalAugmented,
}

impl InvocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::RetrievalAugmented => "retrieval_augmented",
        }
    }
}

/// Per-request generation parameters.
///
/// `max_tokens`, `temperature` and `top_p` are only transmitted on the
/// retrieval-augmented path; direct invocation accepts but ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub model_id: ModelId,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
}

impl GenerationParameters {
    /// Create parameters for a model using the built-in defaults.
    pub fn new(model_id: ModelId) -> Self {
        Self::from_defaults(model_id, &GenerationDefaults::default(), None)
    }

    /// Create parameters from configured defaults.
    pub fn from_defaults(
        model_id: ModelId,
        defaults: &GenerationDefaults,
        knowledge_base_id: Option<String>,
    ) -> Self {
        Self {
            model_id,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            top_p: defaults.top_p,
            knowledge_base_id,
        }
    }

    /// Set the knowledge base; an empty id disables retrieval.
    pub fn with_knowledge_base(mut self, id: impl Into<String>) -> Self {
        self.knowledge_base_id = Some(id.into());
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the top-p nucleus sampling value.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// The knowledge base id, if one is set and non-blank.
    pub fn knowledge_base(&self) -> Option<&str> {
        self.knowledge_base_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Select the invocation mode. Re-evaluated on every turn.
    pub fn mode(&self) -> InvocationMode {
        if self.knowledge_base().is_some() {
            InvocationMode::RetrievalAugmented
        } else {
            InvocationMode::Direct
        }
    }

    /// Check the generation sub-parameters against their bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !MAX_TOKENS_RANGE.contains(&self.max_tokens) {
            return Err(format!(
                "max_tokens must be between {} and {}, got {}",
                MAX_TOKENS_RANGE.start(),
                MAX_TOKENS_RANGE.end(),
                self.max_tokens
            ));
        }

        if !UNIT_RANGE.contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                self.temperature
            ));
        }

        if !UNIT_RANGE.contains(&self.top_p) {
            return Err(format!(
                "top_p must be between 0.0 and 1.0, got {}",
                self.top_p
            ));
        }

        Ok(())
    }
}
