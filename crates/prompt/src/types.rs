//! Prompt types for the kbbot assistant.

use serde::{Deserialize, Serialize};

/// A prompt definition, built in or loaded from YAML.
///
/// The sign-off phrase is fixed; templates reference it as `{{signOff}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A rendered retrieval template ready to be sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalTemplate {
    /// Template text with provider placeholders intact
    pub text: String,

    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Sign-off phrase the answer must end with
    #[serde(rename = "signOff")]
    pub sign_off: String,
}
