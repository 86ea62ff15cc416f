//! Inference client abstraction and wire types.
//!
//! This module defines the two request shapes accepted by the inference
//! boundary, the two response shapes it returns, and the `InferenceClient`
//! trait that providers implement.
//!
//! Response types deserialize every field as optional so that a
//! structurally incomplete body still reaches the renderer.

use kbbot_core::AppResult;
use serde::{Deserialize, Serialize};

// ============================================
// Direct invocation
// ============================================

/// Direct model invocation request: one user-role message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectRequest {
    /// Model id, carried in the URL rather than the body
    #[serde(skip)]
    pub model_id: String,

    pub messages: Vec<Message>,
}

/// A chat message in the direct payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

/// A text content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub text: String,
}

impl DirectRequest {
    /// Wrap a prompt in a single user-role message.
    pub fn new(model_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock {
                    text: prompt.into(),
                }],
            }],
        }
    }

    /// The prompt text of the first message.
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .and_then(|m| m.content.first())
            .map(|c| c.text.as_str())
    }
}

/// Direct model invocation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectResponse {
    #[serde(default)]
    pub output: Option<DirectOutput>,

    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectOutput {
    #[serde(default)]
    pub message: Option<OutputMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputMessage {
    #[serde(default)]
    pub content: Option<Vec<OutputContent>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputContent {
    #[serde(default)]
    pub text: Option<String>,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,

    #[serde(default)]
    pub output_tokens: Option<u64>,
}

impl DirectResponse {
    /// Build a response carrying text and usage.
    pub fn new(text: impl Into<String>, usage: Option<TokenUsage>) -> Self {
        Self {
            output: Some(DirectOutput {
                message: Some(OutputMessage {
                    content: Some(vec![OutputContent {
                        text: Some(text.into()),
                    }]),
                }),
            }),
            usage,
        }
    }

    /// Text of the first content block, if present.
    pub fn text(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.message.as_ref())
            .and_then(|m| m.content.as_ref())
            .and_then(|c| c.first())
            .and_then(|c| c.text.as_deref())
    }
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens: Some(input_tokens),
            output_tokens: Some(output_tokens),
        }
    }
}

// ============================================
// Retrieval-augmented generation
// ============================================

/// Retrieval-augmented generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedRequest {
    pub input: AugmentedInput,
    pub retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateConfiguration {
    #[serde(rename = "type")]
    pub kind: String,
    pub knowledge_base_configuration: KnowledgeBaseConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseConfiguration {
    pub knowledge_base_id: String,
    pub model_arn: String,
    pub generation_configuration: GenerationConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfiguration {
    pub inference_config: InferenceConfig,
    pub prompt_template: PromptTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub text_inference_config: TextInferenceConfig,
}

/// Generation sub-parameters transmitted on the retrieval-augmented path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInferenceConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub text_prompt_template: String,
}

impl AugmentedRequest {
    /// Create a knowledge base request.
    pub fn new(
        prompt: impl Into<String>,
        knowledge_base_id: impl Into<String>,
        model_arn: impl Into<String>,
        inference: TextInferenceConfig,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            input: AugmentedInput {
                text: prompt.into(),
            },
            retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration {
                kind: "KNOWLEDGE_BASE".to_string(),
                knowledge_base_configuration: KnowledgeBaseConfiguration {
                    knowledge_base_id: knowledge_base_id.into(),
                    model_arn: model_arn.into(),
                    generation_configuration: GenerationConfiguration {
                        inference_config: InferenceConfig {
                            text_inference_config: inference,
                        },
                        prompt_template: PromptTemplate {
                            text_prompt_template: prompt_template.into(),
                        },
                    },
                },
            },
        }
    }

    pub fn prompt(&self) -> &str {
        &self.input.text
    }

    pub fn knowledge_base_id(&self) -> &str {
        &self
            .retrieve_and_generate_configuration
            .knowledge_base_configuration
            .knowledge_base_id
    }

    pub fn model_arn(&self) -> &str {
        &self
            .retrieve_and_generate_configuration
            .knowledge_base_configuration
            .model_arn
    }

    pub fn inference(&self) -> &TextInferenceConfig {
        &self
            .retrieve_and_generate_configuration
            .knowledge_base_configuration
            .generation_configuration
            .inference_config
            .text_inference_config
    }

    pub fn prompt_template(&self) -> &str {
        &self
            .retrieve_and_generate_configuration
            .knowledge_base_configuration
            .generation_configuration
            .prompt_template
            .text_prompt_template
    }
}

/// Retrieval-augmented generation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedResponse {
    #[serde(default)]
    pub output: Option<AugmentedOutput>,

    #[serde(default)]
    pub citations: Option<Vec<Citation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentedOutput {
    #[serde(default)]
    pub text: Option<String>,
}

/// A raw citation record: zero or more retrieved references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default)]
    pub retrieved_references: Option<Vec<RetrievedReference>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedReference {
    #[serde(default)]
    pub location: Option<ReferenceLocation>,
}

/// Where a retrieved reference lives. At most one of the fields is
/// normally populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLocation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_location: Option<S3Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_location: Option<WebLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Location {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebLocation {
    #[serde(default)]
    pub url: Option<String>,
}

impl AugmentedResponse {
    /// Build a response carrying text and citations.
    pub fn new(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            output: Some(AugmentedOutput {
                text: Some(text.into()),
            }),
            citations: Some(citations),
            session_id: None,
        }
    }

    /// Generated answer text, if present.
    pub fn text(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.text.as_deref())
    }

    /// Raw citation records in response order.
    pub fn citations(&self) -> &[Citation] {
        self.citations.as_deref().unwrap_or(&[])
    }
}

impl Citation {
    /// Create a citation from retrieved references.
    pub fn new(references: Vec<RetrievedReference>) -> Self {
        Self {
            retrieved_references: Some(references),
        }
    }

    pub fn references(&self) -> &[RetrievedReference] {
        self.retrieved_references.as_deref().unwrap_or(&[])
    }
}

impl RetrievedReference {
    /// Reference to a storage object.
    pub fn s3(uri: impl Into<String>) -> Self {
        Self {
            location: Some(ReferenceLocation {
                kind: Some("S3".to_string()),
                s3_location: Some(S3Location {
                    uri: Some(uri.into()),
                }),
                web_location: None,
            }),
        }
    }

    /// Reference to a web page.
    pub fn web(url: impl Into<String>) -> Self {
        Self {
            location: Some(ReferenceLocation {
                kind: Some("WEB".to_string()),
                s3_location: None,
                web_location: Some(WebLocation {
                    url: Some(url.into()),
                }),
            }),
        }
    }
}

// ============================================
// Tagged request / response
// ============================================

/// One of the two request shapes. Never both in the same turn.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceRequest {
    Direct(DirectRequest),
    Augmented(AugmentedRequest),
}

/// One of the two response shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResponse {
    Direct(DirectResponse),
    Augmented(AugmentedResponse),
}

/// Trait for inference providers.
///
/// This trait abstracts the managed inference service and provides one call
/// per invocation mode. Calls block the turn until the provider answers or
/// fails; there is no retry or timeout at this layer.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Get the provider name (e.g., "bedrock").
    fn provider_name(&self) -> &str;

    /// Invoke a model directly with a single user message.
    async fn invoke_model(&self, request: &DirectRequest) -> AppResult<DirectResponse>;

    /// Retrieve from a knowledge base and generate an answer.
    async fn retrieve_and_generate(
        &self,
        request: &AugmentedRequest,
    ) -> AppResult<AugmentedResponse>;

    /// Dispatch a tagged request to the matching call.
    async fn invoke(&self, request: &InferenceRequest) -> AppResult<InferenceResponse> {
        match request {
            InferenceRequest::Direct(req) => {
                self.invoke_model(req).await.map(InferenceResponse::Direct)
            }
            InferenceRequest::Augmented(req) => self
                .retrieve_and_generate(req)
                .await
                .map(InferenceResponse::Augmented),
        }
    }
}
