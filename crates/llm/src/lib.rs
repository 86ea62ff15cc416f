//! Inference boundary crate for the kbbot assistant.
//!
//! This crate owns everything that crosses the process boundary towards the
//! managed inference and retrieval service:
//! - Wire types for direct model invocation and retrieval-augmented generation
//! - The `InferenceClient` and `IngestionClient` traits
//! - The Bedrock HTTP provider and a factory that builds it from configuration
//! - The knowledge base ingestion trigger
//!
//! # Example
//! ```no_run
//! use kbbot_llm::{create_inference_client, DirectRequest, InferenceClient};
//! use kbbot_core::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let client = create_inference_client(&config)?;
//! let request = DirectRequest::new("amazon.nova-lite-v1:0", "Hello!");
//! let response = client.invoke_model(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod ingestion;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{
    AugmentedRequest, AugmentedResponse, Citation, DirectRequest, DirectResponse,
    InferenceClient, InferenceRequest, InferenceResponse, ReferenceLocation, RetrievedReference,
    TextInferenceConfig, TokenUsage,
};
pub use factory::{create_inference_client, create_ingestion_client};
pub use ingestion::{
    trigger_ingestion, IngestionBody, IngestionClient, IngestionResponse, IngestionStatus,
};
pub use providers::BedrockClient;
pub use types::{GenerationParameters, InvocationMode, ModelId};
