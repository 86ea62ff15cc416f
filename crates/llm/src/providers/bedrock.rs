//! Amazon Bedrock provider implementation.
//!
//! Talks JSON over HTTPS to three Bedrock services:
//! - `bedrock-runtime` for direct model invocation
//! - `bedrock-agent-runtime` for retrieval-augmented generation
//! - `bedrock-agent` for knowledge base ingestion jobs
//!
//! Request signing is out of scope; an optional bearer credential is passed
//! through when configured.

use crate::client::{
    AugmentedRequest, AugmentedResponse, DirectRequest, DirectResponse, InferenceClient,
};
use crate::ingestion::IngestionClient;
use kbbot_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Bedrock client.
pub struct BedrockClient {
    /// Base URL for direct model invocation
    runtime_endpoint: String,

    /// Base URL for retrieval-augmented generation
    agent_runtime_endpoint: String,

    /// Base URL for knowledge base management
    agent_endpoint: String,

    /// Optional bearer credential
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl BedrockClient {
    /// Create a client with default endpoints for a region.
    pub fn new(region: &str) -> Self {
        Self::with_endpoints(
            format!("https://bedrock-runtime.{}.amazonaws.com", region),
            format!("https://bedrock-agent-runtime.{}.amazonaws.com", region),
            format!("https://bedrock-agent.{}.amazonaws.com", region),
        )
    }

    /// Create a client with explicit endpoints.
    pub fn with_endpoints(
        runtime_endpoint: impl Into<String>,
        agent_runtime_endpoint: impl Into<String>,
        agent_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            runtime_endpoint: trim_base(runtime_endpoint.into()),
            agent_runtime_endpoint: trim_base(agent_runtime_endpoint.into()),
            agent_endpoint: trim_base(agent_endpoint.into()),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a bearer credential to every request.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    fn invoke_url(&self, model_id: &str) -> String {
        format!("{}/model/{}/invoke", self.runtime_endpoint, model_id)
    }

    fn retrieve_and_generate_url(&self) -> String {
        format!("{}/retrieveAndGenerate", self.agent_runtime_endpoint)
    }

    fn ingestion_url(&self, data_source_id: &str, knowledge_base_id: &str) -> String {
        format!(
            "{}/knowledgebases/{}/datasources/{}/ingestionjobs/",
            self.agent_endpoint, knowledge_base_id, data_source_id
        )
    }

    /// Send a JSON body and decode the JSON answer.
    ///
    /// `wrap` picks the error category so callers can tell which boundary
    /// failed.
    async fn send_json<B, R>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &B,
        wrap: fn(String) -> AppError,
    ) -> AppResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);

        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| wrap(format!("Failed to send request to Bedrock: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(wrap(format!(
                "Bedrock API error ({}): {}",
                status,
                error_message(&error_text)
            )));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| wrap(format!("Failed to parse Bedrock response: {}", e)))
    }
}

/// Pull the service's `message` out of a JSON error body, if there is one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[async_trait::async_trait]
impl InferenceClient for BedrockClient {
    fn provider_name(&self) -> &str {
        "bedrock"
    }

    async fn invoke_model(&self, request: &DirectRequest) -> AppResult<DirectResponse> {
        tracing::info!("Invoking model: {}", request.model_id);
        tracing::debug!("Request: {:?}", request);

        let url = self.invoke_url(&request.model_id);
        let response: DirectResponse = self
            .send_json(reqwest::Method::POST, &url, request, AppError::Inference)
            .await?;

        tracing::debug!("Response: {:?}", response);
        Ok(response)
    }

    async fn retrieve_and_generate(
        &self,
        request: &AugmentedRequest,
    ) -> AppResult<AugmentedResponse> {
        tracing::info!(
            "Using knowledge base {} with model {}",
            request.knowledge_base_id(),
            request.model_arn()
        );
        tracing::debug!("Request: {:?}", request);

        let url = self.retrieve_and_generate_url();
        let response: AugmentedResponse = self
            .send_json(reqwest::Method::POST, &url, request, AppError::Retrieval)
            .await?;

        tracing::debug!("Response: {:?}", response);
        Ok(response)
    }
}

#[async_trait::async_trait]
impl IngestionClient for BedrockClient {
    async fn start_ingestion_job(
        &self,
        data_source_id: &str,
        knowledge_base_id: &str,
    ) -> AppResult<serde_json::Value> {
        tracing::info!(
            "Starting ingestion job for data source {} in knowledge base {}",
            data_source_id,
            knowledge_base_id
        );

        let url = self.ingestion_url(data_source_id, knowledge_base_id);
        self.send_json(
            reqwest::Method::PUT,
            &url,
            &serde_json::json!({}),
            AppError::Ingestion,
        )
        .await
    }
}
