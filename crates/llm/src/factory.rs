//! Provider factory.
//!
//! Builds inference and ingestion clients from the process configuration.
//! Endpoints are resolved from the region unless overridden.

use crate::client::InferenceClient;
use crate::ingestion::IngestionClient;
use crate::providers::BedrockClient;
use kbbot_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Create the inference client for chat sessions.
///
/// # Errors
/// Returns `AppError::Config` if an endpoint is not an http(s) URL.
pub fn create_inference_client(config: &AppConfig) -> AppResult<Arc<dyn InferenceClient>> {
    Ok(Arc::new(bedrock_client(config)?))
}

/// Create the client used by the ingestion trigger.
pub fn create_ingestion_client(config: &AppConfig) -> AppResult<Arc<dyn IngestionClient>> {
    Ok(Arc::new(bedrock_client(config)?))
}

fn bedrock_client(config: &AppConfig) -> AppResult<BedrockClient> {
    let runtime = config.runtime_endpoint();
    let agent_runtime = config.agent_runtime_endpoint();
    let agent = config.agent_endpoint();

    for endpoint in [&runtime, &agent_runtime, &agent] {
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(AppError::Config(format!(
                "Endpoint must be an http(s) URL: {}",
                endpoint
            )));
        }
    }

    tracing::debug!(
        "Creating Bedrock client (runtime: {}, agent runtime: {}, agent: {})",
        runtime,
        agent_runtime,
        agent
    );

    Ok(BedrockClient::with_endpoints(runtime, agent_runtime, agent)
        .with_api_key(config.api_key.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_clients() {
        let config = AppConfig::default();
        let client = create_inference_client(&config).unwrap();
        assert_eq!(client.provider_name(), "bedrock");
        assert!(create_ingestion_client(&config).is_ok());
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = AppConfig::default();
        config.endpoints.runtime = Some("ftp://example.com".to_string());
        match create_inference_client(&config) {
            Err(err) => assert!(err.to_string().contains("http(s) URL")),
            Ok(_) => panic!("Expected error for non-http endpoint"),
        }
    }
}
