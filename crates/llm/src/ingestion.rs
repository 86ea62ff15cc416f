//! Knowledge base ingestion trigger.
//!
//! Starts an ingestion job that refreshes the retrieval index from its data
//! source. The trigger runs on its own schedule and shares no state with chat
//! sessions. It always answers with status code 200: failures are reported
//! only in the body.

use kbbot_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Trait for services that can start ingestion jobs.
#[async_trait::async_trait]
pub trait IngestionClient: Send + Sync {
    /// Start an ingestion job and return the provider's raw response.
    async fn start_ingestion_job(
        &self,
        data_source_id: &str,
        knowledge_base_id: &str,
    ) -> AppResult<serde_json::Value>;
}

/// Outcome reported in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionStatus {
    Success,
    Error,
}

/// Response body of the ingestion trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionBody {
    pub status: IngestionStatus,
    pub message: String,
}

/// Response envelope of the ingestion trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionResponse {
    pub status_code: u16,
    pub body: IngestionBody,
}

impl IngestionResponse {
    fn success() -> Self {
        Self {
            status_code: 200,
            body: IngestionBody {
                status: IngestionStatus::Success,
                message: "Ingestion job started".to_string(),
            },
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: IngestionBody {
                status: IngestionStatus::Error,
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.body.status == IngestionStatus::Success
    }
}

/// Start an ingestion job for a knowledge base data source.
///
/// Never fails: missing identifiers and provider errors are captured into
/// the body with `status: "error"`.
pub async fn trigger_ingestion(
    client: &dyn IngestionClient,
    data_source_id: Option<&str>,
    knowledge_base_id: Option<&str>,
) -> IngestionResponse {
    tracing::info!(
        data_source_id = ?data_source_id,
        knowledge_base_id = ?knowledge_base_id,
        "Received ingestion trigger"
    );

    match start(client, data_source_id, knowledge_base_id).await {
        Ok(response) => {
            tracing::info!("start_ingestion_job response: {}", response);
            IngestionResponse::success()
        }
        Err(e) => {
            tracing::error!("Ingestion trigger failed: {}", e);
            IngestionResponse::error(e.to_string())
        }
    }
}

async fn start(
    client: &dyn IngestionClient,
    data_source_id: Option<&str>,
    knowledge_base_id: Option<&str>,
) -> AppResult<serde_json::Value> {
    let data_source_id = data_source_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Ingestion("DATA_SOURCE_ID is not set".to_string()))?;
    let knowledge_base_id = knowledge_base_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Ingestion("KNOWLEDGE_BASE_ID is not set".to_string()))?;

    client
        .start_ingestion_job(data_source_id, knowledge_base_id)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockIngestionClient {
        fail: bool,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockIngestionClient {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl IngestionClient for MockIngestionClient {
        async fn start_ingestion_job(
            &self,
            data_source_id: &str,
            knowledge_base_id: &str,
        ) -> AppResult<serde_json::Value> {
            self.calls
                .lock()
                .unwrap()
                .push((data_source_id.to_string(), knowledge_base_id.to_string()));
            if self.fail {
                Err(AppError::Ingestion("AccessDeniedException".to_string()))
            } else {
                Ok(serde_json::json!({"ingestionJob": {"status": "STARTING"}}))
            }
        }
    }

    #[tokio::test]
    async fn test_trigger_success() {
        let client = MockIngestionClient::new(false);
        let response = trigger_ingestion(&client, Some("DS1"), Some("KB1")).await;

        assert_eq!(response.status_code, 200);
        assert!(response.is_success());
        assert_eq!(response.body.message, "Ingestion job started");
        assert_eq!(
            client.calls.lock().unwrap().as_slice(),
            &[("DS1".to_string(), "KB1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_trigger_failure_still_200() {
        let client = MockIngestionClient::new(true);
        let response = trigger_ingestion(&client, Some("DS1"), Some("KB1")).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body.status, IngestionStatus::Error);
        assert!(response.body.message.contains("AccessDeniedException"));
    }

    #[tokio::test]
    async fn test_trigger_missing_ids() {
        let client = MockIngestionClient::new(false);
        let response = trigger_ingestion(&client, None, Some("KB1")).await;

        assert_eq!(response.status_code, 200);
        assert!(!response.is_success());
        assert!(response.body.message.contains("DATA_SOURCE_ID"));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_response_serialization() {
        let value = serde_json::to_value(IngestionResponse::success()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "statusCode": 200,
                "body": {"status": "success", "message": "Ingestion job started"}
            })
        );
    }
}
