//! Sync command handler.
//!
//! Starts an ingestion job so the knowledge base picks up new documents.

use clap::Args;
use kbbot_core::{config::AppConfig, AppResult};
use kbbot_llm::{create_ingestion_client, trigger_ingestion};

/// Start a knowledge base ingestion job
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Data source to sync (overrides DATA_SOURCE_ID)
    #[arg(long)]
    pub data_source_id: Option<String>,
}

impl SyncCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing sync command");

        let data_source_id = self
            .data_source_id
            .as_deref()
            .or(config.data_source_id.as_deref());

        let client = create_ingestion_client(config)?;
        let response = trigger_ingestion(
            client.as_ref(),
            data_source_id,
            config.knowledge_base_id.as_deref(),
        )
        .await;

        println!("{}", serde_json::to_string_pretty(&response)?);

        if !response.is_success() {
            tracing::warn!("Ingestion job was not started: {}", response.body.message);
        }

        Ok(())
    }
}
