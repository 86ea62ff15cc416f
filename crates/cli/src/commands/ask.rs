//! Ask command handler.
//!
//! Runs one turn through a fresh chat session and prints the answer.

use super::generation::GenerationArgs;
use clap::Args;
use kbbot_chat::GenerationOrchestrator;
use kbbot_core::{config::AppConfig, AppError, AppResult};
use kbbot_llm::create_inference_client;
use std::path::PathBuf;

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub prompt: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "prompt")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let prompt = self.get_prompt()?;

        let params = self.generation.parameters(
            config,
            &config.model,
            config.knowledge_base_id.as_deref(),
        )?;

        let client = create_inference_client(config)?;
        let mut orchestrator = GenerationOrchestrator::from_config(config, client)?;

        let Some(outcome) = orchestrator.submit(&prompt, &params).await else {
            return Err(AppError::Config("Question cannot be empty".to_string()));
        };

        if self.json {
            let output = serde_json::json!({
                "answer": outcome.text,
                "mode": outcome.mode,
                "model": params.model_id,
                "knowledgeBaseId": params.knowledge_base(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", outcome.text);
        }

        Ok(())
    }

    /// Get the question from the positional argument or a file.
    fn get_prompt(&self) -> AppResult<String> {
        if let Some(prompt) = &self.prompt {
            return Ok(prompt.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read prompt file {:?}: {}", path, e))
            });
        }

        Err(AppError::Config("No question provided".to_string()))
    }
}
