//! History command handler.
//!
//! Lists conversations archived to the workspace history log.

use clap::Args;
use kbbot_chat::HistoryLog;
use kbbot_core::{config::AppConfig, AppResult};

/// List archived conversations
#[derive(Args, Debug)]
pub struct HistoryCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HistoryCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing history command");

        let log = HistoryLog::new(config.history_path());
        let records = log.list()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        if records.is_empty() {
            println!("No archived conversations in {:?}", log.path());
            return Ok(());
        }

        for (i, record) in records.iter().enumerate() {
            println!(
                "{}. {}  {} ({} turns)",
                i + 1,
                record.archived_at.format("%Y-%m-%d %H:%M"),
                record.label(),
                record.turns.len()
            );
        }

        Ok(())
    }
}
