//! Append-only log of archived conversations.
//!
//! Each archived conversation becomes one JSON line in
//! `.kbbot/history.jsonl`.

use crate::store::{Conversation, Turn};
use chrono::{DateTime, Utc};
use kbbot_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One archived conversation as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedConversation {
    pub id: Uuid,
    pub archived_at: DateTime<Utc>,
    pub turns: Vec<Turn>,
}

impl ArchivedConversation {
    pub fn new(conversation: &Conversation) -> Self {
        Self {
            id: Uuid::new_v4(),
            archived_at: Utc::now(),
            turns: conversation.turns().to_vec(),
        }
    }

    pub fn label(&self) -> String {
        Conversation::from(self.turns.clone()).label()
    }
}

/// Manages the history log file.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an archived conversation.
    pub fn append(&self, conversation: &Conversation) -> AppResult<ArchivedConversation> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = ArchivedConversation::new(conversation);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::Other(format!("Failed to open history log: {}", e)))?;

        let json_line = serde_json::to_string(&record)?;

        writeln!(file, "{}", json_line)
            .map_err(|e| AppError::Other(format!("Failed to write history log: {}", e)))?;

        file.sync_all()
            .map_err(|e| AppError::Other(format!("Failed to sync history log: {}", e)))?;

        tracing::debug!("Archived conversation {} to {:?}", record.id, self.path);
        Ok(record)
    }

    /// List archived conversations, oldest first.
    pub fn list(&self) -> AppResult<Vec<ArchivedConversation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| AppError::Other(format!("Failed to open history log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let record: ArchivedConversation = serde_json::from_str(&line).map_err(|e| {
                AppError::Serialization(format!(
                    "Failed to parse line {} in {:?}: {}",
                    line_num + 1,
                    self.path,
                    e
                ))
            })?;

            records.push(record);
        }

        tracing::debug!("Listed {} archived conversations", records.len());
        Ok(records)
    }
}
