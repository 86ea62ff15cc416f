//! Command handlers for the kbbot CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod generation;
pub mod history;
pub mod prompt;
pub mod sync;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use history::HistoryCommand;
pub use prompt::PromptCommand;
pub use sync::SyncCommand;
