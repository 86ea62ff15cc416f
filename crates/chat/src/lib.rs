//! Conversational question answering over the inference boundary.
//!
//! Per user turn the orchestrator selects an invocation mode, builds the
//! matching request, calls the provider, renders the answer with its
//! provenance, and records the turn in the session's conversation store.

pub mod citations;
pub mod error;
pub mod history;
pub mod orchestrator;
pub mod render;
pub mod request;
pub mod store;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use citations::{extract_citations, CitationLocation};
pub use error::{BuildError, TurnFailure};
pub use history::{ArchivedConversation, HistoryLog};
pub use orchestrator::{GenerationOrchestrator, TurnOutcome, TurnState};
pub use render::render_response;
pub use request::RequestBuilder;
pub use store::{Conversation, ConversationStore, Turn};
