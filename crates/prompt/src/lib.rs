//! Prompt template system for the kbbot assistant.
//!
//! This crate owns the prompt template sent with retrieval-augmented
//! requests:
//! - A built-in default template
//! - YAML overrides under `.kbbot/prompts/`
//! - Handlebars rendering of the sign-off phrase
//! - Validation of the provider placeholders

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_retrieval_template, render_definition};
pub use defaults::{default_definition, DEFAULT_SIGN_OFF};
pub use loader::{list_prompts, load_prompt, resolve_prompt};
pub use types::{PromptDefinition, RetrievalTemplate};
