//! Error types for a chat turn.

use kbbot_core::AppError;
use thiserror::Error;

/// Shown instead of calling the provider when the model has no direct path.
pub const UNSUPPORTED_MODEL_TEXT: &str = "Model not supported yet.";

/// Request Builder failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("model {0} does not support direct invocation")]
    UnsupportedModel(String),

    #[error("invalid generation parameter: {0}")]
    InvalidParameter(String),

    #[error("prompt cannot be empty")]
    EmptyPrompt,
}

impl From<BuildError> for AppError {
    fn from(err: BuildError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Anything that stops a turn from producing a rendered answer.
#[derive(Error, Debug)]
pub enum TurnFailure {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Transport(#[from] AppError),
}

impl TurnFailure {
    /// Text appended to the conversation in place of an answer.
    pub fn display_text(&self) -> String {
        match self {
            TurnFailure::Build(BuildError::UnsupportedModel(_)) => {
                UNSUPPORTED_MODEL_TEXT.to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}
