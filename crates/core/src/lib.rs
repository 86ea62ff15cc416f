//! kbbot Core Library
//!
//! This crate provides the foundational utilities for the kbbot assistant:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Process configuration (region, knowledge base, model allow-list)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, GenerationDefaults};
pub use error::{AppError, AppResult};
