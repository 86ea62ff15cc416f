//! Generation flags shared by `ask` and `chat`.

use clap::Args;
use kbbot_core::{config::AppConfig, AppError, AppResult};
use kbbot_llm::{GenerationParameters, ModelId};

/// Per-turn generation parameters
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Maximum tokens in the answer (100-2000, retrieval only)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0-1.0, retrieval only)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Nucleus sampling top-p (0.0-1.0, retrieval only)
    #[arg(long)]
    pub top_p: Option<f32>,
}

impl GenerationArgs {
    /// Resolve parameters for a turn from configuration plus these flags.
    pub fn parameters(
        &self,
        config: &AppConfig,
        model: &str,
        knowledge_base_id: Option<&str>,
    ) -> AppResult<GenerationParameters> {
        if !config.is_model_allowed(model) {
            return Err(AppError::Config(format!(
                "Model {} is not in the allow-list. Allowed: {}",
                model,
                config.allowed_models.join(", ")
            )));
        }

        let mut params = GenerationParameters::from_defaults(
            ModelId::parse(model),
            &config.generation,
            knowledge_base_id.map(str::to_string),
        );

        if let Some(max_tokens) = self.max_tokens {
            params = params.with_max_tokens(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            params = params.with_temperature(temperature);
        }

        if let Some(top_p) = self.top_p {
            params = params.with_top_p(top_p);
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbbot_llm::InvocationMode;

    #[test]
    fn test_flags_override_defaults() {
        let config = AppConfig::default();
        let args = GenerationArgs {
            max_tokens: Some(500),
            temperature: None,
            top_p: Some(0.9),
        };

        let params = args
            .parameters(&config, "amazon.nova-lite-v1:0", Some("KB1"))
            .unwrap();

        assert_eq!(params.model_id, ModelId::NovaLite);
        assert_eq!(params.max_tokens, 500);
        assert_eq!(params.temperature, config.generation.temperature);
        assert_eq!(params.top_p, 0.9);
        assert_eq!(params.mode(), InvocationMode::RetrievalAugmented);
    }

    #[test]
    fn test_model_outside_allow_list() {
        let config = AppConfig::default();
        let result = GenerationArgs::default().parameters(&config, "amazon.titan-text-v1", None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_no_knowledge_base_is_direct() {
        let config = AppConfig::default();
        let params = GenerationArgs::default()
            .parameters(&config, &config.model, None)
            .unwrap();
        assert_eq!(params.mode(), InvocationMode::Direct);
    }
}
