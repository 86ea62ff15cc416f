//! Request Builder: turns a prompt and parameters into exactly one of the
//! two request shapes.

use crate::error::BuildError;
use kbbot_llm::{
    AugmentedRequest, DirectRequest, GenerationParameters, InferenceRequest, InvocationMode,
    TextInferenceConfig,
};
use kbbot_prompt::RetrievalTemplate;

/// Builds provider requests. Pure: no I/O, no shared state.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    /// Region used to qualify model references
    region: String,

    /// Rendered retrieval prompt template
    template: RetrievalTemplate,
}

impl RequestBuilder {
    pub fn new(region: impl Into<String>, template: RetrievalTemplate) -> Self {
        Self {
            region: region.into(),
            template,
        }
    }

    pub fn template(&self) -> &RetrievalTemplate {
        &self.template
    }

    /// Build the request for one turn.
    ///
    /// A non-blank knowledge base id selects the retrieval-augmented shape;
    /// otherwise the direct shape is built. `max_tokens`, `temperature` and
    /// `top_p` are not transmitted on the direct path.
    pub fn build(
        &self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<InferenceRequest, BuildError> {
        if prompt.trim().is_empty() {
            return Err(BuildError::EmptyPrompt);
        }

        match (params.mode(), params.knowledge_base()) {
            (InvocationMode::RetrievalAugmented, Some(knowledge_base_id)) => {
                params.validate().map_err(BuildError::InvalidParameter)?;

                Ok(InferenceRequest::Augmented(AugmentedRequest::new(
                    prompt,
                    knowledge_base_id,
                    params.model_id.arn(&self.region),
                    TextInferenceConfig {
                        max_tokens: params.max_tokens,
                        temperature: params.temperature,
                        top_p: params.top_p,
                    },
                    self.template.text.clone(),
                )))
            }
            _ => {
                if !params.model_id.supports_direct() {
                    return Err(BuildError::UnsupportedModel(
                        params.model_id.as_str().to_string(),
                    ));
                }

                Ok(InferenceRequest::Direct(DirectRequest::new(
                    params.model_id.as_str(),
                    prompt,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbbot_llm::ModelId;
    use kbbot_prompt::{default_definition, render_definition};

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            "us-east-1",
            render_definition(&default_definition()).unwrap(),
        )
    }

    #[test]
    fn test_direct_request_without_knowledge_base() {
        let params = GenerationParameters::new(ModelId::NovaLite)
            .with_temperature(0.9)
            .with_max_tokens(100);
        let request = builder().build("What are the library hours?", &params).unwrap();

        match request {
            InferenceRequest::Direct(direct) => {
                assert_eq!(direct.model_id, "amazon.nova-lite-v1:0");
                assert_eq!(direct.prompt(), Some("What are the library hours?"));
                assert_eq!(direct.messages.len(), 1);
                assert_eq!(direct.messages[0].role, "user");
                let body = serde_json::to_value(&direct).unwrap();
                assert!(body.get("temperature").is_none());
                assert!(body.get("max_tokens").is_none());
            }
            other => panic!("Expected direct request, got {:?}", other),
        }
    }

    #[test]
    fn test_augmented_request_with_knowledge_base() {
        let params = GenerationParameters::new(ModelId::NovaPro)
            .with_knowledge_base("KB123")
            .with_max_tokens(500)
            .with_temperature(0.4)
            .with_top_p(0.9);
        let request = builder().build("Where is the registrar?", &params).unwrap();

        match request {
            InferenceRequest::Augmented(rag) => {
                assert_eq!(rag.prompt(), "Where is the registrar?");
                assert_eq!(rag.knowledge_base_id(), "KB123");
                assert_eq!(
                    rag.model_arn(),
                    "arn:aws:bedrock:us-east-1::foundation-model/amazon.nova-pro-v1:0"
                );
                assert_eq!(
                    *rag.inference(),
                    TextInferenceConfig {
                        max_tokens: 500,
                        temperature: 0.4,
                        top_p: 0.9,
                    }
                );
                assert!(rag.prompt_template().contains("'Thank You'"));
            }
            other => panic!("Expected augmented request, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_follows_knowledge_base_presence() {
        let b = builder();
        for (kb, expect_rag) in [
            (None, false),
            (Some(""), false),
            (Some("  "), false),
            (Some("KB1"), true),
        ] {
            let mut params = GenerationParameters::new(ModelId::NovaPro);
            params.knowledge_base_id = kb.map(str::to_string);
            let request = b.build("hello", &params).unwrap();
            assert_eq!(
                matches!(request, InferenceRequest::Augmented(_)),
                expect_rag,
                "knowledge base {:?}",
                kb
            );
        }
    }

    #[test]
    fn test_unsupported_model_in_direct_mode() {
        let params = GenerationParameters::new(ModelId::parse("anthropic.claude-v2"));
        assert_eq!(
            builder().build("hello", &params),
            Err(BuildError::UnsupportedModel("anthropic.claude-v2".to_string()))
        );
    }

    #[test]
    fn test_any_model_in_retrieval_mode() {
        let params =
            GenerationParameters::new(ModelId::parse("anthropic.claude-v2")).with_knowledge_base("KB1");
        assert!(builder().build("hello", &params).is_ok());
    }

    #[test]
    fn test_invalid_parameters_in_retrieval_mode() {
        let params = GenerationParameters::new(ModelId::NovaPro)
            .with_knowledge_base("KB1")
            .with_temperature(3.0);
        assert!(matches!(
            builder().build("hello", &params),
            Err(BuildError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_prompt() {
        let params = GenerationParameters::new(ModelId::NovaPro);
        assert_eq!(builder().build("   ", &params), Err(BuildError::EmptyPrompt));
    }
}
