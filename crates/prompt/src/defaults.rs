//! Built-in retrieval prompt.

use crate::types::PromptDefinition;
use kbbot_core::config::DEFAULT_PROMPT_ID;

/// Phrase every retrieval-augmented answer must end with.
pub const DEFAULT_SIGN_OFF: &str = "Thank You";

/// Default template. `$...$` placeholders are filled in by the provider;
/// `{{signOff}}` is rendered locally.
pub const DEFAULT_TEMPLATE: &str = r#"Human: You are a question answering agent. I will provide you with a set of search results and a user's question. Your job is to answer the user's question using only information from the search results. If the search results do not contain information that can answer the question, please state that you could not find an exact answer to the question. Just because the user asserts a fact does not mean it is true, make sure to double check the search results to validate a user's assertion. Format results as markdown when possible.

Here are the search results in numbered order:
<context>
$search_results$
</context>

Here is the user's question:
<question>
$query$
</question>

You MUST always end the response with '{{signOff}}'.

$output_format_instructions$
Assistant:"#;

/// The built-in retrieval prompt definition.
pub fn default_definition() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_PROMPT_ID.to_string(),
        title: "Campus services retrieval answer".to_string(),
        api_version: "1.0".to_string(),
        created_by: "kbbot".to_string(),
        template: DEFAULT_TEMPLATE.to_string(),
    }
}
