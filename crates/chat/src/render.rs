//! Response Renderer: one display string per provider response.
//!
//! Rendering never fails. Missing answer text is replaced by a placeholder.

use crate::citations::extract_citations;
use kbbot_llm::{AugmentedResponse, DirectResponse, InferenceResponse};

/// Substituted when the provider returned no answer text.
pub const MISSING_ANSWER: &str = "_(The model returned no answer text.)_";

/// Render either response shape.
pub fn render_response(response: &InferenceResponse) -> String {
    match response {
        InferenceResponse::Direct(direct) => render_direct(direct),
        InferenceResponse::Augmented(augmented) => render_augmented(augmented),
    }
}

/// Answer text followed by a token-usage footer when usage was reported.
pub fn render_direct(response: &DirectResponse) -> String {
    let mut rendered = answer_text(response.text());

    let reported = response
        .usage
        .filter(|u| u.input_tokens.is_some() || u.output_tokens.is_some());

    if let Some(usage) = reported {
        rendered.push_str(&format!(
            "\n\n*Tokens: Input: {}, Output: {}*",
            token_count(usage.input_tokens),
            token_count(usage.output_tokens)
        ));
    }

    rendered
}

/// Answer text followed by a numbered "Sources" section when any citation
/// location survived deduplication.
pub fn render_augmented(response: &AugmentedResponse) -> String {
    let mut rendered = answer_text(response.text());
    let locations = extract_citations(response.citations());

    if !locations.is_empty() {
        rendered.push_str("\n\n### Sources\n");
        for (i, location) in locations.iter().enumerate() {
            rendered.push_str(&format!("{}. {}\n", i + 1, location));
        }
    }

    rendered
}

fn answer_text(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => MISSING_ANSWER.to_string(),
    }
}

fn token_count(count: Option<u64>) -> String {
    count
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
