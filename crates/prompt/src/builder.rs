//! Prompt builder for rendering retrieval templates.

use crate::defaults::DEFAULT_SIGN_OFF;
use crate::loader::resolve_prompt;
use crate::types::{PromptDefinition, RetrievalTemplate};
use kbbot_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;
use std::path::Path;

/// Placeholders the provider substitutes; every template must keep them.
const REQUIRED_PLACEHOLDERS: [&str; 2] = ["$search_results$", "$query$"];

/// Resolve and render the retrieval template for a workspace.
///
/// # Example
/// ```no_run
/// use kbbot_prompt::build_retrieval_template;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let template = build_retrieval_template(Path::new("."), "retrieval.answer")?;
/// println!("{}", template.text);
/// # Ok(())
/// # }
/// ```
pub fn build_retrieval_template(
    workspace_path: &Path,
    prompt_id: &str,
) -> AppResult<RetrievalTemplate> {
    let definition = resolve_prompt(workspace_path, prompt_id)?;
    render_definition(&definition)
}

/// Render a definition into a retrieval template.
///
/// This function:
/// 1. Renders the Handlebars template with the sign-off phrase
/// 2. Checks that the provider placeholders survived rendering
/// 3. Checks that the sign-off instruction is present
pub fn render_definition(definition: &PromptDefinition) -> AppResult<RetrievalTemplate> {
    tracing::debug!("Rendering prompt: {}", definition.id);

    let mut variables = HashMap::new();
    variables.insert("signOff".to_string(), DEFAULT_SIGN_OFF.to_string());

    let text = render_template(&definition.template, &variables)?;

    for placeholder in REQUIRED_PLACEHOLDERS {
        if !text.contains(placeholder) {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' is missing the {} placeholder",
                definition.id, placeholder
            )));
        }
    }

    // Answers must close with the quoted sign-off
    let quoted = format!("'{}'", DEFAULT_SIGN_OFF);
    if !text.contains(&quoted) {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' never asks for the sign-off {}",
            definition.id, quoted
        )));
    }

    Ok(RetrievalTemplate {
        text,
        source_prompt_id: definition.id.clone(),
        sign_off: DEFAULT_SIGN_OFF.to_string(),
    })
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, and unknown variables are mistakes
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
