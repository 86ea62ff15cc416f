//! Prompt command handler.
//!
//! Shows the retrieval prompt template requests will carry.

use clap::Args;
use kbbot_core::{config::AppConfig, AppResult};
use kbbot_prompt::{list_prompts, render_definition, resolve_prompt};

/// Show the retrieval prompt template in effect
#[derive(Args, Debug)]
pub struct PromptCommand {
    /// Print the unrendered template source
    #[arg(long)]
    pub raw: bool,

    /// List prompt overrides in the workspace
    #[arg(long, conflicts_with = "raw")]
    pub list: bool,
}

impl PromptCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompt command for '{}'", config.prompt_id);

        if self.list {
            let ids = list_prompts(&config.workspace)?;
            if ids.is_empty() {
                println!("No prompt overrides; using the built-in template.");
            }
            for id in ids {
                println!("{}", id);
            }
            return Ok(());
        }

        let definition = resolve_prompt(&config.workspace, &config.prompt_id)?;

        if self.raw {
            println!("{}", definition.template);
        } else {
            let template = render_definition(&definition)?;
            println!("{}", template.text);
        }

        Ok(())
    }
}
