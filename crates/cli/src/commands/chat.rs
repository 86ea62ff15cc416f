//! Chat command handler.
//!
//! Interactive session on stdin. Each line is processed to completion
//! before the next one is read.

use super::generation::GenerationArgs;
use clap::Args;
use kbbot_chat::GenerationOrchestrator;
use kbbot_core::{config::AppConfig, AppResult};
use kbbot_llm::create_inference_client;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: /new, /history, /model <id>, /kb [id], /help, /quit";

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Prompt(&'a str),
    NewChat,
    History,
    Model(&'a str),
    KnowledgeBase(Option<&'a str>),
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Prompt(line);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("new", _) => Input::NewChat,
        ("history", _) => Input::History,
        ("model", id) if !id.is_empty() => Input::Model(id),
        ("kb", "") => Input::KnowledgeBase(None),
        ("kb", id) => Input::KnowledgeBase(Some(id)),
        ("help", _) => Input::Help,
        ("quit" | "exit", _) => Input::Quit,
        _ => Input::Unknown(trimmed),
    }
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting chat session");

        let client = create_inference_client(config)?;
        let mut orchestrator = GenerationOrchestrator::from_config(config, client)?;

        // Model and knowledge base can change between turns
        let mut model = config.model.clone();
        let mut knowledge_base_id = config.knowledge_base_id.clone();

        println!("kbbot chat ({}). {}", model, HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_input(&line) {
                Input::Prompt(prompt) => {
                    let params = match self.generation.parameters(
                        config,
                        &model,
                        knowledge_base_id.as_deref(),
                    ) {
                        Ok(params) => params,
                        Err(e) => {
                            println!("Error: {}", e);
                            continue;
                        }
                    };

                    if let Some(outcome) = orchestrator.submit(prompt, &params).await {
                        println!("\n{}\n", outcome.text);
                    }
                }
                Input::NewChat => {
                    orchestrator.reset();
                    println!("Started a new chat.");
                }
                Input::History => {
                    if orchestrator.history().is_empty() {
                        println!("No conversations yet.");
                    }
                    for (i, conversation) in orchestrator.history().iter().enumerate() {
                        println!("{}. {}", i + 1, conversation.label());
                    }
                }
                Input::Model(id) => {
                    if config.is_model_allowed(id) {
                        model = id.to_string();
                        println!("Model set to {}.", model);
                    } else {
                        println!(
                            "Model {} is not allowed. Allowed: {}",
                            id,
                            config.allowed_models.join(", ")
                        );
                    }
                }
                Input::KnowledgeBase(id) => {
                    knowledge_base_id = id.map(str::to_string);
                    match &knowledge_base_id {
                        Some(id) => println!("Answering from knowledge base {}.", id),
                        None => println!("Answering without retrieval."),
                    }
                }
                Input::Help => println!("{}", HELP),
                Input::Quit => break,
                Input::Unknown(command) => println!("Unknown command {}. {}", command, HELP),
            }
        }

        tracing::info!(
            "Chat session ended with {} archived conversations",
            orchestrator.history().len()
        );
        Ok(())
    }
}
