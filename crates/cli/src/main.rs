//! kbbot CLI
//!
//! Main entry point for the kbbot command-line tool.
//! Answers questions with a Bedrock model, optionally grounded in a
//! knowledge base, and keeps a per-session conversation history.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, HistoryCommand, PromptCommand, SyncCommand};
use kbbot_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// kbbot - knowledge base question answering on Amazon Bedrock
#[derive(Parser, Debug)]
#[command(name = "kbbot")]
#[command(about = "Knowledge base question answering on Amazon Bedrock", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "KBBOT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "KBBOT_CONFIG")]
    config: Option<PathBuf>,

    /// AWS region
    #[arg(long, global = true, env = "KBBOT_REGION")]
    region: Option<String>,

    /// Model identifier (must be in the allow-list)
    #[arg(short, long, global = true, env = "KBBOT_MODEL")]
    model: Option<String>,

    /// Knowledge base id; pass "" to answer without retrieval
    #[arg(short, long, global = true, env = "KNOWLEDGE_BASE_ID")]
    knowledge_base_id: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Also write JSON logs to this file
    #[arg(long, global = true, env = "KBBOT_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a single question
    Ask(AskCommand),

    /// Interactive chat session
    Chat(ChatCommand),

    /// List archived conversations
    History(HistoryCommand),

    /// Start a knowledge base ingestion job
    Sync(SyncCommand),

    /// Show the retrieval prompt template in effect
    Prompt(PromptCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load configuration; workspace and config paths decide which YAML is read
    let config = AppConfig::load_with_paths(cli.workspace.clone(), cli.config.clone())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.region,
        cli.model,
        cli.knowledge_base_id,
        cli.log_level,
        cli.log_file,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(
        config.log_level.as_deref(),
        config.no_color,
        config.log_file.as_deref(),
    )?;

    tracing::info!("kbbot starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Region: {}", config.region);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Knowledge base: {:?}", config.knowledge_base_id);

    config.validate()?;

    // Ensure .kbbot directory exists
    config.ensure_kbbot_dir()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::History(_) => "history",
        Commands::Sync(_) => "sync",
        Commands::Prompt(_) => "prompt",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::History(cmd) => cmd.execute(&config),
        Commands::Sync(cmd) => cmd.execute(&config).await,
        Commands::Prompt(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
