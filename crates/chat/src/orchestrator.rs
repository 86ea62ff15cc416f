//! Generation Orchestrator: drives one user turn from prompt to archived
//! conversation.
//!
//! ```text
//! Idle -> BuildingRequest -> AwaitingInference -> Rendering -> Appended -> Idle
//!              \                    \
//!               +--------------------+--> Errored -> Idle
//! ```
//!
//! Failures never escape a turn: they are converted to display text here and
//! appended like any other answer.

use crate::error::TurnFailure;
use crate::history::HistoryLog;
use crate::render::render_response;
use crate::request::RequestBuilder;
use crate::store::{Conversation, ConversationStore, Turn};
use kbbot_core::{AppConfig, AppResult};
use kbbot_llm::{GenerationParameters, InferenceClient, InvocationMode};
use kbbot_prompt::build_retrieval_template;
use serde::Serialize;
use std::sync::Arc;

/// Where the current turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    BuildingRequest,
    AwaitingInference,
    Rendering,
    Appended,
    Errored,
}

/// Result of a processed turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Text appended as the assistant turn
    pub text: String,

    /// Invocation mode selected for this turn
    pub mode: InvocationMode,

    /// Final state: `Appended` or `Errored`
    pub state: TurnState,
}

impl TurnOutcome {
    pub fn is_error(&self) -> bool {
        self.state == TurnState::Errored
    }
}

/// One orchestrator per chat session. Takes `&mut self` per turn, so a
/// session processes exactly one prompt at a time.
pub struct GenerationOrchestrator {
    client: Arc<dyn InferenceClient>,
    builder: RequestBuilder,
    store: ConversationStore,
    history_log: Option<HistoryLog>,
    state: TurnState,
}

impl GenerationOrchestrator {
    pub fn new(client: Arc<dyn InferenceClient>, builder: RequestBuilder) -> Self {
        Self {
            client,
            builder,
            store: ConversationStore::new(),
            history_log: None,
            state: TurnState::Idle,
        }
    }

    /// Build a session from process configuration.
    ///
    /// Resolves the retrieval prompt template once and enables the history
    /// log when configured.
    pub fn from_config(config: &AppConfig, client: Arc<dyn InferenceClient>) -> AppResult<Self> {
        let template = build_retrieval_template(&config.workspace, &config.prompt_id)?;
        let builder = RequestBuilder::new(config.region.clone(), template);

        let mut orchestrator = Self::new(client, builder);
        if config.history_enabled {
            orchestrator = orchestrator.with_history_log(HistoryLog::new(config.history_path()));
        }

        Ok(orchestrator)
    }

    /// Also persist archived conversations to a log file.
    pub fn with_history_log(mut self, log: HistoryLog) -> Self {
        self.history_log = Some(log);
        self
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        self.store.active()
    }

    pub fn history(&self) -> &[Conversation] {
        self.store.history()
    }

    /// Process one user prompt.
    ///
    /// Blank prompts are ignored and return `None`. Otherwise the user turn
    /// is appended before anything else, exactly one provider call is made,
    /// and the rendered answer (or failure text) is appended as the
    /// assistant turn.
    pub async fn submit(
        &mut self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Option<TurnOutcome> {
        if prompt.trim().is_empty() {
            tracing::debug!("Ignoring blank prompt");
            return None;
        }

        let mode = params.mode();
        tracing::info!(
            mode = mode.as_str(),
            model = %params.model_id,
            knowledge_base = ?params.knowledge_base(),
            "Processing turn"
        );

        self.transition(TurnState::BuildingRequest);
        self.store.append(Turn::user(prompt));

        let (text, state) = match self.generate(prompt, params).await {
            Ok(text) => (text, TurnState::Appended),
            Err(failure) => {
                tracing::error!("Error generating response: {}", failure);
                (failure.display_text(), TurnState::Errored)
            }
        };

        self.store.append(Turn::assistant(text.clone()));
        self.transition(state);
        self.archive();

        // Ready for the next prompt
        self.transition(TurnState::Idle);

        Some(TurnOutcome { text, mode, state })
    }

    /// Start a new chat: drop the active conversation without archiving it.
    pub fn reset(&mut self) {
        tracing::info!(
            "Starting new chat, discarding {} turns",
            self.store.active().len()
        );
        self.store.reset();
        self.transition(TurnState::Idle);
    }

    async fn generate(
        &mut self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, TurnFailure> {
        let request = self.builder.build(prompt, params)?;

        self.transition(TurnState::AwaitingInference);
        let response = self.client.invoke(&request).await?;

        self.transition(TurnState::Rendering);
        Ok(render_response(&response))
    }

    fn archive(&mut self) {
        if !self.store.archive_if_new() {
            return;
        }

        tracing::info!(
            "Archived conversation: {}",
            self.store.active().label()
        );

        if let (Some(log), Some(conversation)) = (&self.history_log, self.store.history().last()) {
            if let Err(e) = log.append(conversation) {
                tracing::warn!("Failed to persist conversation history: {}", e);
            }
        }
    }

    fn transition(&mut self, next: TurnState) {
        tracing::debug!("Turn state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
