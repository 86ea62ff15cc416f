//! Conversation Store: the active conversation and the archive of
//! completed ones for a single session.
//!
//! Pure data plus invariants; persistence lives in `history`.

use serde::{Deserialize, Serialize};

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub text: String,
    pub is_user: bool,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }
}

/// Chronologically ordered turns. Only ever appended to at the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn first(&self) -> Option<&Turn> {
        self.turns.first()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Short label: the opening user turn, cut to 30 characters.
    pub fn label(&self) -> String {
        let opening = self
            .turns
            .iter()
            .find(|t| t.is_user)
            .map(|t| t.text.trim())
            .unwrap_or("");

        if opening.chars().count() > 30 {
            format!("{}...", opening.chars().take(30).collect::<String>())
        } else {
            opening.to_string()
        }
    }

    fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

/// Per-session turn log with archive-on-complete semantics.
///
/// Owned by exactly one orchestrator; never shared across sessions.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    active: Conversation,
    history: Vec<Conversation>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation currently being written.
    pub fn active(&self) -> &Conversation {
        &self.active
    }

    /// Archived conversations, oldest first.
    pub fn history(&self) -> &[Conversation] {
        &self.history
    }

    /// Append a turn to the tail of the active conversation.
    pub fn append(&mut self, turn: Turn) {
        self.active.push(turn);
    }

    /// Archive a copy of the active conversation unless it is empty or an
    /// archived conversation already opens with the same turn.
    ///
    /// Only the first turn is compared, so two different conversations that
    /// open with the same question collide and the second is not archived.
    ///
    /// Returns whether a conversation was archived.
    pub fn archive_if_new(&mut self) -> bool {
        let Some(first) = self.active.first() else {
            return false;
        };

        if self.history.iter().any(|c| c.first() == Some(first)) {
            return false;
        }

        self.history.push(self.active.clone());
        true
    }

    /// Discard the active conversation without archiving it.
    pub fn reset(&mut self) {
        self.active = Conversation::new();
    }
}
