//! Transcript domain models.
//!
//! A transcript is an ordered list of turns. Turns that wait on a network
//! call are inserted as `Pending` slots carrying the request's `TurnId`, and
//! the reply fills exactly that slot. Nothing here matches turns by position
//! or by text.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// Identifier of a turn, also used as the correlation id of the request
/// that will fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    Complete,
    /// Waiting for the request with this turn's id to resolve.
    Pending,
}

/// One message in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub speaker: Speaker,
    pub text: String,
    pub status: TurnStatus,
    /// Creation time (RFC 3339).
    pub created_at: String,
}

impl Turn {
    fn new(speaker: Speaker, text: impl Into<String>, status: TurnStatus) -> Self {
        Self {
            id: TurnId::new(),
            speaker,
            text: text.into(),
            status,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TurnStatus::Pending
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript seeded with one assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.push_assistant(greeting);
        transcript
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> TurnId {
        self.push(Turn::new(Speaker::User, text, TurnStatus::Complete))
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> TurnId {
        self.push(Turn::new(Speaker::Assistant, text, TurnStatus::Complete))
    }

    /// Reserves an assistant slot to be filled by [`Transcript::resolve`].
    ///
    /// `placeholder` is what the slot shows while pending (may be empty).
    pub fn push_pending(&mut self, placeholder: impl Into<String>) -> TurnId {
        self.push(Turn::new(Speaker::Assistant, placeholder, TurnStatus::Pending))
    }

    fn push(&mut self, turn: Turn) -> TurnId {
        let id = turn.id;
        self.turns.push(turn);
        id
    }

    /// Fills the pending slot `id` with its final text.
    ///
    /// Returns `false` when no pending turn carries that id (already resolved,
    /// removed, or never issued by this transcript).
    pub fn resolve(&mut self, id: TurnId, text: impl Into<String>) -> bool {
        match self
            .turns
            .iter_mut()
            .find(|turn| turn.id == id && turn.is_pending())
        {
            Some(turn) => {
                turn.text = text.into();
                turn.status = TurnStatus::Complete;
                true
            }
            None => false,
        }
    }

    /// Inserts a complete assistant turn directly before turn `id`.
    ///
    /// Returns `None` (and inserts nothing) when `id` is not in the
    /// transcript.
    pub fn insert_assistant_before(&mut self, id: TurnId, text: impl Into<String>) -> Option<TurnId> {
        let index = self.position(id)?;
        let turn = Turn::new(Speaker::Assistant, text, TurnStatus::Complete);
        let inserted = turn.id;
        self.turns.insert(index, turn);
        Some(inserted)
    }

    pub fn get(&self, id: TurnId) -> Option<&Turn> {
        self.turns.iter().find(|turn| turn.id == id)
    }

    pub fn position(&self, id: TurnId) -> Option<usize> {
        self.turns.iter().position(|turn| turn.id == id)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.turns.iter().any(Turn::is_pending)
    }
}
