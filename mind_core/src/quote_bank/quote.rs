//! Quote definitions - the immutable records puzzles are built from.

use maze_rules::Emotion;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub Uuid);

impl QuoteId {
    /// Create a new random quote ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable quote record: the text shown to the player, its author, the
/// lesson an answer is validated against, the emotion it is tagged with, and
/// a difficulty rank from 1 (easy) to 3 (hard).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Generated when absent from data files.
    #[serde(default)]
    pub id: QuoteId,

    pub text: String,
    pub author: String,
    pub lesson: String,
    pub emotion: Emotion,
    pub difficulty: u8,
}

impl Quote {
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        lesson: impl Into<String>,
        emotion: Emotion,
    ) -> Self {
        Self {
            id: QuoteId::new(),
            text: text.into(),
            author: author.into(),
            lesson: lesson.into(),
            emotion,
            difficulty: 1,
        }
    }

    /// Set the difficulty rank, clamped to 1..=3.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty.clamp(1, 3);
        self
    }
}
