//! Game events - the notification surface the core publishes to consumers.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use maze_rules::{Emotion, GridPos};

use crate::quote_bank::QuoteId;

/// Notifications emitted by the core. Each is fire-and-forget and delivered
/// synchronously on the tick that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player's tracked room changed to one with a different emotion.
    RoomEmotionChanged(Emotion),

    /// The player's tracked grid cell changed.
    PlayerRoomChanged(GridPos),

    /// A puzzle session began with the given quote.
    PuzzleStarted(QuoteId),

    /// The active puzzle finished, successfully or not.
    PuzzleCompleted { success: bool },

    /// The remaining attempt count changed.
    AttemptsChanged(u32),

    /// The remaining solve time changed. Never negative.
    TimeChanged(f32),

    /// A level was completed; payload is the new current level.
    LevelCompleted(u32),
}

/// FIFO queue the core publishes into and consumers drain.
///
/// Consumers pull on their own schedule; the core holds no callbacks and
/// never re-enters subscriber code.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Remove and return all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Peek at pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
