//! The puzzle session - a timed, attempt-limited quote encounter.
//!
//! A session walks `Idle -> Active -> Completed` and rests back in `Idle`
//! after a reset, so one session value can serve every encounter in a level.
//! All timing state lives in plain fields driven by an explicit
//! [`tick`](PuzzleSession::tick) from the owning loop; there are no timers or
//! background threads.

use log::warn;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use maze_rules::{Emotion, GameConfig};

use crate::events::{EventQueue, GameEvent};
use crate::quote_bank::{Quote, QuoteBank, QuoteId};

/// Errors raised by session entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// `start` was called while a session was already running. The existing
    /// session is left untouched; it is never force-cancelled.
    #[error("a puzzle session is already active")]
    AlreadyActive,

    /// The bank holds no quotes at all, so not even the random fallback
    /// could produce one.
    #[error("no quotes available for any emotion")]
    NoQuotesAvailable,
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active,
    Completed {
        success: bool,
    },
}

/// Outcome of a solution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The answer matched the lesson; the session completed successfully.
    Solved,
    /// Wrong answer, attempts remain.
    Incorrect { remaining: u32 },
    /// Wrong answer and no attempts remain; the session failed.
    Failed,
    /// No session was active; the call was ignored.
    Ignored,
}

/// Session tuning taken from the game configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub base_solve_time: f32,
    pub max_attempts: u32,
    pub adaptive_difficulty: bool,
    pub difficulty_factor: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_solve_time: 30.0,
            max_attempts: 3,
            adaptive_difficulty: true,
            difficulty_factor: 1.2,
        }
    }
}

impl From<&GameConfig> for SessionConfig {
    fn from(config: &GameConfig) -> Self {
        Self {
            base_solve_time: config.base_solve_time,
            max_attempts: config.max_attempts,
            adaptive_difficulty: config.adaptive_difficulty,
            difficulty_factor: config.difficulty_factor,
        }
    }
}

/// One timed puzzle encounter.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    config: SessionConfig,
    state: SessionState,
    emotion: Option<Emotion>,
    quote: Option<Quote>,
    attempts_left: u32,
    time_left: f32,
    level: u32,
    used_quotes: HashSet<QuoteId>,
}

impl PuzzleSession {
    pub fn new(config: SessionConfig) -> Self {
        let attempts = config.max_attempts;
        let time = config.base_solve_time;
        Self {
            config,
            state: SessionState::Idle,
            emotion: None,
            quote: None,
            attempts_left: attempts,
            time_left: time,
            level: 1,
            used_quotes: HashSet::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// The quote under play, present while `Active` or just completed.
    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    /// The emotion the most recent encounter was started for.
    pub fn emotion(&self) -> Option<Emotion> {
        self.emotion
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Solve-time scaling for a progression level: `1 + (level-1)*0.1`,
    /// scaled by the configured factor and clamped to 0.5..=2.0. Always 1
    /// when adaptive difficulty is off.
    pub fn difficulty_multiplier(&self, level: u32) -> f32 {
        if !self.config.adaptive_difficulty {
            return 1.0;
        }
        let level_multiplier = 1.0 + level.saturating_sub(1) as f32 * 0.1;
        (level_multiplier * self.config.difficulty_factor).clamp(0.5, 2.0)
    }

    /// Begin an encounter for an emotion.
    ///
    /// Quote selection prefers quotes not yet used this level; once every
    /// quote for the emotion has been seen the history is cleared and
    /// selection restarts unrestricted. An emotion with no quotes at all
    /// falls back to a random quote from the whole bank.
    ///
    /// Fails with [`SessionError::AlreadyActive`] while a session runs, and
    /// with [`SessionError::NoQuotesAvailable`] when the bank is empty.
    pub fn start<R: Rng>(
        &mut self,
        emotion: Emotion,
        bank: &QuoteBank,
        level: u32,
        rng: &mut R,
        events: &mut EventQueue,
    ) -> Result<QuoteId, SessionError> {
        if self.state == SessionState::Active {
            return Err(SessionError::AlreadyActive);
        }

        let quote = self
            .select_quote(emotion, bank, rng)
            .ok_or(SessionError::NoQuotesAvailable)?
            .clone();
        let id = quote.id;
        self.used_quotes.insert(id);

        self.state = SessionState::Active;
        self.emotion = Some(emotion);
        self.level = level;
        self.attempts_left = self.config.max_attempts;
        self.time_left = self.solve_duration();
        self.quote = Some(quote);

        events.push(GameEvent::PuzzleStarted(id));
        events.push(GameEvent::AttemptsChanged(self.attempts_left));
        events.push(GameEvent::TimeChanged(self.time_left));
        Ok(id)
    }

    /// Advance the solve timer. Ignored unless `Active`.
    ///
    /// Running out of time costs one attempt, exactly like a wrong answer:
    /// with attempts remaining the timer restarts at a freshly computed
    /// duration, otherwise the session completes unsuccessfully. The time
    /// notification for the tick is emitted after timeout handling and never
    /// carries a negative value.
    pub fn tick(&mut self, delta: f32, events: &mut EventQueue) {
        if self.state != SessionState::Active {
            return;
        }

        self.time_left -= delta;
        if self.time_left <= 0.0 {
            self.attempts_left = self.attempts_left.saturating_sub(1);
            events.push(GameEvent::AttemptsChanged(self.attempts_left));

            if self.attempts_left == 0 {
                self.time_left = 0.0;
                self.complete(false, events);
            } else {
                self.time_left = self.solve_duration();
            }
        }

        events.push(GameEvent::TimeChanged(self.time_left.max(0.0)));
    }

    /// Submit an answer. Ignored unless `Active`.
    ///
    /// Every submission costs one attempt, right or wrong; an empty or
    /// whitespace answer is an ordinary incorrect attempt.
    pub fn attempt(&mut self, answer: &str, events: &mut EventQueue) -> AttemptOutcome {
        if self.state != SessionState::Active {
            return AttemptOutcome::Ignored;
        }

        self.attempts_left = self.attempts_left.saturating_sub(1);
        events.push(GameEvent::AttemptsChanged(self.attempts_left));

        let correct = self
            .quote
            .as_ref()
            .map(|quote| answer_matches_lesson(answer, &quote.lesson))
            .unwrap_or(false);

        if correct {
            self.complete(true, events);
            AttemptOutcome::Solved
        } else if self.attempts_left == 0 {
            self.complete(false, events);
            AttemptOutcome::Failed
        } else {
            AttemptOutcome::Incorrect {
                remaining: self.attempts_left,
            }
        }
    }

    /// Abandon the active encounter without consuming an attempt, then rest
    /// back in `Idle`. Ignored unless `Active`.
    pub fn cancel(&mut self, events: &mut EventQueue) {
        if self.state != SessionState::Active {
            return;
        }
        self.complete(false, events);
        self.reset();
    }

    /// Return a completed session to `Idle`, keeping the used-quote history.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.quote = None;
        self.attempts_left = self.config.max_attempts;
        self.time_left = self.config.base_solve_time;
    }

    /// Forget which quotes have been used, e.g. when a new level begins.
    pub fn clear_history(&mut self) {
        self.used_quotes.clear();
    }

    fn solve_duration(&self) -> f32 {
        self.config.base_solve_time * self.difficulty_multiplier(self.level)
    }

    fn complete(&mut self, success: bool, events: &mut EventQueue) {
        self.state = SessionState::Completed { success };
        events.push(GameEvent::PuzzleCompleted { success });
    }

    fn select_quote<'a, R: Rng>(
        &mut self,
        emotion: Emotion,
        bank: &'a QuoteBank,
        rng: &mut R,
    ) -> Option<&'a Quote> {
        let pool = bank.quotes_for_emotion(emotion);
        if pool.is_empty() {
            warn!("no quotes tagged {emotion}; falling back to a random quote");
            return bank.random_quote(rng);
        }

        let fresh: Vec<&Quote> = pool
            .iter()
            .filter(|quote| !self.used_quotes.contains(&quote.id))
            .copied()
            .collect();
        if fresh.is_empty() {
            // Every quote for this emotion has been seen; start the rotation
            // over.
            self.used_quotes.clear();
            return pool.choose(rng).copied();
        }

        fresh.choose(rng).copied()
    }
}

/// Keyword-overlap validation: the answer must contain, as substrings, at
/// least `max(3, tokenCount/3)` distinct lesson tokens longer than three
/// characters, checked in lesson order and short-circuiting at the threshold.
pub fn answer_matches_lesson(answer: &str, lesson: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return false;
    }

    let lesson = lesson.trim().to_lowercase();
    let tokens: Vec<&str> = lesson.split_whitespace().collect();
    let required = std::cmp::max(3, tokens.len() / 3);

    let mut seen = HashSet::new();
    let mut matched = 0;
    for token in tokens {
        if token.len() > 3 && seen.insert(token) && answer.contains(token) {
            matched += 1;
            if matched >= required {
                return true;
            }
        }
    }
    false
}
