//! Procedural level generation: maze carving, emotion assignment, and puzzle
//! placement.

mod assigner;
mod backtracker;
mod placer;

pub use assigner::*;
pub use backtracker::*;
pub use placer::*;

use thiserror::Error;

/// Errors raised at the generation entry points.
///
/// Generation entry points validate their inputs up front and perform no
/// partial mutation on failure.
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("maze size must be at least 1")]
    InvalidSize,

    #[error("emotion set must not be empty")]
    EmptyEmotionSet,

    #[error("minimum puzzle separation must not be negative, got {0}")]
    NegativeSeparation(f32),
}
