//! # Maze Rules
//!
//! The "Labyrinth" crate - contains the grid geometry, room definitions,
//! emotion theming, and the procedural generation rules for Stoa. This crate
//! is the single source of truth for level structure and does not contain any
//! puzzle or session logic.

pub mod config;
pub mod emotions;
pub mod generation;
pub mod grid;

pub use config::*;
pub use emotions::*;
pub use generation::*;
pub use grid::*;
