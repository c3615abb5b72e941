//! # Mind Core (Stoa)
//!
//! The "mind" of the maze. This crate interfaces with `maze_rules`, holds the
//! emotion-tagged quote knowledge, and runs the timed puzzle encounters the
//! player meets inside the labyrinth.
//!
//! ## Core Components
//!
//! - **quote_bank**: emotion-tagged quotes with indexed random selection
//! - **session**: the timed puzzle state machine with adaptive difficulty
//! - **events**: the notification queue renderers, audio, and UI drain
//! - **director**: explicit wiring of configuration, maze, bank, and session
//!
//! ## Design Philosophy
//!
//! - **Tick-Driven**: all timing flows through an explicit `tick(delta)`; no
//!   suspended control flow, no background threads
//! - **Queue-Published**: the core pushes events into a queue consumers drain
//!   on their own schedule; it never calls back into subscribers
//! - **No Globals**: every component is constructed explicitly and passed to
//!   whoever needs it

pub mod director;
pub mod events;
pub mod quote_bank;
pub mod session;

pub use director::*;
pub use events::*;
pub use quote_bank::*;
pub use session::*;
