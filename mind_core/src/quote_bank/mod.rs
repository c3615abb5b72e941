//! Quote knowledge: emotion-tagged quotes and their lookup index.

mod bank;
mod quote;

pub use bank::*;
pub use quote::*;
