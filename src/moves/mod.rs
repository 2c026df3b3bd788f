//! Swap and relocate moves with trial-and-rollback semantics.
//!
//! A [`MoveEngine`] owns the working sequence of one search worker and
//! borrows a [`FeasibilitySource`](crate::oracle::FeasibilitySource). Each
//! move is applied optimistically, validated, and undone exactly if it
//! breaks a precedence edge. Which move to try next is left to the caller.

mod config;
mod engine;
mod types;

pub use config::{FeasibilityCheck, MoveConfig, SequencePolicy};
pub use engine::MoveEngine;
pub use types::Move;
