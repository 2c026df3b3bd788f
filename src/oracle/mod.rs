//! Sequence feasibility oracle.
//!
//! Answers, for any ordering of node ids, whether every precedence edge is
//! respected. The check is a full pass over the sequence and the edges of
//! its nodes: O(|sequence| + edges), recomputed from scratch on every call.
//!
//! # Key Components
//!
//! - [`FeasibilitySource`]: adjacency access plus the provided
//!   `is_sequence_feasible` / `first_violation` checks
//! - [`CompactConstraintIndex`]: set-based source built for fast bulk
//!   registration
//! - [`validate_sequence`]: opt-in strict permutation check
//! - [`check_sequences`]: batch check, rayon-backed with `parallel`

mod check;
mod index;
mod types;

pub use check::{check_sequences, validate_sequence};
pub use index::CompactConstraintIndex;
pub use types::{FeasibilitySource, Violation};
