//! Precedence-constraint kernel for pickup-and-delivery local search.
//!
//! Given a set of requests, each tying a pickup node to a delivery node,
//! this crate maintains the ordering constraints they imply and answers,
//! cheaply and repeatedly, whether a candidate visiting order satisfies
//! them:
//!
//! - **Precedence graph** ([`graph`]): incremental registration and removal
//!   of requests with per-request edge provenance, local contradiction
//!   rejection, deterministic topological ordering and cycle detection.
//! - **Feasibility oracle** ([`oracle`]): a compact set-based constraint
//!   index and the shared [`FeasibilitySource`] check, O(|sequence| + edges).
//! - **Moves** ([`moves`]): swap and relocate on a working sequence with
//!   trial-and-rollback semantics, full or incremental validation.
//!
//! # Architecture
//!
//! Registration and search are separate phases. Once the request set is
//! stable, a source is shared read-only by any number of [`MoveEngine`]s,
//! one per search worker. The borrow checker prevents mutating the request
//! set while an engine is alive. Cost evaluation and move selection belong
//! to the surrounding metaheuristic.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for requests, moves, violations and
//!   configuration types
//! - `parallel`: rayon-backed [`oracle::check_sequences`]

pub mod error;
pub mod graph;
pub mod moves;
pub mod oracle;
pub mod request;

pub use error::{PrecedenceError, Rejection, Result};
pub use graph::PrecedenceGraph;
pub use moves::{Move, MoveEngine};
pub use oracle::{CompactConstraintIndex, FeasibilitySource, Violation};
pub use request::{NodeId, Request, RequestId};
