//! Precedence graph with per-request edge provenance.
//!
//! Each registered [`Request`](crate::Request) adds the edge
//! `pickup -> delivery`. Edges are tagged with the requests that justify
//! them, so removing one request never deletes an edge another request
//! still needs. Nodes exist only while they take part in an edge.
//!
//! # Key Components
//!
//! - [`PrecedenceGraph`]: registration, removal, topological ordering
//! - [`Node`]: arena entry with predecessor/successor rule maps
//! - [`GraphConfig`] / [`CycleCheck`]: deferred or eager cycle detection
//!
//! # References
//!
//! Kahn, A. B. (1962). "Topological sorting of large networks",
//! *Communications of the ACM* 5(11), 558-562.

mod config;
mod node;
mod precedence;

pub use config::{CycleCheck, GraphConfig};
pub use node::{Node, RuleMap};
pub use precedence::PrecedenceGraph;
