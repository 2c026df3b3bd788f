//! Core trait for precedence constraint sources.

use crate::request::NodeId;
use std::collections::HashMap;
use std::fmt;

/// A broken precedence edge found in a sequence.
///
/// `predecessor` must be visited before `node`, but sits at a later
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    /// Node that must come first.
    pub predecessor: NodeId,
    /// Position of `predecessor` in the sequence.
    pub predecessor_position: usize,
    /// Node that must come after `predecessor`.
    pub node: NodeId,
    /// Position of `node` in the sequence.
    pub node_position: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node {} at position {} must follow node {} at position {}",
            self.node, self.node_position, self.predecessor, self.predecessor_position
        )
    }
}

/// Read access to a set of precedence edges.
///
/// Implementors only expose adjacency; the feasibility check itself is a
/// provided method so that every source answers it identically.
///
/// A source is read-only for the duration of a search burst. Sharing one
/// `&S` between several [`MoveEngine`](crate::moves::MoveEngine)s is the
/// intended way to run independent search workers.
pub trait FeasibilitySource {
    /// Iterator over neighbouring node ids.
    type Neighbors<'a>: Iterator<Item = NodeId>
    where
        Self: 'a;

    /// Nodes that must precede `node`. Empty for unknown nodes.
    fn predecessors(&self, node: NodeId) -> Self::Neighbors<'_>;

    /// Nodes that must follow `node`. Empty for unknown nodes.
    fn successors(&self, node: NodeId) -> Self::Neighbors<'_>;

    /// Whether `node` takes part in at least one edge.
    fn contains_node(&self, node: NodeId) -> bool;

    /// All nodes taking part in at least one edge, ascending.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Finds the first precedence edge broken by `sequence`.
    ///
    /// Nodes are scanned in sequence order. When a node id occurs more
    /// than once, its last occurrence defines its position. Predecessors
    /// that do not occur in the sequence are ignored.
    fn first_violation(&self, sequence: &[NodeId]) -> Option<Violation> {
        let position: HashMap<NodeId, usize> = sequence
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, i))
            .collect();

        for (i, &node) in sequence.iter().enumerate() {
            for pred in self.predecessors(node) {
                if let Some(&p) = position.get(&pred) {
                    if p > i {
                        return Some(Violation {
                            predecessor: pred,
                            predecessor_position: p,
                            node,
                            node_position: i,
                        });
                    }
                }
            }
        }
        None
    }

    /// Returns `true` if every recorded predecessor of every node in
    /// `sequence` that is itself present occupies an earlier position.
    fn is_sequence_feasible(&self, sequence: &[NodeId]) -> bool {
        self.first_violation(sequence).is_none()
    }
}
