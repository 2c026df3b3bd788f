//! Error types.
//!
//! Two classes of failure exist. A [`Rejection`] is routine: a malformed
//! request, a duplicate id, a contradicting edge, or a move that would break
//! precedence. The structure it was aimed at is left untouched and the
//! caller simply tries something else. [`PrecedenceError::CycleDetected`] is
//! structural: the registered request set admits no valid route at all.
//! Both travel through the single [`PrecedenceError`] type so that callers
//! have one decision point.

use crate::oracle::Violation;
use crate::request::{NodeId, RequestId};
use thiserror::Error;

/// Result type for fallible precedence operations.
pub type Result<T> = std::result::Result<T, PrecedenceError>;

/// A validation failure. Nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A pickup or delivery node id is negative.
    #[error("node id {0} is negative")]
    NegativeNode(NodeId),

    /// Pickup and delivery refer to the same node.
    #[error("request {request} uses node {node} as both pickup and delivery")]
    SameEndpoints { request: RequestId, node: NodeId },

    /// A request with this id is already registered.
    #[error("request {0} is already registered")]
    DuplicateRequest(RequestId),

    /// The opposite edge `delivery -> pickup` is already recorded.
    #[error("request {request} ({pickup} -> {delivery}) contradicts an existing {delivery} -> {pickup} edge")]
    OppositeEdge {
        request: RequestId,
        pickup: NodeId,
        delivery: NodeId,
    },

    /// A move index does not address the current sequence.
    #[error("position {index} is out of bounds for a sequence of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// The tentative move broke a precedence edge and was rolled back.
    #[error("{0}")]
    Infeasible(Violation),

    /// A node appears more than once in a sequence.
    #[error("node {0} appears more than once in the sequence")]
    DuplicateNode(NodeId),

    /// A sequence contains a node no registered request references.
    #[error("node {0} is not referenced by any registered request")]
    UnknownNode(NodeId),

    /// A node referenced by a registered request is absent from the sequence.
    #[error("node {0} is referenced by a registered request but missing from the sequence")]
    MissingNode(NodeId),
}

/// Unified error for every precedence operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrecedenceError {
    /// Validation failure; the target structure is unchanged.
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),

    /// The registered requests contain a precedence cycle.
    ///
    /// `unresolved` lists, in ascending order, the nodes that could not be
    /// placed in any topological order.
    #[error("cycle detected among {} unresolved node(s): {unresolved:?}", unresolved.len())]
    CycleDetected { unresolved: Vec<NodeId> },
}

impl PrecedenceError {
    /// True when the request set itself is unsatisfiable.
    pub fn is_structural(&self) -> bool {
        matches!(self, PrecedenceError::CycleDetected { .. })
    }

    /// The validation failure, if this is one.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            PrecedenceError::Rejected(r) => Some(r),
            PrecedenceError::CycleDetected { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        let cycle = PrecedenceError::CycleDetected {
            unresolved: vec![1, 2, 3],
        };
        assert!(cycle.is_structural());
        assert!(cycle.rejection().is_none());

        let rejected: PrecedenceError = Rejection::DuplicateRequest(4).into();
        assert!(!rejected.is_structural());
        assert_eq!(rejected.rejection(), Some(&Rejection::DuplicateRequest(4)));
    }

    #[test]
    fn test_display_messages() {
        let err = PrecedenceError::CycleDetected {
            unresolved: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "cycle detected among 2 unresolved node(s): [1, 2]"
        );

        let err = PrecedenceError::from(Rejection::OutOfBounds { index: 9, len: 3 });
        assert_eq!(
            err.to_string(),
            "rejected: position 9 is out of bounds for a sequence of length 3"
        );
    }
}
