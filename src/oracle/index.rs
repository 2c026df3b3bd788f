//! Compact constraint index.

use super::types::FeasibilitySource;
use crate::error::{Rejection, Result};
use crate::request::{NodeId, Request, RequestId};
use std::collections::{HashMap, HashSet};

type NeighborSet = HashSet<NodeId>;

/// Node-level projection of the registered requests.
///
/// Stores only "who precedes whom" as plain sets; which request created an
/// edge is not tracked. A per-pair reference count keeps an edge alive
/// while any registered request still justifies it.
///
/// Registration performs no contradiction or cycle checks: cycles simply
/// make every sequence containing them infeasible. Use
/// [`PrecedenceGraph`](crate::graph::PrecedenceGraph) when those checks or
/// edge provenance are needed.
///
/// # Examples
///
/// ```
/// use u_precedence::{CompactConstraintIndex, FeasibilitySource, Request};
///
/// let mut index = CompactConstraintIndex::new();
/// assert!(index.add_request(Request::new(1, 1, 3)));
/// assert!(index.add_request(Request::new(2, 2, 4)));
///
/// assert!(index.is_sequence_feasible(&[1, 2, 3, 4]));
/// assert!(!index.is_sequence_feasible(&[3, 1, 2, 4]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompactConstraintIndex {
    predecessors: HashMap<NodeId, NeighborSet>,
    successors: HashMap<NodeId, NeighborSet>,
    pair_counts: HashMap<(NodeId, NodeId), usize>,
    requests: HashMap<RequestId, Request>,
}

impl CompactConstraintIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a batch of requests, skipping rejected ones.
    pub fn from_requests<I: IntoIterator<Item = Request>>(requests: I) -> Self {
        let mut index = Self::new();
        for request in requests {
            index.add_request(request);
        }
        index
    }

    /// Registers a request. Returns `false` if it was rejected.
    pub fn add_request(&mut self, request: Request) -> bool {
        self.try_add_request(request).is_ok()
    }

    /// Registers a request, reporting why it was rejected.
    ///
    /// Accepts any well-formed request with an unused id.
    pub fn try_add_request(&mut self, request: Request) -> Result<()> {
        request.validate()?;
        if self.requests.contains_key(&request.id) {
            return Err(Rejection::DuplicateRequest(request.id).into());
        }

        let (pickup, delivery) = request.edge();
        *self.pair_counts.entry((pickup, delivery)).or_insert(0) += 1;
        self.predecessors
            .entry(delivery)
            .or_default()
            .insert(pickup);
        self.successors.entry(pickup).or_default().insert(delivery);
        self.requests.insert(request.id, request);
        Ok(())
    }

    /// Unregisters a request. Unknown ids are ignored.
    pub fn remove_request(&mut self, id: RequestId) {
        self.take_request(id);
    }

    /// Unregisters a request and returns it.
    pub fn take_request(&mut self, id: RequestId) -> Option<Request> {
        let request = self.requests.remove(&id)?;
        let (pickup, delivery) = request.edge();

        let still_referenced = match self.pair_counts.get_mut(&(pickup, delivery)) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            _ => {
                self.pair_counts.remove(&(pickup, delivery));
                false
            }
        };

        if !still_referenced {
            detach(&mut self.predecessors, delivery, pickup);
            detach(&mut self.successors, pickup, delivery);
        }
        Some(request)
    }

    /// Looks up a registered request.
    pub fn request(&self, id: RequestId) -> Option<&Request> {
        self.requests.get(&id)
    }

    /// Whether a request with this id is registered.
    pub fn contains_request(&self, id: RequestId) -> bool {
        self.requests.contains_key(&id)
    }

    /// Iterates over the registered requests in arbitrary order.
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.requests.values()
    }

    /// Number of registered requests.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of nodes taking part in at least one edge.
    pub fn node_count(&self) -> usize {
        self.predecessors
            .keys()
            .chain(self.successors.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct ordered node pairs.
    pub fn edge_count(&self) -> usize {
        self.pair_counts.len()
    }

    /// True if no request is registered.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Removes every request.
    pub fn clear(&mut self) {
        self.predecessors.clear();
        self.successors.clear();
        self.pair_counts.clear();
        self.requests.clear();
    }
}

fn detach(map: &mut HashMap<NodeId, NeighborSet>, node: NodeId, other: NodeId) {
    if let Some(set) = map.get_mut(&node) {
        set.remove(&other);
        if set.is_empty() {
            map.remove(&node);
        }
    }
}

impl FeasibilitySource for CompactConstraintIndex {
    type Neighbors<'a>
        = std::iter::Copied<std::iter::Flatten<std::option::IntoIter<&'a NeighborSet>>>
    where
        Self: 'a;

    fn predecessors(&self, node: NodeId) -> Self::Neighbors<'_> {
        self.predecessors.get(&node).into_iter().flatten().copied()
    }

    fn successors(&self, node: NodeId) -> Self::Neighbors<'_> {
        self.successors.get(&node).into_iter().flatten().copied()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.predecessors.contains_key(&node) || self.successors.contains_key(&node)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .predecessors
            .keys()
            .chain(self.successors.keys())
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrecedenceError;

    fn scenario() -> CompactConstraintIndex {
        CompactConstraintIndex::from_requests([
            Request::new(1, 1, 3),
            Request::new(2, 2, 4),
            Request::new(3, 3, 5),
        ])
    }

    #[test]
    fn test_scenario_sequence_feasible() {
        let index = scenario();
        assert!(index.is_sequence_feasible(&[1, 2, 3, 4, 5]));
        assert!(index.is_sequence_feasible(&[1, 2, 4, 3, 5]));
        assert!(!index.is_sequence_feasible(&[2, 4, 3, 5, 1]));
    }

    #[test]
    fn test_first_violation_reports_pair() {
        let index = scenario();
        let v = index
            .first_violation(&[2, 4, 3, 5, 1])
            .expect("sequence should be infeasible");
        assert_eq!(v.node, 3);
        assert_eq!(v.node_position, 2);
        assert_eq!(v.predecessor, 1);
        assert_eq!(v.predecessor_position, 4);
    }

    #[test]
    fn test_absent_nodes_are_unconstrained() {
        let index = scenario();
        // 1 is absent, so 3 has no present predecessor.
        assert!(index.is_sequence_feasible(&[3, 5]));
        // Extraneous ids are ignored too.
        assert!(index.is_sequence_feasible(&[99, 1, 3, 5]));
        assert!(index.is_sequence_feasible(&[]));
    }

    #[test]
    fn test_duplicate_ids_use_last_occurrence() {
        let index = scenario();
        // 1 occurs at 0 and 3; last wins, so 3 at position 1 is violated.
        assert!(!index.is_sequence_feasible(&[1, 3, 5, 1]));
        // 3 occurs at 0 and 2; the predecessor check still sees 1 at 1 > 0.
        assert!(!index.is_sequence_feasible(&[3, 1, 3, 5]));
    }

    #[test]
    fn test_accepts_opposite_edges() {
        let mut index = CompactConstraintIndex::new();
        assert!(index.add_request(Request::new(1, 1, 2)));
        assert!(index.add_request(Request::new(2, 2, 1)));
        assert!(!index.is_sequence_feasible(&[1, 2]));
        assert!(!index.is_sequence_feasible(&[2, 1]));
    }

    #[test]
    fn test_rejects_malformed_and_duplicate() {
        let mut index = scenario();
        assert_eq!(
            index.try_add_request(Request::new(1, 7, 8)),
            Err(PrecedenceError::Rejected(Rejection::DuplicateRequest(1)))
        );
        assert!(!index.add_request(Request::new(9, -1, 8)));
        assert!(!index.add_request(Request::new(9, 8, 8)));
        assert_eq!(index.request_count(), 3);
        assert_eq!(index.node_count(), 5);
    }

    #[test]
    fn test_remove_prunes_nodes() {
        let mut index = scenario();
        index.remove_request(2);
        assert!(!index.contains_node(2));
        assert!(!index.contains_node(4));
        assert_eq!(index.node_ids(), vec![1, 3, 5]);

        index.remove_request(1);
        index.remove_request(3);
        assert!(index.is_empty());
        assert_eq!(index.node_count(), 0);
        assert_eq!(index.edge_count(), 0);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut index = scenario();
        index.remove_request(42);
        assert_eq!(index.request_count(), 3);
        assert!(index.take_request(42).is_none());
    }

    #[test]
    fn test_shared_pair_survives_single_removal() {
        let mut index = CompactConstraintIndex::new();
        assert!(index.add_request(Request::new(1, 1, 2)));
        assert!(index.add_request(Request::new(2, 1, 2)));
        assert_eq!(index.edge_count(), 1);

        assert_eq!(index.take_request(1), Some(Request::new(1, 1, 2)));
        assert!(!index.is_sequence_feasible(&[2, 1]));
        assert_eq!(index.predecessors(2).collect::<Vec<_>>(), vec![1]);

        index.remove_request(2);
        assert!(index.is_sequence_feasible(&[2, 1]));
        assert!(index.is_empty());
    }
}
