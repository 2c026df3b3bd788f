//! Incremental precedence graph.
//!
//! # Topological order (Kahn)
//!
//! 1. In-degree of every node = number of distinct predecessor nodes
//! 2. Seed a min-heap with all in-degree-0 nodes
//! 3. Pop the smallest id, emit it, decrement the in-degree of each
//!    successor, push those that reach 0
//! 4. If fewer nodes were emitted than exist, the rest lie on or behind a
//!    cycle
//!
//! The min-heap makes the output reproducible: among simultaneously
//! available nodes the smallest id always comes first.

use super::config::{CycleCheck, GraphConfig};
use super::node::Node;
use crate::error::{PrecedenceError, Rejection, Result};
use crate::oracle::FeasibilitySource;
use crate::request::{NodeId, Request, RequestId};
use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// Precedence constraints implied by a set of pickup-and-delivery requests.
///
/// Owns every [`Node`] in an id-keyed arena and every registered
/// [`Request`]. Each request contributes one edge `pickup -> delivery`,
/// recorded on both endpoints and tagged with the request id, so that
/// requests sharing a node pair can be removed independently.
///
/// Every operation is atomic: it is either fully applied or leaves the
/// graph unchanged.
///
/// # Examples
///
/// ```
/// use u_precedence::{PrecedenceGraph, Request};
///
/// let mut graph = PrecedenceGraph::new();
/// assert!(graph.add_request(Request::new(1, 1, 3)));
/// assert!(graph.add_request(Request::new(2, 2, 4)));
/// assert!(graph.add_request(Request::new(3, 3, 5)));
///
/// // Opposite edge between the same pair is rejected.
/// assert!(!graph.add_request(Request::new(4, 3, 1)));
///
/// assert_eq!(graph.topological_order().unwrap(), vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrecedenceGraph {
    nodes: HashMap<NodeId, Node>,
    requests: HashMap<RequestId, Request>,
    config: GraphConfig,
}

impl PrecedenceGraph {
    /// Creates an empty graph with deferred cycle detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Registers a request. Returns `false` if it was rejected; the graph
    /// is then unchanged.
    pub fn add_request(&mut self, request: Request) -> bool {
        self.try_add_request(request).is_ok()
    }

    /// Registers a request, reporting why it was rejected.
    ///
    /// # Errors
    ///
    /// - [`Rejection::NegativeNode`], [`Rejection::SameEndpoints`] for a
    ///   malformed request
    /// - [`Rejection::DuplicateRequest`] if the id is taken
    /// - [`Rejection::OppositeEdge`] if `delivery -> pickup` already exists
    /// - [`PrecedenceError::CycleDetected`] under [`CycleCheck::Eager`] if
    ///   the edge would close a longer cycle
    pub fn try_add_request(&mut self, request: Request) -> Result<()> {
        if let Err(err) = self.check_request(&request) {
            tracing::debug!(request = request.id, %err, "request rejected");
            return Err(err);
        }

        let (pickup, delivery) = request.edge();
        self.nodes
            .entry(pickup)
            .or_insert_with(|| Node::new(pickup))
            .add_successor(delivery, request.id);
        self.nodes
            .entry(delivery)
            .or_insert_with(|| Node::new(delivery))
            .add_predecessor(pickup, request.id);
        self.requests.insert(request.id, request);
        Ok(())
    }

    fn check_request(&self, request: &Request) -> Result<()> {
        request.validate()?;
        if self.requests.contains_key(&request.id) {
            return Err(Rejection::DuplicateRequest(request.id).into());
        }

        let (pickup, delivery) = request.edge();
        let contradicts = self
            .nodes
            .get(&pickup)
            .is_some_and(|n| n.is_predecessor(delivery))
            || self
                .nodes
                .get(&delivery)
                .is_some_and(|n| n.is_successor(pickup));
        if contradicts {
            return Err(Rejection::OppositeEdge {
                request: request.id,
                pickup,
                delivery,
            }
            .into());
        }

        if self.config.cycle_check == CycleCheck::Eager {
            if let Some(mut cycle) = self.path(delivery, pickup) {
                cycle.sort_unstable();
                tracing::warn!(request = request.id, ?cycle, "request would close a cycle");
                return Err(PrecedenceError::CycleDetected { unresolved: cycle });
            }
        }
        Ok(())
    }

    /// Breadth-first search along successor edges. Returns the nodes on a
    /// path `from -> ... -> to`, both ends included.
    fn path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if !self.nodes.contains_key(&from) || !self.nodes.contains_key(&to) {
            return None;
        }
        let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        parent.insert(from, from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![to];
                let mut node = to;
                while node != from {
                    node = parent[&node];
                    path.push(node);
                }
                path.reverse();
                return Some(path);
            }
            for next in self.successors(current) {
                if let Entry::Vacant(e) = parent.entry(next) {
                    e.insert(current);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Unregisters a request. Unknown ids are ignored.
    pub fn remove_request(&mut self, id: RequestId) {
        self.take_request(id);
    }

    /// Unregisters a request and returns it.
    ///
    /// Edges still justified by other requests are kept. Nodes left without
    /// any dependency are pruned.
    pub fn take_request(&mut self, id: RequestId) -> Option<Request> {
        let request = self.requests.remove(&id)?;
        let (pickup, delivery) = request.edge();

        if let Some(node) = self.nodes.get_mut(&delivery) {
            node.remove_predecessor(pickup, id);
            if !node.has_dependencies() {
                self.nodes.remove(&delivery);
            }
        }
        if let Some(node) = self.nodes.get_mut(&pickup) {
            node.remove_successor(delivery, id);
            if !node.has_dependencies() {
                self.nodes.remove(&pickup);
            }
        }
        tracing::debug!(request = id, pickup, delivery, "request removed");
        Some(request)
    }

    /// Orders every node so that each pickup precedes its delivery.
    ///
    /// Ties are broken by ascending node id.
    ///
    /// # Errors
    ///
    /// [`PrecedenceError::CycleDetected`] if the registered requests contain
    /// a cycle. No partial order is returned.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let mut in_degree: HashMap<NodeId, usize> =
            self.nodes.keys().map(|&id| (id, 0)).collect();
        for node in self.nodes.values() {
            for succ in node.successors().keys() {
                if let Some(d) = in_degree.get_mut(succ) {
                    *d += 1;
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<NodeId>> = in_degree
            .iter()
            .filter(|&(_, &d)| d == 0)
            .map(|(&id, _)| Reverse(id))
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(Reverse(id)) = ready.pop() {
            order.push(id);
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            for succ in node.successors().keys() {
                if let Some(d) = in_degree.get_mut(succ) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(Reverse(*succ));
                    }
                }
            }
        }

        if order.len() < self.nodes.len() {
            let mut unresolved: Vec<NodeId> = in_degree
                .into_iter()
                .filter(|&(_, d)| d > 0)
                .map(|(id, _)| id)
                .collect();
            unresolved.sort_unstable();
            tracing::warn!(?unresolved, "precedence cycle detected");
            return Err(PrecedenceError::CycleDetected { unresolved });
        }
        Ok(order)
    }

    /// True if the registered requests contain a cycle.
    pub fn has_cycle(&self) -> bool {
        self.topological_order().is_err()
    }

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterates over all nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
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

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of distinct ordered node pairs.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.successors().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Removes every request and node. The configuration is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.requests.clear();
    }
}

type RuleKeys<'a> = std::collections::hash_map::Keys<'a, NodeId, Vec<RequestId>>;

impl FeasibilitySource for PrecedenceGraph {
    type Neighbors<'a>
        = std::iter::Copied<std::iter::Flatten<std::option::IntoIter<RuleKeys<'a>>>>
    where
        Self: 'a;

    fn predecessors(&self, node: NodeId) -> Self::Neighbors<'_> {
        self.nodes
            .get(&node)
            .map(|n| n.predecessors().keys())
            .into_iter()
            .flatten()
            .copied()
    }

    fn successors(&self, node: NodeId) -> Self::Neighbors<'_> {
        self.nodes
            .get(&node)
            .map(|n| n.successors().keys())
            .into_iter()
            .flatten()
            .copied()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
