//! Graph node with per-request edge provenance.

use crate::request::{NodeId, RequestId};
use std::collections::HashMap;

/// Other-node id → ids of the requests that justify the edge.
pub type RuleMap = HashMap<NodeId, Vec<RequestId>>;

/// A visiting point in the [`PrecedenceGraph`](super::PrecedenceGraph).
///
/// Neighbours are referenced by id, never by pointer; the graph owns every
/// node in an id-keyed arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    predecessors: RuleMap,
    successors: RuleMap,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            predecessors: HashMap::new(),
            successors: HashMap::new(),
        }
    }

    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Nodes that must precede this one, with the requests behind each edge.
    pub fn predecessors(&self) -> &RuleMap {
        &self.predecessors
    }

    /// Nodes that must follow this one, with the requests behind each edge.
    pub fn successors(&self) -> &RuleMap {
        &self.successors
    }

    pub fn has_predecessors(&self) -> bool {
        !self.predecessors.is_empty()
    }

    pub fn has_successors(&self) -> bool {
        !self.successors.is_empty()
    }

    /// A node without dependencies is pruned from the graph.
    pub fn has_dependencies(&self) -> bool {
        self.has_predecessors() || self.has_successors()
    }

    /// True if `node` must precede this node.
    pub fn is_predecessor(&self, node: NodeId) -> bool {
        self.predecessors.contains_key(&node)
    }

    /// True if `node` must follow this node.
    pub fn is_successor(&self, node: NodeId) -> bool {
        self.successors.contains_key(&node)
    }

    pub fn is_dependent(&self, node: NodeId) -> bool {
        self.is_predecessor(node) || self.is_successor(node)
    }

    /// Number of distinct neighbouring nodes, in and out.
    pub fn degree(&self) -> usize {
        self.predecessors.len() + self.successors.len()
    }

    pub(crate) fn add_predecessor(&mut self, node: NodeId, request: RequestId) {
        self.predecessors.entry(node).or_default().push(request);
    }

    pub(crate) fn add_successor(&mut self, node: NodeId, request: RequestId) {
        self.successors.entry(node).or_default().push(request);
    }

    pub(crate) fn remove_predecessor(&mut self, node: NodeId, request: RequestId) {
        remove_rule(&mut self.predecessors, node, request);
    }

    pub(crate) fn remove_successor(&mut self, node: NodeId, request: RequestId) {
        remove_rule(&mut self.successors, node, request);
    }
}

// Drops one request tag; the edge goes only when no tag is left.
fn remove_rule(rules: &mut RuleMap, node: NodeId, request: RequestId) {
    if let Some(requests) = rules.get_mut(&node) {
        requests.retain(|&r| r != request);
        if requests.is_empty() {
            rules.remove(&node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_survives_until_last_tag() {
        let mut node = Node::new(2);
        node.add_predecessor(1, 10);
        node.add_predecessor(1, 11);
        assert!(node.is_predecessor(1));

        node.remove_predecessor(1, 10);
        assert!(node.is_predecessor(1));
        assert_eq!(node.predecessors()[&1], vec![11]);

        node.remove_predecessor(1, 11);
        assert!(!node.is_predecessor(1));
        assert!(!node.has_dependencies());
    }

    #[test]
    fn test_dependency_queries() {
        let mut node = Node::new(5);
        node.add_successor(6, 1);
        node.add_predecessor(4, 2);

        assert_eq!(node.id(), 5);
        assert!(node.has_successors());
        assert!(node.has_predecessors());
        assert!(node.is_dependent(4));
        assert!(node.is_dependent(6));
        assert!(!node.is_dependent(7));
        assert_eq!(node.degree(), 2);
    }

    #[test]
    fn test_remove_unknown_rule_is_noop() {
        let mut node = Node::new(1);
        node.add_successor(2, 1);
        node.remove_successor(3, 1);
        node.remove_successor(2, 99);
        assert!(node.is_successor(2));
    }
}
