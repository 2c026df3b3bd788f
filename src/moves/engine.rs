//! Trial-and-rollback move engine.
//!
//! # Algorithm
//!
//! 1. Bounds-check the move indices (out of range: reject, no mutation)
//! 2. Apply the move to the working sequence optimistically
//! 3. Validate (full or incremental check)
//! 4. On violation, apply the exact inverse and reject
//!
//! Between calls the sequence is always either the last accepted state or
//! the pre-trial state, never a transient one.

use super::config::{FeasibilityCheck, MoveConfig, SequencePolicy};
use super::types::Move;
use crate::error::{Rejection, Result};
use crate::oracle::{validate_sequence, FeasibilitySource, Violation};
use crate::request::NodeId;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Holds a candidate visiting sequence and applies feasibility-preserving
/// swap and relocate moves to it.
///
/// The constraint source is borrowed, so it cannot change while the engine
/// is alive. Several engines may share one source.
///
/// # Examples
///
/// ```
/// use u_precedence::{CompactConstraintIndex, MoveEngine, Request};
///
/// let index = CompactConstraintIndex::from_requests([
///     Request::new(1, 1, 3),
///     Request::new(2, 2, 4),
///     Request::new(3, 3, 5),
/// ]);
/// let mut engine = MoveEngine::new(&index, vec![1, 2, 3, 4, 5]).unwrap();
/// assert!(engine.is_feasible());
///
/// assert!(engine.apply_swap(2, 3));
/// assert_eq!(engine.sequence(), &[1, 2, 4, 3, 5]);
///
/// // Moving node 1 behind node 3 breaks 1 -> 3 and is rolled back.
/// assert!(!engine.apply_insertion(0, 4));
/// assert_eq!(engine.sequence(), &[1, 2, 4, 3, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct MoveEngine<'a, S: FeasibilitySource> {
    source: &'a S,
    sequence: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
    config: MoveConfig,
    known_feasible: bool,
}

impl<'a, S: FeasibilitySource> MoveEngine<'a, S> {
    /// Creates an engine with the default configuration.
    ///
    /// The sequence is assumed, not verified, to be feasible.
    ///
    /// # Errors
    ///
    /// [`Rejection::DuplicateNode`] if a node id occurs twice.
    pub fn new(source: &'a S, sequence: Vec<NodeId>) -> Result<Self> {
        Self::with_config(source, sequence, MoveConfig::default())
    }

    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// [`Rejection::DuplicateNode`] if a node id occurs twice; under
    /// [`SequencePolicy::Strict`] also [`Rejection::UnknownNode`] and
    /// [`Rejection::MissingNode`].
    pub fn with_config(source: &'a S, sequence: Vec<NodeId>, config: MoveConfig) -> Result<Self> {
        let positions = index_positions(&sequence, source, config.policy)?;
        let known_feasible = source.is_sequence_feasible(&sequence);
        Ok(Self {
            source,
            sequence,
            positions,
            config,
            known_feasible,
        })
    }

    /// Replaces the working sequence, with the same checks as construction.
    /// On error the current sequence is kept.
    pub fn reset(&mut self, sequence: Vec<NodeId>) -> Result<()> {
        self.positions = index_positions(&sequence, self.source, self.config.policy)?;
        self.known_feasible = self.source.is_sequence_feasible(&sequence);
        self.sequence = sequence;
        Ok(())
    }

    /// The current sequence.
    pub fn sequence(&self) -> &[NodeId] {
        &self.sequence
    }

    /// Consumes the engine, returning the current sequence.
    pub fn into_sequence(self) -> Vec<NodeId> {
        self.sequence
    }

    /// Position of `node` in the current sequence.
    pub fn position_of(&self, node: NodeId) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The constraint source.
    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn config(&self) -> &MoveConfig {
        &self.config
    }

    /// Full oracle check of the current sequence. No side effects.
    pub fn is_feasible(&self) -> bool {
        self.source.is_sequence_feasible(&self.sequence)
    }

    /// Applies a move. Returns `false` if it was rejected.
    pub fn apply(&mut self, mv: Move) -> bool {
        self.try_apply(mv).is_ok()
    }

    /// Applies a move, reporting why it was rejected.
    pub fn try_apply(&mut self, mv: Move) -> Result<()> {
        match mv {
            Move::Swap { i, j } => self.try_swap(i, j),
            Move::Relocate { from, to } => self.try_insertion(from, to),
        }
    }

    /// Exchanges the elements at `i` and `j` if the result is feasible.
    pub fn apply_swap(&mut self, i: usize, j: usize) -> bool {
        self.try_swap(i, j).is_ok()
    }

    /// Exchanges the elements at `i` and `j`, or explains why not.
    ///
    /// `i == j` is accepted without mutation.
    ///
    /// # Errors
    ///
    /// [`Rejection::OutOfBounds`] or [`Rejection::Infeasible`]; the sequence
    /// is unchanged in both cases.
    pub fn try_swap(&mut self, i: usize, j: usize) -> Result<()> {
        let len = self.sequence.len();
        check_bounds(i, len)?;
        check_bounds(j, len)?;
        if i == j {
            return Ok(());
        }

        self.sequence.swap(i, j);
        self.reindex(i..=i);
        self.reindex(j..=j);

        if let Some(violation) = self.verify(&[i, j]) {
            self.sequence.swap(i, j);
            self.reindex(i..=i);
            self.reindex(j..=j);
            tracing::trace!(i, j, %violation, "swap rejected");
            return Err(Rejection::Infeasible(violation).into());
        }
        self.known_feasible = true;
        Ok(())
    }

    /// Relocates the element at `from` in front of the element at `to` if
    /// the result is feasible.
    pub fn apply_insertion(&mut self, from: usize, to: usize) -> bool {
        self.try_insertion(from, to).is_ok()
    }

    /// Relocates the element at `from`, or explains why not.
    ///
    /// The element is removed and reinserted at `to` when `to < from`, or at
    /// `to - 1` when `to > from`, compensating for the shift caused by the
    /// removal. `from == to` is accepted without mutation. `to` may equal
    /// the sequence length.
    ///
    /// # Errors
    ///
    /// [`Rejection::OutOfBounds`] or [`Rejection::Infeasible`]; the sequence
    /// is unchanged in both cases.
    pub fn try_insertion(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.sequence.len();
        check_bounds(from, len)?;
        check_bounds(to, len + 1).map_err(|_| Rejection::OutOfBounds { index: to, len })?;
        if from == to {
            return Ok(());
        }

        let at = if to < from { to } else { to - 1 };
        let span = from.min(at)..=from.max(at);
        let node = self.sequence.remove(from);
        self.sequence.insert(at, node);
        self.reindex(span.clone());

        if let Some(violation) = self.verify(&[at]) {
            let node = self.sequence.remove(at);
            self.sequence.insert(from, node);
            self.reindex(span);
            tracing::trace!(from, to, %violation, "relocation rejected");
            return Err(Rejection::Infeasible(violation).into());
        }
        self.known_feasible = true;
        Ok(())
    }

    fn reindex(&mut self, span: RangeInclusive<usize>) {
        for k in span {
            self.positions.insert(self.sequence[k], k);
        }
    }

    fn verify(&self, moved: &[usize]) -> Option<Violation> {
        match self.config.check {
            FeasibilityCheck::Incremental if self.known_feasible => self.check_moved(moved),
            _ => self.source.first_violation(&self.sequence),
        }
    }

    // Only edges with a moved endpoint can have changed orientation.
    fn check_moved(&self, moved: &[usize]) -> Option<Violation> {
        for &at in moved {
            let node = self.sequence[at];
            for pred in self.source.predecessors(node) {
                if let Some(&p) = self.positions.get(&pred) {
                    if p > at {
                        return Some(Violation {
                            predecessor: pred,
                            predecessor_position: p,
                            node,
                            node_position: at,
                        });
                    }
                }
            }
            for succ in self.source.successors(node) {
                if let Some(&s) = self.positions.get(&succ) {
                    if s < at {
                        return Some(Violation {
                            predecessor: node,
                            predecessor_position: at,
                            node: succ,
                            node_position: s,
                        });
                    }
                }
            }
        }
        None
    }
}

fn check_bounds(index: usize, len: usize) -> std::result::Result<(), Rejection> {
    if index < len {
        Ok(())
    } else {
        Err(Rejection::OutOfBounds { index, len })
    }
}

fn index_positions<S: FeasibilitySource>(
    sequence: &[NodeId],
    source: &S,
    policy: SequencePolicy,
) -> Result<HashMap<NodeId, usize>> {
    if policy == SequencePolicy::Strict {
        validate_sequence(source, sequence)?;
    }
    let mut positions = HashMap::with_capacity(sequence.len());
    for (i, &node) in sequence.iter().enumerate() {
        if positions.insert(node, i).is_some() {
            return Err(Rejection::DuplicateNode(node).into());
        }
    }
    Ok(positions)
}
