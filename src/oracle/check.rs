//! Sequence validation and batch feasibility checks.

use super::types::FeasibilitySource;
use crate::error::{Rejection, Result};
use crate::request::NodeId;
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Checks that `sequence` is a permutation of exactly the nodes `source`
/// references.
///
/// The feasibility oracle itself tolerates duplicates, missing and
/// extraneous ids; callers that want such input rejected call this first.
///
/// # Errors
///
/// The first of, in order: [`Rejection::DuplicateNode`],
/// [`Rejection::UnknownNode`], [`Rejection::MissingNode`] (smallest
/// missing id).
pub fn validate_sequence<S: FeasibilitySource + ?Sized>(
    source: &S,
    sequence: &[NodeId],
) -> Result<()> {
    let mut seen = HashSet::with_capacity(sequence.len());
    for &node in sequence {
        if !seen.insert(node) {
            return Err(Rejection::DuplicateNode(node).into());
        }
        if !source.contains_node(node) {
            return Err(Rejection::UnknownNode(node).into());
        }
    }
    if let Some(missing) = source
        .node_ids()
        .into_iter()
        .find(|node| !seen.contains(node))
    {
        return Err(Rejection::MissingNode(missing).into());
    }
    Ok(())
}

/// Checks many independent candidate sequences against one shared source.
///
/// With the `parallel` feature enabled and `parallel == true`, sequences are
/// checked on the rayon thread pool; otherwise sequentially. Results are in
/// input order.
pub fn check_sequences<S>(source: &S, sequences: &[Vec<NodeId>], parallel: bool) -> Vec<bool>
where
    S: FeasibilitySource + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return sequences
                .par_iter()
                .map(|seq| source.is_sequence_feasible(seq))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    sequences
        .iter()
        .map(|seq| source.is_sequence_feasible(seq))
        .collect()
}
