//! Neighborhood moves.

use std::fmt;

/// An elementary local-search move on a sequence.
///
/// Indices are positions in the sequence the move is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Exchange the elements at positions `i` and `j`.
    Swap { i: usize, j: usize },

    /// Remove the element at `from` and reinsert it so that it ends up
    /// before the element originally at `to`. `to` may equal the sequence
    /// length, meaning "move to the end".
    Relocate { from: usize, to: usize },
}

impl Move {
    /// True if applying the move cannot change any sequence.
    pub fn is_identity(&self) -> bool {
        match *self {
            Move::Swap { i, j } => i == j,
            Move::Relocate { from, to } => from == to || to == from + 1,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Swap { i, j } => write!(f, "swap({i}, {j})"),
            Move::Relocate { from, to } => write!(f, "relocate({from} -> {to})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_moves() {
        assert!(Move::Swap { i: 3, j: 3 }.is_identity());
        assert!(!Move::Swap { i: 3, j: 4 }.is_identity());
        assert!(Move::Relocate { from: 2, to: 2 }.is_identity());
        assert!(Move::Relocate { from: 2, to: 3 }.is_identity());
        assert!(!Move::Relocate { from: 3, to: 2 }.is_identity());
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::Swap { i: 1, j: 2 }.to_string(), "swap(1, 2)");
        assert_eq!(
            Move::Relocate { from: 0, to: 4 }.to_string(),
            "relocate(0 -> 4)"
        );
    }
}
