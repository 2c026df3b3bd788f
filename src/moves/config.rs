//! Move engine configuration.

/// How a tentative move is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeasibilityCheck {
    /// Re-run the full oracle check on the whole sequence after every
    /// tentative move. O(|sequence| + edges).
    #[default]
    Full,

    /// Check only the edges touching the moved node(s). Valid because a
    /// swap or relocation never changes the relative order of two
    /// unmoved nodes. Used only while the current sequence is known to be
    /// feasible; otherwise the engine falls back to [`Full`](Self::Full).
    /// Accept/reject outcomes are identical to the full check.
    Incremental,
}

/// What the engine requires of the sequence it is built around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequencePolicy {
    /// Only duplicate ids are rejected. Ids unknown to the source are
    /// unconstrained, and source nodes missing from the sequence are
    /// ignored.
    #[default]
    Tolerant,

    /// The sequence must be a permutation of exactly the source's nodes.
    Strict,
}

/// Configuration for [`MoveEngine`](super::MoveEngine).
///
/// # Examples
///
/// ```
/// use u_precedence::moves::{FeasibilityCheck, MoveConfig, SequencePolicy};
///
/// let config = MoveConfig::default()
///     .with_check(FeasibilityCheck::Incremental)
///     .with_policy(SequencePolicy::Strict);
/// assert_eq!(config.check, FeasibilityCheck::Incremental);
/// assert_eq!(config.policy, SequencePolicy::Strict);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveConfig {
    /// Validation strategy for tentative moves.
    pub check: FeasibilityCheck,
    /// Requirements on the working sequence.
    pub policy: SequencePolicy,
}

impl MoveConfig {
    /// Sets the validation strategy.
    pub fn with_check(mut self, check: FeasibilityCheck) -> Self {
        self.check = check;
        self
    }

    /// Sets the sequence policy.
    pub fn with_policy(mut self, policy: SequencePolicy) -> Self {
        self.policy = policy;
        self
    }
}
