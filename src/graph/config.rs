//! Precedence graph configuration.

/// When cycles among registered requests are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleCheck {
    /// Only the direct two-node contradiction is rejected at registration.
    /// Longer cycles surface when a topological order is requested.
    #[default]
    Deferred,

    /// Every registration also runs a reachability search from the
    /// delivery node back to the pickup node and rejects the request if it
    /// would close a cycle of any length. Costs O(nodes + edges) per call.
    Eager,
}

/// Configuration for [`PrecedenceGraph`](super::PrecedenceGraph).
///
/// # Examples
///
/// ```
/// use u_precedence::graph::{CycleCheck, GraphConfig};
///
/// let config = GraphConfig::default().with_cycle_check(CycleCheck::Eager);
/// assert_eq!(config.cycle_check, CycleCheck::Eager);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Cycle detection policy for registration.
    pub cycle_check: CycleCheck,
}

impl GraphConfig {
    /// Sets the cycle detection policy.
    pub fn with_cycle_check(mut self, cycle_check: CycleCheck) -> Self {
        self.cycle_check = cycle_check;
        self
    }
}
