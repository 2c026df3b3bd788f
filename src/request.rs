//! Pickup-and-delivery requests.

use crate::error::Rejection;

/// Identifier of a visiting point (pickup or delivery stop).
///
/// Ids are opaque to this crate; only identity and ordering matter.
/// Negative values are representable so that malformed upstream input
/// can be rejected instead of silently wrapped.
pub type NodeId = i64;

/// Caller-assigned identifier of a [`Request`].
pub type RequestId = i64;

/// A pickup/delivery pair. Generates one precedence edge:
/// `pickup` must be visited before `delivery`.
///
/// # Examples
///
/// ```
/// use u_precedence::Request;
///
/// let r = Request::new(7, 1, 3);
/// assert_eq!(r.edge(), (1, 3));
/// assert!(r.validate().is_ok());
/// assert!(Request::new(8, 2, 2).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    /// Unique id among the currently registered requests.
    pub id: RequestId,
    /// Node that must come first.
    pub pickup: NodeId,
    /// Node that must come after `pickup`.
    pub delivery: NodeId,
}

impl Request {
    /// Creates a new request.
    pub fn new(id: RequestId, pickup: NodeId, delivery: NodeId) -> Self {
        Self {
            id,
            pickup,
            delivery,
        }
    }

    /// The `(before, after)` node pair this request constrains.
    pub fn edge(&self) -> (NodeId, NodeId) {
        (self.pickup, self.delivery)
    }

    /// Checks the request in isolation: non-negative, distinct endpoints.
    ///
    /// Uniqueness of `id` depends on the container and is checked there.
    pub fn validate(&self) -> Result<(), Rejection> {
        if self.pickup < 0 {
            return Err(Rejection::NegativeNode(self.pickup));
        }
        if self.delivery < 0 {
            return Err(Rejection::NegativeNode(self.delivery));
        }
        if self.pickup == self.delivery {
            return Err(Rejection::SameEndpoints {
                request: self.id,
                node: self.pickup,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_negative_pickup() {
        let r = Request::new(1, -1, 2);
        assert_eq!(r.validate(), Err(Rejection::NegativeNode(-1)));
    }

    #[test]
    fn test_validate_rejects_negative_delivery() {
        let r = Request::new(1, 0, -5);
        assert_eq!(r.validate(), Err(Rejection::NegativeNode(-5)));
    }

    #[test]
    fn test_validate_rejects_same_endpoints() {
        let r = Request::new(4, 3, 3);
        assert_eq!(
            r.validate(),
            Err(Rejection::SameEndpoints {
                request: 4,
                node: 3
            })
        );
    }

    #[test]
    fn test_validate_accepts_zero_node() {
        assert!(Request::new(0, 0, 1).validate().is_ok());
    }
}
