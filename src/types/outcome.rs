//! Outcomes of edge checks and order validation.

use serde::{Deserialize, Serialize};

use super::vertex::Order;

/// What [`OrderMaintainer::check_edge`] did for a proposed edge `x→y`.
///
/// [`OrderMaintainer::check_edge`]: crate::OrderMaintainer::check_edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EdgeCheck {
    /// `order(x) < order(y)` already held. Nothing was touched.
    AlreadyOrdered,
    /// The affected region was renumbered.
    Reordered {
        /// Number of vertices whose order was reassigned.
        moved: usize,
    },
    /// `y` already reaches `x`; inserting the edge would close a cycle.
    Cycle,
}

impl EdgeCheck {
    /// Whether the caller may link the edge.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Cycle)
    }
}

impl std::fmt::Display for EdgeCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyOrdered => write!(f, "already_ordered"),
            Self::Reordered { moved } => write!(f, "reordered({moved})"),
            Self::Cycle => write!(f, "cycle"),
        }
    }
}

/// A broken invariant found by an order audit.
///
/// Vertices are reported by their order value so the error stays independent
/// of the adapter's vertex type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderViolation {
    /// An edge points backward in the order.
    #[error("Edge {from_order} -> {to_order} points backward in the order")]
    BackEdge {
        /// Order of the edge source.
        from_order: Order,
        /// Order of the edge target.
        to_order: Order,
    },
    /// Two vertices share an order value.
    #[error("Order value {0} is held by more than one vertex")]
    DuplicateOrder(Order),
    /// A vertex was left marked visited after an operation.
    #[error("Vertex at order {0} is still marked visited")]
    StaleVisited(Order),
}
