//! Per-vertex state owned by the graph and mutated by the maintainer.

use serde::{Deserialize, Serialize};

/// Position of a vertex in the maintained topological order.
///
/// Values are handed out by a strictly increasing counter and never reused,
/// so a graph's order values may have gaps.
pub type Order = u64;

/// State the order maintainer keeps for every vertex.
///
/// The graph owns one record per vertex. Only [`OrderMaintainer`] writes
/// `order` and `visited`; `custom` belongs to the caller.
///
/// [`OrderMaintainer`]: crate::OrderMaintainer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexData<C = ()> {
    /// Current position in the total order. Unique at quiescent points.
    pub order: Order,
    /// Traversal scratch flag. False outside every maintainer call.
    pub visited: bool,
    /// Opaque caller payload.
    pub custom: Option<C>,
}

impl<C> VertexData<C> {
    /// Create a record at the given order with no payload.
    pub fn new(order: Order) -> Self {
        Self {
            order,
            visited: false,
            custom: None,
        }
    }

    /// Attach a payload.
    pub fn with_custom(mut self, custom: C) -> Self {
        self.custom = Some(custom);
        self
    }
}
