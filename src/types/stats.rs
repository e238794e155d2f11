//! Counters describing the maintainer's work.

use serde::{Deserialize, Serialize};

/// Maintainer statistics.
///
/// Cumulative since construction or the last
/// [`OrderMaintainer::reset_stats`](crate::OrderMaintainer::reset_stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintainerStats {
    /// Vertex records handed out.
    pub vertices_created: u64,
    /// Proposed edges checked.
    pub edges_checked: u64,
    /// Checks that needed no repair.
    pub already_ordered: u64,
    /// Checks that renumbered an affected region.
    pub reorders: u64,
    /// Total vertices renumbered across all reorders.
    pub vertices_reordered: u64,
    /// Edges rejected because they would close a cycle.
    pub cycles_rejected: u64,
    /// Reachability queries answered.
    pub reachability_queries: u64,
}

impl MaintainerStats {
    /// Average size of a repaired region, or 0.0 if nothing was reordered.
    pub fn mean_region_size(&self) -> f64 {
        if self.reorders == 0 {
            0.0
        } else {
            self.vertices_reordered as f64 / self.reorders as f64
        }
    }
}
