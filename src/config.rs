//! Maintainer configuration.

use serde::{Deserialize, Serialize};

use crate::types::Order;

/// Default initial capacity of each scratch buffer.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 64;

/// Largest accepted `first_order`. Leaves half the counter range for new
/// vertices, so the counter cannot run out in practice.
pub const MAX_FIRST_ORDER: Order = Order::MAX / 2;

/// Error returned by [`MaintainerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The counter would start too close to its maximum.
    #[error("first_order must be at most {max} (got {0})", max = MAX_FIRST_ORDER)]
    FirstOrderTooLarge(Order),
}

/// Configuration for an [`OrderMaintainer`](crate::OrderMaintainer).
///
/// ## Parameters
///
/// - `first_order`: value given to the first vertex created
/// - `scratch_capacity`: initial capacity of the traversal stack, the two
///   delta sets and the merge buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintainerConfig {
    /// Value given to the first vertex created.
    pub first_order: Order,
    /// Initial capacity of each scratch buffer.
    pub scratch_capacity: usize,
}

impl MaintainerConfig {
    /// Create a configuration with custom parameters.
    pub fn new(first_order: Order, scratch_capacity: usize) -> Self {
        Self {
            first_order,
            scratch_capacity,
        }
    }

    /// Set the first order value.
    pub fn with_first_order(mut self, first_order: Order) -> Self {
        self.first_order = first_order;
        self
    }

    /// Set the scratch buffer capacity.
    pub fn with_scratch_capacity(mut self, scratch_capacity: usize) -> Self {
        self.scratch_capacity = scratch_capacity;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_order > MAX_FIRST_ORDER {
            return Err(ConfigError::FirstOrderTooLarge(self.first_order));
        }
        Ok(())
    }
}

impl Default for MaintainerConfig {
    fn default() -> Self {
        Self {
            first_order: 0,
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
        }
    }
}
