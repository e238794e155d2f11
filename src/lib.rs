//! # order-kernel
//!
//! Incremental topological order maintenance for growing DAGs.
//!
//! The kernel answers two questions while a graph gains edges one at a time:
//!
//! > May the edge `x→y` be added without closing a cycle? And if so, how
//! > does the order change so every edge still points forward?
//!
//! ## Core Contract
//!
//! 1. Every vertex gets its order from [`OrderMaintainer::create_vertex_data`]
//! 2. Every edge is proposed to [`OrderMaintainer::before_add_edge`] before
//!    it is linked, and linked only if that returns `true`
//! 3. [`OrderMaintainer::is_reachable`] answers path queries and leaves no
//!    residual state
//!
//! ## Architecture
//!
//! ```text
//! Caller → OrderMaintainer (stack, delta sets) → GraphAdapter
//!                                                    ↓
//!                                  VertexData { order, visited, custom }
//! ```
//!
//! ## Guarantees
//!
//! - For every linked edge `u→v`: `order(u) < order(v)`
//! - Order values are unique and only permuted within the affected region
//! - `visited` is false on every vertex between calls

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod adapter;
pub mod config;
pub mod maintainer;
pub mod store;

// Re-exports
pub use types::{Order, VertexData, EdgeCheck, OrderViolation, MaintainerStats};
pub use adapter::GraphAdapter;
pub use config::{MaintainerConfig, ConfigError, MAX_FIRST_ORDER};
pub use maintainer::OrderMaintainer;
pub use store::{InMemoryDag, VertexId, DagError};
