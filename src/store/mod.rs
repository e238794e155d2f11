//! Graph adapters backed by concrete storage.

pub mod memory;

pub use memory::{DagError, InMemoryDag, VertexId};
