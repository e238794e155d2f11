//! The graph contract consumed by the order maintainer.

use std::fmt::Debug;

use crate::types::VertexData;

/// Access the maintainer needs to a graph it does not own.
///
/// The graph keeps topology and one [`VertexData`] per vertex. The maintainer
/// only reads neighbours and writes `order`/`visited`; it never adds or
/// removes edges.
///
/// Neighbour iterators must be finite and restartable: each call yields a
/// fresh pass over the current neighbours.
pub trait GraphAdapter {
    /// Vertex handle. Cheap to copy.
    type Vertex: Copy + Eq + Debug;
    /// Caller payload stored in each vertex record.
    type Custom;

    /// Record for `vertex`.
    fn data(&self, vertex: Self::Vertex) -> &VertexData<Self::Custom>;

    /// Mutable record for `vertex`.
    fn data_mut(&mut self, vertex: Self::Vertex) -> &mut VertexData<Self::Custom>;

    /// Targets of the edges leaving `vertex`.
    fn successors(&self, vertex: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Sources of the edges entering `vertex`.
    fn predecessors(&self, vertex: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;
}
