//! In-memory DAG driven by the order maintainer.
//!
//! Reference [`GraphAdapter`] used by tests and benches. It follows the
//! insertion protocol: every edge goes through
//! [`OrderMaintainer::before_add_edge`] and is linked only when allowed.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adapter::GraphAdapter;
use crate::config::{ConfigError, MaintainerConfig};
use crate::maintainer::OrderMaintainer;
use crate::types::{MaintainerStats, Order, OrderViolation, VertexData};

/// Handle to a vertex of an [`InMemoryDag`].
///
/// Indexes are dense and assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(usize);

impl VertexId {
    /// Get the inner index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Error type for in-memory DAG operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DagError {
    /// Vertex not found.
    #[error("Vertex not found: {0}")]
    UnknownVertex(VertexId),
    /// The edge would close a cycle.
    #[error("Edge {from} -> {to} would create a cycle")]
    Cycle {
        /// Edge source.
        from: VertexId,
        /// Edge target.
        to: VertexId,
    },
}

/// Vertex records and adjacency lists.
#[derive(Debug, Clone)]
struct Adjacency<C> {
    vertices: Vec<VertexData<C>>,
    successors: Vec<Vec<VertexId>>,
    predecessors: Vec<Vec<VertexId>>,
    edges: BTreeSet<(VertexId, VertexId)>,
}

impl<C> Default for Adjacency<C> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            edges: BTreeSet::new(),
        }
    }
}

impl<C> Adjacency<C> {
    fn push(&mut self, data: VertexData<C>) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(data);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        id
    }

    fn link(&mut self, from: VertexId, to: VertexId) {
        self.successors[from.0].push(to);
        self.predecessors[to.0].push(from);
        self.edges.insert((from, to));
    }

    fn check(&self, id: VertexId) -> Result<(), DagError> {
        if id.0 < self.vertices.len() {
            Ok(())
        } else {
            Err(DagError::UnknownVertex(id))
        }
    }
}

impl<C> GraphAdapter for Adjacency<C> {
    type Vertex = VertexId;
    type Custom = C;

    fn data(&self, vertex: VertexId) -> &VertexData<C> {
        &self.vertices[vertex.0]
    }

    fn data_mut(&mut self, vertex: VertexId) -> &mut VertexData<C> {
        &mut self.vertices[vertex.0]
    }

    fn successors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.successors[vertex.0].iter().copied()
    }

    fn predecessors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.predecessors[vertex.0].iter().copied()
    }
}

/// Growing DAG whose vertices always carry a valid topological order.
#[derive(Debug, Clone)]
pub struct InMemoryDag<C = ()> {
    graph: Adjacency<C>,
    maintainer: OrderMaintainer<VertexId>,
}

impl<C> InMemoryDag<C> {
    /// Create an empty DAG.
    pub fn new() -> Self {
        Self {
            graph: Adjacency::default(),
            maintainer: OrderMaintainer::new(),
        }
    }

    /// Create an empty DAG with a maintainer configuration.
    pub fn with_config(config: MaintainerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            graph: Adjacency::default(),
            maintainer: OrderMaintainer::with_config(config)?,
        })
    }

    /// Add a vertex. It is ordered after every existing vertex.
    pub fn add_vertex(&mut self) -> VertexId {
        let data = self.maintainer.create_vertex_data();
        self.graph.push(data)
    }

    /// Add a vertex carrying a payload.
    pub fn add_vertex_with(&mut self, custom: C) -> VertexId {
        let data = self.maintainer.create_vertex_data_with(custom);
        self.graph.push(data)
    }

    /// Add the edge `from -> to`.
    ///
    /// Returns `Ok(true)` if the edge was inserted and `Ok(false)` if it was
    /// already present. Fails with [`DagError::Cycle`] if `to` already reaches
    /// `from`; the graph is left unchanged in that case.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<bool, DagError> {
        self.graph.check(from)?;
        self.graph.check(to)?;

        if self.graph.edges.contains(&(from, to)) {
            return Ok(false);
        }

        if !self.maintainer.before_add_edge(&mut self.graph, from, to) {
            return Err(DagError::Cycle { from, to });
        }

        self.graph.link(from, to);
        Ok(true)
    }

    /// Whether a directed path leads from `source` to `target`.
    pub fn is_reachable(&mut self, source: VertexId, target: VertexId) -> Result<bool, DagError> {
        self.graph.check(source)?;
        self.graph.check(target)?;
        Ok(self.maintainer.is_reachable(&mut self.graph, source, target))
    }

    /// Current order value of a vertex.
    pub fn order_of(&self, id: VertexId) -> Option<Order> {
        self.graph.vertices.get(id.0).map(|d| d.order)
    }

    /// Full record of a vertex.
    pub fn vertex_data(&self, id: VertexId) -> Option<&VertexData<C>> {
        self.graph.vertices.get(id.0)
    }

    /// Payload of a vertex, if it has one.
    pub fn custom(&self, id: VertexId) -> Option<&C> {
        self.graph.vertices.get(id.0).and_then(|d| d.custom.as_ref())
    }

    /// Mutable payload slot of a vertex.
    pub fn custom_mut(&mut self, id: VertexId) -> Option<&mut Option<C>> {
        self.graph.vertices.get_mut(id.0).map(|d| &mut d.custom)
    }

    /// Whether the edge `from -> to` is present.
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.graph.edges.contains(&(from, to))
    }

    /// All vertex handles, in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.graph.vertices.len()).map(VertexId)
    }

    /// All edges, ordered by (source, target) handle.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.graph.edges.iter().copied()
    }

    /// Get number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.graph.vertices.len()
    }

    /// Get number of edges.
    pub fn num_edges(&self) -> usize {
        self.graph.edges.len()
    }

    /// Maintainer work counters.
    pub fn stats(&self) -> MaintainerStats {
        self.maintainer.stats()
    }

    /// Audit the order invariants over the whole graph.
    ///
    /// Checks, in this sequence, that no vertex is left visited, that order
    /// values are unique, and that every edge points forward.
    pub fn verify_order(&self) -> Result<(), OrderViolation> {
        let mut seen = HashSet::with_capacity(self.graph.vertices.len());
        for data in &self.graph.vertices {
            if data.visited {
                return Err(OrderViolation::StaleVisited(data.order));
            }
            if !seen.insert(data.order) {
                return Err(OrderViolation::DuplicateOrder(data.order));
            }
        }

        for &(from, to) in &self.graph.edges {
            let from_order = self.graph.data(from).order;
            let to_order = self.graph.data(to).order;
            if from_order >= to_order {
                tracing::error!(%from, %to, from_order, to_order, "edge violates topological order");
                return Err(OrderViolation::BackEdge { from_order, to_order });
            }
        }

        Ok(())
    }
}

impl<C> Default for InMemoryDag<C> {
    fn default() -> Self {
        Self::new()
    }
}
