//! Incremental topological order maintenance.
//!
//! Implements the dynamic topological sort of Pearce and Kelly ("A Dynamic
//! Topological Sort Algorithm for Directed Acyclic Graphs", JEA vol. 11,
//! 2006). The maintainer keeps `order(u) < order(v)` for every edge `u→v`
//! as edges are inserted one at a time, touching only the vertices whose
//! order lies between the endpoints of a back-pointing edge.
//!
//! ## Algorithm
//!
//! For a proposed edge `x→y` with `lb = order(y)` and `ub = order(x)`:
//!
//! 1. If `lb > ub` the edge already points forward: nothing to do
//! 2. Forward search from `y` over vertices with order below `ub`
//!    (reaching order `ub` means reaching `x`: cycle, reject)
//! 3. Backward search from `x` over vertices with order above `lb`
//! 4. Reorder: the backward set takes the smallest order values held by the
//!    affected region, the forward set the rest, each keeping its own
//!    relative order
//!
//! ## Concurrency
//!
//! The maintainer owns reusable scratch buffers and writes `visited` flags
//! into the graph, so calls against one graph must be serialized. Every
//! operation takes `&mut self` and `&mut` graph access, which makes this hold
//! within safe code.

use std::fmt::Debug;

use crate::adapter::GraphAdapter;
use crate::config::{ConfigError, MaintainerConfig};
use crate::types::{EdgeCheck, MaintainerStats, Order, VertexData};

/// Pearce–Kelly order maintainer.
///
/// Owns no graph storage: every operation borrows a [`GraphAdapter`].
/// A maintainer must be paired with exactly one graph for its lifetime, since
/// order values are only unique among vertices created by the same counter.
#[derive(Debug, Clone)]
pub struct OrderMaintainer<V> {
    next_order: Order,
    stack: Vec<V>,
    delta_f: Vec<V>,
    delta_b: Vec<V>,
    merged: Vec<Order>,
    stats: MaintainerStats,
}

impl<V: Copy + Eq + Debug> OrderMaintainer<V> {
    /// Create a maintainer with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(&MaintainerConfig::default())
    }

    /// Create a maintainer from a configuration.
    pub fn with_config(config: MaintainerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    fn from_valid_config(config: &MaintainerConfig) -> Self {
        let cap = config.scratch_capacity;
        Self {
            next_order: config.first_order,
            stack: Vec::with_capacity(cap),
            delta_f: Vec::with_capacity(cap),
            delta_b: Vec::with_capacity(cap),
            merged: Vec::with_capacity(cap),
            stats: MaintainerStats::default(),
        }
    }

    /// Order value the next created vertex will receive.
    pub fn next_order(&self) -> Order {
        self.next_order
    }

    /// Work counters.
    pub fn stats(&self) -> MaintainerStats {
        self.stats
    }

    /// Zero the work counters.
    pub fn reset_stats(&mut self) {
        self.stats = MaintainerStats::default();
    }

    /// Create the record for a new vertex.
    ///
    /// Call exactly once per vertex, before the vertex takes part in any
    /// edge. The vertex is placed after every existing vertex.
    pub fn create_vertex_data<C>(&mut self) -> VertexData<C> {
        let data = VertexData::new(self.next_order);
        self.next_order += 1;
        self.stats.vertices_created += 1;
        data
    }

    /// Create the record for a new vertex carrying a payload.
    pub fn create_vertex_data_with<C>(&mut self, custom: C) -> VertexData<C> {
        self.create_vertex_data().with_custom(custom)
    }

    /// Validate and repair the order before the edge `x→y` is linked.
    ///
    /// Returns `false` if `y` already reaches `x` (including `x == y`); the
    /// caller must then not insert the edge. On `true` the order has been
    /// repaired and the caller may link `x→y`.
    pub fn before_add_edge<A>(&mut self, graph: &mut A, x: V, y: V) -> bool
    where
        A: GraphAdapter<Vertex = V>,
    {
        self.check_edge(graph, x, y).is_allowed()
    }

    /// Same as [`before_add_edge`](Self::before_add_edge), reporting which
    /// path was taken.
    pub fn check_edge<A>(&mut self, graph: &mut A, x: V, y: V) -> EdgeCheck
    where
        A: GraphAdapter<Vertex = V>,
    {
        self.stats.edges_checked += 1;

        let lb = graph.data(y).order;
        let ub = graph.data(x).order;

        if lb > ub {
            self.stats.already_ordered += 1;
            tracing::trace!(?x, ?y, lb, ub, "edge already ordered");
            return EdgeCheck::AlreadyOrdered;
        }

        if lb == ub {
            // Only x == y shares an order value.
            self.stats.cycles_rejected += 1;
            tracing::debug!(vertex = ?x, "rejected self-loop");
            return EdgeCheck::Cycle;
        }

        self.delta_f.clear();
        self.delta_b.clear();

        if !self.search_forward(graph, y, ub) {
            self.reset_forward(graph);
            self.stats.cycles_rejected += 1;
            tracing::debug!(?x, ?y, lb, ub, "rejected edge closing a cycle");
            return EdgeCheck::Cycle;
        }

        self.search_backward(graph, x, lb);
        let moved = self.reorder(graph);

        self.stats.reorders += 1;
        self.stats.vertices_reordered += moved as u64;
        tracing::debug!(?x, ?y, lb, ub, moved, "reordered affected region");

        EdgeCheck::Reordered { moved }
    }

    /// Whether a directed path leads from `source` to `target`.
    ///
    /// Leaves every `visited` flag as it found it, whatever the answer.
    pub fn is_reachable<A>(&mut self, graph: &mut A, source: V, target: V) -> bool
    where
        A: GraphAdapter<Vertex = V>,
    {
        self.stats.reachability_queries += 1;

        if source == target {
            return true;
        }

        let ub = graph.data(target).order;
        if graph.data(source).order > ub {
            return false;
        }

        self.delta_f.clear();
        let reachable = !self.search_forward(graph, source, ub);
        tracing::trace!(
            ?source,
            ?target,
            reachable,
            searched = self.delta_f.len(),
            "reachability query"
        );
        self.reset_forward(graph);

        reachable
    }

    /// Depth-first search from `first` along successors with order below `ub`.
    ///
    /// Returns `false` as soon as a successor with order exactly `ub` is seen.
    /// Every vertex marked visited is recorded in `delta_f`.
    fn search_forward<A>(&mut self, graph: &mut A, first: V, ub: Order) -> bool
    where
        A: GraphAdapter<Vertex = V>,
    {
        self.stack.push(first);
        while let Some(n) = self.stack.pop() {
            let data = graph.data_mut(n);
            if data.visited {
                continue;
            }
            data.visited = true;
            self.delta_f.push(n);

            for w in graph.successors(n) {
                let w_data = graph.data(w);
                if w_data.order == ub {
                    return false;
                }
                if !w_data.visited && w_data.order < ub {
                    self.stack.push(w);
                }
            }
        }
        true
    }

    /// Depth-first search from `first` along predecessors with order above `lb`.
    ///
    /// Cannot meet a cycle: any vertex both below `x` and above `y` would
    /// already have been reported by the forward search.
    fn search_backward<A>(&mut self, graph: &mut A, first: V, lb: Order)
    where
        A: GraphAdapter<Vertex = V>,
    {
        self.stack.push(first);
        while let Some(n) = self.stack.pop() {
            let data = graph.data_mut(n);
            if data.visited {
                continue;
            }
            data.visited = true;
            self.delta_b.push(n);

            for w in graph.predecessors(n) {
                let w_data = graph.data(w);
                if !w_data.visited && w_data.order > lb {
                    self.stack.push(w);
                }
            }
        }
    }

    /// Unmark everything the forward search touched and drop the scratch state.
    fn reset_forward<A>(&mut self, graph: &mut A)
    where
        A: GraphAdapter<Vertex = V>,
    {
        self.stack.clear();
        for v in self.delta_f.drain(..) {
            graph.data_mut(v).visited = false;
        }
        self.delta_b.clear();
    }

    /// Hand the region's order values to `delta_b ++ delta_f`, lowest first.
    ///
    /// Returns the number of vertices renumbered.
    fn reorder<A>(&mut self, graph: &mut A) -> usize
    where
        A: GraphAdapter<Vertex = V>,
    {
        // Order values are unique, so an unstable sort recovers each set's
        // relative order exactly.
        self.delta_b.sort_unstable_by_key(|&v| graph.data(v).order);
        self.delta_f.sort_unstable_by_key(|&v| graph.data(v).order);

        self.merged.clear();
        let (mut i, mut j) = (0, 0);
        while i < self.delta_b.len() && j < self.delta_f.len() {
            let ob = graph.data(self.delta_b[i]).order;
            let of = graph.data(self.delta_f[j]).order;
            if ob < of {
                self.merged.push(ob);
                i += 1;
            } else {
                self.merged.push(of);
                j += 1;
            }
        }
        for &v in &self.delta_b[i..] {
            self.merged.push(graph.data(v).order);
        }
        for &v in &self.delta_f[j..] {
            self.merged.push(graph.data(v).order);
        }

        let moved = self.merged.len();
        let region = self.delta_b.iter().chain(self.delta_f.iter());
        for (&v, &order) in region.zip(self.merged.iter()) {
            let data = graph.data_mut(v);
            data.visited = false;
            data.order = order;
        }

        self.delta_b.clear();
        self.delta_f.clear();
        moved
    }
}

impl<V: Copy + Eq + Debug> Default for OrderMaintainer<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bare adjacency-list graph, indexed by vertex number.
    #[derive(Default)]
    struct TestGraph {
        data: Vec<VertexData>,
        out: Vec<Vec<usize>>,
        inc: Vec<Vec<usize>>,
    }

    impl TestGraph {
        fn with_vertices(pk: &mut OrderMaintainer<usize>, n: usize) -> Self {
            let mut graph = Self::default();
            for _ in 0..n {
                graph.data.push(pk.create_vertex_data());
                graph.out.push(Vec::new());
                graph.inc.push(Vec::new());
            }
            graph
        }

        fn link(&mut self, x: usize, y: usize) {
            self.out[x].push(y);
            self.inc[y].push(x);
        }

        fn try_link(&mut self, pk: &mut OrderMaintainer<usize>, x: usize, y: usize) -> bool {
            let allowed = pk.before_add_edge(self, x, y);
            if allowed {
                self.link(x, y);
            }
            allowed
        }

        fn orders(&self) -> Vec<Order> {
            self.data.iter().map(|d| d.order).collect()
        }

        fn any_visited(&self) -> bool {
            self.data.iter().any(|d| d.visited)
        }
    }

    impl GraphAdapter for TestGraph {
        type Vertex = usize;
        type Custom = ();

        fn data(&self, vertex: usize) -> &VertexData {
            &self.data[vertex]
        }

        fn data_mut(&mut self, vertex: usize) -> &mut VertexData {
            &mut self.data[vertex]
        }

        fn successors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
            self.out[vertex].iter().copied()
        }

        fn predecessors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
            self.inc[vertex].iter().copied()
        }
    }

    #[test]
    fn test_create_vertex_data_counts_up() {
        let mut pk: OrderMaintainer<usize> = OrderMaintainer::new();
        let a: VertexData = pk.create_vertex_data();
        let b: VertexData = pk.create_vertex_data();
        assert_eq!(a.order, 0);
        assert_eq!(b.order, 1);
        assert!(!a.visited && !b.visited);
        assert_eq!(pk.next_order(), 2);
        assert_eq!(pk.stats().vertices_created, 2);
    }

    #[test]
    fn test_with_config_first_order() {
        let config = MaintainerConfig::default().with_first_order(10);
        let mut pk: OrderMaintainer<usize> = OrderMaintainer::with_config(config).unwrap();
        let data = pk.create_vertex_data_with("tag");
        assert_eq!(data.order, 10);
        assert_eq!(data.custom, Some("tag"));
    }

    #[test]
    fn test_with_config_rejects_exhausted_counter() {
        let config = MaintainerConfig::default().with_first_order(Order::MAX);
        let result: Result<OrderMaintainer<usize>, _> = OrderMaintainer::with_config(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_forward_edge_is_noop() {
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 3);

        assert_eq!(pk.check_edge(&mut g, 0, 2), EdgeCheck::AlreadyOrdered);
        assert_eq!(g.orders(), vec![0, 1, 2]);
        assert_eq!(pk.stats().already_ordered, 1);
    }

    #[test]
    fn test_back_edge_swaps_pair() {
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 2);

        assert_eq!(pk.check_edge(&mut g, 1, 0), EdgeCheck::Reordered { moved: 2 });
        g.link(1, 0);
        assert_eq!(g.orders(), vec![1, 0]);
        assert!(!g.any_visited());
    }

    #[test]
    fn test_three_cycle_rejected_without_mutation() {
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 3);

        assert!(g.try_link(&mut pk, 0, 1));
        assert!(g.try_link(&mut pk, 1, 2));
        assert!(!g.try_link(&mut pk, 2, 0));

        assert_eq!(g.orders(), vec![0, 1, 2]);
        assert!(!g.any_visited());
        assert_eq!(pk.stats().cycles_rejected, 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 1);

        assert_eq!(pk.check_edge(&mut g, 0, 0), EdgeCheck::Cycle);
    }

    #[test]
    fn test_reorder_keeps_untouched_vertices() {
        // 0 -> 2 and 3 -> 4 exist; adding 4 -> 1 moves {3, 4} before {1}
        // while 0 and 2 stay put.
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 5);
        assert!(g.try_link(&mut pk, 0, 2));
        assert!(g.try_link(&mut pk, 3, 4));

        assert!(g.try_link(&mut pk, 4, 1));

        let orders = g.orders();
        assert_eq!(orders[0], 0);
        assert_eq!(orders[2], 2);
        assert!(orders[3] < orders[4]);
        assert!(orders[4] < orders[1]);
        assert!(!g.any_visited());
    }

    #[test]
    fn test_reachability_cleans_up_on_negative() {
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 4);
        assert!(g.try_link(&mut pk, 0, 1));
        assert!(g.try_link(&mut pk, 1, 2));

        assert!(!pk.is_reachable(&mut g, 0, 3));
        assert!(!g.any_visited());

        // The vertices the failed query walked must still be searchable.
        assert!(pk.is_reachable(&mut g, 0, 2));
        assert!(!g.try_link(&mut pk, 2, 0));
    }

    #[test]
    fn test_reachability_trivial_cases() {
        let mut pk = OrderMaintainer::new();
        let mut g = TestGraph::with_vertices(&mut pk, 2);
        assert!(g.try_link(&mut pk, 0, 1));

        assert!(pk.is_reachable(&mut g, 1, 1));
        assert!(!pk.is_reachable(&mut g, 1, 0));
        assert!(pk.is_reachable(&mut g, 0, 1));
        assert_eq!(pk.stats().reachability_queries, 3);

        pk.reset_stats();
        assert_eq!(pk.stats(), MaintainerStats::default());
        assert_eq!(pk.next_order(), 2);
    }
}
