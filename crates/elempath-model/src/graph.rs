// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! Directed graph with scalar weights and resource vectors on its edges.
//!
//! `DiGraph` is the read-only view the engines search: node keys are interned
//! into dense `NodeIndex` values, successors are stored per node in insertion
//! order, and every node also records its incoming edges so reverse searches
//! (preprocessing towards a target) need no second copy of the graph.
//!
//! `GraphBuilder` is the mutable side. It validates edges as they are added
//! (resource vector length, finite weight, non-negative finite resources),
//! supports removing edges and nodes so callers can prepare a graph (for
//! example by decoupling the source), and compacts everything into a
//! `DiGraph` on `build`.

use crate::{error::ModelError, index::NodeIndex};
use elempath_core::num::float::SolverFloat;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// Inline storage for per-edge resource vectors. Most instances carry only a
/// handful of resources.
pub type ResourceVec<T> = SmallVec<[T; 4]>;

/// Bounds for node keys: anything hashable that can be cloned and printed
/// for diagnostics.
pub trait NodeKey: Clone + Eq + Hash + std::fmt::Debug {}

impl<N> NodeKey for N where N: Clone + Eq + Hash + std::fmt::Debug {}

/// An outgoing edge: its head node, weight and resource consumption.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    target: NodeIndex,
    weight: T,
    resource_cost: ResourceVec<T>,
}

impl<T> Edge<T>
where
    T: SolverFloat,
{
    #[inline]
    fn new(target: NodeIndex, weight: T, resource_cost: ResourceVec<T>) -> Self {
        Self {
            target,
            weight,
            resource_cost,
        }
    }

    /// Returns the node this edge points to.
    #[inline]
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Returns the edge weight (may be negative).
    #[inline]
    pub fn weight(&self) -> T {
        self.weight
    }

    /// Returns the per-resource consumption of the edge.
    #[inline]
    pub fn resource_cost(&self) -> &[T] {
        &self.resource_cost
    }
}

/// An immutable directed graph with weighted, resource-consuming edges.
///
/// At most one edge exists per ordered node pair. Construct it with
/// `GraphBuilder`.
#[derive(Clone)]
pub struct DiGraph<N, T> {
    num_resources: usize,
    nodes: Vec<N>,
    lookup: FxHashMap<N, NodeIndex>,
    successors: Vec<Vec<Edge<T>>>,
    // (tail, position of the edge inside `successors[tail]`)
    incoming: Vec<Vec<(NodeIndex, usize)>>,
    num_edges: usize,
}

impl<N, T> DiGraph<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    fn from_parts(num_resources: usize, nodes: Vec<N>, successors: Vec<Vec<Edge<T>>>) -> Self {
        debug_assert_eq!(
            nodes.len(),
            successors.len(),
            "called `DiGraph::from_parts` with {} nodes but {} adjacency lists",
            nodes.len(),
            successors.len()
        );

        let lookup: FxHashMap<N, NodeIndex> = nodes
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), NodeIndex::new(i)))
            .collect();

        let mut incoming: Vec<Vec<(NodeIndex, usize)>> = vec![Vec::new(); nodes.len()];
        let mut num_edges = 0;
        for (tail, edges) in successors.iter().enumerate() {
            for (position, edge) in edges.iter().enumerate() {
                incoming[edge.target.get()].push((NodeIndex::new(tail), position));
                num_edges += 1;
            }
        }

        Self {
            num_resources,
            nodes,
            lookup,
            successors,
            incoming,
            num_edges,
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the resource dimensionality every edge vector has.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.num_resources
    }

    /// Returns the key of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds.
    #[inline]
    pub fn node(&self, node: NodeIndex) -> &N {
        debug_assert!(
            node.get() < self.num_nodes(),
            "called `DiGraph::node` with node index out of bounds: the len is {} but the index is {}",
            self.num_nodes(),
            node.get()
        );

        &self.nodes[node.get()]
    }

    /// Returns all node keys in index order.
    #[inline]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Iterates over all node indices in order.
    #[inline]
    pub fn node_indices(&self) -> impl ExactSizeIterator<Item = NodeIndex> + use<N, T> {
        (0..self.nodes.len()).map(NodeIndex::new)
    }

    /// Looks up the index of a node key.
    #[inline]
    pub fn index_of(&self, key: &N) -> Option<NodeIndex> {
        self.lookup.get(key).copied()
    }

    /// Returns `true` if the key names a node of this graph.
    #[inline]
    pub fn contains_node(&self, key: &N) -> bool {
        self.lookup.contains_key(key)
    }

    /// Returns the outgoing edges of a node in insertion order.
    #[inline]
    pub fn successors(&self, node: NodeIndex) -> &[Edge<T>] {
        debug_assert!(
            node.get() < self.num_nodes(),
            "called `DiGraph::successors` with node index out of bounds: the len is {} but the index is {}",
            self.num_nodes(),
            node.get()
        );

        &self.successors[node.get()]
    }

    /// Iterates over the incoming edges of a node as `(tail, edge)` pairs.
    #[inline]
    pub fn incoming(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Edge<T>)> + '_ {
        self.incoming[node.get()]
            .iter()
            .map(move |&(tail, position)| (tail, &self.successors[tail.get()][position]))
    }

    /// Iterates over the tails of the incoming edges of a node.
    #[inline]
    pub fn predecessors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.incoming[node.get()].iter().map(|&(tail, _)| tail)
    }

    /// Returns the number of incoming edges of a node.
    #[inline]
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.incoming[node.get()].len()
    }

    /// Returns the number of outgoing edges of a node.
    #[inline]
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.successors[node.get()].len()
    }

    /// Returns the edge `from -> to`, if present.
    #[inline]
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&Edge<T>> {
        self.successors
            .get(from.get())?
            .iter()
            .find(|edge| edge.target == to)
    }

    /// Returns `true` if the edge `from -> to` exists.
    #[inline]
    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.edge(from, to).is_some()
    }

    /// Returns the subgraph induced by the nodes for which `keep` returns
    /// `true`. Surviving nodes keep their relative order, so indices are
    /// renumbered densely but deterministically.
    pub fn induced_subgraph<F>(&self, mut keep: F) -> DiGraph<N, T>
    where
        F: FnMut(NodeIndex) -> bool,
    {
        let mut remap: Vec<Option<NodeIndex>> = vec![None; self.num_nodes()];
        let mut nodes = Vec::new();
        for node in self.node_indices() {
            if keep(node) {
                remap[node.get()] = Some(NodeIndex::new(nodes.len()));
                nodes.push(self.nodes[node.get()].clone());
            }
        }

        let mut successors: Vec<Vec<Edge<T>>> = vec![Vec::new(); nodes.len()];
        for (old, new) in remap.iter().enumerate() {
            let Some(new) = new else {
                continue;
            };
            for edge in &self.successors[old] {
                if let Some(target) = remap[edge.target.get()] {
                    successors[new.get()].push(Edge::new(
                        target,
                        edge.weight,
                        edge.resource_cost.clone(),
                    ));
                }
            }
        }

        DiGraph::from_parts(self.num_resources, nodes, successors)
    }

    /// Returns a builder seeded with this graph, for callers that want to
    /// edit a copy.
    pub fn to_builder(&self) -> GraphBuilder<N, T> {
        GraphBuilder {
            num_resources: self.num_resources,
            nodes: self.nodes.iter().cloned().map(Some).collect(),
            lookup: self
                .lookup
                .iter()
                .map(|(key, index)| (key.clone(), index.get()))
                .collect(),
            successors: self.successors.clone(),
        }
    }
}

impl<N, T> std::fmt::Debug for DiGraph<N, T>
where
    N: std::fmt::Debug,
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiGraph")
            .field("num_resources", &self.num_resources)
            .field("nodes", &self.nodes)
            .field("successors", &self.successors)
            .finish()
    }
}

impl<N, T> std::fmt::Display for DiGraph<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DiGraph(num_nodes: {}, num_edges: {}, num_resources: {})",
            self.num_nodes(),
            self.num_edges(),
            self.num_resources
        )
    }
}

/// Mutable graph assembly.
///
/// Slots of removed nodes stay allocated until `build`, which compacts the
/// surviving nodes in insertion order. Edges are stored with builder slot
/// indices as targets.
#[derive(Clone)]
pub struct GraphBuilder<N, T> {
    num_resources: usize,
    nodes: Vec<Option<N>>,
    lookup: FxHashMap<N, usize>,
    successors: Vec<Vec<Edge<T>>>,
}

impl<N, T> GraphBuilder<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    /// Creates an empty builder for edges with `num_resources` resources.
    #[inline]
    pub fn new(num_resources: usize) -> Self {
        Self {
            num_resources,
            nodes: Vec::new(),
            lookup: FxHashMap::default(),
            successors: Vec::new(),
        }
    }

    /// Returns the declared resource dimensionality.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.num_resources
    }

    /// Returns the number of (non-removed) nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.lookup.len()
    }

    /// Returns `true` if the node exists.
    #[inline]
    pub fn contains_node(&self, key: &N) -> bool {
        self.lookup.contains_key(key)
    }

    /// Returns `true` if the edge `from -> to` exists.
    #[inline]
    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.position_of(from, to).is_some()
    }

    /// Returns weight and resource consumption of the edge `from -> to`.
    pub fn edge_attributes(&self, from: &N, to: &N) -> Option<(T, &[T])> {
        let (tail, position) = self.position_of(from, to)?;
        let edge = &self.successors[tail][position];
        Some((edge.weight, edge.resource_cost()))
    }

    /// Adds a node if it does not exist yet.
    pub fn add_node(&mut self, key: N) -> &mut Self {
        self.slot_or_insert(key);
        self
    }

    /// Adds the edge `from -> to`, creating missing end nodes. An existing
    /// edge between the same pair has its attributes replaced and keeps its
    /// position among the successors of `from`.
    pub fn add_edge<I>(
        &mut self,
        from: N,
        to: N,
        weight: T,
        resource_cost: I,
    ) -> Result<&mut Self, ModelError>
    where
        I: IntoIterator<Item = T>,
    {
        let resource_cost: ResourceVec<T> = resource_cost.into_iter().collect();
        self.validate_edge(&from, &to, weight, &resource_cost)?;

        let tail = self.slot_or_insert(from);
        let head = self.slot_or_insert(to);
        let edge = Edge::new(NodeIndex::new(head), weight, resource_cost);

        match self.successors[tail]
            .iter_mut()
            .find(|existing| existing.target.get() == head)
        {
            Some(existing) => *existing = edge,
            None => self.successors[tail].push(edge),
        }
        Ok(self)
    }

    /// Removes the edge `from -> to` and returns its weight and resource
    /// consumption.
    pub fn remove_edge(&mut self, from: &N, to: &N) -> Result<(T, ResourceVec<T>), ModelError> {
        let (tail, position) = self
            .position_of(from, to)
            .ok_or_else(|| ModelError::UnknownEdge {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
            })?;
        let edge = self.successors[tail].remove(position);
        Ok((edge.weight, edge.resource_cost))
    }

    /// Removes a node together with all edges touching it.
    pub fn remove_node(&mut self, key: &N) -> Result<&mut Self, ModelError> {
        let slot = self
            .lookup
            .remove(key)
            .ok_or_else(|| ModelError::UnknownNode(format!("{:?}", key)))?;
        self.nodes[slot] = None;
        self.successors[slot].clear();
        for edges in &mut self.successors {
            edges.retain(|edge| edge.target.get() != slot);
        }
        Ok(self)
    }

    /// Returns the tails of all edges pointing at `key`, in slot order.
    pub fn in_neighbors(&self, key: &N) -> Result<Vec<N>, ModelError> {
        let head = self.slot_of(key)?;
        Ok(self
            .successors
            .iter()
            .enumerate()
            .filter(|(_, edges)| edges.iter().any(|edge| edge.target.get() == head))
            .filter_map(|(tail, _)| self.nodes[tail].clone())
            .collect())
    }

    /// Compacts the builder into an immutable graph.
    pub fn build(self) -> DiGraph<N, T> {
        let mut remap: Vec<Option<NodeIndex>> = vec![None; self.nodes.len()];
        let mut count = 0;
        for (slot, key) in self.nodes.iter().enumerate() {
            if key.is_some() {
                remap[slot] = Some(NodeIndex::new(count));
                count += 1;
            }
        }

        let mut nodes = Vec::with_capacity(count);
        let mut successors = Vec::with_capacity(count);
        for (key, edges) in self.nodes.into_iter().zip(self.successors) {
            let Some(key) = key else {
                continue;
            };
            let edges: Vec<Edge<T>> = edges
                .into_iter()
                .filter_map(|edge| {
                    remap[edge.target.get()]
                        .map(|target| Edge::new(target, edge.weight, edge.resource_cost))
                })
                .collect();
            nodes.push(key);
            successors.push(edges);
        }

        DiGraph::from_parts(self.num_resources, nodes, successors)
    }

    fn slot_of(&self, key: &N) -> Result<usize, ModelError> {
        self.lookup
            .get(key)
            .copied()
            .ok_or_else(|| ModelError::UnknownNode(format!("{:?}", key)))
    }

    fn slot_or_insert(&mut self, key: N) -> usize {
        if let Some(&slot) = self.lookup.get(&key) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(Some(key.clone()));
        self.successors.push(Vec::new());
        self.lookup.insert(key, slot);
        slot
    }

    fn position_of(&self, from: &N, to: &N) -> Option<(usize, usize)> {
        let tail = *self.lookup.get(from)?;
        let head = *self.lookup.get(to)?;
        let position = self.successors[tail]
            .iter()
            .position(|edge| edge.target.get() == head)?;
        Some((tail, position))
    }

    fn validate_edge(
        &self,
        from: &N,
        to: &N,
        weight: T,
        resource_cost: &[T],
    ) -> Result<(), ModelError> {
        if resource_cost.len() != self.num_resources {
            return Err(ModelError::ResourceDimensionMismatch {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
                expected: self.num_resources,
                found: resource_cost.len(),
            });
        }
        if !weight.is_finite() {
            return Err(ModelError::NonFiniteWeight {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
                value: weight.to_string(),
            });
        }
        if let Some((component, value)) = resource_cost
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_valid_resource())
        {
            return Err(ModelError::InvalidResourceCost {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
                component,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

impl<N, T> std::fmt::Debug for GraphBuilder<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("num_resources", &self.num_resources)
            .field("nodes", &self.nodes)
            .field("successors", &self.successors)
            .finish()
    }
}

impl<N, T> std::fmt::Display for GraphBuilder<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GraphBuilder(num_nodes: {}, num_resources: {})",
            self.num_nodes(),
            self.num_resources
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DiGraph<&'static str, f64> {
        let mut builder = GraphBuilder::new(1);
        builder
            .add_edge("a", "b", 1.0, [0.5])
            .unwrap()
            .add_edge("b", "c", -2.0, [0.25])
            .unwrap()
            .add_edge("a", "c", 4.0, [0.0])
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_nodes_are_interned_in_insertion_order() {
        let graph = triangle();
        assert_eq!(graph.nodes(), &["a", "b", "c"]);
        assert_eq!(graph.index_of(&"b"), Some(NodeIndex::new(1)));
        assert_eq!(graph.index_of(&"z"), None);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.num_resources(), 1);
    }

    #[test]
    fn test_successors_and_incoming_agree() {
        let graph = triangle();
        let a = graph.index_of(&"a").unwrap();
        let c = graph.index_of(&"c").unwrap();

        let targets: Vec<NodeIndex> = graph.successors(a).iter().map(|e| e.target()).collect();
        assert_eq!(targets, vec![NodeIndex::new(1), NodeIndex::new(2)]);

        let tails: Vec<NodeIndex> = graph.predecessors(c).collect();
        assert_eq!(tails, vec![NodeIndex::new(0), NodeIndex::new(1)]);
        for (tail, edge) in graph.incoming(c) {
            assert_eq!(edge.target(), c);
            assert!(graph.has_edge(tail, c));
        }
        assert_eq!(graph.in_degree(a), 0);
        assert_eq!(graph.out_degree(a), 2);
    }

    #[test]
    fn test_edge_lookup_returns_attributes() {
        let graph = triangle();
        let b = graph.index_of(&"b").unwrap();
        let c = graph.index_of(&"c").unwrap();
        let edge = graph.edge(b, c).unwrap();
        assert_eq!(edge.weight(), -2.0);
        assert_eq!(edge.resource_cost(), &[0.25]);
        assert!(graph.edge(c, b).is_none());
    }

    #[test]
    fn test_re_adding_edge_replaces_attributes() {
        let mut builder = GraphBuilder::<&str, f64>::new(1);
        builder.add_edge("a", "b", 1.0, [0.5]).unwrap();
        builder.add_edge("a", "c", 1.0, [0.5]).unwrap();
        builder.add_edge("a", "b", 7.0, [0.1]).unwrap();
        assert_eq!(builder.edge_attributes(&"a", &"b"), Some((7.0, &[0.1][..])));

        let graph = builder.build();
        assert_eq!(graph.num_edges(), 2);
        let a = graph.index_of(&"a").unwrap();
        assert_eq!(graph.successors(a)[0].weight(), 7.0);
    }

    #[test]
    fn test_validation_errors() {
        let mut builder = GraphBuilder::<&str, f64>::new(2);
        assert!(matches!(
            builder.add_edge("a", "b", 1.0, [0.5]),
            Err(ModelError::ResourceDimensionMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
        assert!(matches!(
            builder.add_edge("a", "b", f64::NAN, [0.5, 0.5]),
            Err(ModelError::NonFiniteWeight { .. })
        ));
        assert!(matches!(
            builder.add_edge("a", "b", 1.0, [0.5, -0.5]),
            Err(ModelError::InvalidResourceCost { component: 1, .. })
        ));
        assert_eq!(builder.num_nodes(), 0);
    }

    #[test]
    fn test_remove_node_drops_touching_edges_and_compacts() {
        let mut builder = triangle().to_builder();
        builder.remove_node(&"b").unwrap();
        assert!(!builder.contains_edge(&"a", &"b"));
        assert!(builder.contains_edge(&"a", &"c"));

        let graph = builder.build();
        assert_eq!(graph.nodes(), &["a", "c"]);
        assert_eq!(graph.num_edges(), 1);
        let a = graph.index_of(&"a").unwrap();
        let c = graph.index_of(&"c").unwrap();
        assert!(graph.has_edge(a, c));
    }

    #[test]
    fn test_remove_edge_returns_attributes() {
        let mut builder = triangle().to_builder();
        let (weight, resources) = builder.remove_edge(&"b", &"c").unwrap();
        assert_eq!(weight, -2.0);
        assert_eq!(resources.as_slice(), &[0.25]);
        assert!(matches!(
            builder.remove_edge(&"b", &"c"),
            Err(ModelError::UnknownEdge { .. })
        ));
        assert!(matches!(
            builder.remove_node(&"zz"),
            Err(ModelError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_in_neighbors() {
        let builder = triangle().to_builder();
        assert_eq!(builder.in_neighbors(&"c").unwrap(), vec!["a", "b"]);
        assert!(builder.in_neighbors(&"a").unwrap().is_empty());
    }

    #[test]
    fn test_induced_subgraph_keeps_order_and_inner_edges() {
        let graph = triangle();
        let sub = graph.induced_subgraph(|n| n.get() != 1);
        assert_eq!(sub.nodes(), &["a", "c"]);
        assert_eq!(sub.num_edges(), 1);
        let a = sub.index_of(&"a").unwrap();
        let c = sub.index_of(&"c").unwrap();
        assert_eq!(sub.edge(a, c).unwrap().weight(), 4.0);
    }
}
