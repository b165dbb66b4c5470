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


//! Path value type.
//!
//! A `Path` is an ordered, non-empty sequence of node indices. Two paths are
//! equal exactly when their node sequences are equal, regardless of how the
//! search produced them. Edge attributes are not stored; they are looked up
//! in the graph on demand, which keeps paths cheap to clone and extend while
//! the engines build thousands of candidates.

use crate::{
    graph::{DiGraph, Edge, NodeKey, ResourceVec},
    index::NodeIndex,
};
use elempath_core::num::float::SolverFloat;
use rustc_hash::{FxHashMap, FxHashSet};

const ARROW: &str = " ⇨ ";
const ELLIPSIS: &str = " ⇨  …  ⇨ ";

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Path {
    nodes: Vec<NodeIndex>,
}

impl Path {
    /// Creates the single-node path `[node]`.
    #[inline]
    pub fn singleton(node: NodeIndex) -> Self {
        Self { nodes: vec![node] }
    }

    /// Creates a path from a node sequence.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` is empty.
    #[inline]
    pub fn from_nodes(nodes: Vec<NodeIndex>) -> Self {
        assert!(
            !nodes.is_empty(),
            "called `Path::from_nodes` with an empty node sequence"
        );
        Self { nodes }
    }

    /// Returns the start node.
    #[inline]
    pub fn first(&self) -> NodeIndex {
        self.nodes[0]
    }

    /// Returns the end node.
    #[inline]
    pub fn last(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a path holds at least its start node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.nodes.len() - 1
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    /// Returns the position of the first occurrence of `node`.
    #[inline]
    pub fn position(&self, node: NodeIndex) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// Returns a copy of this path with `node` appended.
    #[inline]
    pub fn extended(&self, node: NodeIndex) -> Path {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Path { nodes }
    }

    /// Returns the suffix starting at the first occurrence of `node`. When
    /// the path is about to be extended back into `node`, this suffix is the
    /// cycle that extension would close.
    #[inline]
    pub fn cycle_from(&self, node: NodeIndex) -> Option<&[NodeIndex]> {
        self.position(node).map(|start| &self.nodes[start..])
    }

    /// Counts how often each node occurs, in order of first occurrence.
    pub fn multiplicities(&self) -> Vec<(NodeIndex, usize)> {
        let mut order: Vec<NodeIndex> = Vec::new();
        let mut counts: FxHashMap<NodeIndex, usize> = FxHashMap::default();
        for &node in &self.nodes {
            let count = counts.entry(node).or_insert(0);
            if *count == 0 {
                order.push(node);
            }
            *count += 1;
        }
        order
            .into_iter()
            .map(|node| (node, counts[&node]))
            .collect()
    }

    /// Returns `true` if no node occurs twice.
    pub fn is_elementary(&self) -> bool {
        let mut seen: FxHashSet<NodeIndex> = FxHashSet::default();
        self.nodes.iter().all(|node| seen.insert(*node))
    }

    /// Iterates over the edges of the path as `(from, to, edge)`. Iteration
    /// stops early at the first pair that is not joined by an edge of
    /// `graph`.
    pub fn edges<'g, N, T>(
        &'g self,
        graph: &'g DiGraph<N, T>,
    ) -> impl Iterator<Item = (NodeIndex, NodeIndex, &'g Edge<T>)> + 'g
    where
        N: NodeKey,
        T: SolverFloat,
    {
        self.nodes
            .windows(2)
            .map_while(move |pair| graph.edge(pair[0], pair[1]).map(|e| (pair[0], pair[1], e)))
    }

    /// Returns `true` if every consecutive pair is joined by an edge.
    pub fn is_valid_in<N, T>(&self, graph: &DiGraph<N, T>) -> bool
    where
        N: NodeKey,
        T: SolverFloat,
    {
        self.nodes.iter().all(|node| node.get() < graph.num_nodes())
            && self.edges(graph).count() == self.num_edges()
    }

    /// Sums the edge weights, or returns `None` if the path is not valid in
    /// `graph`.
    pub fn cost<N, T>(&self, graph: &DiGraph<N, T>) -> Option<T>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        let mut total = T::zero();
        let mut count = 0;
        for (_, _, edge) in self.edges(graph) {
            total = total + edge.weight();
            count += 1;
        }
        (count == self.num_edges()).then_some(total)
    }

    /// Sums the resource vectors of the edges, or returns `None` if the path
    /// is not valid in `graph`.
    pub fn resource_consumption<N, T>(&self, graph: &DiGraph<N, T>) -> Option<ResourceVec<T>>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        let mut total: ResourceVec<T> = std::iter::repeat_n(T::zero(), graph.num_resources()).collect();
        let mut count = 0;
        for (_, _, edge) in self.edges(graph) {
            for (sum, value) in total.iter_mut().zip(edge.resource_cost()) {
                *sum = *sum + *value;
            }
            count += 1;
        }
        (count == self.num_edges()).then_some(total)
    }

    /// Maps the node indices back to the graph's keys.
    pub fn keys<N, T>(&self, graph: &DiGraph<N, T>) -> Vec<N>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        self.nodes.iter().map(|&n| graph.node(n).clone()).collect()
    }

    /// Formats the path with node keys, e.g. `0 ⇨ 2 ⇨ 5`.
    pub fn display<'a, N, T>(&'a self, graph: &'a DiGraph<N, T>) -> PathDisplay<'a, N, T> {
        PathDisplay {
            path: self,
            graph,
            max_nodes: None,
        }
    }

    /// Formats the path with node keys, eliding the middle when the path has
    /// more than `max_nodes + 1` nodes: the first `max_nodes - 1` nodes are
    /// printed, then an ellipsis and the last node.
    pub fn display_truncated<'a, N, T>(
        &'a self,
        graph: &'a DiGraph<N, T>,
        max_nodes: usize,
    ) -> PathDisplay<'a, N, T> {
        PathDisplay {
            path: self,
            graph,
            max_nodes: Some(max_nodes),
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_nodes(f, &self.nodes, None, |f, node| write!(f, "{}", node.get()))
    }
}

/// Formatter returned by `Path::display`.
pub struct PathDisplay<'a, N, T> {
    path: &'a Path,
    graph: &'a DiGraph<N, T>,
    max_nodes: Option<usize>,
}

impl<N, T> std::fmt::Display for PathDisplay<'_, N, T>
where
    N: NodeKey + std::fmt::Display,
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_nodes(f, &self.path.nodes, self.max_nodes, |f, node| {
            write!(f, "{}", self.graph.node(node))
        })
    }
}

fn write_nodes<F>(
    f: &mut std::fmt::Formatter<'_>,
    nodes: &[NodeIndex],
    max_nodes: Option<usize>,
    mut write_node: F,
) -> std::fmt::Result
where
    F: FnMut(&mut std::fmt::Formatter<'_>, NodeIndex) -> std::fmt::Result,
{
    let len = nodes.len();
    let max_nodes = max_nodes.unwrap_or(len);

    write_node(f, nodes[0])?;
    if len > max_nodes + 1 {
        for &node in nodes.iter().take(max_nodes.saturating_sub(1)).skip(1) {
            f.write_str(ARROW)?;
            write_node(f, node)?;
        }
        f.write_str(ELLIPSIS)?;
        write_node(f, nodes[len - 1])
    } else {
        for &node in &nodes[1..] {
            f.write_str(ARROW)?;
            write_node(f, node)?;
        }
        Ok(())
    }
}
