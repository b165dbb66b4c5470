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


//! # Preprocessing
//!
//! Prunes the graph to the nodes that can lie on a budget-feasible
//! source-target path and tabulates least resource consumptions, which the
//! label-setting search uses as lower bounds.
//!
//! For every resource `r` two single-resource Dijkstra runs are made, one
//! from the source along the edges and one from the target against them,
//! each cut off at `budget[r]`. A node survives if all of these runs reach
//! it. The surviving nodes induce the reduced graph (node order preserved),
//! on which all-pairs least consumption tables are built, one per resource.
//!
//! The resource a run works on is bound into the weight closure handed to
//! `dijkstra`, so several resources can be processed without touching the
//! graph. Without resources, plain reachability is used.

use crate::error::EspprcError;
use elempath_core::num::float::SolverFloat;
use elempath_model::{
    graph::{DiGraph, Edge, NodeKey},
    index::NodeIndex,
};
use fixedbitset::FixedBitSet;
use log::debug;
use std::{cmp::Ordering, collections::BinaryHeap};

/// Direction in which `dijkstra` follows the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along the edges, from tail to head.
    Forward,
    /// Against the edges, from head to tail.
    Backward,
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first,
/// ties broken by the smaller node index.
#[derive(Debug, Clone, Copy)]
struct NodeDistance<T> {
    node: NodeIndex,
    distance: T,
}

impl<T: SolverFloat> PartialEq for NodeDistance<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: SolverFloat> Eq for NodeDistance<T> {}

impl<T: SolverFloat> Ord for NodeDistance<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<T: SolverFloat> PartialOrd for NodeDistance<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source least distances under the non-negative edge weight
/// `weight`. Distances above `cutoff` are not explored; unreached nodes are
/// `+inf`.
pub fn dijkstra<N, T, F>(
    graph: &DiGraph<N, T>,
    start: NodeIndex,
    direction: Direction,
    cutoff: T,
    weight: &F,
) -> Vec<T>
where
    N: NodeKey,
    T: SolverFloat,
    F: Fn(&Edge<T>) -> T + ?Sized,
{
    let mut distances = vec![T::infinity(); graph.num_nodes()];
    let mut settled = FixedBitSet::with_capacity(graph.num_nodes());
    let mut to_visit = BinaryHeap::new();

    distances[start.get()] = T::zero();
    to_visit.push(NodeDistance {
        node: start,
        distance: T::zero(),
    });

    while let Some(NodeDistance { node, distance }) = to_visit.pop() {
        if settled.put(node.get()) {
            continue;
        }

        let mut relax = |neighbor: NodeIndex, edge: &Edge<T>| {
            let candidate = distance + weight(edge);
            if candidate <= cutoff && candidate < distances[neighbor.get()] {
                distances[neighbor.get()] = candidate;
                to_visit.push(NodeDistance {
                    node: neighbor,
                    distance: candidate,
                });
            }
        };

        match direction {
            Direction::Forward => {
                for edge in graph.successors(node) {
                    relax(edge.target(), edge);
                }
            }
            Direction::Backward => {
                for (tail, edge) in graph.incoming(node) {
                    relax(tail, edge);
                }
            }
        }
    }

    distances
}

/// All-pairs least consumption of one resource. Unreachable pairs are `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastResourceTable<T> {
    num_nodes: usize,
    values: Vec<T>,
}

impl<T> LeastResourceTable<T>
where
    T: SolverFloat,
{
    /// Builds the table for resource `resource` of `graph`.
    pub fn compute<N>(graph: &DiGraph<N, T>, resource: usize) -> Self
    where
        N: NodeKey,
    {
        let num_nodes = graph.num_nodes();
        let mut values = Vec::with_capacity(num_nodes * num_nodes);
        for node in graph.node_indices() {
            values.extend(dijkstra(
                graph,
                node,
                Direction::Forward,
                T::infinity(),
                &|edge: &Edge<T>| edge.resource_cost()[resource],
            ));
        }
        Self { num_nodes, values }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Least consumption on any path `from -> to`.
    #[inline]
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> T {
        debug_assert!(
            from.get() < self.num_nodes && to.get() < self.num_nodes,
            "called `LeastResourceTable::get` with node index out of bounds: the len is {} but the indices are {} and {}",
            self.num_nodes,
            from.get(),
            to.get()
        );
        self.values[from.get() * self.num_nodes + to.get()]
    }
}

/// The pruned instance handed to the label-setting search.
#[derive(Debug, Clone)]
pub struct Preprocessed<N, T> {
    graph: DiGraph<N, T>,
    original: Vec<NodeIndex>,
    source: NodeIndex,
    target: NodeIndex,
    least: Vec<LeastResourceTable<T>>,
}

impl<N, T> Preprocessed<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    /// The reduced graph.
    #[inline]
    pub fn graph(&self) -> &DiGraph<N, T> {
        &self.graph
    }

    /// Source in the reduced graph.
    #[inline]
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Target in the reduced graph.
    #[inline]
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Maps a reduced node back to its index in the input graph.
    #[inline]
    pub fn original_index(&self, node: NodeIndex) -> NodeIndex {
        self.original[node.get()]
    }

    /// Least consumption of resource `resource` from `from` to `to`.
    #[inline]
    pub fn least(&self, resource: usize, from: NodeIndex, to: NodeIndex) -> T {
        self.least[resource].get(from, to)
    }

    /// Returns `true` if `to` is reachable from `from` and `consumed +
    /// least(from -> to)` stays within `budget` for every resource.
    #[inline]
    pub fn can_reach(&self, consumed: &[T], from: NodeIndex, to: NodeIndex, budget: &[T]) -> bool {
        self.least
            .iter()
            .zip(consumed.iter().zip(budget))
            .all(|(table, (&used, &limit))| {
                let least = table.get(from, to);
                least.is_finite() && used + least <= limit
            })
    }
}

/// Reduces `graph` to the nodes usable by a `source -> target` path within
/// `budget` and builds the least consumption tables.
///
/// # Errors
///
/// `EspprcError::Infeasible` if source or target is pruned.
pub fn preprocess<N, T>(
    graph: &DiGraph<N, T>,
    source: NodeIndex,
    target: NodeIndex,
    budget: &[T],
) -> Result<Preprocessed<N, T>, EspprcError>
where
    N: NodeKey,
    T: SolverFloat,
{
    let mut keep = FixedBitSet::with_capacity(graph.num_nodes());
    keep.insert_range(..);

    let mut retain_reachable = |limit: T, weight: &dyn Fn(&Edge<T>) -> T| {
        let forward = dijkstra(graph, source, Direction::Forward, limit, weight);
        let backward = dijkstra(graph, target, Direction::Backward, limit, weight);
        for node in graph.node_indices() {
            if forward[node.get()].is_infinite() || backward[node.get()].is_infinite() {
                keep.set(node.get(), false);
            }
        }
    };
    if budget.is_empty() {
        retain_reachable(T::infinity(), &|_: &Edge<T>| T::zero());
    }
    for (resource, &limit) in budget.iter().enumerate() {
        retain_reachable(limit, &|edge: &Edge<T>| edge.resource_cost()[resource]);
    }

    if !keep.contains(source.get()) || !keep.contains(target.get()) {
        return Err(EspprcError::Infeasible(format!(
            "{:?} cannot reach {:?} within the budget {:?}",
            graph.node(source),
            graph.node(target),
            budget
        )));
    }

    let original: Vec<NodeIndex> = keep.ones().map(NodeIndex::new).collect();
    let reduced = graph.induced_subgraph(|node| keep.contains(node.get()));
    let position = |node: NodeIndex| original.iter().position(|&kept| kept == node);
    let (Some(source), Some(target)) = (position(source), position(target)) else {
        return Err(EspprcError::Infeasible(
            "source or target missing from the reduced graph".to_string(),
        ));
    };

    debug!(
        "preprocessing kept {} of {} nodes and {} of {} edges",
        reduced.num_nodes(),
        graph.num_nodes(),
        reduced.num_edges(),
        graph.num_edges()
    );

    let least = (0..graph.num_resources())
        .map(|resource| LeastResourceTable::compute(&reduced, resource))
        .collect();

    Ok(Preprocessed {
        graph: reduced,
        original,
        source: NodeIndex::new(source),
        target: NodeIndex::new(target),
        least,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use elempath_model::graph::GraphBuilder;

    /// s -> a -> t costs 0.6 of the single resource, s -> b alone costs 1.2,
    /// c is only reachable from s and d only reaches t.
    fn instance() -> DiGraph<&'static str, f64> {
        let mut builder = GraphBuilder::new(1);
        for (u, v, r) in [
            ("s", "a", 0.3),
            ("a", "t", 0.3),
            ("s", "b", 1.2),
            ("b", "t", 0.2),
            ("s", "c", 0.1),
            ("d", "t", 0.1),
        ] {
            builder.add_edge(u, v, 1.0, [r]).unwrap();
        }
        builder.build()
    }

    fn idx(graph: &DiGraph<&'static str, f64>, key: &'static str) -> NodeIndex {
        graph.index_of(&key).unwrap()
    }

    #[test]
    fn test_dijkstra_forward_and_backward() {
        let graph = instance();
        let forward = dijkstra(&graph, idx(&graph, "s"), Direction::Forward, f64::INFINITY, &|e: &Edge<f64>| {
            e.resource_cost()[0]
        });
        assert_eq!(forward[idx(&graph, "t").get()], 0.6);
        assert!(forward[idx(&graph, "d").get()].is_infinite());

        let backward = dijkstra(&graph, idx(&graph, "t"), Direction::Backward, f64::INFINITY, &|e: &Edge<f64>| {
            e.resource_cost()[0]
        });
        assert_eq!(backward[idx(&graph, "d").get()], 0.1);
        assert!(backward[idx(&graph, "c").get()].is_infinite());
    }

    #[test]
    fn test_dijkstra_respects_cutoff() {
        let graph = instance();
        let distances = dijkstra(&graph, idx(&graph, "s"), Direction::Forward, 0.5, &|e: &Edge<f64>| {
            e.resource_cost()[0]
        });
        assert_eq!(distances[idx(&graph, "a").get()], 0.3);
        assert!(distances[idx(&graph, "b").get()].is_infinite());
        assert!(distances[idx(&graph, "t").get()].is_infinite());
    }

    #[test]
    fn test_preprocess_prunes_dead_ends_and_expensive_detours() {
        let graph = instance();
        let pre = preprocess(&graph, idx(&graph, "s"), idx(&graph, "t"), &[1.0]).unwrap();

        let kept: Vec<&str> = pre.graph().nodes().to_vec();
        // b is over budget, c never reaches t, d is never reached.
        assert_eq!(kept, vec!["s", "a", "t"]);
        assert_eq!(pre.graph().node(pre.source()), &"s");
        assert_eq!(pre.graph().node(pre.target()), &"t");
        assert_eq!(pre.original_index(pre.target()), idx(&graph, "t"));
        assert!((pre.least(0, pre.source(), pre.target()) - 0.6).abs() < 1e-12);
        assert!(pre.least(0, pre.target(), pre.source()).is_infinite());
    }

    #[test]
    fn test_can_reach_uses_the_tables() {
        let graph = instance();
        let pre = preprocess(&graph, idx(&graph, "s"), idx(&graph, "t"), &[1.0]).unwrap();
        let a = pre.graph().index_of(&"a").unwrap();
        assert!(pre.can_reach(&[0.7], a, pre.target(), &[1.0]));
        assert!(!pre.can_reach(&[0.75], a, pre.target(), &[1.0]));
        assert!(!pre.can_reach(&[0.0], pre.target(), a, &[1.0]));
        assert!(!pre.can_reach(&[0.0], pre.target(), a, &[f64::INFINITY]));
    }

    #[test]
    fn test_preprocess_reports_infeasible_target() {
        let graph = instance();
        let err = preprocess(&graph, idx(&graph, "s"), idx(&graph, "t"), &[0.5]).unwrap_err();
        assert!(matches!(err, EspprcError::Infeasible(_)));
    }
}
