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


//! # Truncated Labelling Pass
//!
//! One inner pass of the dynamic-K labelling. Nodes are taken from a FIFO
//! queue of dirty nodes; every retained path of the popped node `u` that
//! does not visit `v` is extended along `u -> v` into the store of `v`, and
//! `v` becomes dirty when anything was stored.
//!
//! Before extending, the pass looks for an unavoidable negative cycle: `u`
//! is saturated (all `K[u]` ranks used), every retained path of `u` already
//! visits `v`, and closing the cycle would undercut the cheapest path known
//! at `v`. The cycle witness is the suffix of `u`'s cheapest path starting at
//! `v`. The pass then stops with `u` back at the front of the queue, so that
//! the outer loop can grow capacities and resume exactly where it left off.
//!
//! All stored paths are elementary: an extension into a node already on the
//! path is never attempted.

use crate::{capacity::CapacityTable, error::EsppError, queue::DirtyQueue, store::RankedStore};
use elempath_core::num::float::SolverFloat;
use elempath_model::{
    graph::{DiGraph, NodeKey},
    index::NodeIndex,
    path::Path,
};
use elempath_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use log::{debug, trace};

/// How an inner pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassEnd {
    /// The queue ran empty.
    Quiescent,
    /// A cycle witness was found while expanding `at`.
    Witness { at: NodeIndex, cycle: Vec<NodeIndex> },
    /// A monitor asked to stop.
    Aborted(String),
}

/// Mutable state carried across the passes of one engine run.
#[derive(Debug, Clone)]
pub struct LabellingState<T> {
    stores: Vec<RankedStore<T>>,
    capacities: CapacityTable,
    queue: DirtyQueue,
}

impl<T> LabellingState<T>
where
    T: SolverFloat,
{
    /// Creates the initial state: the source holds its singleton path at
    /// cost zero and is the only dirty node.
    pub fn new(num_nodes: usize, source: NodeIndex, min_capacity: usize) -> Self {
        let mut stores: Vec<RankedStore<T>> = (0..num_nodes).map(|_| RankedStore::new()).collect();
        stores[source.get()] = RankedStore::with_entry(Path::singleton(source), T::zero());
        let mut queue = DirtyQueue::new(num_nodes);
        queue.push_back(source);
        Self {
            stores,
            capacities: CapacityTable::new(num_nodes, min_capacity),
            queue,
        }
    }

    #[inline]
    pub fn store(&self, node: NodeIndex) -> &RankedStore<T> {
        &self.stores[node.get()]
    }

    #[inline]
    pub fn capacities(&self) -> &CapacityTable {
        &self.capacities
    }

    #[inline]
    pub fn queue(&self) -> &DirtyQueue {
        &self.queue
    }

    /// Adds one rank to each witness node and marks the nodes that may now
    /// produce new paths as dirty: the witness nodes themselves and every
    /// predecessor of a witness node that already holds a path. The queue
    /// left over from the aborted pass is kept in front.
    pub fn grow_and_requeue<N>(&mut self, graph: &DiGraph<N, T>, witness: &[NodeIndex])
    where
        N: NodeKey,
    {
        for &node in witness {
            let capacity = self.capacities.grow(node);
            debug!("capacity of {} grown to {}", node, capacity);
        }
        for &node in witness {
            self.queue.push_back(node);
        }
        for &node in witness {
            for predecessor in graph.predecessors(node) {
                if !self.stores[predecessor.get()].is_empty() {
                    self.queue.push_back(predecessor);
                }
            }
        }
    }

    /// Consumes the state, returning the stores and the capacities.
    pub fn into_parts(self) -> (Vec<RankedStore<T>>, CapacityTable) {
        (self.stores, self.capacities)
    }
}

/// Per-pass options taken from the engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    pub source: NodeIndex,
    pub max_path_len: Option<usize>,
    pub retry_on_cycle: bool,
}

/// Runs one truncated labelling pass until the queue is empty, a witness is
/// found or the monitor stops the search.
///
/// # Errors
///
/// `EsppError::SourceHasInEdge` if an edge leads back into the source.
pub fn truncated_pass<N, T, M>(
    graph: &DiGraph<N, T>,
    state: &mut LabellingState<T>,
    options: &PassOptions,
    stats: &mut SearchStatistics,
    monitor: &mut M,
) -> Result<PassEnd, EsppError>
where
    N: NodeKey,
    T: SolverFloat,
    M: SearchMonitor + ?Sized,
{
    let mut retry_marker: Option<NodeIndex> = None;

    'nodes: while let Some(u) = state.queue.pop_front() {
        stats.on_step();
        monitor.on_step(stats);
        if let SearchCommand::Terminate(reason) = monitor.search_command(stats) {
            state.queue.push_front(u);
            return Ok(PassEnd::Aborted(reason));
        }

        // Stores of other nodes change below; `u`'s own store cannot, since
        // every path at `u` visits `u`.
        let retained: Vec<(Path, T)> = state.stores[u.get()].entries().to_vec();
        let saturated = retained.len() >= state.capacities.get(u);

        for edge in graph.successors(u) {
            let v = edge.target();
            if v == options.source {
                return Err(EsppError::SourceHasInEdge {
                    source_node: format!("{:?}", graph.node(v)),
                    in_degree: graph.in_degree(v),
                });
            }

            if saturated
                && retained.iter().all(|(path, _)| path.contains(v))
                && let Some((best_path, best_cost)) = retained.first()
                && *best_cost + edge.weight() < state.stores[v.get()].cheapest_cost()
            {
                let cycle = best_path.cycle_from(v).unwrap_or_default().to_vec();

                if options.retry_on_cycle && retry_marker != Some(u) {
                    trace!("cycle through {} at {}, retrying later", v, u);
                    retry_marker.get_or_insert(u);
                    state.queue.push_back(u);
                    continue 'nodes;
                }

                debug!(
                    "unavoidable negative cycle at {} -> {}: witness of {} node(s)",
                    u,
                    v,
                    cycle.len()
                );
                state.queue.push_front(u);
                return Ok(PassEnd::Witness { at: u, cycle });
            }

            let capacity = state.capacities.get(v);
            let target = &mut state.stores[v.get()];
            for (path, cost) in &retained {
                if path.contains(v) {
                    continue;
                }
                stats.on_extension();
                if options.max_path_len.is_some_and(|max| path.len() >= max) {
                    stats.on_label_rejected();
                    continue;
                }

                let before = target.len();
                match target.try_insert(path.extended(v), *cost + edge.weight(), capacity) {
                    Some(rank) => {
                        trace!("stored path to {} at rank {} with cost {}", v, rank, *cost + edge.weight());
                        stats.on_label_inserted();
                        stats.on_labels_evicted(before + 1 - target.len());
                        retry_marker = None;
                        state.queue.push_back(v);
                    }
                    None => stats.on_label_rejected(),
                }
            }
        }
    }

    Ok(PassEnd::Quiescent)
}
