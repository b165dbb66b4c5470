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


//! # Label-Setting Sweep
//!
//! One run of the label-setting algorithm on a preprocessed instance with a
//! fixed set of watched nodes. Labels are expanded in lexicographic order of
//! their resource vectors. An extension is discarded when the remaining
//! least consumption to the target exceeds the budget, when it enters a
//! watched node a second time, or when a live label at the head dominates
//! it. Otherwise it evicts the labels it dominates and is queued.
//!
//! Only watched nodes are guaranteed to be visited at most once, so the
//! cheapest target label may describe a path with cycles. The outer loop
//! then watches more nodes and sweeps again.

use crate::{
    arena::LabelArena, error::EspprcError, label::Label, pending::PendingQueue,
    preprocess::Preprocessed,
};
use elempath_core::num::float::SolverFloat;
use elempath_model::{graph::NodeKey, index::NodeIndex, path::Path};
use elempath_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use log::trace;

/// The cheapest target label of a sweep and the path it describes, in the
/// indices of the preprocessed graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepBest<T> {
    pub path: Path,
    pub label: Label<T>,
}

/// How a sweep ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepEnd<T> {
    /// All labels were expanded. `None` if the target was never labelled.
    Completed(Option<SweepBest<T>>),
    /// A monitor asked to stop.
    Aborted(String),
}

/// Inputs of a sweep that do not change while it runs.
#[derive(Debug, Clone, Copy)]
pub struct SweepOptions<'a, T> {
    pub budget: &'a [T],
    /// Watched nodes, in the indices of the preprocessed graph.
    pub watched: &'a [NodeIndex],
    pub strong_dominance: bool,
}

/// Runs one label-setting sweep from the source of `instance`.
///
/// # Errors
///
/// `EspprcError::SourceHasInEdge` if an edge leads back into the source.
pub fn label_setting_sweep<N, T, M>(
    instance: &Preprocessed<N, T>,
    options: &SweepOptions<'_, T>,
    stats: &mut SearchStatistics,
    monitor: &mut M,
) -> Result<SweepEnd<T>, EspprcError>
where
    N: NodeKey,
    T: SolverFloat,
    M: SearchMonitor + ?Sized,
{
    let mut arena = LabelArena::new(instance.graph().num_nodes());
    if let Some(reason) = expand_labels(instance, options, &mut arena, stats, monitor)? {
        return Ok(SweepEnd::Aborted(reason));
    }

    let best = arena.cheapest_at(instance.target()).map(|handle| SweepBest {
        path: arena.path_to(handle),
        label: arena.label(handle).clone(),
    });
    Ok(SweepEnd::Completed(best))
}

/// Seeds `arena` with the root label and expands labels until none is
/// pending. Returns the reason if a monitor stopped the expansion.
///
/// # Errors
///
/// `EspprcError::SourceHasInEdge` if an edge leads back into the source.
pub fn expand_labels<N, T, M>(
    instance: &Preprocessed<N, T>,
    options: &SweepOptions<'_, T>,
    arena: &mut LabelArena<T>,
    stats: &mut SearchStatistics,
    monitor: &mut M,
) -> Result<Option<String>, EspprcError>
where
    N: NodeKey,
    T: SolverFloat,
    M: SearchMonitor + ?Sized,
{
    let graph = instance.graph();
    let source = instance.source();
    let target = instance.target();

    let mut watch_slot: Vec<Option<usize>> = vec![None; graph.num_nodes()];
    for (slot, node) in options.watched.iter().enumerate() {
        watch_slot[node.get()] = Some(slot);
    }

    let mut pending = PendingQueue::new();
    let root = Label::root(graph.num_resources(), options.watched.len());
    let (root_handle, _) = arena.insert_pruning(source, root, None);
    pending.push(root_handle, arena.label(root_handle));
    stats.on_label_inserted();

    while let Some(handle) = pending.pop() {
        if !arena.is_alive(handle) {
            continue;
        }

        stats.on_step();
        monitor.on_step(stats);
        if let SearchCommand::Terminate(reason) = monitor.search_command(stats) {
            return Ok(Some(reason));
        }

        let tail = arena.node(handle);
        for edge in graph.successors(tail) {
            let head = edge.target();
            if head == source {
                return Err(EspprcError::SourceHasInEdge {
                    source_node: format!("{:?}", graph.node(source)),
                    in_degree: graph.in_degree(source),
                });
            }
            stats.on_extension();

            let mut candidate =
                arena
                    .label(handle)
                    .extend(edge.weight(), edge.resource_cost(), watch_slot[head.get()]);

            if !instance.can_reach(candidate.resources(), head, target, options.budget)
                || candidate.revisits_watched()
                || arena.is_dominated(head, &candidate)
            {
                stats.on_label_rejected();
                continue;
            }

            if options.strong_dominance {
                for (slot, &watched) in options.watched.iter().enumerate() {
                    if candidate.visits()[slot] == 0
                        && !instance.can_reach(candidate.resources(), head, watched, options.budget)
                    {
                        candidate.close_watch_slot(slot);
                    }
                }
                // Closed slots can make the candidate dominated after all.
                if arena.is_dominated(head, &candidate) {
                    stats.on_label_rejected();
                    continue;
                }
            }

            let (new_handle, evicted) = arena.insert_pruning(head, candidate, Some(handle));
            stats.on_label_inserted();
            stats.on_labels_evicted(evicted);
            pending.push(new_handle, arena.label(new_handle));
            trace!("{} -> {}: {}", tail, head, arena.label(new_handle));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;
    use elempath_model::graph::{DiGraph, GraphBuilder};
    use elempath_search::monitor::{
        iteration_limit::IterationLimitMonitor, no_op::NoOperationMonitor,
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    /// s -> a -> t is cheap but heavy, s -> b -> t is dearer and light.
    fn two_routes() -> DiGraph<&'static str, f64> {
        let mut builder = GraphBuilder::new(1);
        for (u, v, w, r) in [
            ("s", "a", 1.0, 0.6),
            ("a", "t", 1.0, 0.3),
            ("s", "b", 2.0, 0.2),
            ("b", "t", 2.0, 0.2),
        ] {
            builder.add_edge(u, v, w, [r]).unwrap();
        }
        builder.build()
    }

    fn sweep(
        graph: &DiGraph<&'static str, f64>,
        budget: &[f64],
        watched: &[&'static str],
    ) -> (Option<SweepBest<f64>>, Preprocessed<&'static str, f64>) {
        let source = graph.index_of(&"s").unwrap();
        let target = graph.index_of(&"t").unwrap();
        let instance = preprocess(graph, source, target, budget).unwrap();
        let watched: Vec<NodeIndex> = watched
            .iter()
            .map(|key| instance.graph().index_of(key).unwrap())
            .collect();
        let options = SweepOptions {
            budget,
            watched: &watched,
            strong_dominance: true,
        };
        let end = label_setting_sweep(
            &instance,
            &options,
            &mut SearchStatistics::default(),
            &mut NoOperationMonitor::new(),
        )
        .unwrap();
        match end {
            SweepEnd::Completed(best) => (best, instance),
            SweepEnd::Aborted(reason) => panic!("unexpected abort: {reason}"),
        }
    }

    #[test]
    fn test_cheapest_route_within_budget() {
        let graph = two_routes();
        let (best, instance) = sweep(&graph, &[1.0], &[]);
        let best = best.unwrap();
        assert_eq!(best.path.keys(instance.graph()), vec!["s", "a", "t"]);
        assert_eq!(best.label.cost(), 2.0);
    }

    #[test]
    fn test_tight_budget_forces_light_route() {
        let graph = two_routes();
        let (best, instance) = sweep(&graph, &[0.5], &[]);
        let best = best.unwrap();
        assert_eq!(best.path.keys(instance.graph()), vec!["s", "b", "t"]);
        assert_eq!(best.label.cost(), 4.0);
        assert_eq!(best.label.resources(), &[0.4]);
    }

    /// A negative two-cycle between a and b, both leading to t.
    fn cycle_instance() -> DiGraph<&'static str, f64> {
        let mut builder = GraphBuilder::new(1);
        for (u, v, w, r) in [
            ("s", "a", 1.0, 0.1),
            ("a", "b", -3.0, 0.1),
            ("b", "a", -3.0, 0.1),
            ("a", "t", 1.0, 0.1),
            ("b", "t", 5.0, 0.1),
        ] {
            builder.add_edge(u, v, w, [r]).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_unwatched_cycle_is_taken_while_budget_allows() {
        let graph = cycle_instance();
        let (best, instance) = sweep(&graph, &[0.45], &[]);
        let best = best.unwrap();
        // s a b a t: four edges of 0.1 each, cost 1 - 3 - 3 + 1.
        assert_eq!(best.path.keys(instance.graph()), vec!["s", "a", "b", "a", "t"]);
        assert!(!best.path.is_elementary());
        assert_eq!(best.label.cost(), -4.0);
    }

    #[test]
    fn test_watching_a_node_forbids_the_cycle() {
        let graph = cycle_instance();
        let (best, instance) = sweep(&graph, &[0.45], &["a"]);
        let best = best.unwrap();
        // s a b t would cost 3, so the direct route wins.
        assert!(best.path.is_elementary());
        assert_eq!(best.path.keys(instance.graph()), vec!["s", "a", "t"]);
        assert_eq!(best.label.cost(), 2.0);
    }

    #[test]
    fn test_monitor_can_abort_a_sweep() {
        let graph = two_routes();
        let instance = preprocess(
            &graph,
            graph.index_of(&"s").unwrap(),
            graph.index_of(&"t").unwrap(),
            &[1.0],
        )
        .unwrap();
        let options = SweepOptions {
            budget: &[1.0],
            watched: &[],
            strong_dominance: false,
        };
        let mut stats = SearchStatistics::default();
        let end = label_setting_sweep(
            &instance,
            &options,
            &mut stats,
            &mut IterationLimitMonitor::new(2),
        )
        .unwrap();
        assert!(matches!(end, SweepEnd::Aborted(_)));
        assert_eq!(stats.steps, 2);
    }

    fn count_dominated_live_labels<N, T>(
        instance: &Preprocessed<N, T>,
        arena: &LabelArena<T>,
    ) -> usize
    where
        N: NodeKey,
        T: SolverFloat,
    {
        let mut count = 0;
        for node in instance.graph().node_indices() {
            let live = arena.live_labels(node);
            for &a in live {
                for &b in live {
                    if arena.label(a).dominates(arena.label(b)) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// n is watched. Via a, the label at h cannot come back to n within
    /// budget, so its slot is closed and the label from n dominates it.
    fn closing_instance() -> DiGraph<&'static str, f64> {
        let mut builder = GraphBuilder::new(1);
        for (u, v, w, r) in [
            ("s", "n", 2.0, 0.2),
            ("n", "h", 2.0, 0.3),
            ("s", "a", 2.0, 0.3),
            ("a", "h", 3.0, 0.3),
            ("a", "n", 1.0, 0.1),
            ("h", "n", 1.0, 0.45),
            ("h", "t", 1.0, 0.1),
        ] {
            builder.add_edge(u, v, w, [r]).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_closed_watch_slot_is_checked_for_dominance() {
        let graph = closing_instance();
        let instance = preprocess(
            &graph,
            graph.index_of(&"s").unwrap(),
            graph.index_of(&"t").unwrap(),
            &[1.0],
        )
        .unwrap();
        let watched = [instance.graph().index_of(&"n").unwrap()];
        let options = SweepOptions {
            budget: &[1.0],
            watched: &watched,
            strong_dominance: true,
        };
        let mut arena = LabelArena::new(instance.graph().num_nodes());
        let aborted = expand_labels(
            &instance,
            &options,
            &mut arena,
            &mut SearchStatistics::default(),
            &mut NoOperationMonitor::new(),
        )
        .unwrap();
        assert!(aborted.is_none());

        let h = instance.graph().index_of(&"h").unwrap();
        assert_eq!(arena.live_labels(h).len(), 1);
        let kept = arena.label(arena.live_labels(h)[0]);
        assert_eq!(kept.cost(), 4.0);
        assert_eq!(kept.resources(), &[0.5]);
        assert_eq!(count_dominated_live_labels(&instance, &arena), 0);

        let (best, instance) = sweep(&graph, &[1.0], &["n"]);
        let best = best.unwrap();
        assert_eq!(best.path.keys(instance.graph()), vec!["s", "n", "h", "t"]);
        assert_eq!(best.label.cost(), 5.0);
    }

    #[test]
    fn test_live_labels_never_dominate_each_other() {
        let mut rng = StdRng::seed_from_u64(31);
        let num_nodes = 6;
        let mut checked = 0;
        for _ in 0..40 {
            let mut builder = GraphBuilder::new(1);
            for node in 0..num_nodes {
                builder.add_node(node);
            }
            for u in 0..num_nodes {
                for v in 1..num_nodes {
                    if u != v && rng.random_bool(0.45) {
                        let weight = rng.random_range(-5.0..4.0);
                        let resource = rng.random_range(0.05..0.5);
                        builder.add_edge(u, v, weight, [resource]).unwrap();
                    }
                }
            }
            let graph = builder.build();
            let source = graph.index_of(&0).unwrap();
            let target = graph.index_of(&(num_nodes - 1)).unwrap();
            let Ok(instance) = preprocess(&graph, source, target, &[1.0]) else {
                continue;
            };
            let watched: Vec<NodeIndex> = instance
                .graph()
                .node_indices()
                .filter(|_| rng.random_bool(0.5))
                .collect();

            for strong_dominance in [true, false] {
                let options = SweepOptions {
                    budget: &[1.0],
                    watched: &watched,
                    strong_dominance,
                };
                let mut arena = LabelArena::new(instance.graph().num_nodes());
                expand_labels(
                    &instance,
                    &options,
                    &mut arena,
                    &mut SearchStatistics::default(),
                    &mut NoOperationMonitor::new(),
                )
                .unwrap();
                assert_eq!(count_dominated_live_labels(&instance, &arena), 0);
            }
            checked += 1;
        }
        assert!(checked > 0);
    }
}
