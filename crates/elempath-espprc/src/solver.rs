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


//! # State-Space Augmentation Solver
//!
//! The outer loop of the resource-constrained engine. The graph is
//! preprocessed once; then label-setting sweeps run with a growing set of
//! watched nodes. Whenever the best target path repeats a node, the node
//! repeated most often (the earliest one on ties) is watched and the sweep is
//! repeated. Once the best path is elementary it is optimal among the
//! elementary paths within budget.

use crate::{
    config::EspprcConfig,
    error::EspprcError,
    label_setting::{SweepBest, SweepEnd, SweepOptions, label_setting_sweep},
    preprocess::{Preprocessed, preprocess},
    result::EspprcOutcome,
};
use elempath_core::num::float::SolverFloat;
use elempath_model::{
    graph::{DiGraph, NodeKey},
    index::NodeIndex,
    path::Path,
};
use elempath_search::{
    monitor::{
        no_op::NoOperationMonitor,
        search_monitor::{Augmentation, ProblemSummary, SearchCommand, SearchMonitor},
    },
    result::TerminationReason,
    stats::SearchStatistics,
};
use log::debug;

/// Resource-constrained elementary shortest path solver.
#[derive(Debug, Clone, PartialEq)]
pub struct EspprcSolver<T> {
    config: EspprcConfig<T>,
}

impl<T> EspprcSolver<T>
where
    T: SolverFloat,
{
    #[inline]
    pub fn new(config: EspprcConfig<T>) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EspprcConfig<T> {
        &self.config
    }

    /// Computes the cheapest elementary `source -> target` path within the
    /// configured budget.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes, `source == target`, a source with incoming
    /// edges, a budget of the wrong length, or when no path fits the budget.
    #[inline]
    pub fn solve<N>(
        &self,
        graph: &DiGraph<N, T>,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<EspprcOutcome<T>, EspprcError>
    where
        N: NodeKey,
    {
        self.solve_with_monitor(graph, source, target, &mut NoOperationMonitor::new())
    }

    /// Like `solve`, reporting progress to `monitor` and stopping when it
    /// requests termination.
    pub fn solve_with_monitor<N, M>(
        &self,
        graph: &DiGraph<N, T>,
        source: NodeIndex,
        target: NodeIndex,
        monitor: &mut M,
    ) -> Result<EspprcOutcome<T>, EspprcError>
    where
        N: NodeKey,
        M: SearchMonitor + ?Sized,
    {
        for node in [source, target] {
            if node.get() >= graph.num_nodes() {
                return Err(EspprcError::UnknownNode(node.to_string()));
            }
        }
        if source == target {
            return Err(EspprcError::SourceEqualsTarget(format!(
                "{:?}",
                graph.node(source)
            )));
        }
        let in_degree = graph.in_degree(source);
        if in_degree > 0 {
            return Err(EspprcError::SourceHasInEdge {
                source_node: format!("{:?}", graph.node(source)),
                in_degree,
            });
        }
        if self.config.budget().len() != graph.num_resources() {
            return Err(EspprcError::BudgetDimensionMismatch {
                expected: graph.num_resources(),
                found: self.config.budget().len(),
            });
        }

        let instance = preprocess(graph, source, target, self.config.budget())?;
        EspprcSearchSession::new(instance, &self.config, monitor).run()
    }
}

/// The node to watch next: the one repeated most often on `path`, the
/// earliest on ties, or `None` if the path is elementary.
fn most_repeated_node(path: &Path) -> Option<NodeIndex> {
    let mut best: Option<(NodeIndex, usize)> = None;
    for (node, count) in path.multiplicities() {
        if best.is_none_or(|(_, most)| count > most) {
            best = Some((node, count));
        }
    }
    best.filter(|&(_, count)| count > 1).map(|(node, _)| node)
}

/// State of a single engine run.
struct EspprcSearchSession<'a, N, T, M>
where
    M: ?Sized,
{
    instance: Preprocessed<N, T>,
    config: &'a EspprcConfig<T>,
    monitor: &'a mut M,
    watched: Vec<NodeIndex>,
    stats: SearchStatistics,
    start_time: std::time::Instant,
}

impl<'a, N, T, M> EspprcSearchSession<'a, N, T, M>
where
    N: NodeKey,
    T: SolverFloat,
    M: SearchMonitor + ?Sized,
{
    fn new(instance: Preprocessed<N, T>, config: &'a EspprcConfig<T>, monitor: &'a mut M) -> Self {
        Self {
            instance,
            config,
            monitor,
            watched: Vec::new(),
            stats: SearchStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> Result<EspprcOutcome<T>, EspprcError> {
        let graph = self.instance.graph();
        self.monitor.on_enter_search(&ProblemSummary {
            engine: "ESPPRC",
            num_nodes: graph.num_nodes(),
            num_edges: graph.num_edges(),
            num_resources: graph.num_resources(),
        });

        let mut best: Option<SweepBest<T>> = None;
        let termination_reason = loop {
            self.stats.on_pass();
            let options = SweepOptions {
                budget: self.config.budget(),
                watched: &self.watched,
                strong_dominance: self.config.strong_dominance(),
            };
            let end = label_setting_sweep(
                &self.instance,
                &options,
                &mut self.stats,
                &mut *self.monitor,
            )?;

            let found = match end {
                SweepEnd::Aborted(reason) => break TerminationReason::Aborted(reason),
                SweepEnd::Completed(None) => {
                    return Err(EspprcError::Infeasible(format!(
                        "no label reached {:?}",
                        self.instance.graph().node(self.instance.target())
                    )));
                }
                SweepEnd::Completed(Some(found)) => found,
            };

            let repeated = most_repeated_node(&found.path);
            best = Some(found);
            let Some(node) = repeated else {
                break TerminationReason::Converged;
            };

            if let Some(limit) = self.config.max_augmentations() {
                if self.stats.augmentations >= limit {
                    debug!("augmentation limit of {} reached", limit);
                    break TerminationReason::IterationLimit(limit);
                }
            }

            let original = self.instance.original_index(node);
            debug!(
                "sweep {} repeats {:?}; watching it from now on",
                self.stats.passes,
                self.instance.graph().node(node)
            );
            self.watched.push(node);
            self.stats.on_augmentation();
            self.monitor
                .on_augment(&Augmentation::WatchNode(original), &self.stats);

            if let SearchCommand::Terminate(reason) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(reason);
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        Ok(self.finalize(best, termination_reason))
    }

    fn finalize(
        self,
        best: Option<SweepBest<T>>,
        termination_reason: TerminationReason,
    ) -> EspprcOutcome<T> {
        let to_original = |node: &NodeIndex| self.instance.original_index(*node);
        let best = best.map(|SweepBest { path, label }| {
            let nodes = path.nodes().iter().map(to_original).collect();
            (Path::from_nodes(nodes), label)
        });
        let watched = self.watched.iter().map(to_original).collect();
        EspprcOutcome::new(best, watched, termination_reason, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elempath_model::{decouple::decouple_source, graph::GraphBuilder};
    use elempath_search::monitor::iteration_limit::IterationLimitMonitor;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const SCENARIO_A: [(&str, &str, f64, [f64; 2]); 11] = [
        ("0", "1", 2.0, [0.1, 0.2]),
        ("0", "2", -4.0, [0.1, 0.2]),
        ("1", "2", -7.0, [0.1, 0.2]),
        ("1", "4", 5.0, [0.1, 0.3]),
        ("2", "3", 3.0, [0.1, 0.2]),
        ("3", "1", 1.0, [0.1, 0.2]),
        ("2", "5", -2.0, [0.1, 0.2]),
        ("5", "6", 2.0, [0.1, 0.2]),
        ("5", "4", -2.0, [0.1, 0.2]),
        ("4", "2", 3.0, [0.1, 0.2]),
        ("4", "6", 3.0, [0.1, 0.3]),
    ];

    fn scenario_a_builder() -> GraphBuilder<&'static str, f64> {
        let mut builder = GraphBuilder::new(2);
        for (u, v, w, r) in SCENARIO_A {
            builder.add_edge(u, v, w, r).unwrap();
        }
        builder
    }

    fn idx(graph: &DiGraph<&'static str, f64>, key: &'static str) -> NodeIndex {
        graph.index_of(&key).unwrap()
    }

    fn solve_a(budget: [f64; 2]) -> (DiGraph<&'static str, f64>, EspprcOutcome<f64>) {
        let graph = scenario_a_builder().build();
        let config = EspprcConfig::builder(budget).build().unwrap();
        let outcome = EspprcSolver::new(config)
            .solve(&graph, idx(&graph, "0"), idx(&graph, "6"))
            .unwrap();
        (graph, outcome)
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_decoupled_source_cycle_within_unit_budget() {
        let mut builder = scenario_a_builder();
        builder.add_edge("6", "0", -1.0, [0.1, 0.2]).unwrap();
        builder.add_edge("1", "0", -2.0, [0.1, 0.2]).unwrap();
        assert_eq!(decouple_source(&mut builder, &"0", "source_in").unwrap(), 2);
        let graph = builder.build();

        let config = EspprcConfig::builder([1.0, 1.0]).build().unwrap();
        let outcome = EspprcSolver::new(config)
            .solve(&graph, idx(&graph, "0"), idx(&graph, "source_in"))
            .unwrap();

        assert!(outcome.is_converged());
        let path = outcome.path().unwrap();
        assert_eq!(path.keys(&graph), vec!["0", "1", "2", "5", "6", "source_in"]);
        assert_eq!(outcome.cost(), Some(-6.0));
        assert_close(outcome.resource_consumption().unwrap(), &[0.5, 1.0]);
        assert!(outcome.watched_nodes().is_empty());
        assert_eq!(path.cost(&graph), outcome.cost());
    }

    #[test]
    fn test_single_edge() {
        let mut builder = GraphBuilder::new(1);
        builder.add_edge(0, 1, 3.0, [0.0]).unwrap();
        let graph = builder.build();
        let config = EspprcConfig::builder([1.0]).build().unwrap();
        let outcome = EspprcSolver::new(config)
            .solve(&graph, NodeIndex::new(0), NodeIndex::new(1))
            .unwrap();

        assert_eq!(outcome.path().unwrap().keys(&graph), vec![0, 1]);
        assert_eq!(outcome.cost(), Some(3.0));
        assert_eq!(outcome.resource_consumption(), Some(&[0.0][..]));
        assert_eq!(outcome.statistics().augmentations, 0);
        assert_eq!(outcome.statistics().passes, 1);
    }

    #[test]
    fn test_unit_budget_needs_no_augmentation() {
        let (graph, outcome) = solve_a([1.0, 1.0]);
        assert_eq!(outcome.path().unwrap().keys(&graph), vec!["0", "1", "2", "5", "6"]);
        assert_eq!(outcome.cost(), Some(-5.0));
        assert_close(outcome.resource_consumption().unwrap(), &[0.4, 0.8]);
        assert!(outcome.watched_nodes().is_empty());
    }

    #[test]
    fn test_tight_budget() {
        let (graph, outcome) = solve_a([0.5, 1.0]);
        assert_eq!(outcome.path().unwrap().keys(&graph), vec!["0", "1", "2", "5", "6"]);
        assert_eq!(outcome.cost(), Some(-5.0));
    }

    #[test]
    fn test_loose_budget_watches_cycle_nodes() {
        let (graph, outcome) = solve_a([10.0, 10.0]);

        assert!(outcome.is_converged());
        assert!(outcome.is_elementary());
        assert_eq!(
            outcome.path().unwrap().keys(&graph),
            vec!["0", "1", "2", "5", "4", "6"]
        );
        assert_eq!(outcome.cost(), Some(-6.0));
        assert_close(outcome.resource_consumption().unwrap(), &[0.5, 1.1]);
        assert_eq!(outcome.label().unwrap().visits(), &[1, 1]);

        let watched: Vec<&str> = outcome
            .watched_nodes()
            .iter()
            .map(|&n| *graph.node(n))
            .collect();
        assert_eq!(watched, vec!["1", "2"]);
        assert_eq!(outcome.statistics().augmentations, 2);
        assert_eq!(outcome.statistics().passes, 3);
    }

    #[test]
    fn test_augmentation_limit_keeps_last_path() {
        let graph = scenario_a_builder().build();
        let config = EspprcConfig::builder([10.0, 10.0])
            .max_augmentations(1)
            .build()
            .unwrap();
        let outcome = EspprcSolver::new(config)
            .solve(&graph, idx(&graph, "0"), idx(&graph, "6"))
            .unwrap();

        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::IterationLimit(1)
        );
        assert!(!outcome.is_elementary());
        assert_eq!(outcome.cost(), Some(-22.0));
        assert_eq!(outcome.watched_nodes(), &[idx(&graph, "1")]);
    }

    #[test]
    fn test_monitor_abort_keeps_no_path_when_first_sweep_stops() {
        let graph = scenario_a_builder().build();
        let config = EspprcConfig::builder([1.0, 1.0]).build().unwrap();
        let outcome = EspprcSolver::new(config)
            .solve_with_monitor(
                &graph,
                idx(&graph, "0"),
                idx(&graph, "6"),
                &mut IterationLimitMonitor::new(1),
            )
            .unwrap();
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        assert!(outcome.path().is_none());
        assert!(outcome.cost().is_none());
    }

    #[test]
    fn test_precondition_errors() {
        let graph = scenario_a_builder().build();
        let solver = EspprcSolver::new(EspprcConfig::builder([1.0, 1.0]).build().unwrap());

        assert!(matches!(
            solver.solve(&graph, idx(&graph, "0"), NodeIndex::new(99)),
            Err(EspprcError::UnknownNode(_))
        ));
        assert!(matches!(
            solver.solve(&graph, idx(&graph, "0"), idx(&graph, "0")),
            Err(EspprcError::SourceEqualsTarget(_))
        ));
        assert_eq!(
            solver.solve(&graph, idx(&graph, "2"), idx(&graph, "6")).unwrap_err(),
            EspprcError::SourceHasInEdge {
                source_node: "\"2\"".to_string(),
                in_degree: 3
            }
        );

        let one_dim = EspprcSolver::new(EspprcConfig::builder([1.0]).build().unwrap());
        assert_eq!(
            one_dim.solve(&graph, idx(&graph, "0"), idx(&graph, "6")).unwrap_err(),
            EspprcError::BudgetDimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_budget_too_small_is_infeasible() {
        let graph = scenario_a_builder().build();
        let solver = EspprcSolver::new(EspprcConfig::builder([0.25, 0.25]).build().unwrap());
        assert!(matches!(
            solver.solve(&graph, idx(&graph, "0"), idx(&graph, "6")),
            Err(EspprcError::Infeasible(_))
        ));
    }

    #[test]
    fn test_most_repeated_node_prefers_earliest_on_ties() {
        let n = NodeIndex::new;
        let path = Path::from_nodes(vec![n(0), n(1), n(2), n(1), n(2), n(3)]);
        assert_eq!(most_repeated_node(&path), Some(n(1)));
        let path = Path::from_nodes(vec![n(0), n(2), n(1), n(2), n(3)]);
        assert_eq!(most_repeated_node(&path), Some(n(2)));
        assert_eq!(most_repeated_node(&Path::from_nodes(vec![n(0), n(1)])), None);
    }

    fn random_graph(rng: &mut StdRng, num_nodes: usize) -> DiGraph<usize, f64> {
        let mut builder = GraphBuilder::new(2);
        for node in 0..num_nodes {
            builder.add_node(node);
        }
        for u in 0..num_nodes {
            for v in 1..num_nodes {
                if u != v && rng.random_bool(0.45) {
                    let weight = rng.random_range(-5.0..4.0);
                    let resources = [rng.random_range(0.05..0.4), rng.random_range(0.05..0.4)];
                    builder.add_edge(u, v, weight, resources).unwrap();
                }
            }
        }
        builder.build()
    }

    /// Cheapest elementary path within budget by exhaustive search.
    fn brute_force(
        graph: &DiGraph<usize, f64>,
        path: &mut Vec<NodeIndex>,
        cost: f64,
        used: [f64; 2],
        target: NodeIndex,
        budget: [f64; 2],
        best: &mut Option<f64>,
    ) {
        let Some(&tail) = path.last() else {
            return;
        };
        if tail == target {
            if best.is_none_or(|b| cost < b) {
                *best = Some(cost);
            }
            return;
        }
        for edge in graph.successors(tail) {
            let head = edge.target();
            let next = [used[0] + edge.resource_cost()[0], used[1] + edge.resource_cost()[1]];
            if path.contains(&head) || next[0] > budget[0] || next[1] > budget[1] {
                continue;
            }
            path.push(head);
            brute_force(graph, path, cost + edge.weight(), next, target, budget, best);
            path.pop();
        }
    }

    #[test]
    fn test_random_instances_match_exhaustive_search() {
        let mut rng = StdRng::seed_from_u64(11);
        let budget = [0.9, 0.9];
        let solver = EspprcSolver::new(EspprcConfig::builder(budget).build().unwrap());

        for _ in 0..30 {
            let graph = random_graph(&mut rng, 7);
            let source = NodeIndex::new(0);
            let target = NodeIndex::new(6);

            let mut expected = None;
            brute_force(&graph, &mut vec![source], 0.0, [0.0, 0.0], target, budget, &mut expected);

            match solver.solve(&graph, source, target) {
                Ok(outcome) => {
                    assert!(outcome.is_converged());
                    let path = outcome.path().unwrap();
                    assert!(path.is_elementary());
                    assert!(path.is_valid_in(&graph));
                    assert_eq!(path.first(), source);
                    assert_eq!(path.last(), target);

                    let cost = outcome.cost().unwrap();
                    assert!((path.cost(&graph).unwrap() - cost).abs() < 1e-9);
                    let consumed = path.resource_consumption(&graph).unwrap();
                    assert!(consumed.iter().zip(budget).all(|(&c, b)| c <= b + 1e-9));

                    let expected = expected.expect("solver found a path the search missed");
                    assert!((cost - expected).abs() < 1e-9, "{cost} != {expected}");
                }
                Err(EspprcError::Infeasible(_)) => assert!(expected.is_none()),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_strong_dominance_does_not_change_the_optimum() {
        let mut rng = StdRng::seed_from_u64(5);
        let budget = [1.2, 1.2];
        let strong = EspprcSolver::new(EspprcConfig::builder(budget).build().unwrap());
        let plain = EspprcSolver::new(
            EspprcConfig::builder(budget)
                .strong_dominance(false)
                .build()
                .unwrap(),
        );

        for _ in 0..20 {
            let graph = random_graph(&mut rng, 6);
            let (source, target) = (NodeIndex::new(0), NodeIndex::new(5));
            match (strong.solve(&graph, source, target), plain.solve(&graph, source, target)) {
                (Ok(a), Ok(b)) => {
                    let (a, b) = (a.cost().unwrap(), b.cost().unwrap());
                    assert!((a - b).abs() < 1e-9, "{a} != {b}");
                }
                (Err(a), Err(b)) => assert_eq!(a, b),
                (a, b) => panic!("strong and plain disagree: {a:?} vs {b:?}"),
            }
        }
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let mut rng = StdRng::seed_from_u64(2024);
        let graph = random_graph(&mut rng, 8);
        let solver = EspprcSolver::new(EspprcConfig::builder([1.0, 1.0]).build().unwrap());
        let first = solver.solve(&graph, NodeIndex::new(0), NodeIndex::new(7));
        let second = solver.solve(&graph, NodeIndex::new(0), NodeIndex::new(7));
        match (first, second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.path(), b.path());
                assert_eq!(a.label(), b.label());
                assert_eq!(a.watched_nodes(), b.watched_nodes());
            }
            (Err(a), Err(b)) => assert_eq!(a, b),
            (a, b) => panic!("runs disagree: {a:?} vs {b:?}"),
        }
    }
}
