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


//! # Engine Front End
//!
//! `Solver` resolves node keys, assembles the monitor stack configured on
//! its builder (wall-clock limit, step limit, periodic progress logging) and
//! hands the instance to the matching engine.
//!
//! ## Usage
//!
//! ```rust
//! use elempath::solver::Solver;
//! use elempath_espp::config::EsppConfig;
//! use elempath_model::graph::GraphBuilder;
//! use std::time::Duration;
//!
//! let mut builder = GraphBuilder::new(0);
//! builder.add_edge("s", "a", 1.0, []).unwrap();
//! builder.add_edge("a", "b", -2.0, []).unwrap();
//! builder.add_edge("b", "a", -2.0, []).unwrap();
//! let graph = builder.build();
//!
//! let solver = Solver::builder()
//!     .with_time_limit(Duration::from_secs(5))
//!     .build();
//! let outcome = solver.espp(&graph, &"s", EsppConfig::default()).unwrap();
//! let b = graph.index_of(&"b").unwrap();
//! assert_eq!(outcome.best_cost(b), Some(-1.0));
//! ```

use elempath_core::num::float::SolverFloat;
use elempath_espp::{config::EsppConfig, error::EsppError, result::EsppOutcome, solver::EsppSolver};
use elempath_espprc::{
    config::EspprcConfig, error::EspprcError, result::EspprcOutcome, solver::EspprcSolver,
};
use elempath_model::{
    decouple::decouple_source,
    graph::{DiGraph, NodeKey},
    index::NodeIndex,
    path::Path,
};
use elempath_search::monitor::{
    composite::CompositeMonitor, iteration_limit::IterationLimitMonitor, log::LogMonitor,
    time_limit::TimeLimitMonitor,
};
use std::time::Duration;

/// Runs the engines under a common set of limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Solver {
    time_limit: Option<Duration>,
    step_limit: Option<u64>,
    progress_interval: Option<Duration>,
}

impl Solver {
    #[inline]
    pub fn builder() -> SolverBuilder {
        SolverBuilder::new()
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn step_limit(&self) -> Option<u64> {
        self.step_limit
    }

    #[inline]
    pub fn progress_interval(&self) -> Option<Duration> {
        self.progress_interval
    }

    fn monitors(&self) -> CompositeMonitor<'static> {
        let mut monitors = CompositeMonitor::with_capacity(3);
        if let Some(limit) = self.time_limit {
            monitors.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(limit) = self.step_limit {
            monitors.add_monitor(IterationLimitMonitor::new(limit));
        }
        if let Some(interval) = self.progress_interval {
            monitors.add_monitor(LogMonitor::new(interval, LogMonitor::DEFAULT_CLOCK_CHECK_MASK));
        }
        monitors
    }

    /// Runs the resource-free engine from `source`.
    ///
    /// # Errors
    ///
    /// `EsppError::UnknownNode` if `source` is not in the graph, plus the
    /// engine's own errors.
    pub fn espp<N, T>(
        &self,
        graph: &DiGraph<N, T>,
        source: &N,
        config: EsppConfig,
    ) -> Result<EsppOutcome<T>, EsppError>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        let source = graph
            .index_of(source)
            .ok_or_else(|| EsppError::UnknownNode(format!("{:?}", source)))?;
        EsppSolver::new(config).solve_with_monitor(graph, source, &mut self.monitors())
    }

    /// Runs the resource-constrained engine from `source` to `target`.
    ///
    /// # Errors
    ///
    /// `EspprcError::UnknownNode` if a key is not in the graph, plus the
    /// engine's own errors.
    pub fn espprc<N, T>(
        &self,
        graph: &DiGraph<N, T>,
        source: &N,
        target: &N,
        config: EspprcConfig<T>,
    ) -> Result<EspprcOutcome<T>, EspprcError>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        let source = lookup(graph, source)?;
        let target = lookup(graph, target)?;
        EspprcSolver::new(config).solve_with_monitor(graph, source, target, &mut self.monitors())
    }

    /// Searches the cheapest elementary cycle through `source` within
    /// budget. The in-edges of `source` are moved onto the new node
    /// `source_in` of a copy of the graph, which then serves as target.
    ///
    /// # Errors
    ///
    /// `EspprcError::Infeasible` if `source` has no in-edges, `Model` if
    /// `source_in` already exists, plus the errors of `espprc`.
    pub fn espprc_cycle<N, T>(
        &self,
        graph: &DiGraph<N, T>,
        source: &N,
        source_in: N,
        config: EspprcConfig<T>,
    ) -> Result<CycleSearch<N, T>, EspprcError>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        let original_source = lookup(graph, source)?;
        let mut builder = graph.to_builder();
        let moved = decouple_source(&mut builder, source, source_in.clone())?;
        if moved == 0 {
            return Err(EspprcError::Infeasible(format!(
                "{:?} has no incoming edges, so no cycle passes through it",
                source
            )));
        }
        let decoupled = builder.build();
        let outcome = self.espprc(&decoupled, source, &source_in, config)?;

        let cycle = match outcome.path() {
            Some(path) => {
                let mut nodes = Vec::with_capacity(path.len());
                for &node in path.nodes() {
                    let key = decoupled.node(node);
                    let mapped = if *key == source_in {
                        original_source
                    } else {
                        lookup(graph, key)?
                    };
                    nodes.push(mapped);
                }
                Some(Path::from_nodes(nodes))
            }
            None => None,
        };

        Ok(CycleSearch {
            graph: decoupled,
            outcome,
            cycle,
        })
    }
}

fn lookup<N, T>(graph: &DiGraph<N, T>, key: &N) -> Result<NodeIndex, EspprcError>
where
    N: NodeKey,
    T: SolverFloat,
{
    graph
        .index_of(key)
        .ok_or_else(|| EspprcError::UnknownNode(format!("{:?}", key)))
}

/// Result of `Solver::espprc_cycle`.
#[derive(Debug, Clone)]
pub struct CycleSearch<N, T> {
    graph: DiGraph<N, T>,
    outcome: EspprcOutcome<T>,
    cycle: Option<Path>,
}

impl<N, T> CycleSearch<N, T>
where
    N: NodeKey,
    T: SolverFloat,
{
    /// The decoupled graph the engine ran on.
    #[inline]
    pub fn decoupled_graph(&self) -> &DiGraph<N, T> {
        &self.graph
    }

    /// The engine outcome, in indices of the decoupled graph.
    #[inline]
    pub fn outcome(&self) -> &EspprcOutcome<T> {
        &self.outcome
    }

    /// The cycle in indices of the input graph; it starts and ends at the
    /// source.
    #[inline]
    pub fn cycle(&self) -> Option<&Path> {
        self.cycle.as_ref()
    }

    #[inline]
    pub fn cost(&self) -> Option<T> {
        self.outcome.cost()
    }
}

/// Builder for `Solver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverBuilder {
    solver: Solver,
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops a run once `limit` of wall-clock time has passed.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.solver.time_limit = Some(limit);
        self
    }

    /// Stops a run after `limit` label expansions.
    #[inline]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.solver.step_limit = Some(limit);
        self
    }

    /// Logs a progress line at most once per `interval`.
    #[inline]
    pub fn with_progress_log(mut self, interval: Duration) -> Self {
        self.solver.progress_interval = Some(interval);
        self
    }

    #[inline]
    pub fn build(self) -> Solver {
        self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elempath_model::loading::GraphLoader;
    use elempath_search::result::TerminationReason;

    const SCENARIO_A: &str = "\
2
0 1  2  0.1 0.2
0 2 -4  0.1 0.2
1 2 -7  0.1 0.2
1 4  5  0.1 0.3
2 3  3  0.1 0.2
3 1  1  0.1 0.2
2 5 -2  0.1 0.2
5 6  2  0.1 0.2
5 4 -2  0.1 0.2
4 2  3  0.1 0.2
4 6  3  0.1 0.3
";

    fn key(s: &str) -> String {
        s.to_string()
    }

    fn keys(graph: &DiGraph<String, f64>, path: &Path) -> Vec<String> {
        path.keys(graph)
    }

    fn scenario_a() -> DiGraph<String, f64> {
        GraphLoader::new().from_str(SCENARIO_A).unwrap()
    }

    #[test]
    fn test_builder() {
        let solver = Solver::builder()
            .with_time_limit(Duration::from_secs(3))
            .with_step_limit(10)
            .with_progress_log(Duration::from_millis(500))
            .build();
        assert_eq!(solver.time_limit(), Some(Duration::from_secs(3)));
        assert_eq!(solver.step_limit(), Some(10));
        assert_eq!(solver.progress_interval(), Some(Duration::from_millis(500)));
        assert_eq!(solver.monitors().len(), 3);
        assert!(Solver::default().monitors().is_empty());
    }

    #[test]
    fn test_espp_by_key() {
        let graph = scenario_a();
        let outcome = Solver::default()
            .espp(&graph, &key("0"), EsppConfig::default())
            .unwrap();
        let six = graph.index_of(&key("6")).unwrap();
        let (path, cost) = outcome.best(six).unwrap();
        assert_eq!(cost, -6.0);
        assert_eq!(keys(&graph, path), vec!["0", "1", "2", "5", "4", "6"]);
    }

    #[test]
    fn test_step_limit_aborts_espp() {
        let graph = scenario_a();
        let outcome = Solver::builder()
            .with_step_limit(4)
            .build()
            .espp(&graph, &key("0"), EsppConfig::default())
            .unwrap();
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        assert_eq!(outcome.statistics().steps, 4);
    }

    #[test]
    fn test_unknown_keys() {
        let graph = scenario_a();
        let solver = Solver::default();
        assert_eq!(
            solver
                .espp(&graph, &key("x"), EsppConfig::default())
                .unwrap_err(),
            EsppError::UnknownNode("\"x\"".to_string())
        );
        let config = EspprcConfig::builder([1.0, 1.0]).build().unwrap();
        assert_eq!(
            solver.espprc(&graph, &key("0"), &key("x"), config).unwrap_err(),
            EspprcError::UnknownNode("\"x\"".to_string())
        );
    }

    #[test]
    fn test_espprc_by_key() {
        let graph = scenario_a();
        let config = EspprcConfig::builder([10.0, 10.0]).build().unwrap();
        let outcome = Solver::default()
            .espprc(&graph, &key("0"), &key("6"), config)
            .unwrap();
        assert_eq!(outcome.cost(), Some(-6.0));
        assert_eq!(
            keys(&graph, outcome.path().unwrap()),
            vec!["0", "1", "2", "5", "4", "6"]
        );
    }

    #[test]
    fn test_cycle_through_source() {
        let mut text = SCENARIO_A.to_string();
        text.push_str("6 0 -1  0.1 0.2\n1 0 -2  0.1 0.2\n");
        let graph: DiGraph<String, f64> = GraphLoader::new().from_str(&text).unwrap();

        let config = EspprcConfig::builder([1.0, 1.0]).build().unwrap();
        let search = Solver::default()
            .espprc_cycle(&graph, &key("0"), key("source_in"), config)
            .unwrap();

        assert_eq!(search.cost(), Some(-6.0));
        let cycle = search.cycle().unwrap();
        assert_eq!(keys(&graph, cycle), vec!["0", "1", "2", "5", "6", "0"]);
        assert_eq!(cycle.cost(&graph), Some(-6.0));
        let decoupled = search.decoupled_graph();
        assert_eq!(decoupled.in_degree(decoupled.index_of(&key("0")).unwrap()), 0);
        // The input graph is left as it was.
        assert_eq!(graph.in_degree(graph.index_of(&key("0")).unwrap()), 2);
    }

    #[test]
    fn test_cycle_needs_source_in_edges() {
        let graph = scenario_a();
        let config = EspprcConfig::builder([1.0, 1.0]).build().unwrap();
        assert!(matches!(
            Solver::default().espprc_cycle(&graph, &key("0"), key("source_in"), config),
            Err(EspprcError::Infeasible(_))
        ));
    }
}
