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


//! # Dynamic-K Labelling Solver
//!
//! The outer loop of the resource-free engine. Each iteration runs a
//! truncated labelling pass; when the pass reports a cycle witness, the
//! capacity of every witness node grows by one and the pass resumes on the
//! labels computed so far. The run ends when a pass finishes without a
//! witness, or when a capacity/augmentation ceiling or a monitor stops it.
//!
//! For graphs where the reachable part is free of negative cycles the result
//! is exact for the capacities used. Otherwise it is best effort: a path
//! evicted from a bounded store before a cycle was detected is not
//! reconsidered later.

use crate::{
    config::EsppConfig,
    error::EsppError,
    labelling::{LabellingState, PassEnd, PassOptions, truncated_pass},
    result::EsppOutcome,
};
use elempath_core::num::float::SolverFloat;
use elempath_model::{
    graph::{DiGraph, NodeKey},
    index::NodeIndex,
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

/// Resource-free elementary shortest path solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EsppSolver {
    config: EsppConfig,
}

impl EsppSolver {
    #[inline]
    pub fn new(config: EsppConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EsppConfig {
        &self.config
    }

    /// Computes the best elementary paths from `source` to every node.
    ///
    /// # Errors
    ///
    /// Fails if `source` is not a node of `graph` or has incoming edges.
    #[inline]
    pub fn solve<N, T>(
        &self,
        graph: &DiGraph<N, T>,
        source: NodeIndex,
    ) -> Result<EsppOutcome<T>, EsppError>
    where
        N: NodeKey,
        T: SolverFloat,
    {
        self.solve_with_monitor(graph, source, &mut NoOperationMonitor::new())
    }

    /// Like `solve`, reporting progress to `monitor` and stopping when it
    /// requests termination.
    pub fn solve_with_monitor<N, T, M>(
        &self,
        graph: &DiGraph<N, T>,
        source: NodeIndex,
        monitor: &mut M,
    ) -> Result<EsppOutcome<T>, EsppError>
    where
        N: NodeKey,
        T: SolverFloat,
        M: SearchMonitor + ?Sized,
    {
        if source.get() >= graph.num_nodes() {
            return Err(EsppError::UnknownNode(source.to_string()));
        }
        let in_degree = graph.in_degree(source);
        if in_degree > 0 {
            return Err(EsppError::SourceHasInEdge {
                source_node: format!("{:?}", graph.node(source)),
                in_degree,
            });
        }

        EsppSearchSession::new(graph, source, &self.config, monitor).run()
    }
}

/// State of a single engine run.
struct EsppSearchSession<'a, N, T, M>
where
    M: ?Sized,
{
    graph: &'a DiGraph<N, T>,
    config: &'a EsppConfig,
    monitor: &'a mut M,
    options: PassOptions,
    state: LabellingState<T>,
    witnesses: Vec<Vec<NodeIndex>>,
    stats: SearchStatistics,
    start_time: std::time::Instant,
}

impl<'a, N, T, M> EsppSearchSession<'a, N, T, M>
where
    N: NodeKey,
    T: SolverFloat,
    M: SearchMonitor + ?Sized,
{
    fn new(
        graph: &'a DiGraph<N, T>,
        source: NodeIndex,
        config: &'a EsppConfig,
        monitor: &'a mut M,
    ) -> Self {
        Self {
            graph,
            config,
            monitor,
            options: PassOptions {
                source,
                max_path_len: config.max_path_len(),
                retry_on_cycle: config.retry_on_cycle(),
            },
            state: LabellingState::new(graph.num_nodes(), source, config.min_capacity()),
            witnesses: Vec::new(),
            stats: SearchStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> Result<EsppOutcome<T>, EsppError> {
        self.monitor.on_enter_search(&ProblemSummary {
            engine: "ESPP",
            num_nodes: self.graph.num_nodes(),
            num_edges: self.graph.num_edges(),
            num_resources: self.graph.num_resources(),
        });

        let termination_reason = loop {
            self.stats.on_pass();
            let end = truncated_pass(
                self.graph,
                &mut self.state,
                &self.options,
                &mut self.stats,
                &mut *self.monitor,
            )?;

            match end {
                PassEnd::Quiescent => break TerminationReason::Converged,
                PassEnd::Aborted(reason) => break TerminationReason::Aborted(reason),
                PassEnd::Witness { at, cycle } => {
                    debug!(
                        "pass {} found a cycle witness at {}: {:?}",
                        self.stats.passes, at, cycle
                    );
                    if let Some(reason) = self.augment(&cycle) {
                        self.witnesses.push(cycle);
                        break reason;
                    }
                    self.witnesses.push(cycle);

                    if let SearchCommand::Terminate(reason) =
                        self.monitor.search_command(&self.stats)
                    {
                        break TerminationReason::Aborted(reason);
                    }
                }
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        Ok(self.finalize(termination_reason))
    }

    /// Grows the capacities along `witness`, or returns the reason why that
    /// is not allowed.
    fn augment(&mut self, witness: &[NodeIndex]) -> Option<TerminationReason> {
        if let Some(limit) = self.config.max_augmentations() {
            if self.stats.augmentations >= limit {
                debug!("augmentation limit of {} reached", limit);
                return Some(TerminationReason::IterationLimit(limit));
            }
        }
        if let Some(ceiling) = self.config.max_capacity() {
            if let Some(node) = self.state.capacities().first_at_ceiling(witness, ceiling) {
                debug!("capacity of {} cannot grow beyond {}", node, ceiling);
                return Some(TerminationReason::CapacityExceeded {
                    node,
                    capacity: ceiling,
                });
            }
        }

        self.state.grow_and_requeue(self.graph, witness);
        self.stats.on_augmentation();
        self.monitor
            .on_augment(&Augmentation::CapacityGrowth { witness }, &self.stats);
        None
    }

    fn finalize(self, termination_reason: TerminationReason) -> EsppOutcome<T> {
        let (stores, capacities) = self.state.into_parts();
        let labels = stores.into_iter().map(|store| store.into_entries()).collect();
        EsppOutcome::new(
            labels,
            capacities.into_vec(),
            self.witnesses,
            termination_reason,
            self.stats,
        )
    }
}
