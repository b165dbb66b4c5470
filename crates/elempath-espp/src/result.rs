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


use elempath_core::num::float::SolverFloat;
use elempath_model::{index::NodeIndex, path::Path};
use elempath_search::{result::TerminationReason, stats::SearchStatistics};

/// Result of a resource-free labelling run.
///
/// Holds, per node, the retained paths cheapest first, together with the
/// final capacities and every cycle witness met along the way.
#[derive(Debug, Clone)]
pub struct EsppOutcome<T> {
    labels: Vec<Vec<(Path, T)>>,
    capacities: Vec<usize>,
    witnesses: Vec<Vec<NodeIndex>>,
    termination_reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> EsppOutcome<T>
where
    T: SolverFloat,
{
    #[inline]
    pub(crate) fn new(
        labels: Vec<Vec<(Path, T)>>,
        capacities: Vec<usize>,
        witnesses: Vec<Vec<NodeIndex>>,
        termination_reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            labels,
            capacities,
            witnesses,
            termination_reason,
            statistics,
        }
    }

    /// Returns the retained `(path, cost)` pairs of `node`, cheapest first.
    /// Unreached nodes have none.
    #[inline]
    pub fn paths(&self, node: NodeIndex) -> &[(Path, T)] {
        let index = node.get();
        debug_assert!(
            index < self.labels.len(),
            "called `EsppOutcome::paths` with node index out of bounds: the len is {} but the index is {}",
            self.labels.len(),
            index
        );
        &self.labels[index]
    }

    /// Returns the cheapest retained path of `node`.
    #[inline]
    pub fn best(&self, node: NodeIndex) -> Option<(&Path, T)> {
        self.paths(node).first().map(|(path, cost)| (path, *cost))
    }

    #[inline]
    pub fn best_cost(&self, node: NodeIndex) -> Option<T> {
        self.best(node).map(|(_, cost)| cost)
    }

    /// Returns `true` if at least one path to `node` was found.
    #[inline]
    pub fn is_reached(&self, node: NodeIndex) -> bool {
        !self.paths(node).is_empty()
    }

    /// Iterates over all nodes that hold at least one path.
    pub fn reached_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(index, _)| NodeIndex::new(index))
    }

    #[inline]
    pub fn capacity(&self, node: NodeIndex) -> usize {
        self.capacities[node.get()]
    }

    /// Final capacity of every node, indexed by node.
    #[inline]
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Cycle witnesses in the order they were found.
    #[inline]
    pub fn witnesses(&self) -> &[Vec<NodeIndex>] {
        &self.witnesses
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.termination_reason.is_converged()
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

impl<T> std::fmt::Display for EsppOutcome<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EsppOutcome(reached: {}, witnesses: {}, termination: {})",
            self.reached_nodes().count(),
            self.witnesses.len(),
            self.termination_reason
        )
    }
}
