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


use crate::label::Label;
use elempath_core::num::float::SolverFloat;
use elempath_model::{index::NodeIndex, path::Path};
use elempath_search::{result::TerminationReason, stats::SearchStatistics};

/// Result of a resource-constrained run.
///
/// Paths and watched nodes are expressed in the indices of the input graph.
/// After a converged run the path is elementary and within budget. When the
/// augmentation limit stops the run, the last, possibly non-elementary, path
/// is kept; when a monitor stops it, the path of the last completed sweep is
/// kept, if any.
#[derive(Debug, Clone)]
pub struct EspprcOutcome<T> {
    path: Option<Path>,
    label: Option<Label<T>>,
    watched: Vec<NodeIndex>,
    termination_reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> EspprcOutcome<T>
where
    T: SolverFloat,
{
    #[inline]
    pub(crate) fn new(
        best: Option<(Path, Label<T>)>,
        watched: Vec<NodeIndex>,
        termination_reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        let (path, label) = best.unzip();
        Self {
            path,
            label,
            watched,
            termination_reason,
            statistics,
        }
    }

    /// The best path found from source to target.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// The label of `path`: cost, consumed resources and watched visits.
    #[inline]
    pub fn label(&self) -> Option<&Label<T>> {
        self.label.as_ref()
    }

    #[inline]
    pub fn cost(&self) -> Option<T> {
        self.label.as_ref().map(Label::cost)
    }

    /// Resources consumed along `path`.
    #[inline]
    pub fn resource_consumption(&self) -> Option<&[T]> {
        self.label.as_ref().map(Label::resources)
    }

    /// Nodes forced to be visited at most once, in the order they were
    /// added.
    #[inline]
    pub fn watched_nodes(&self) -> &[NodeIndex] {
        &self.watched
    }

    #[inline]
    pub fn is_elementary(&self) -> bool {
        self.path.as_ref().is_some_and(Path::is_elementary)
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

impl<T> std::fmt::Display for EspprcOutcome<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.path, &self.label) {
            (Some(path), Some(label)) => write!(
                f,
                "EspprcOutcome(path: {}, cost: {}, watched: {}, termination: {})",
                path,
                label.cost(),
                self.watched.len(),
                self.termination_reason
            ),
            _ => write!(
                f,
                "EspprcOutcome(no path, watched: {}, termination: {})",
                self.watched.len(),
                self.termination_reason
            ),
        }
    }
}
