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


use crate::stats::SearchStatistics;
use elempath_model::index::NodeIndex;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Shape of the instance handed to `SearchMonitor::on_enter_search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSummary {
    /// Short engine name, e.g. `"ESPP"`.
    pub engine: &'static str,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_resources: usize,
}

impl std::fmt::Display for ProblemSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(nodes: {}, edges: {}, resources: {})",
            self.engine, self.num_nodes, self.num_edges, self.num_resources
        )
    }
}

/// An outer-loop refinement performed by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Augmentation<'a> {
    /// The capacity of every node on the cycle witness grew by one.
    CapacityGrowth { witness: &'a [NodeIndex] },
    /// The node joined the set of nodes whose revisits are forbidden.
    WatchNode(NodeIndex),
}

impl std::fmt::Display for Augmentation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Augmentation::CapacityGrowth { witness } => {
                write!(f, "CapacityGrowth(witness: [")?;
                for (i, node) in witness.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", node.get())?;
                }
                write!(f, "])")
            }
            Augmentation::WatchNode(node) => write!(f, "WatchNode({})", node.get()),
        }
    }
}

pub trait SearchMonitor {
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, problem: &ProblemSummary);
    fn on_step(&mut self, statistics: &SearchStatistics);
    fn on_augment(&mut self, augmentation: &Augmentation<'_>, statistics: &SearchStatistics);
    fn on_exit_search(&mut self, statistics: &SearchStatistics);
    fn search_command(&self, statistics: &SearchStatistics) -> SearchCommand;
}

impl std::fmt::Debug for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
