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


use elempath_model::index::NodeIndex;

/// Why a labelling run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// No further augmentation was necessary; the labels are final.
    Converged,
    /// Growing the capacity of `node` beyond `capacity` would have been
    /// required to continue.
    CapacityExceeded { node: NodeIndex, capacity: usize },
    /// The configured number of augmentations was reached.
    IterationLimit(u64),
    /// A monitor requested termination.
    /// The string contains the reason given by the monitor.
    Aborted(String),
}

impl TerminationReason {
    /// Returns `true` if the run finished without hitting any limit.
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, TerminationReason::Converged)
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Converged => write!(f, "Converged"),
            TerminationReason::CapacityExceeded { node, capacity } => {
                write!(f, "Capacity Exceeded: {} needs more than {}", node, capacity)
            }
            TerminationReason::IterationLimit(limit) => {
                write!(f, "Iteration Limit: {} augmentations", limit)
            }
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}
