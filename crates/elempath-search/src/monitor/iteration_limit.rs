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


use crate::{
    monitor::search_monitor::{Augmentation, ProblemSummary, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};

/// Stops the search once a fixed number of steps has been taken.
///
/// Steps are counted by the monitor itself, so the budget is independent of
/// any other monitor sharing the same engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimitMonitor {
    limit: u64,
    steps: u64,
}

impl IterationLimitMonitor {
    #[inline]
    pub fn new(limit: u64) -> Self {
        Self { limit, steps: 0 }
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl std::fmt::Display for IterationLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IterationLimitMonitor(limit: {})", self.limit)
    }
}

impl SearchMonitor for IterationLimitMonitor {
    fn name(&self) -> &str {
        "IterationLimitMonitor"
    }

    fn on_enter_search(&mut self, _problem: &ProblemSummary) {
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self, _statistics: &SearchStatistics) {
        self.steps = self.steps.saturating_add(1);
    }

    fn on_augment(&mut self, _augmentation: &Augmentation<'_>, _statistics: &SearchStatistics) {}

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

    #[inline(always)]
    fn search_command(&self, _statistics: &SearchStatistics) -> SearchCommand {
        if self.steps >= self.limit {
            return SearchCommand::Terminate(format!("iteration limit of {} reached", self.limit));
        }
        SearchCommand::Continue
    }
}
