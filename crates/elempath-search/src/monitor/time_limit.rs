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


//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget. The clock is only read when
//! `(steps & clock_check_mask) == 0`; the default mask (`0x3FFF`) checks
//! roughly every 16,384 steps. Augmentations always check the clock, since
//! they are rare and each one restarts a potentially long inner pass.

use crate::{
    monitor::search_monitor::{Augmentation, ProblemSummary, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: Duration,
    start_time: Instant,
    expired: bool,
}

impl TimeLimitMonitor {
    /// Default mask: Check every 16,384 steps (2^14).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: Instant::now(),
            expired: false,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _problem: &ProblemSummary) {
        self.start_time = Instant::now();
        self.steps = 0;
        self.expired = false;
    }

    #[inline(always)]
    fn on_step(&mut self, _statistics: &SearchStatistics) {
        self.steps = self.steps.wrapping_add(1);
    }

    fn on_augment(&mut self, _augmentation: &Augmentation<'_>, _statistics: &SearchStatistics) {
        self.expired |= self.start_time.elapsed() >= self.time_limit;
    }

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

    #[inline(always)]
    fn search_command(&self, _statistics: &SearchStatistics) -> SearchCommand {
        if self.expired
            || ((self.steps & self.clock_check_mask) == 0
                && self.start_time.elapsed() >= self.time_limit)
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_monitor_with_limit(ms: u64) -> TimeLimitMonitor {
        TimeLimitMonitor::new(Duration::from_millis(ms))
    }

    #[test]
    fn test_default_mask() {
        assert_eq!(TimeLimitMonitor::DEFAULT_STEP_CLOCK_CHECK_MASK, 0x3FFF);
        assert_eq!(new_monitor_with_limit(10).clock_check_mask, 0x3FFF);
    }

    #[test]
    fn test_terminates_after_time_limit_when_mask_condition_met() {
        let mut mon = new_monitor_with_limit(10);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 0;
        match mon.search_command(&SearchStatistics::default()) {
            SearchCommand::Terminate(msg) => {
                assert!(msg.contains("time limit"), "unexpected message: {msg}");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_continues_when_mask_condition_not_met_even_if_time_exceeded() {
        let mut mon = new_monitor_with_limit(1);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 1;
        assert_eq!(
            mon.search_command(&SearchStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_augmentation_forces_a_clock_check() {
        let mut mon = new_monitor_with_limit(1);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 1;
        let stats = SearchStatistics::default();
        mon.on_augment(&Augmentation::CapacityGrowth { witness: &[] }, &stats);
        assert!(matches!(
            mon.search_command(&stats),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_enter_search_resets_state() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_secs(3600), 0);
        mon.steps = 17;
        mon.expired = true;
        mon.on_enter_search(&ProblemSummary {
            engine: "ESPP",
            num_nodes: 0,
            num_edges: 0,
            num_resources: 0,
        });
        assert_eq!(mon.steps, 0);
        assert_eq!(
            mon.search_command(&SearchStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_on_step_wraps() {
        let mut mon = new_monitor_with_limit(1000);
        mon.steps = u64::MAX;
        mon.on_step(&SearchStatistics::default());
        assert_eq!(mon.steps, 0);
    }
}
