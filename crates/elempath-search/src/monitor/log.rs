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


//! # Log Monitor
//!
//! Emits progress lines through the `log` facade at `info` level: one line
//! when the search starts, one per augmentation, periodic lines while the
//! inner passes run, and a summary at the end. Periodic lines are rate
//! limited by a bitmask over the step counter (the clock is only read when
//! `steps & clock_check_mask == 0`) and by a minimum wall-clock interval.

use crate::{
    monitor::search_monitor::{Augmentation, ProblemSummary, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use log::info;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    lines_logged: u64,
}

impl LogMonitor {
    /// Reads the clock every 4096 steps.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 4095;

    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            lines_logged: 0,
        }
    }

    /// Number of periodic progress lines written so far.
    #[inline]
    pub fn lines_logged(&self) -> u64 {
        self.lines_logged
    }

    #[inline(always)]
    fn log_line(&mut self, stats: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        info!(
            "{:>8.1}s | steps {:<12} | labels {:<10} | rejected {:<10} | evicted {:<10} | augmentations {}",
            elapsed,
            stats.steps,
            stats.labels_inserted,
            stats.labels_rejected,
            stats.labels_evicted,
            stats.augmentations
        );
        self.last_log_time = now;
        self.lines_logged += 1;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Self::DEFAULT_CLOCK_CHECK_MASK)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, problem: &ProblemSummary) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.lines_logged = 0;
        info!("starting search on {}", problem);
    }

    fn on_step(&mut self, stats: &SearchStatistics) {
        if (stats.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(stats);
        }
    }

    fn on_augment(&mut self, augmentation: &Augmentation<'_>, stats: &SearchStatistics) {
        info!(
            "augmentation {}: {} (after {} steps)",
            stats.augmentations, augmentation, stats.steps
        );
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        info!(
            "search finished after {:.2?}: {} steps, {} labels stored, {} augmentations",
            self.start_time.elapsed(),
            stats.steps,
            stats.labels_inserted,
            stats.augmentations
        );
    }

    fn search_command(&self, _stats: &SearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_only_on_mask_and_interval() {
        let mut monitor = LogMonitor::new(Duration::ZERO, 0x3);
        monitor.on_enter_search(&ProblemSummary {
            engine: "ESPP",
            num_nodes: 1,
            num_edges: 0,
            num_resources: 0,
        });

        let mut stats = SearchStatistics::default();
        for _ in 0..8 {
            stats.on_step();
            monitor.on_step(&stats);
        }
        // steps 4 and 8 pass the mask
        assert_eq!(monitor.lines_logged(), 2);
    }

    #[test]
    fn test_long_interval_suppresses_lines() {
        let mut monitor = LogMonitor::new(Duration::from_secs(3600), 0);
        let mut stats = SearchStatistics::default();
        for _ in 0..16 {
            stats.on_step();
            monitor.on_step(&stats);
        }
        assert_eq!(monitor.lines_logged(), 0);
        assert_eq!(
            monitor.search_command(&stats),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_display() {
        let monitor = LogMonitor::new(Duration::from_secs(2), 255);
        assert_eq!(
            monitor.to_string(),
            "LogMonitor(log_interval: 2s, clock_check_mask: 255)"
        );
    }
}
