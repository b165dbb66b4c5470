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


use std::time::Duration;

/// Counters collected during a labelling run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Work items taken from the pending set (nodes or labels).
    pub steps: u64,
    /// Candidate labels generated by extending along an edge.
    pub extensions: u64,
    /// Candidates that were stored.
    pub labels_inserted: u64,
    /// Candidates turned away (duplicate, dominated, infeasible, too long).
    pub labels_rejected: u64,
    /// Stored labels that were later dropped (truncated or dominated).
    pub labels_evicted: u64,
    /// Complete inner passes started.
    pub passes: u64,
    /// Outer-loop augmentations performed.
    pub augmentations: u64,
    /// Total time spent in the engine.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_extension(&mut self) {
        self.extensions = self.extensions.saturating_add(1);
    }

    #[inline]
    pub fn on_label_inserted(&mut self) {
        self.labels_inserted = self.labels_inserted.saturating_add(1);
    }

    #[inline]
    pub fn on_label_rejected(&mut self) {
        self.labels_rejected = self.labels_rejected.saturating_add(1);
    }

    #[inline]
    pub fn on_labels_evicted(&mut self, count: usize) {
        self.labels_evicted = self.labels_evicted.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_pass(&mut self) {
        self.passes = self.passes.saturating_add(1);
    }

    #[inline]
    pub fn on_augmentation(&mut self) {
        self.augmentations = self.augmentations.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Steps:            {}", self.steps)?;
        writeln!(f, "  Extensions:       {}", self.extensions)?;
        writeln!(f, "  Labels inserted:  {}", self.labels_inserted)?;
        writeln!(f, "  Labels rejected:  {}", self.labels_rejected)?;
        writeln!(f, "  Labels evicted:   {}", self.labels_evicted)?;
        writeln!(f, "  Passes:           {}", self.passes)?;
        writeln!(f, "  Augmentations:    {}", self.augmentations)?;
        writeln!(f, "  Total time:       {:.2?}", self.time_total)?;
        Ok(())
    }
}
