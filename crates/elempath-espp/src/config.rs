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


//! Engine options.

use crate::error::EsppError;

/// Options of the resource-free labelling engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EsppConfig {
    min_capacity: usize,
    max_path_len: Option<usize>,
    retry_on_cycle: bool,
    max_capacity: Option<usize>,
    max_augmentations: Option<u64>,
}

impl Default for EsppConfig {
    fn default() -> Self {
        Self {
            min_capacity: 1,
            max_path_len: None,
            retry_on_cycle: false,
            max_capacity: None,
            max_augmentations: None,
        }
    }
}

impl EsppConfig {
    /// Returns a builder starting from the default options.
    #[inline]
    pub fn builder() -> EsppConfigBuilder {
        EsppConfigBuilder::new()
    }

    /// Initial number of paths kept per node.
    #[inline]
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Longest admissible path, counted in nodes.
    #[inline]
    pub fn max_path_len(&self) -> Option<usize> {
        self.max_path_len
    }

    #[inline]
    pub fn retry_on_cycle(&self) -> bool {
        self.retry_on_cycle
    }

    /// Largest capacity any single node may grow to.
    #[inline]
    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    #[inline]
    pub fn max_augmentations(&self) -> Option<u64> {
        self.max_augmentations
    }
}

impl std::fmt::Display for EsppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EsppConfig(min_capacity: {}, max_path_len: {:?}, retry_on_cycle: {}, max_capacity: {:?}, max_augmentations: {:?})",
            self.min_capacity,
            self.max_path_len,
            self.retry_on_cycle,
            self.max_capacity,
            self.max_augmentations
        )
    }
}

/// Builder for `EsppConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EsppConfigBuilder {
    config: EsppConfig,
}

impl EsppConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity every node starts with. Must be at least one.
    #[inline]
    pub fn min_capacity(mut self, min_capacity: usize) -> Self {
        self.config.min_capacity = min_capacity;
        self
    }

    /// Candidate paths with more than `max_path_len` nodes are discarded.
    #[inline]
    pub fn max_path_len(mut self, max_path_len: usize) -> Self {
        self.config.max_path_len = Some(max_path_len);
        self
    }

    /// When a cycle witness is found at a node, put the node back at the end
    /// of the queue and keep propagating. The witness is only reported if the
    /// node comes up again without any label having been stored in between.
    #[inline]
    pub fn retry_on_cycle(mut self, yes: bool) -> Self {
        self.config.retry_on_cycle = yes;
        self
    }

    /// Stops with `TerminationReason::CapacityExceeded` instead of growing a
    /// capacity beyond `max_capacity`.
    #[inline]
    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.config.max_capacity = Some(max_capacity);
        self
    }

    /// Stops with `TerminationReason::IterationLimit` after this many
    /// capacity augmentations.
    #[inline]
    pub fn max_augmentations(mut self, max_augmentations: u64) -> Self {
        self.config.max_augmentations = Some(max_augmentations);
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// `EsppError::InvalidCapacity` if `min_capacity` is zero, if
    /// `max_capacity` is below `min_capacity`, or if `max_path_len` is zero.
    pub fn build(self) -> Result<EsppConfig, EsppError> {
        let config = self.config;
        if config.min_capacity == 0 {
            return Err(EsppError::InvalidCapacity(
                "min_capacity must be at least 1".to_string(),
            ));
        }
        if let Some(max) = config.max_capacity {
            if max < config.min_capacity {
                return Err(EsppError::InvalidCapacity(format!(
                    "max_capacity {} is below min_capacity {}",
                    max, config.min_capacity
                )));
            }
        }
        if config.max_path_len == Some(0) {
            return Err(EsppError::InvalidCapacity(
                "max_path_len must admit at least the source".to_string(),
            ));
        }
        Ok(config)
    }
}
