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

use crate::error::EspprcError;
use elempath_core::num::float::SolverFloat;
use elempath_model::graph::ResourceVec;

/// Options of the resource-constrained engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EspprcConfig<T> {
    budget: ResourceVec<T>,
    strong_dominance: bool,
    max_augmentations: Option<u64>,
}

impl<T> EspprcConfig<T>
where
    T: SolverFloat,
{
    /// Returns a builder for the given per-resource budget.
    #[inline]
    pub fn builder<I>(budget: I) -> EspprcConfigBuilder<T>
    where
        I: IntoIterator<Item = T>,
    {
        EspprcConfigBuilder::new(budget)
    }

    /// Upper bound on the total consumption of every resource.
    #[inline]
    pub fn budget(&self) -> &[T] {
        &self.budget
    }

    /// Whether visitation bits of watched nodes that can no longer be
    /// reached within budget are set early.
    #[inline]
    pub fn strong_dominance(&self) -> bool {
        self.strong_dominance
    }

    #[inline]
    pub fn max_augmentations(&self) -> Option<u64> {
        self.max_augmentations
    }
}

impl<T> std::fmt::Display for EspprcConfig<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EspprcConfig(budget: {:?}, strong_dominance: {}, max_augmentations: {:?})",
            self.budget.as_slice(),
            self.strong_dominance,
            self.max_augmentations
        )
    }
}

/// Builder for `EspprcConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct EspprcConfigBuilder<T> {
    config: EspprcConfig<T>,
}

impl<T> EspprcConfigBuilder<T>
where
    T: SolverFloat,
{
    #[inline]
    pub fn new<I>(budget: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            config: EspprcConfig {
                budget: budget.into_iter().collect(),
                strong_dominance: true,
                max_augmentations: None,
            },
        }
    }

    #[inline]
    pub fn strong_dominance(mut self, yes: bool) -> Self {
        self.config.strong_dominance = yes;
        self
    }

    /// Stops with `TerminationReason::IterationLimit` after this many
    /// watched nodes have been added.
    #[inline]
    pub fn max_augmentations(mut self, max_augmentations: u64) -> Self {
        self.config.max_augmentations = Some(max_augmentations);
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// `EspprcError::NegativeBudget` if a component is negative or NaN.
    pub fn build(self) -> Result<EspprcConfig<T>, EspprcError> {
        if let Some((component, value)) = self
            .config
            .budget
            .iter()
            .enumerate()
            .find(|(_, value)| value.is_nan() || **value < T::zero())
        {
            return Err(EspprcError::NegativeBudget {
                component,
                value: value.to_string(),
            });
        }
        Ok(self.config)
    }
}
