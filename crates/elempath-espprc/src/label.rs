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


//! Labels of the resource-constrained search.
//!
//! A label is a partial path summary: its cost, the resources consumed so
//! far and one visit counter per watched node. A watched counter is also set
//! to one when the watched node can no longer be reached within the budget,
//! which lets more labels dominate each other.

use elempath_core::num::{
    float::SolverFloat,
    slice::{all_le, lex_cmp},
};
use elempath_model::graph::ResourceVec;
use smallvec::{SmallVec, smallvec};
use std::cmp::Ordering;

/// Visit counters, one per watched node.
pub type VisitVec = SmallVec<[u8; 8]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Label<T> {
    cost: T,
    resources: ResourceVec<T>,
    visits: VisitVec,
}

impl<T> Label<T>
where
    T: SolverFloat,
{
    /// The label of the trivial path at the source.
    pub fn root(num_resources: usize, num_watched: usize) -> Self {
        Self {
            cost: T::zero(),
            resources: smallvec![T::zero(); num_resources],
            visits: smallvec![0; num_watched],
        }
    }

    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    #[inline]
    pub fn resources(&self) -> &[T] {
        &self.resources
    }

    #[inline]
    pub fn visits(&self) -> &[u8] {
        &self.visits
    }

    /// Extends the label along an edge of weight `weight` consuming
    /// `consumption`. `watch_slot` is the counter of the head node, if the
    /// head is watched.
    pub fn extend(&self, weight: T, consumption: &[T], watch_slot: Option<usize>) -> Self {
        debug_assert_eq!(self.resources.len(), consumption.len());

        let resources = self
            .resources
            .iter()
            .zip(consumption)
            .map(|(&used, &step)| used + step)
            .collect();
        let mut visits = self.visits.clone();
        if let Some(slot) = watch_slot {
            visits[slot] = visits[slot].saturating_add(1);
        }
        Self {
            cost: self.cost + weight,
            resources,
            visits,
        }
    }

    /// Returns `true` if some watched node was visited more than once.
    #[inline]
    pub fn revisits_watched(&self) -> bool {
        self.visits.iter().any(|&count| count > 1)
    }

    /// Marks the watched node in `slot` as used.
    #[inline]
    pub fn close_watch_slot(&mut self, slot: usize) {
        self.visits[slot] = 1;
    }

    /// `self` dominates `other` if it is no worse in cost, resources and
    /// visits, and not identical to it.
    pub fn dominates(&self, other: &Self) -> bool {
        self.cost <= other.cost
            && all_le(&self.resources, &other.resources)
            && self.visits.iter().zip(&other.visits).all(|(a, b)| a <= b)
            && self != other
    }

    /// Processing order of labels: resources lexicographically, then visits.
    #[inline]
    pub fn order_key_cmp(&self, other: &Self) -> Ordering {
        lex_cmp(&self.resources, &other.resources).then_with(|| self.visits.cmp(&other.visits))
    }
}

impl<T> std::fmt::Display for Label<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Label(cost: {}, resources: {:?}, visits: {:?})",
            self.cost,
            self.resources.as_slice(),
            self.visits.as_slice()
        )
    }
}
