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


//! # Ranked Store
//!
//! The per-node label store of the resource-free engine: up to `K` paths,
//! cheapest first. The capacity is owned by the `CapacityTable` and passed in
//! on every insertion, so growing a node's capacity never touches its store.
//!
//! Insertion rules:
//! - a path already present (same node sequence) is rejected, whatever its
//!   cost;
//! - otherwise the candidate goes to the first rank `i < K` whose incumbent
//!   cost is not below the candidate's (an unused rank counts as `+inf`), so
//!   equal-cost candidates are placed in front of older entries;
//! - everything pushed beyond rank `K - 1` is dropped.

use elempath_core::num::float::SolverFloat;
use elempath_model::{index::NodeIndex, path::Path};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedStore<T> {
    entries: Vec<(Path, T)>,
}

impl<T> Default for RankedStore<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> RankedStore<T>
where
    T: SolverFloat,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding only `path` at `cost`.
    #[inline]
    pub fn with_entry(path: Path, cost: T) -> Self {
        Self {
            entries: vec![(path, cost)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if every one of the `capacity` ranks holds a path.
    #[inline]
    pub fn is_saturated(&self, capacity: usize) -> bool {
        self.entries.len() >= capacity
    }

    /// Returns the cheapest path and its cost.
    #[inline]
    pub fn best(&self) -> Option<(&Path, T)> {
        self.entries.first().map(|(path, cost)| (path, *cost))
    }

    /// Returns the cost of the cheapest path, or `+inf` when empty.
    #[inline]
    pub fn cheapest_cost(&self) -> T {
        self.entries
            .first()
            .map_or_else(T::infinity, |(_, cost)| *cost)
    }

    #[inline]
    pub fn entries(&self) -> &[(Path, T)] {
        &self.entries
    }

    #[inline]
    pub fn into_entries(self) -> Vec<(Path, T)> {
        self.entries
    }

    /// Returns `true` if `path` is stored.
    #[inline]
    pub fn contains_path(&self, path: &Path) -> bool {
        self.entries.iter().any(|(stored, _)| stored == path)
    }

    /// Returns `true` if every stored path visits `node`. An empty store
    /// trivially satisfies this.
    #[inline]
    pub fn all_visit(&self, node: NodeIndex) -> bool {
        self.entries.iter().all(|(path, _)| path.contains(node))
    }

    /// Tries to store `path` at `cost` and returns the rank it was placed at.
    pub fn try_insert(&mut self, path: Path, cost: T, capacity: usize) -> Option<usize> {
        if self.contains_path(&path) {
            return None;
        }

        let rank = self
            .entries
            .iter()
            .take(capacity)
            .position(|(_, incumbent)| cost <= *incumbent)
            .or_else(|| (self.entries.len() < capacity).then_some(self.entries.len()))?;

        self.entries.insert(rank, (path, cost));
        self.entries.truncate(capacity);
        Some(rank)
    }
}
