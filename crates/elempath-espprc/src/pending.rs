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


//! Pending labels, popped in order of their resource vectors.
//!
//! The heap keeps a copy of each label's order key next to its handle, so
//! ordering needs no access to the arena. Labels killed after being queued
//! are skipped by the caller when popped.

use crate::{arena::LabelHandle, label::Label};
use elempath_core::num::float::SolverFloat;
use std::{cmp::Ordering, collections::BinaryHeap};

#[derive(Debug, Clone)]
struct PendingEntry<T> {
    key: Label<T>,
    handle: LabelHandle,
}

impl<T: SolverFloat> PartialEq for PendingEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: SolverFloat> Eq for PendingEntry<T> {}

impl<T: SolverFloat> Ord for PendingEntry<T> {
    // Reversed: the smallest key, then the oldest handle, is on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .order_key_cmp(&self.key)
            .then_with(|| other.handle.cmp(&self.handle))
    }
}

impl<T: SolverFloat> PartialOrd for PendingEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct PendingQueue<T> {
    heap: BinaryHeap<PendingEntry<T>>,
}

impl<T> Default for PendingQueue<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingQueue<T>
where
    T: SolverFloat,
{
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, handle: LabelHandle, label: &Label<T>) {
        self.heap.push(PendingEntry {
            key: label.clone(),
            handle,
        });
    }

    pub fn pop(&mut self) -> Option<LabelHandle> {
        self.heap.pop().map(|entry| entry.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_smallest_resources_first() {
        let root = Label::<f64>::root(2, 0);
        let mut queue = PendingQueue::new();
        queue.push(LabelHandle::new(0), &root.extend(0.0, &[0.2, 0.0], None));
        queue.push(LabelHandle::new(1), &root.extend(0.0, &[0.1, 0.9], None));
        queue.push(LabelHandle::new(2), &root.extend(0.0, &[0.1, 0.5], None));
        assert_eq!(queue.len(), 3);

        let order: Vec<usize> = std::iter::from_fn(|| queue.pop()).map(|h| h.get()).collect();
        assert_eq!(order, vec![2, 1, 0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_pop_oldest_handle() {
        let root = Label::<f64>::root(1, 0);
        let mut queue = PendingQueue::new();
        for handle in [4, 1, 3] {
            queue.push(LabelHandle::new(handle), &root.extend(-1.0, &[0.5], None));
        }
        let order: Vec<usize> = std::iter::from_fn(|| queue.pop()).map(|h| h.get()).collect();
        assert_eq!(order, vec![1, 3, 4]);
    }
}
