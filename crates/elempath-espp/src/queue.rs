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
use fixedbitset::FixedBitSet;
use std::collections::VecDeque;

/// FIFO queue of dirty nodes. A node is queued at most once.
#[derive(Debug, Clone)]
pub struct DirtyQueue {
    queue: VecDeque<NodeIndex>,
    queued: FixedBitSet,
}

impl DirtyQueue {
    #[inline]
    pub fn new(num_nodes: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(num_nodes),
            queued: FixedBitSet::with_capacity(num_nodes),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.queued.contains(node.get())
    }

    /// Appends `node` unless it is already queued.
    #[inline]
    pub fn push_back(&mut self, node: NodeIndex) -> bool {
        if self.queued.put(node.get()) {
            return false;
        }
        self.queue.push_back(node);
        true
    }

    /// Prepends `node` unless it is already queued.
    #[inline]
    pub fn push_front(&mut self, node: NodeIndex) -> bool {
        if self.queued.put(node.get()) {
            return false;
        }
        self.queue.push_front(node);
        true
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<NodeIndex> {
        let node = self.queue.pop_front()?;
        self.queued.set(node.get(), false);
        Some(node)
    }

    /// Iterates over the queued nodes, front first.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.queue.iter().copied()
    }
}
