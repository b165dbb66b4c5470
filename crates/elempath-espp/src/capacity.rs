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

/// Per-node capacities (`K`) of the resource-free engine.
///
/// Capacities only ever grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    capacities: Vec<usize>,
}

impl CapacityTable {
    /// Creates a table with `num_nodes` entries set to `initial`.
    #[inline]
    pub fn new(num_nodes: usize, initial: usize) -> Self {
        debug_assert!(initial > 0, "called `CapacityTable::new` with zero capacity");
        Self {
            capacities: vec![initial; num_nodes],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.capacities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }

    #[inline]
    pub fn get(&self, node: NodeIndex) -> usize {
        let index = node.get();
        debug_assert!(
            index < self.capacities.len(),
            "called `CapacityTable::get` with node index out of bounds: the len is {} but the index is {}",
            self.capacities.len(),
            index
        );
        self.capacities[index]
    }

    /// Adds one rank to `node` and returns the new capacity.
    #[inline]
    pub fn grow(&mut self, node: NodeIndex) -> usize {
        let index = node.get();
        debug_assert!(
            index < self.capacities.len(),
            "called `CapacityTable::grow` with node index out of bounds: the len is {} but the index is {}",
            self.capacities.len(),
            index
        );
        self.capacities[index] += 1;
        self.capacities[index]
    }

    /// Returns the first node of `nodes` that cannot grow without exceeding
    /// `ceiling`.
    #[inline]
    pub fn first_at_ceiling(&self, nodes: &[NodeIndex], ceiling: usize) -> Option<NodeIndex> {
        nodes.iter().copied().find(|&node| self.get(node) >= ceiling)
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.capacities
    }

    #[inline]
    pub fn into_vec(self) -> Vec<usize> {
        self.capacities
    }
}
