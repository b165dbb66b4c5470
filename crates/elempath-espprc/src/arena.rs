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


//! # Label Arena
//!
//! Owns every label created during one label-setting sweep. Labels are never
//! moved or freed: a dominated label is only flagged dead, so handles held by
//! the pending queue and parent links stay valid. Each node keeps the list of
//! its live labels in creation order.

use crate::label::Label;
use elempath_core::{
    num::float::SolverFloat,
    utils::index::{TypedIndex, TypedIndexTag},
};
use elempath_model::{index::NodeIndex, path::Path};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LabelHandleTag;

impl TypedIndexTag for LabelHandleTag {
    const NAME: &'static str = "LabelHandle";
}

/// Position of a label in the arena.
pub type LabelHandle = TypedIndex<LabelHandleTag>;

#[derive(Debug, Clone)]
struct ArenaEntry<T> {
    node: NodeIndex,
    label: Label<T>,
    parent: Option<LabelHandle>,
    alive: bool,
}

#[derive(Debug, Clone)]
pub struct LabelArena<T> {
    entries: Vec<ArenaEntry<T>>,
    live_at: Vec<Vec<LabelHandle>>,
}

impl<T> LabelArena<T>
where
    T: SolverFloat,
{
    pub fn new(num_nodes: usize) -> Self {
        Self {
            entries: Vec::new(),
            live_at: vec![Vec::new(); num_nodes],
        }
    }

    /// Total number of labels ever inserted, dead ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn label(&self, handle: LabelHandle) -> &Label<T> {
        &self.entries[handle.get()].label
    }

    #[inline]
    pub fn node(&self, handle: LabelHandle) -> NodeIndex {
        self.entries[handle.get()].node
    }

    #[inline]
    pub fn parent(&self, handle: LabelHandle) -> Option<LabelHandle> {
        self.entries[handle.get()].parent
    }

    #[inline]
    pub fn is_alive(&self, handle: LabelHandle) -> bool {
        self.entries[handle.get()].alive
    }

    /// Live labels at `node`, oldest first.
    #[inline]
    pub fn live_labels(&self, node: NodeIndex) -> &[LabelHandle] {
        &self.live_at[node.get()]
    }

    /// Returns `true` if a live label at `node` dominates `label`.
    pub fn is_dominated(&self, node: NodeIndex, label: &Label<T>) -> bool {
        self.live_at[node.get()]
            .iter()
            .any(|&handle| self.label(handle).dominates(label))
    }

    /// Kills every live label at `node` that `label` dominates, then stores
    /// `label`. Returns the new handle and the number of labels killed.
    pub fn insert_pruning(
        &mut self,
        node: NodeIndex,
        label: Label<T>,
        parent: Option<LabelHandle>,
    ) -> (LabelHandle, usize) {
        let handle = LabelHandle::new(self.entries.len());

        let mut live = std::mem::take(&mut self.live_at[node.get()]);
        let before = live.len();
        live.retain(|&other| {
            let entry = &mut self.entries[other.get()];
            if label.dominates(&entry.label) {
                entry.alive = false;
                false
            } else {
                true
            }
        });
        let evicted = before - live.len();
        live.push(handle);
        self.live_at[node.get()] = live;

        self.entries.push(ArenaEntry {
            node,
            label,
            parent,
            alive: true,
        });
        (handle, evicted)
    }

    /// The cheapest live label at `node`; the oldest one wins ties.
    pub fn cheapest_at(&self, node: NodeIndex) -> Option<LabelHandle> {
        let mut best: Option<LabelHandle> = None;
        for &handle in &self.live_at[node.get()] {
            match best {
                Some(current) if self.label(current).cost() <= self.label(handle).cost() => {}
                _ => best = Some(handle),
            }
        }
        best
    }

    /// Follows the parent links back to the root label.
    pub fn path_to(&self, handle: LabelHandle) -> Path {
        let mut nodes = Vec::new();
        let mut current = Some(handle);
        while let Some(h) = current {
            nodes.push(self.node(h));
            current = self.parent(h);
        }
        nodes.reverse();
        Path::from_nodes(nodes)
    }
}
