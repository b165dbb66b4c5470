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


//! # Strongly Typed Indices
//!
//! The engines juggle several dense index spaces at once: interned graph
//! nodes, slots in a label arena, positions in a ranked store. All of them
//! are plain `usize` underneath, which makes it far too easy to look up a
//! label with a node index. `TypedIndex<T>` tags the integer with a marker
//! type so those mistakes fail to compile, at zero runtime cost.
//!
//! ## Usage
//!
//! ```rust
//! use elempath_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct NodeTag;
//! impl TypedIndexTag for NodeTag { const NAME: &'static str = "NodeIndex"; }
//!
//! type NodeIndex = TypedIndex<NodeTag>;
//! let n = NodeIndex::new(3);
//! assert_eq!(n.get(), 3);
//! assert_eq!(format!("{}", n), "NodeIndex(3)");
//! ```

/// Names an index space for `Debug` and `Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A dense `usize` index tagged with the index space `T` it belongs to.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the raw position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index directly after this one in the same space.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct SlotTag;

    impl TypedIndexTag for SlotTag {
        const NAME: &'static str = "Slot";
    }

    type Slot = TypedIndex<SlotTag>;

    #[test]
    fn test_round_trip_through_usize() {
        let slot: Slot = 42.into();
        assert_eq!(slot.get(), 42);
        let raw: usize = slot.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_display_uses_tag_name() {
        let slot = Slot::new(7);
        assert_eq!(format!("{}", slot), "Slot(7)");
        assert_eq!(format!("{:?}", slot), "Slot(7)");
    }

    #[test]
    fn test_next_and_ordering() {
        let a = Slot::new(1);
        let b = a.next();
        assert_eq!(b.get(), 2);
        assert!(a < b);
    }
}
