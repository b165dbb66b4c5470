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


//! Comparisons over resource vectors.
//!
//! Labels carry vectors of the same length, so both helpers assume equal
//! lengths (checked in debug builds). Values are expected to be free of NaN;
//! the graph builder rejects non-finite inputs and sums of finite values stay
//! comparable.

use crate::num::float::SolverFloat;
use std::cmp::Ordering;

/// Compares two vectors lexicographically: the first component that differs
/// decides.
#[inline]
pub fn lex_cmp<T>(a: &[T], b: &[T]) -> Ordering
where
    T: SolverFloat,
{
    debug_assert_eq!(
        a.len(),
        b.len(),
        "called `lex_cmp` with vectors of different length"
    );

    for (x, y) in a.iter().zip(b.iter()) {
        match x.partial_cmp(y) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return ordering,
        }
    }
    Ordering::Equal
}

/// Returns `true` if every component of `a` is `<=` the matching one of `b`.
#[inline]
pub fn all_le<T>(a: &[T], b: &[T]) -> bool
where
    T: SolverFloat,
{
    debug_assert_eq!(
        a.len(),
        b.len(),
        "called `all_le` with vectors of different length"
    );

    a.iter().zip(b.iter()).all(|(x, y)| x <= y)
}
