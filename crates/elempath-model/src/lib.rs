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


//! # Elempath Model
//!
//! The graph side of the elementary shortest path solvers: the directed graph
//! the engines search, the path value they return, and the utilities callers
//! use to prepare a graph before a search.
//!
//! * **`index`**: `NodeIndex`, the dense handle every engine works with.
//! * **`graph`**: the immutable `DiGraph` (adjacency with weights and resource
//!   vectors, incoming-edge lists) and the mutable `GraphBuilder`.
//! * **`path`**: `Path`, an ordered node sequence with edge iteration, cost and
//!   resource summation, multiplicity histogram and pretty printing.
//! * **`decouple`**: moves the in-edges of a source onto a duplicate node and
//!   back. Both engines require a source without in-edges.
//! * **`loading`**: a plain-text edge list reader.
//! * **`error`**: construction errors.
//!
//! Node keys are interned in insertion order. That order is the tie-break the
//! engines use wherever the search would otherwise depend on hash order, so
//! the same graph always produces the same results.

pub mod decouple;
pub mod error;
pub mod graph;
pub mod index;
pub mod loading;
pub mod path;
