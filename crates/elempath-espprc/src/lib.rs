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


//! # Elempath ESPPRC
//!
//! Cheapest elementary path between two nodes under per-resource budgets,
//! on digraphs with negative edge weights.
//!
//! The graph is first reduced to the nodes that can lie on a path within
//! budget, and least resource consumptions between all node pairs are
//! tabulated. Label-setting sweeps then expand labels in lexicographic order
//! of their resource vectors, pruning by budget bounds and dominance. Only a
//! set of watched nodes is kept elementary; when the best path repeats a
//! node, that node is watched and the sweep repeated.
//!
//! Resource consumption must be strictly positive around every cycle that
//! the budget does not already exclude, otherwise a negative cycle can be
//! unrolled forever.
//!
//! ## Modules
//!
//! - `preprocess`: Dijkstra pruning and least consumption tables.
//! - `label`, `arena`, `pending`: labels, their owning arena and the
//!   lexicographic pending queue.
//! - `label_setting`: one sweep with a fixed watched set.
//! - `solver`: the augmentation loop (`EspprcSolver`).
//! - `config`, `result`, `error`: options, outcome and error types.

pub mod arena;
pub mod config;
pub mod error;
pub mod label;
pub mod label_setting;
pub mod pending;
pub mod preprocess;
pub mod result;
pub mod solver;
