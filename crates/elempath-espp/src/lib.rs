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


//! # Elempath ESPP
//!
//! Elementary shortest paths without resource constraints, on digraphs with
//! negative edge weights. Every node keeps a bounded, cost-ordered set of
//! elementary paths from the source. When a node whose store is full can
//! only extend into a successor by closing a negative cycle, the cycle is
//! reported as a witness and the capacities of its nodes grow by one. The
//! search resumes on the existing labels and stops once no witness remains.
//!
//! ## Modules
//!
//! - `store`: fixed-capacity, cost-ranked path store.
//! - `capacity`: per-node capacity table.
//! - `queue`: FIFO dirty-node queue with membership bits.
//! - `labelling`: one truncated labelling pass.
//! - `solver`: the dynamic-capacity outer loop (`EsppSolver`).
//! - `config`, `result`, `error`: options, outcome and error types.

pub mod capacity;
pub mod config;
pub mod error;
pub mod labelling;
pub mod queue;
pub mod result;
pub mod solver;
pub mod store;
