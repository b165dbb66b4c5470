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


use thiserror::Error;

/// Errors raised while assembling or editing a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An edge carried a resource vector of the wrong length.
    #[error("edge {from} -> {to} has {found} resource components, the graph declares {expected}")]
    ResourceDimensionMismatch {
        from: String,
        to: String,
        expected: usize,
        found: usize,
    },

    /// A resource component was negative, infinite or NaN.
    #[error("edge {from} -> {to} has invalid resource component {component}: {value}")]
    InvalidResourceCost {
        from: String,
        to: String,
        component: usize,
        value: String,
    },

    /// An edge weight was infinite or NaN.
    #[error("edge {from} -> {to} has non-finite weight {value}")]
    NonFiniteWeight {
        from: String,
        to: String,
        value: String,
    },

    /// The requested node does not exist.
    #[error("unknown node {0}")]
    UnknownNode(String),

    /// The requested edge does not exist.
    #[error("unknown edge {from} -> {to}")]
    UnknownEdge { from: String, to: String },

    /// The duplicate node used for decoupling already exists.
    #[error("node {0} already exists and cannot be used as the decoupled source duplicate")]
    DuplicateNodeExists(String),
}
