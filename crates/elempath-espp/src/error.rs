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

/// Errors reported by the resource-free labelling engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EsppError {
    /// The source has incoming edges. The labelling assumes nothing points
    /// back into the source; decouple it first.
    #[error("source {source_node} has {in_degree} incoming edge(s); decouple the source before searching")]
    SourceHasInEdge { source_node: String, in_degree: usize },

    /// The capacity settings are unusable.
    #[error("invalid capacity configuration: {0}")]
    InvalidCapacity(String),

    /// The requested node is not part of the graph.
    #[error("unknown node {0}")]
    UnknownNode(String),
}
