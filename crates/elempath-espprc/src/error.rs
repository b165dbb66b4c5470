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


use elempath_model::error::ModelError;
use thiserror::Error;

/// Errors reported by the resource-constrained engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EspprcError {
    /// Source and target are the same node.
    #[error("source and target are the same node {0}")]
    SourceEqualsTarget(String),

    /// The source has incoming edges. Decouple it first.
    #[error("source {source_node} has {in_degree} incoming edge(s); decouple the source before searching")]
    SourceHasInEdge { source_node: String, in_degree: usize },

    /// No path from source to target respects the budget.
    #[error("infeasible instance: {0}")]
    Infeasible(String),

    /// The budget has a different number of components than the graph has
    /// resources.
    #[error("the budget has {found} components but the graph declares {expected} resources")]
    BudgetDimensionMismatch { expected: usize, found: usize },

    /// A budget component is negative or NaN.
    #[error("budget component {component} is invalid: {value}")]
    NegativeBudget { component: usize, value: String },

    /// The requested node is not part of the graph.
    #[error("unknown node {0}")]
    UnknownNode(String),

    /// Preparing the graph failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}
