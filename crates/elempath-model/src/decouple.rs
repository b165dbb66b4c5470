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


//! Source decoupling.
//!
//! Both labelling engines require that nothing points back into the source.
//! `decouple_source` moves every in-edge `u -> source` onto a fresh duplicate
//! node `source_in` (so `u -> source_in`), keeping weight and resource
//! consumption; the duplicate can then be used as a target to search for
//! cycles through the source. `recouple_source` undoes it.

use crate::{
    error::ModelError,
    graph::{GraphBuilder, NodeKey},
};
use elempath_core::num::float::SolverFloat;
use log::debug;

/// Moves all in-edges of `source` onto `source_in` and returns how many were
/// moved. When `source` has no in-edges nothing changes and `source_in` is not
/// created.
///
/// # Errors
///
/// Fails if `source` does not exist or if `source_in` already exists.
pub fn decouple_source<N, T>(
    builder: &mut GraphBuilder<N, T>,
    source: &N,
    source_in: N,
) -> Result<usize, ModelError>
where
    N: NodeKey,
    T: SolverFloat,
{
    let tails = builder.in_neighbors(source)?;
    if tails.is_empty() {
        return Ok(0);
    }
    if builder.contains_node(&source_in) {
        return Err(ModelError::DuplicateNodeExists(format!("{:?}", source_in)));
    }

    debug!("displacing {} in-edge(s) of {:?}", tails.len(), source);
    for tail in &tails {
        let (weight, resources) = builder.remove_edge(tail, source)?;
        builder.add_edge(tail.clone(), source_in.clone(), weight, resources)?;
    }
    Ok(tails.len())
}

/// Moves all in-edges of `source_in` back onto `source`, removes
/// `source_in`, and returns how many edges were moved. Does nothing and
/// returns `0` if `source_in` does not exist.
///
/// # Errors
///
/// Fails if `source` does not exist.
pub fn recouple_source<N, T>(
    builder: &mut GraphBuilder<N, T>,
    source: &N,
    source_in: &N,
) -> Result<usize, ModelError>
where
    N: NodeKey,
    T: SolverFloat,
{
    if !builder.contains_node(source) {
        return Err(ModelError::UnknownNode(format!("{:?}", source)));
    }
    if !builder.contains_node(source_in) {
        return Ok(0);
    }

    let tails = builder.in_neighbors(source_in)?;
    debug!("placing back {} in-edge(s) of {:?}", tails.len(), source);
    for tail in &tails {
        let (weight, resources) = builder.remove_edge(tail, source_in)?;
        builder.add_edge(tail.clone(), source.clone(), weight, resources)?;
    }
    builder.remove_node(source_in)?;
    Ok(tails.len())
}
