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


//! Plain-text edge list loader.
//!
//! The format is line oriented. The first record holds the number of
//! resources `n_res`; every following record is either an edge
//! `u v weight r_1 ... r_n_res` or a single node key, which declares an
//! isolated node. Everything after `#` on a line is ignored, as are blank
//! lines. Node keys are arbitrary whitespace-free strings and are interned in
//! order of first appearance.
//!
//! ```raw
//! 2            # two resources
//! s a  1.0  0.1 0.2
//! a b -2.0  0.1 0.2
//! lonely
//! ```

use crate::{
    error::ModelError,
    graph::{DiGraph, GraphBuilder},
};
use elempath_core::num::float::SolverFloat;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};
use thiserror::Error;

/// The error type for the graph loading process.
#[derive(Error, Debug)]
pub enum GraphLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before the header was read.
    #[error("unexpected end of file while looking for the resource count")]
    UnexpectedEof,

    /// A token could not be parsed into the expected numeric type.
    #[error("line {line}: could not parse token '{token}' as type {type_name}")]
    Parse {
        line: usize,
        token: String,
        type_name: &'static str,
    },

    /// The header line held more than one token.
    #[error("line {line}: the header must contain exactly one token, found {found}")]
    InvalidHeader { line: usize, found: usize },

    /// An edge record had the wrong number of fields.
    #[error("line {line}: expected {expected} fields for an edge, found {found}")]
    RecordLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The parsed values were rejected by the graph builder.
    #[error("line {line}: {source}")]
    Model { line: usize, source: ModelError },
}

/// A configurable loader for edge list files.
///
/// # Configuration
/// * `allow_isolated_nodes`: accept single-token records as node
///   declarations. When disabled they are reported as `RecordLength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLoader {
    allow_isolated_nodes: bool,
}

impl Default for GraphLoader {
    fn default() -> Self {
        Self {
            allow_isolated_nodes: true,
        }
    }
}

impl GraphLoader {
    /// Creates a new `GraphLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether single-token records declare isolated nodes.
    #[inline]
    pub fn allow_isolated_nodes(mut self, yes: bool) -> Self {
        self.allow_isolated_nodes = yes;
        self
    }

    /// Loads a graph from a type implementing `BufRead`.
    pub fn from_bufread<R, T>(&self, rdr: R) -> Result<DiGraph<String, T>, GraphLoaderError>
    where
        R: BufRead,
        T: SolverFloat + FromStr,
    {
        let mut lines = Records::new(rdr);

        let (header_line, header) = lines.next_record()?.ok_or(GraphLoaderError::UnexpectedEof)?;
        if header.len() != 1 {
            return Err(GraphLoaderError::InvalidHeader {
                line: header_line,
                found: header.len(),
            });
        }
        let num_resources: usize = parse_token(header_line, &header[0])?;
        let edge_fields = 3 + num_resources;

        let mut builder = GraphBuilder::<String, T>::new(num_resources);
        while let Some((line, fields)) = lines.next_record()? {
            if fields.len() == 1 && self.allow_isolated_nodes {
                builder.add_node(fields[0].clone());
                continue;
            }
            if fields.len() != edge_fields {
                return Err(GraphLoaderError::RecordLength {
                    line,
                    expected: edge_fields,
                    found: fields.len(),
                });
            }

            let weight: T = parse_token(line, &fields[2])?;
            let resource_cost = fields[3..]
                .iter()
                .map(|token| parse_token::<T>(line, token))
                .collect::<Result<Vec<T>, _>>()?;

            builder
                .add_edge(fields[0].clone(), fields[1].clone(), weight, resource_cost)
                .map_err(|source| GraphLoaderError::Model { line, source })?;
        }

        Ok(builder.build())
    }

    /// Loads a graph from a file path.
    #[inline]
    pub fn from_path<P, T>(&self, path: P) -> Result<DiGraph<String, T>, GraphLoaderError>
    where
        P: AsRef<Path>,
        T: SolverFloat + FromStr,
    {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a graph from a generic reader.
    #[inline]
    pub fn from_reader<R, T>(&self, r: R) -> Result<DiGraph<String, T>, GraphLoaderError>
    where
        R: Read,
        T: SolverFloat + FromStr,
    {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a graph from a string slice.
    #[inline]
    pub fn from_str<T>(&self, s: &str) -> Result<DiGraph<String, T>, GraphLoaderError>
    where
        T: SolverFloat + FromStr,
    {
        self.from_reader(s.as_bytes())
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str) -> Result<T, GraphLoaderError> {
    token.parse::<T>().map_err(|_| GraphLoaderError::Parse {
        line,
        token: token.to_owned(),
        type_name: std::any::type_name::<T>(),
    })
}

/// Yields the non-empty, comment-stripped records of a reader together with
/// their 1-based line numbers.
struct Records<R> {
    rdr: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> Records<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
        }
    }

    fn next_record(&mut self) -> Result<Option<(usize, Vec<String>)>, GraphLoaderError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let content = match self.buf.find('#') {
                Some(start) => &self.buf[..start],
                None => self.buf.as_str(),
            };
            let fields: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !fields.is_empty() {
                return Ok(Some((self.line, fields)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
# resource-constrained toy instance
2
s a 1.0 0.1 0.2
a b -2.0 0.1 0.2   # negative arc
b a -2.0 0.1 0.2

lonely
";

    #[test]
    fn test_loads_edges_and_isolated_nodes() {
        let graph: DiGraph<String, f64> = GraphLoader::new().from_str(SMALL).unwrap();

        assert_eq!(graph.num_resources(), 2);
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 3);

        let s = graph.index_of(&"s".to_string()).unwrap();
        let a = graph.index_of(&"a".to_string()).unwrap();
        let b = graph.index_of(&"b".to_string()).unwrap();
        let lonely = graph.index_of(&"lonely".to_string()).unwrap();

        assert_eq!(s.get(), 0);
        assert_eq!(lonely.get(), 3);
        assert_eq!(graph.out_degree(lonely), 0);

        let edge = graph.edge(a, b).unwrap();
        assert_eq!(edge.weight(), -2.0);
        assert_eq!(edge.resource_cost(), &[0.1, 0.2]);
        assert!(graph.has_edge(b, a));
        assert!(!graph.has_edge(s, b));
    }

    #[test]
    fn test_isolated_nodes_can_be_disallowed() {
        let err = GraphLoader::new()
            .allow_isolated_nodes(false)
            .from_str::<f64>(SMALL)
            .unwrap_err();
        match err {
            GraphLoaderError::RecordLength {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 7);
                assert_eq!(expected, 5);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_is_unexpected_eof() {
        let err = GraphLoader::new()
            .from_str::<f64>("# only a comment\n\n")
            .unwrap_err();
        assert!(matches!(err, GraphLoaderError::UnexpectedEof));
    }

    #[test]
    fn test_invalid_header() {
        let err = GraphLoader::new().from_str::<f64>("2 3\n").unwrap_err();
        assert!(matches!(
            err,
            GraphLoaderError::InvalidHeader { line: 1, found: 2 }
        ));
    }

    #[test]
    fn test_parse_error_structure() {
        let err = GraphLoader::new()
            .from_str::<f64>("1\nu v heavy 0.5\n")
            .unwrap_err();
        match err {
            GraphLoaderError::Parse {
                line,
                token,
                type_name,
            } => {
                assert_eq!(line, 2);
                assert_eq!(token, "heavy");
                assert!(type_name.contains("f64"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_rejection_carries_line() {
        let err = GraphLoader::new()
            .from_str::<f64>("1\nu v 1.0 0.5\nv w 1.0 -0.5\n")
            .unwrap_err();
        match err {
            GraphLoaderError::Model { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(source, ModelError::InvalidResourceCost { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_reader_matches_from_str() {
        let a: DiGraph<String, f64> = GraphLoader::new().from_str(SMALL).unwrap();
        let b: DiGraph<String, f64> = GraphLoader::new().from_reader(SMALL.as_bytes()).unwrap();
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.num_edges(), b.num_edges());
    }
}
