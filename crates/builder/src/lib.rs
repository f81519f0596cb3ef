//! A library that can be used as a building block for maximal clique
//! enumeration and related algorithms on undirected graphs.
//!
//! The central type is [`UndirectedALGraph`], an undirected simple graph
//! backed by per-node adjacency lists. In contrast to read-optimized
//! compressed representations, the adjacency lists stay individually
//! addressable and mutable: enumeration algorithms are allowed to permute
//! each list in place, as long as the list contents remain a permutation
//! of the true neighbor set.
//!
//! # How to build a graph
//!
//! The library provides a builder that can be used to construct a graph
//! from a given list of edges.
//!
//! ```
//! use cliques_builder::prelude::*;
//!
//! let graph: UndirectedALGraph<u32> = GraphBuilder::new()
//!     .list_layout(ListLayout::Sorted)
//!     .edges(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)])
//!     .build();
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 5);
//!
//! assert_eq!(graph.degree(1), 3);
//! assert_eq!(graph.neighbors(1).as_slice(), &[0, 2, 3]);
//! ```
//!
//! It is also possible to create a graph from an edge list file. The file
//! starts with a header declaring the node and edge counts, followed by
//! one edge per line.
//!
//! ```
//! use std::path::PathBuf;
//!
//! use cliques_builder::prelude::*;
//!
//! let path = [env!("CARGO_MANIFEST_DIR"), "resources", "example.el"]
//!     .iter()
//!     .collect::<PathBuf>();
//!
//! let graph: UndirectedALGraph<usize> = GraphBuilder::new()
//!     .file_format(EdgeListInput::default())
//!     .path(path)
//!     .build()
//!     .expect("loading failed");
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 5);
//! ```

pub mod builder;
pub mod graph;
pub mod index;
pub mod input;
pub mod prelude;

pub use crate::builder::GraphBuilder;
pub use crate::graph::adj_list::AdjacencyList;
pub use crate::graph::adj_list::ListLayout;
pub use crate::graph::adj_list::UndirectedALGraph;

use std::convert::Infallible;

use crate::index::Idx;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error while loading graph")]
    IoError {
        #[from]
        source: std::io::Error,
    },
    #[error("invalid header: expected node and edge counts")]
    InvalidHeader,
    #[error("unexpected end of input: expected {expected} edges, found {found}")]
    TruncatedEdgeList { expected: usize, found: usize },
    #[error("node id {node} out of bounds for declared node count {node_count}")]
    NodeOutOfBounds { node: String, node_count: String },
    #[error("node {node} does not exist in the graph")]
    MissingNode { node: String },
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

/// A graph is a tuple `(N, E)`, where `N` is a set of nodes and `E` a set
/// of edges. Each edge connects exactly two nodes.
///
/// `Graph` is parameterized over the node index type `NI` which is used
/// to uniquely identify a node. An edge is a tuple of node identifiers.
pub trait Graph<NI: Idx> {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> NI;

    /// Returns the number of edges in the graph.
    fn edge_count(&self) -> NI;
}

pub trait UndirectedDegrees<NI: Idx> {
    /// Returns the number of edges connected to the given node.
    fn degree(&self, node: NI) -> NI;
}

/// Returns the neighbors of a given node.
///
/// The edge `(42, 1337)` is equivalent to the edge `(1337, 42)`.
pub trait UndirectedNeighbors<NI: Idx> {
    type NeighborsIterator<'a>: Iterator<Item = &'a NI>
    where
        Self: 'a;

    /// Returns an iterator of all nodes connected to the given node.
    fn neighbors(&self, node: NI) -> Self::NeighborsIterator<'_>;
}

/// Grants in-place mutable access to the neighbor list of a node.
///
/// The returned slice has a fixed length; callers may permute it but not
/// grow or shrink it. The contract for algorithms that reorder lists is
/// that the slice contents remain a permutation of the neighbor set.
pub trait UndirectedNeighborsMut<NI: Idx> {
    fn neighbors_mut(&mut self, node: NI) -> &mut [NI];
}

pub trait EdgeMutation<NI: Idx> {
    /// Inserts the undirected edge `{source, target}` into the graph.
    fn add_edge(&mut self, source: NI, target: NI) -> Result<(), Error>;
}
