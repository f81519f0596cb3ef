//! A library for enumerating all maximal cliques of an undirected simple
//! graph.
//!
//! The enumeration follows the Bron–Kerbosch backtracking schema with two
//! accelerators: a degeneracy ordering drives the outermost recursion, and
//! inside each recursive call a pivot of maximum candidate-degree prunes
//! branches. The recursion operates in place on a shared vertex array and
//! on the neighbor lists of the graph, which makes the hot path free of
//! allocations besides the per-call candidate list.
//!
//! Optionally, the search can record its recursion tree so that a
//! downstream visualizer can replay the exploration step by step,
//! including the branches the pivot rule skipped.
//!
//! # Example
//!
//! ```
//! use cliques::prelude::*;
//!
//! let mut graph: UndirectedALGraph<u32> = GraphBuilder::new()
//!     .edges(vec![(0, 1), (0, 2), (1, 2), (2, 3)])
//!     .build();
//!
//! assert_eq!(maximal_cliques(&mut graph), 2);
//! ```

pub mod degeneracy;
pub mod maximal_cliques;
pub mod prelude;
pub mod search_tree;

pub use crate::degeneracy::{degeneracy_order, DegeneracyOrder};
pub use crate::maximal_cliques::{maximal_cliques, maximal_cliques_with_tree};
pub use crate::search_tree::{SearchTree, SearchTreeConfig, TreeNode, TreeStats};
