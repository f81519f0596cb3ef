pub use crate::builder::GraphBuilder;

pub use crate::graph::adj_list::AdjacencyList;
pub use crate::graph::adj_list::ListLayout;
pub use crate::graph::adj_list::UndirectedALGraph;

pub use crate::index::Idx;

pub use crate::input::*;

pub use crate::EdgeMutation;
pub use crate::Graph;
pub use crate::UndirectedDegrees;
pub use crate::UndirectedNeighbors;
pub use crate::UndirectedNeighborsMut;

pub use crate::Error;
