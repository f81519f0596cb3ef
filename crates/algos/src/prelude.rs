pub use cliques_builder::prelude::*;

pub use crate::degeneracy::degeneracy_order;
pub use crate::degeneracy::DegeneracyOrder;
pub use crate::maximal_cliques::maximal_cliques;
pub use crate::maximal_cliques::maximal_cliques_with_tree;
pub use crate::search_tree::SearchTree;
pub use crate::search_tree::SearchTreeConfig;
pub use crate::search_tree::TreeNode;
pub use crate::search_tree::TreeStats;
