pub mod edgelist;

pub use edgelist::EdgeList;
pub use edgelist::EdgeListInput;
pub use edgelist::Edges;

use crate::index::Idx;

pub struct InputPath<P>(pub(crate) P);

pub trait InputCapabilities<NI: Idx> {
    type GraphInput;
}
