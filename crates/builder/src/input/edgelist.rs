use log::info;
use std::{fs::File, marker::PhantomData, path::Path, time::Instant};

use crate::index::Idx;
use crate::Error;

use super::{InputCapabilities, InputPath};

/// Reads a graph from a byte stream that starts with a header followed by
/// one edge per line.
///
/// The header declares the node count `N` and the edge count `M`. Each of
/// the `M` subsequent lines holds a source and a target node id with
/// `0 <= id < N`. Any run of ASCII whitespace separates tokens, so both
/// space- and tab-separated files parse, as do files with Windows line
/// endings.
///
/// The declared node count is authoritative: nodes without any incident
/// edge still exist in the resulting graph.
///
/// # Example
///
/// ```ignore
/// > cat my_graph.el
/// 4 3
/// 0 1
/// 0 2
/// 1 3
/// ```
pub struct EdgeListInput<NI: Idx> {
    _idx: PhantomData<NI>,
}

impl<NI: Idx> Default for EdgeListInput<NI> {
    fn default() -> Self {
        Self { _idx: PhantomData }
    }
}

impl<NI: Idx> InputCapabilities<NI> for EdgeListInput<NI> {
    type GraphInput = EdgeList<NI>;
}

#[allow(clippy::len_without_is_empty)]
pub trait Edges {
    type NI: Idx;

    type EdgeIter<'a>: Iterator<Item = (Self::NI, Self::NI)>
    where
        Self: 'a;

    fn edges(&self) -> Self::EdgeIter<'_>;

    /// The number of nodes; every id returned by `edges` is strictly
    /// below this.
    fn node_count(&self) -> Self::NI;

    #[cfg(test)]
    fn len(&self) -> usize;
}

#[derive(Debug)]
pub struct EdgeList<NI: Idx> {
    list: Box<[(NI, NI)]>,
    node_count: Option<NI>,
}

impl<NI: Idx> EdgeList<NI> {
    pub fn new(edges: Vec<(NI, NI)>) -> Self {
        Self {
            list: edges.into_boxed_slice(),
            node_count: None,
        }
    }

    pub fn with_node_count(edges: Vec<(NI, NI)>, node_count: NI) -> Self {
        Self {
            list: edges.into_boxed_slice(),
            node_count: Some(node_count),
        }
    }
}

impl<NI: Idx> Edges for EdgeList<NI> {
    type NI = NI;

    type EdgeIter<'a> = std::iter::Copied<std::slice::Iter<'a, (NI, NI)>>
    where
        Self: 'a;

    fn edges(&self) -> Self::EdgeIter<'_> {
        self.list.iter().copied()
    }

    fn node_count(&self) -> NI {
        match self.node_count {
            Some(node_count) => node_count,
            None => self
                .list
                .iter()
                .map(|&(source, target)| NI::max(source, target))
                .max()
                .map_or(NI::zero(), |max_id| max_id + NI::new(1)),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.list.len()
    }
}

pub(crate) struct EdgeIterator<NI: Idx, I: IntoIterator<Item = (NI, NI)>>(pub I);

impl<NI, I> From<EdgeIterator<NI, I>> for EdgeList<NI>
where
    NI: Idx,
    I: IntoIterator<Item = (NI, NI)>,
{
    fn from(iter: EdgeIterator<NI, I>) -> Self {
        EdgeList::new(iter.0.into_iter().collect())
    }
}

impl<NI, P> TryFrom<InputPath<P>> for EdgeList<NI>
where
    P: AsRef<Path>,
    NI: Idx,
{
    type Error = Error;

    fn try_from(path: InputPath<P>) -> Result<Self, Self::Error> {
        let file = File::open(path.0.as_ref())?;
        let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
        EdgeList::try_from(mmap.as_ref())
    }
}

impl<NI> TryFrom<&[u8]> for EdgeList<NI>
where
    NI: Idx,
{
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let start = Instant::now();
        let mut bytes = bytes;

        let node_count = parse_id::<NI>(&mut bytes).ok_or(Error::InvalidHeader)?;
        let edge_count = parse_id::<usize>(&mut bytes).ok_or(Error::InvalidHeader)?;

        let mut edges = Vec::with_capacity(edge_count);
        for found in 0..edge_count {
            let (Some(source), Some(target)) =
                (parse_id::<NI>(&mut bytes), parse_id::<NI>(&mut bytes))
            else {
                return Err(Error::TruncatedEdgeList {
                    expected: edge_count,
                    found,
                });
            };

            for node in [source, target] {
                if node >= node_count {
                    return Err(Error::NodeOutOfBounds {
                        node: format!("{}", node.index()),
                        node_count: format!("{}", node_count.index()),
                    });
                }
            }

            edges.push((source, target));
        }

        info!(
            "Read {} nodes and {} edges in {:?}",
            node_count.index(),
            edges.len(),
            start.elapsed()
        );

        Ok(EdgeList::with_node_count(edges, node_count))
    }
}

/// Skips leading ASCII whitespace, then parses one decimal id.
fn parse_id<NI: Idx>(bytes: &mut &[u8]) -> Option<NI> {
    while let Some((&byte, rest)) = bytes.split_first() {
        if byte.is_ascii_whitespace() {
            *bytes = rest;
        } else {
            break;
        }
    }

    let (value, used) = NI::parse(bytes);
    if used == 0 {
        return None;
    }
    *bytes = &bytes[used..];
    Some(value)
}
