use crate::{
    index::Idx, input::edgelist::Edges, EdgeMutation, Error, Graph, UndirectedDegrees,
    UndirectedNeighbors, UndirectedNeighborsMut,
};

use log::info;
use std::time::Instant;

/// Defines how neighbor lists are laid out during graph construction.
///
/// The layout is a construction-time property only. Algorithms that
/// reorder lists in place invalidate `Sorted` ordering, which is why no
/// operation on the graph relies on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListLayout {
    /// Neighbor lists are in input order.
    #[default]
    Unsorted,
    /// Neighbor lists are sorted by node id.
    Sorted,
    /// Neighbor lists are sorted by node id and duplicates are removed.
    Deduplicated,
}

#[derive(Debug)]
pub struct AdjacencyList<NI> {
    lists: Vec<Vec<NI>>,
    layout: ListLayout,
}

impl<NI: Idx> AdjacencyList<NI> {
    pub fn new(lists: Vec<Vec<NI>>) -> Self {
        Self::with_layout(lists, ListLayout::Unsorted)
    }

    pub fn with_layout(lists: Vec<Vec<NI>>, layout: ListLayout) -> Self {
        Self { lists, layout }
    }

    #[inline]
    pub(crate) fn node_count(&self) -> NI {
        NI::new(self.lists.len())
    }

    #[inline]
    pub(crate) fn target_count(&self) -> usize {
        self.lists.iter().map(|list| list.len()).sum()
    }

    #[inline]
    pub(crate) fn degree(&self, node: NI) -> NI {
        NI::new(self.lists[node.index()].len())
    }

    #[inline]
    pub(crate) fn targets(&self, node: NI) -> &[NI] {
        self.lists[node.index()].as_slice()
    }

    #[inline]
    pub(crate) fn targets_mut(&mut self, node: NI) -> &mut [NI] {
        self.lists[node.index()].as_mut_slice()
    }

    #[inline]
    fn insert(&mut self, source: NI, target: NI) {
        match self.layout {
            ListLayout::Sorted => {
                let list = &mut self.lists[source.index()];
                match list.binary_search(&target) {
                    Ok(i) => list.insert(i, target),
                    Err(i) => list.insert(i, target),
                }
            }
            ListLayout::Unsorted => self.lists[source.index()].push(target),
            ListLayout::Deduplicated => {
                let list = &mut self.lists[source.index()];
                match list.binary_search(&target) {
                    Ok(_) => {}
                    Err(i) => list.insert(i, target),
                }
            }
        };
    }
}

impl<NI, E> From<(&'_ E, NI, ListLayout)> for AdjacencyList<NI>
where
    NI: Idx,
    E: Edges<NI = NI>,
{
    fn from((edge_list, node_count, layout): (&'_ E, NI, ListLayout)) -> Self {
        let start = Instant::now();
        let mut lists = Vec::with_capacity(node_count.index());
        lists.resize_with(node_count.index(), Vec::new);

        for (source, target) in edge_list.edges() {
            lists[source.index()].push(target);
            lists[target.index()].push(source);
        }
        info!("Grouped edge tuples in {:?}", start.elapsed());

        let start = Instant::now();
        for list in lists.iter_mut() {
            match layout {
                ListLayout::Sorted => list.sort_unstable(),
                ListLayout::Unsorted => {}
                ListLayout::Deduplicated => {
                    list.sort_unstable();
                    list.dedup();
                }
            }
        }
        info!("Applied list layout in {:?}", start.elapsed());

        AdjacencyList::with_layout(lists, layout)
    }
}

pub struct UndirectedALGraph<NI: Idx> {
    al: AdjacencyList<NI>,
}

impl<NI: Idx> UndirectedALGraph<NI> {
    pub fn new(al: AdjacencyList<NI>) -> Self {
        let g = Self { al };

        info!(
            "Created undirected graph (node_count = {:?}, edge_count = {:?})",
            g.node_count(),
            g.edge_count()
        );

        g
    }
}

impl<NI: Idx> Graph<NI> for UndirectedALGraph<NI> {
    fn node_count(&self) -> NI {
        self.al.node_count()
    }

    fn edge_count(&self) -> NI {
        NI::new(self.al.target_count() / 2)
    }
}

impl<NI: Idx> UndirectedDegrees<NI> for UndirectedALGraph<NI> {
    fn degree(&self, node: NI) -> NI {
        self.al.degree(node)
    }
}

impl<NI: Idx> UndirectedNeighbors<NI> for UndirectedALGraph<NI> {
    type NeighborsIterator<'a> = std::slice::Iter<'a, NI> where Self: 'a;

    fn neighbors(&self, node: NI) -> Self::NeighborsIterator<'_> {
        self.al.targets(node).iter()
    }
}

impl<NI: Idx> UndirectedNeighborsMut<NI> for UndirectedALGraph<NI> {
    fn neighbors_mut(&mut self, node: NI) -> &mut [NI] {
        self.al.targets_mut(node)
    }
}

impl<NI: Idx> EdgeMutation<NI> for UndirectedALGraph<NI> {
    fn add_edge(&mut self, source: NI, target: NI) -> Result<(), Error> {
        if source >= self.al.node_count() {
            return Err(Error::MissingNode {
                node: format!("{}", source.index()),
            });
        }
        if target >= self.al.node_count() {
            return Err(Error::MissingNode {
                node: format!("{}", target.index()),
            });
        }

        self.al.insert(source, target);
        self.al.insert(target, source);

        Ok(())
    }
}

impl<NI, E> From<(E, ListLayout)> for UndirectedALGraph<NI>
where
    NI: Idx,
    E: Edges<NI = NI>,
{
    fn from((edge_list, layout): (E, ListLayout)) -> Self {
        info!("Creating undirected graph");
        let node_count = edge_list.node_count();

        let start = Instant::now();
        let al = AdjacencyList::from((&edge_list, node_count, layout));
        info!("Created adjacency list in {:?}", start.elapsed());

        UndirectedALGraph::new(al)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::edgelist::EdgeList;
    use crate::GraphBuilder;

    #[test]
    fn empty_list() {
        let list = AdjacencyList::<u32>::new(vec![]);
        assert_eq!(list.node_count(), 0);
        assert_eq!(list.target_count(), 0);
    }

    #[test]
    fn degree() {
        let list = AdjacencyList::<u32>::new(vec![
            /* node 0 */ vec![1],
            /* node 1 */ vec![0],
        ]);
        assert_eq!(list.node_count(), 2);
        assert_eq!(list.target_count(), 2);
        assert_eq!(list.degree(0), 1);
        assert_eq!(list.degree(1), 1);
    }

    #[test]
    fn from_edges_sorted() {
        let edges = vec![(0, 1), (0, 3), (0, 2), (1, 3), (1, 2)];
        let edges = EdgeList::new(edges);
        let list = AdjacencyList::<u32>::from((&edges, 4, ListLayout::Sorted));

        assert_eq!(list.targets(0), &[1, 2, 3]);
        assert_eq!(list.targets(1), &[0, 2, 3]);
        assert_eq!(list.targets(2), &[0, 1]);
        assert_eq!(list.targets(3), &[0, 1]);
    }

    #[test]
    fn from_edges_deduplicated() {
        let edges = vec![(0, 1), (0, 1), (0, 2), (1, 2), (1, 2)];
        let edges = EdgeList::new(edges);
        let list = AdjacencyList::<u32>::from((&edges, 3, ListLayout::Deduplicated));

        assert_eq!(list.targets(0), &[1, 2]);
        assert_eq!(list.targets(1), &[0, 2]);
        assert_eq!(list.targets(2), &[0, 1]);
    }

    #[test]
    fn undirected_al_graph() {
        let g = GraphBuilder::new()
            .list_layout(ListLayout::Sorted)
            .edges([(0, 1), (0, 2), (1, 2)])
            .build::<UndirectedALGraph<u32>>();

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(2), 2);
        assert_eq!(g.neighbors(0).as_slice(), &[1, 2]);
        assert_eq!(g.neighbors(2).as_slice(), &[0, 1]);
    }

    #[test]
    fn undirected_al_graph_neighbors_mut() {
        let mut g = GraphBuilder::new()
            .list_layout(ListLayout::Sorted)
            .edges([(0, 1), (0, 2), (0, 3)])
            .build::<UndirectedALGraph<u32>>();

        g.neighbors_mut(0).swap(0, 2);
        assert_eq!(g.neighbors(0).as_slice(), &[3, 2, 1]);

        // length and set contents are unchanged
        let mut restored = g.neighbors(0).copied().collect::<Vec<_>>();
        restored.sort_unstable();
        assert_eq!(restored, vec![1, 2, 3]);
    }

    #[test]
    fn undirected_al_graph_add_edge() {
        let mut g = GraphBuilder::new()
            .list_layout(ListLayout::Sorted)
            .edges([(0, 2), (1, 2)])
            .build::<UndirectedALGraph<u32>>();

        assert_eq!(g.neighbors(0).as_slice(), &[2]);
        g.add_edge(0, 1).expect("add edge failed");
        assert_eq!(g.neighbors(0).as_slice(), &[1, 2]);
        assert_eq!(g.neighbors(1).as_slice(), &[0, 2]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn undirected_al_graph_add_edge_missing_node() {
        let mut g = GraphBuilder::new()
            .edges([(0, 2), (1, 2)])
            .build::<UndirectedALGraph<u32>>();

        let err = g.add_edge(0, 3).unwrap_err();

        assert!(matches!(err, Error::MissingNode { node } if node == "3"));
    }

    #[test]
    fn isolated_nodes_from_declared_node_count() {
        let edge_list = EdgeList::<u32>::with_node_count(vec![(0, 1)], 4);
        let g = UndirectedALGraph::from((edge_list, ListLayout::Unsorted));

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(2), 0);
        assert_eq!(g.degree(3), 0);
    }
}
