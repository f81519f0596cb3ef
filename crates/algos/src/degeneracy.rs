use crate::prelude::*;

use log::info;

use std::time::Instant;

const NO_VERTEX: usize = usize::MAX;

/// A degeneracy ordering of the nodes of an undirected graph.
///
/// The node emitted at position `i` has minimum residual degree among all
/// nodes emitted at positions `i..`. `order` and `rank` are inverse
/// permutations: `rank[order[i].index()] == i`.
#[derive(Debug, Clone)]
pub struct DegeneracyOrder<NI: Idx> {
    pub order: Vec<NI>,
    pub rank: Vec<usize>,
    /// The largest residual degree observed while emitting, i.e. the
    /// degeneracy of the graph.
    pub degeneracy: usize,
}

/// Computes a degeneracy ordering using a bucket queue keyed on residual
/// degree.
///
/// Nodes live in doubly linked buckets, one per residual degree, with
/// intrusive `prev`/`next` arrays for O(1) unlink. After emitting a node,
/// the scan restarts at the next smaller degree because decrementing its
/// neighbors can repopulate that bucket.
pub fn degeneracy_order<NI, G>(graph: &G) -> DegeneracyOrder<NI>
where
    NI: Idx,
    G: Graph<NI> + UndirectedDegrees<NI> + UndirectedNeighbors<NI>,
{
    let start = Instant::now();
    let node_count = graph.node_count().index();

    let mut degrees = Vec::with_capacity(node_count);
    for node in 0..node_count {
        degrees.push(graph.degree(NI::new(node)).index());
    }
    let max_degree = degrees.iter().copied().max().unwrap_or(0);

    let mut head = vec![NO_VERTEX; max_degree + 1];
    let mut next = vec![NO_VERTEX; node_count];
    let mut prev = vec![NO_VERTEX; node_count];

    for node in (0..node_count).rev() {
        push(&mut head, &mut next, &mut prev, degrees[node], node);
    }

    let mut order = Vec::with_capacity(node_count);
    let mut rank = vec![usize::MAX; node_count];
    let mut degeneracy = 0;

    let mut degree = 0;
    while order.len() < node_count {
        while head[degree] == NO_VERTEX {
            degree += 1;
        }

        let node = head[degree];
        unlink(&mut head, &mut next, &mut prev, degree, node);
        degeneracy = usize::max(degeneracy, degree);
        rank[node] = order.len();
        order.push(NI::new(node));

        for &neighbor in graph.neighbors(NI::new(node)) {
            let neighbor = neighbor.index();
            if rank[neighbor] != usize::MAX {
                continue;
            }
            unlink(&mut head, &mut next, &mut prev, degrees[neighbor], neighbor);
            degrees[neighbor] -= 1;
            push(&mut head, &mut next, &mut prev, degrees[neighbor], neighbor);
        }

        degree = degree.saturating_sub(1);
    }

    info!(
        "Computed degeneracy ordering (degeneracy = {}) in {:?}",
        degeneracy,
        start.elapsed()
    );

    DegeneracyOrder {
        order,
        rank,
        degeneracy,
    }
}

fn push(head: &mut [usize], next: &mut [usize], prev: &mut [usize], bucket: usize, node: usize) {
    next[node] = head[bucket];
    prev[node] = NO_VERTEX;
    if head[bucket] != NO_VERTEX {
        prev[head[bucket]] = node;
    }
    head[bucket] = node;
}

fn unlink(head: &mut [usize], next: &mut [usize], prev: &mut [usize], bucket: usize, node: usize) {
    if prev[node] != NO_VERTEX {
        next[prev[node]] = next[node];
    } else {
        head[bucket] = next[node];
    }
    if next[node] != NO_VERTEX {
        prev[next[node]] = prev[node];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{GraphBuilder, ListLayout};

    fn assert_inverse<NI: Idx>(ordering: &DegeneracyOrder<NI>) {
        for (i, &node) in ordering.order.iter().enumerate() {
            assert_eq!(ordering.rank[node.index()], i);
        }
        for (node, &rank) in ordering.rank.iter().enumerate() {
            assert_eq!(ordering.order[rank].index(), node);
        }
    }

    #[test]
    fn empty_graph() {
        let graph: UndirectedALGraph<usize> = GraphBuilder::new().edges::<usize, _>([]).build();

        let ordering = degeneracy_order(&graph);

        assert!(ordering.order.is_empty());
        assert_eq!(ordering.degeneracy, 0);
    }

    #[test]
    fn path_graph() {
        let graph: UndirectedALGraph<usize> =
            GraphBuilder::new().edges([(0, 1), (1, 2), (2, 3)]).build();

        let ordering = degeneracy_order(&graph);

        assert_inverse(&ordering);
        assert_eq!(ordering.degeneracy, 1);
    }

    #[test]
    fn complete_graph() {
        let mut edges = Vec::new();
        for u in 0..5 {
            for v in (u + 1)..5 {
                edges.push((u, v));
            }
        }
        let graph: UndirectedALGraph<u32> = GraphBuilder::new().edges(edges).build();

        let ordering = degeneracy_order(&graph);

        assert_inverse(&ordering);
        assert_eq!(ordering.degeneracy, 4);
    }

    #[test]
    fn emitted_node_has_minimum_residual_degree() {
        // star plus a triangle hanging off the hub
        let graph: UndirectedALGraph<u32> = GraphBuilder::new()
            .list_layout(ListLayout::Deduplicated)
            .edges([(0, 1), (0, 2), (0, 3), (0, 4), (3, 4)])
            .build();

        let ordering = degeneracy_order(&graph);

        assert_inverse(&ordering);
        // leaves come out before the triangle, the hub last or with it
        assert_eq!(ordering.degeneracy, 2);
        assert!(ordering.rank[1] < ordering.rank[0]);
        assert!(ordering.rank[2] < ordering.rank[0]);
    }
}
