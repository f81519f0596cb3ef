use std::collections::HashMap;
use std::path::PathBuf;

use cliques::prelude::*;

fn graph_of(edges: Vec<(u32, u32)>) -> UndirectedALGraph<u32> {
    GraphBuilder::new()
        .list_layout(ListLayout::Deduplicated)
        .edges(edges)
        .build()
}

#[test]
fn triangle() {
    let mut graph = graph_of(vec![(0, 1), (1, 2), (0, 2)]);

    assert_eq!(maximal_cliques(&mut graph), 1);
}

#[test]
fn path_of_three() {
    let mut graph = graph_of(vec![(0, 1), (1, 2)]);

    assert_eq!(maximal_cliques(&mut graph), 2);
}

#[test]
fn two_disjoint_edges() {
    let mut graph = graph_of(vec![(0, 1), (2, 3)]);

    assert_eq!(maximal_cliques(&mut graph), 2);
}

#[test]
fn bowtie() {
    let mut graph = graph_of(vec![(0, 1), (0, 2), (1, 2), (0, 3), (0, 4), (3, 4)]);

    assert_eq!(maximal_cliques(&mut graph), 2);
}

#[test]
fn k4() {
    let mut graph = graph_of(vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);

    assert_eq!(maximal_cliques(&mut graph), 1);
}

#[test]
fn empty_graph_from_input() {
    let edge_list = EdgeList::<u32>::try_from(&b"0 0\n"[..]).unwrap();
    let mut graph = UndirectedALGraph::from((edge_list, ListLayout::Unsorted));

    assert_eq!(maximal_cliques(&mut graph), 0);
}

#[test]
fn isolated_nodes_are_trivial_cliques() {
    let edge_list = EdgeList::<u32>::try_from(&b"5 0\n"[..]).unwrap();
    let mut graph = UndirectedALGraph::from((edge_list, ListLayout::Unsorted));

    assert_eq!(maximal_cliques(&mut graph), 5);
}

#[test]
fn karate_club_has_36_maximal_cliques() {
    let _ = env_logger::builder().is_test(true).try_init();

    let path = [env!("CARGO_MANIFEST_DIR"), "resources", "karate.el"]
        .iter()
        .collect::<PathBuf>();

    let mut graph: UndirectedALGraph<u32> = GraphBuilder::new()
        .file_format(EdgeListInput::default())
        .path(path)
        .build()
        .expect("loading failed");

    assert_eq!(graph.node_count(), 34);
    assert_eq!(graph.edge_count(), 78);
    assert_eq!(maximal_cliques(&mut graph), 36);
}

#[test]
fn karate_club_count_is_stable_across_runs_and_recording() {
    let path = [env!("CARGO_MANIFEST_DIR"), "resources", "karate.el"]
        .iter()
        .collect::<PathBuf>();

    let mut graph: UndirectedALGraph<u32> = GraphBuilder::new()
        .file_format(EdgeListInput::default())
        .path(path)
        .build()
        .expect("loading failed");

    assert_eq!(maximal_cliques(&mut graph), 36);
    assert_eq!(maximal_cliques(&mut graph), 36);

    let (recorded, _) = maximal_cliques_with_tree(&mut graph, SearchTreeConfig::new(false));
    assert_eq!(recorded, 36);

    let (with_shadows, tree) = maximal_cliques_with_tree(&mut graph, SearchTreeConfig::default());
    assert_eq!(with_shadows, 36);

    let stats = tree.stats();
    assert_eq!(stats.nodes, stats.explored + stats.pruned);
    assert!(stats.pruned > 0);
    assert!(stats.max_depth >= 5); // the largest clique has five members
}

#[test]
fn neighbor_sets_are_preserved() {
    let path = [env!("CARGO_MANIFEST_DIR"), "resources", "karate.el"]
        .iter()
        .collect::<PathBuf>();

    let mut graph: UndirectedALGraph<u32> = GraphBuilder::new()
        .file_format(EdgeListInput::default())
        .path(path)
        .build()
        .expect("loading failed");

    let snapshot = |graph: &UndirectedALGraph<u32>| -> Vec<Vec<u32>> {
        (0..34)
            .map(|node| {
                let mut list = graph.neighbors(node).copied().collect::<Vec<_>>();
                list.sort_unstable();
                list
            })
            .collect()
    };

    let before = snapshot(&graph);
    maximal_cliques(&mut graph);
    let after = snapshot(&graph);

    assert_eq!(before, after);
}

#[test]
fn degeneracy_order_and_rank_are_inverse() {
    let mut edges = Vec::new();
    for u in 0..8u32 {
        edges.push((u, (u + 1) % 8));
        edges.push((u, (u + 2) % 8));
    }
    let graph = graph_of(edges);

    let ordering = degeneracy_order(&graph);

    for (i, &node) in ordering.order.iter().enumerate() {
        assert_eq!(ordering.rank[node.index()], i);
        assert_eq!(ordering.order[ordering.rank[node.index()]], node);
    }
}

#[derive(Debug)]
struct CsvRow {
    node_id: i64,
    parent_id: i64,
    children: Vec<i64>,
    cliques_in_subtree: u64,
    depth: usize,
    x_size: usize,
    p_size: usize,
    pruned: bool,
}

fn parse_tree_csv(bytes: &[u8]) -> Vec<CsvRow> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec![
            "node_id",
            "parent_id",
            "children_ids",
            "cliques_in_subtree",
            "creation_order",
            "depth",
            "candidate_vertex",
            "current_clique",
            "x_size",
            "p_size",
            "pruned_by_pivot",
        ]
    );

    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            let ids = |field: &str| -> Vec<i64> {
                if field.is_empty() {
                    Vec::new()
                } else {
                    field.split(';').map(|id| id.parse().unwrap()).collect()
                }
            };

            CsvRow {
                node_id: record[0].parse().unwrap(),
                parent_id: record[1].parse().unwrap(),
                children: ids(&record[2]),
                cliques_in_subtree: record[3].parse().unwrap(),
                depth: record[5].parse().unwrap(),
                x_size: record[8].parse().unwrap(),
                p_size: record[9].parse().unwrap(),
                pruned: record[10].parse().unwrap(),
            }
        })
        .collect()
}

#[test]
fn exported_csv_round_trips_into_a_consistent_tree() {
    let mut graph = graph_of(vec![
        (0, 1),
        (0, 2),
        (1, 2),
        (1, 3),
        (2, 3),
        (2, 4),
        (3, 4),
        (4, 5),
    ]);

    let (count, tree) = maximal_cliques_with_tree(&mut graph, SearchTreeConfig::default());

    let mut bytes = Vec::new();
    tree.write_csv(&mut bytes).unwrap();
    let rows = parse_tree_csv(&bytes);

    let by_id: HashMap<i64, &CsvRow> = rows.iter().map(|row| (row.node_id, row)).collect();

    // the synthetic root aggregates all outer roots
    let root = by_id[&-1];
    assert_eq!(root.parent_id, -2);
    assert_eq!(root.cliques_in_subtree, count);
    for &child in &root.children {
        assert_eq!(by_id[&child].parent_id, -1);
        assert_eq!(by_id[&child].depth, 1);
    }

    for row in &rows {
        if row.node_id == -1 {
            continue;
        }

        // an internal node's count is the sum over its non-pruned children
        if !row.children.is_empty() {
            let sum: u64 = row
                .children
                .iter()
                .map(|child| by_id[child])
                .filter(|child| !child.pruned)
                .map(|child| child.cliques_in_subtree)
                .sum();
            assert_eq!(row.cliques_in_subtree, sum);
        }

        // a maximal leaf has exhausted both X and P
        if row.children.is_empty() && row.cliques_in_subtree == 1 {
            assert_eq!(row.x_size, 0);
            assert_eq!(row.p_size, 0);
        }
    }
}

#[test]
fn export_csv_to_file_and_parse_back() {
    let mut graph = graph_of(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
    let (_, tree) = maximal_cliques_with_tree(&mut graph, SearchTreeConfig::default());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search_tree.csv");
    tree.export_csv(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let rows = parse_tree_csv(&bytes);

    assert_eq!(rows.len(), tree.len() + 1);
}
