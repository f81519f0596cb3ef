use crate::prelude::Idx;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Controls what the search-tree recorder captures.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchTreeConfig {
    /// Also descend into the branches the pivot rule skips. Shadow
    /// branches never contribute to the clique count; they only populate
    /// the tree so a visualization can contrast explored and pruned
    /// search space.
    pub explore_pruned: bool,
}

impl SearchTreeConfig {
    pub fn new(explore_pruned: bool) -> Self {
        Self { explore_pruned }
    }
}

impl Default for SearchTreeConfig {
    fn default() -> Self {
        Self {
            explore_pruned: true,
        }
    }
}

/// One recorded invocation of the enumerator.
#[derive(Debug, Clone)]
pub struct TreeNode<NI> {
    pub id: usize,
    /// `None` for outer roots; those are aggregated under a synthetic
    /// root row in the CSV export.
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub cliques_in_subtree: u64,
    pub creation_order: usize,
    pub depth: usize,
    /// The node whose addition to the current clique produced this
    /// invocation; `None` for outer roots.
    pub candidate: Option<NI>,
    /// Snapshot of the current clique at entry.
    pub clique: Vec<NI>,
    pub x_size: usize,
    pub p_size: usize,
    /// Set on the first invocation of a branch the pivot rule would have
    /// skipped. Descendants of such a node are recorded as ordinary
    /// nodes; the whole subtree counts as pruned.
    pub pruned_by_pivot: bool,
}

/// Aggregate statistics over a recorded search tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub explored: usize,
    pub pruned: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

impl TreeStats {
    /// Fraction of recorded nodes that live inside pruned subtrees.
    pub fn pruning_ratio(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.pruned as f64 / self.nodes as f64
        }
    }
}

/// The recursion tree explored by one enumeration run.
///
/// Nodes are appended in creation order, so a parent id is always smaller
/// than the ids of its children.
#[derive(Debug, Clone)]
pub struct SearchTree<NI> {
    nodes: Vec<TreeNode<NI>>,
}

impl<NI> Default for SearchTree<NI> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

pub(crate) const CSV_HEADER: &str = "node_id,parent_id,children_ids,cliques_in_subtree,\
creation_order,depth,candidate_vertex,current_clique,x_size,p_size,pruned_by_pivot";

impl<NI: Idx> SearchTree<NI> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TreeNode<NI>] {
        &self.nodes
    }

    pub fn get(&self, id: usize) -> Option<&TreeNode<NI>> {
        self.nodes.get(id)
    }

    pub(crate) fn open_node(
        &mut self,
        parent: Option<usize>,
        candidate: Option<NI>,
        clique: &[NI],
        x_size: usize,
        p_size: usize,
        pruned_by_pivot: bool,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            id,
            parent,
            children: Vec::new(),
            cliques_in_subtree: 0,
            creation_order: id,
            depth: clique.len(),
            candidate,
            clique: clique.to_vec(),
            x_size,
            p_size,
            pruned_by_pivot,
        });
        id
    }

    pub(crate) fn close_node(&mut self, id: usize, cliques_in_subtree: u64) {
        self.nodes[id].cliques_in_subtree = cliques_in_subtree;
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.push(id);
        }
    }

    pub fn stats(&self) -> TreeStats {
        let mut in_shadow = vec![false; self.nodes.len()];
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            ..TreeStats::default()
        };

        for node in &self.nodes {
            let shadow =
                node.pruned_by_pivot || node.parent.map_or(false, |parent| in_shadow[parent]);
            in_shadow[node.id] = shadow;

            if shadow {
                stats.pruned += 1;
            } else {
                stats.explored += 1;
            }
            if node.children.is_empty() {
                stats.leaves += 1;
            }
            stats.max_depth = usize::max(stats.max_depth, node.depth);
        }

        stats
    }

    /// Writes the tree in the fixed CSV schema.
    ///
    /// The list-valued columns `children_ids` and `current_clique` are
    /// always quoted and use `;` as the intra-field separator. A synthetic
    /// root row with `node_id = -1` and `parent_id = -2` aggregates all
    /// outer roots.
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", CSV_HEADER)?;

        let roots = self.nodes.iter().filter(|node| node.parent.is_none());
        let root_ids = join(roots.clone().map(|node| node.id));
        let root_cliques: u64 = roots.map(|node| node.cliques_in_subtree).sum();
        writeln!(out, "-1,-2,\"{root_ids}\",{root_cliques},-1,0,-1,\"\",0,0,false")?;

        for node in &self.nodes {
            let parent = node.parent.map_or(-1, |parent| parent as i64);
            let candidate = node
                .candidate
                .map_or(-1, |candidate| candidate.index() as i64);
            let children = join(node.children.iter().copied());
            let clique = join(node.clique.iter().map(|member| member.index()));
            writeln!(
                out,
                "{},{},\"{}\",{},{},{},{},\"{}\",{},{},{}",
                node.id,
                parent,
                children,
                node.cliques_in_subtree,
                node.creation_order,
                node.depth,
                candidate,
                clique,
                node.x_size,
                node.p_size,
                node.pruned_by_pivot
            )?;
        }

        Ok(())
    }

    /// Writes the tree as CSV to the given file path.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_csv(&mut out)?;
        out.flush()
    }
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(";")
}
