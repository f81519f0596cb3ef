use crate::degeneracy::{degeneracy_order, DegeneracyOrder};
use crate::prelude::*;
use crate::search_tree::{SearchTree, SearchTreeConfig};

use bitvec::prelude::*;
use log::info;
use num_format::{Locale, ToFormattedString};

use std::time::Instant;

const UNPOSITIONED: usize = usize::MAX;

/// Counts all maximal cliques of the given undirected simple graph.
///
/// The enumeration is a pivoted Bron–Kerbosch search driven by a
/// degeneracy ordering. Neighbor lists are permuted in place while the
/// search runs; afterwards every list still holds the same neighbor set,
/// though possibly in a different order.
///
/// # Example
///
/// ```
/// use cliques::prelude::*;
///
/// let mut graph: UndirectedALGraph<u32> = GraphBuilder::new()
///     .edges(vec![(0, 1), (0, 2), (1, 2), (2, 3)])
///     .build();
///
/// assert_eq!(maximal_cliques(&mut graph), 2);
/// ```
pub fn maximal_cliques<NI: Idx>(graph: &mut UndirectedALGraph<NI>) -> u64 {
    let start = Instant::now();

    let mut enumerator = Enumerator::new(graph, None);
    let count = enumerator.run();

    info!(
        "Enumerated {} maximal cliques in {:?}",
        count.to_formatted_string(&Locale::en),
        start.elapsed()
    );

    count
}

/// Counts all maximal cliques and records the recursion tree.
///
/// The count is identical to [`maximal_cliques`] on the same graph.
/// Depending on the configuration, the recorder additionally descends
/// into the branches the pivot rule skips; those shadow branches never
/// contribute to the returned count.
pub fn maximal_cliques_with_tree<NI: Idx>(
    graph: &mut UndirectedALGraph<NI>,
    config: SearchTreeConfig,
) -> (u64, SearchTree<NI>) {
    let start = Instant::now();

    let mut enumerator = Enumerator::new(graph, Some(config));
    let count = enumerator.run();
    let tree = enumerator.tree.take().unwrap_or_default();

    info!(
        "Enumerated {} maximal cliques ({} search tree nodes) in {:?}",
        count.to_formatted_string(&Locale::en),
        tree.len().to_formatted_string(&Locale::en),
        start.elapsed()
    );

    (count, tree)
}

/// The in-place enumeration state.
///
/// All nodes currently in X or P live in the shared array `vl`:
/// X occupies `vl[x_begin..p_begin)`, P occupies `vl[p_begin..e_end)`.
/// `pos` maps every placed node to its index in `vl`. The current clique
/// grows and shrinks in `r`.
///
/// Neighbor lists of window members keep their P members first (the
/// P-prefix); every scan over a list stops at the first entry outside the
/// current P window. Each recursive call re-establishes the prefix of its
/// parent before returning, so the parent can keep iterating candidates.
struct Enumerator<'g, NI: Idx> {
    graph: &'g mut UndirectedALGraph<NI>,
    ordering: DegeneracyOrder<NI>,
    vl: Vec<NI>,
    pos: Vec<usize>,
    r: Vec<NI>,
    marks: BitVec,
    tree: Option<SearchTree<NI>>,
    explore_pruned: bool,
}

/// Window-local backup taken before descending into a shadow branch.
///
/// A shadow branch bypasses the usual step-by-step undo, so the slice of
/// `vl` it can touch and the neighbor lists of its window members are
/// copied up front and written back wholesale afterwards.
struct WindowSnapshot<NI> {
    members: Vec<NI>,
    lists: Vec<Vec<NI>>,
}

impl<'g, NI: Idx> Enumerator<'g, NI> {
    fn new(graph: &'g mut UndirectedALGraph<NI>, config: Option<SearchTreeConfig>) -> Self {
        let ordering = degeneracy_order(&*graph);
        let node_count = graph.node_count().index();

        Self {
            graph,
            ordering,
            vl: Vec::new(),
            pos: vec![UNPOSITIONED; node_count],
            r: Vec::new(),
            marks: bitvec![0; node_count],
            tree: config.map(|_| SearchTree::new()),
            explore_pruned: config.map_or(false, |config| config.explore_pruned),
        }
    }

    fn run(&mut self) -> u64 {
        let node_count = self.graph.node_count().index();
        let mut total = 0;

        for i in 0..node_count {
            let outer = self.ordering.order[i];
            let (p_begin, e_end) = self.init_outer(outer);

            self.r.push(outer);
            total += self.enumerate(0, p_begin, e_end, None, None, false);
            self.r.pop();

            self.teardown_outer();
        }

        total
    }

    /// Lays the neighbors of `outer` into `vl` as `[X | P]`: neighbors
    /// ranked before `outer` are excluded, neighbors ranked after are
    /// candidates. Establishes the P-prefix on the neighbor list of every
    /// window member.
    fn init_outer(&mut self, outer: NI) -> (usize, usize) {
        let rank = &self.ordering.rank;
        let outer_rank = rank[outer.index()];

        self.vl.clear();
        for &u in self.graph.neighbors(outer) {
            if rank[u.index()] < outer_rank {
                self.vl.push(u);
            }
        }
        let p_begin = self.vl.len();
        for &u in self.graph.neighbors(outer) {
            if rank[u.index()] > outer_rank {
                self.vl.push(u);
            }
        }
        let e_end = self.vl.len();

        for (i, &u) in self.vl.iter().enumerate() {
            self.pos[u.index()] = i;
        }

        for i in 0..e_end {
            let u = self.vl[i];
            let list = self.graph.neighbors_mut(u);
            let mut front = 0;
            for k in 0..list.len() {
                let p = self.pos[list[k].index()];
                if p >= p_begin && p < e_end {
                    list.swap(k, front);
                    front += 1;
                }
            }
        }

        (p_begin, e_end)
    }

    fn teardown_outer(&mut self) {
        for &u in &self.vl {
            self.pos[u.index()] = UNPOSITIONED;
        }
    }

    /// One invocation of the pivoted search on the window
    /// `vl[x_begin..e_end)` with P starting at `p_begin`.
    fn enumerate(
        &mut self,
        x_begin: usize,
        p_begin: usize,
        e_end: usize,
        parent: Option<usize>,
        candidate: Option<NI>,
        shadow: bool,
    ) -> u64 {
        let node = self.tree.as_mut().map(|tree| {
            tree.open_node(
                parent,
                candidate,
                &self.r,
                p_begin - x_begin,
                e_end - p_begin,
                shadow,
            )
        });

        let count = if p_begin == e_end {
            // P is exhausted. Only a simultaneously empty X makes the
            // current clique maximal; otherwise it extends a clique that
            // was already reported.
            u64::from(x_begin == e_end)
        } else {
            self.branch(x_begin, p_begin, e_end, node)
        };

        if let (Some(tree), Some(id)) = (self.tree.as_mut(), node) {
            tree.close_node(id, count);
        }

        count
    }

    fn branch(&mut self, x_begin: usize, p_begin: usize, e_end: usize, node: Option<usize>) -> u64 {
        let pivot = self.select_pivot(x_begin, p_begin, e_end);
        let candidates = self.collect_candidates(pivot, p_begin, e_end);

        let mut cliques = 0;
        let mut pb = p_begin;
        for &c in &candidates {
            let (num_x, num_p) = self.restrict(c, x_begin, pb, e_end);

            self.r.push(c);
            cliques += self.enumerate(pb - num_x, pb, pb + num_p, node, Some(c), false);
            self.r.pop();

            self.restore_lists(c, pb - num_x, pb + num_p, pb, e_end);

            // c becomes the right end of X; the remaining candidates see
            // it as excluded
            let at = self.pos[c.index()];
            self.swap_vl(pb, at);
            pb += 1;
        }

        // Relabel the consumed candidates back into P. They occupy
        // `vl[p_begin..pb)` and their list re-insertions above left every
        // P-prefix contiguous for the widened window.
        debug_assert_eq!(pb - candidates.len(), p_begin);

        if self.tree.is_some() && self.explore_pruned {
            self.explore_shadows(pivot, x_begin, p_begin, e_end, node);
        }

        cliques
    }

    /// Picks the window member with the largest candidate-degree
    /// `|N(u) ∩ P|`. The count walks the P-prefix of `u`'s neighbor list
    /// and stops at the first entry outside the P window.
    fn select_pivot(&self, x_begin: usize, p_begin: usize, e_end: usize) -> NI {
        let mut pivot = self.vl[x_begin];
        let mut best = self.candidate_degree(pivot, p_begin, e_end);

        for i in (x_begin + 1)..e_end {
            let u = self.vl[i];
            let count = self.candidate_degree(u, p_begin, e_end);
            if count > best {
                pivot = u;
                best = count;
            }
        }

        pivot
    }

    fn candidate_degree(&self, u: NI, p_begin: usize, e_end: usize) -> usize {
        let mut count = 0;
        for &w in self.graph.neighbors(u) {
            let p = self.pos[w.index()];
            if p < p_begin || p >= e_end {
                break;
            }
            count += 1;
        }
        count
    }

    /// The branching candidates `P \ N(pivot)`, in window order.
    fn collect_candidates(&mut self, pivot: NI, p_begin: usize, e_end: usize) -> Vec<NI> {
        for &w in self.graph.neighbors(pivot) {
            let p = self.pos[w.index()];
            if p < p_begin || p >= e_end {
                break;
            }
            self.marks.set(w.index(), true);
        }

        let mut candidates = Vec::with_capacity(e_end - p_begin);
        for j in p_begin..e_end {
            let v = self.vl[j];
            if !self.marks[v.index()] {
                candidates.push(v);
            }
        }

        for &w in self.graph.neighbors(pivot) {
            let p = self.pos[w.index()];
            if p < p_begin || p >= e_end {
                break;
            }
            self.marks.set(w.index(), false);
        }

        candidates
    }

    /// Shrinks the window to the neighbors of `c`.
    ///
    /// X members adjacent to `c` are swapped to the right end of X, P
    /// members adjacent to `c` to the front of P, so the child window is
    /// `vl[p_begin - num_x..p_begin + num_p)` with `p_begin` unchanged.
    /// Re-establishes the P-prefix on the neighbor lists of all child
    /// window members.
    fn restrict(&mut self, c: NI, x_begin: usize, p_begin: usize, e_end: usize) -> (usize, usize) {
        let mut num_x = 0;
        let mut j = p_begin;
        while j > x_begin {
            j -= 1;
            let u = self.vl[j];
            if self.is_prefix_neighbor(u, c, p_begin, e_end) {
                num_x += 1;
                self.swap_vl(j, p_begin - num_x);
            }
        }

        let mut num_p = 0;
        let mut k = 0;
        loop {
            let Some(&w) = self.graph.neighbors(c).as_slice().get(k) else {
                break;
            };
            let p = self.pos[w.index()];
            if p < p_begin || p >= e_end {
                break;
            }
            self.swap_vl(p, p_begin + num_p);
            num_p += 1;
            k += 1;
        }

        for i in (p_begin - num_x)..(p_begin + num_p) {
            let u = self.vl[i];
            let list = self.graph.neighbors_mut(u);
            let mut front = 0;
            for k in 0..list.len() {
                let p = self.pos[list[k].index()];
                if p < p_begin || p >= e_end {
                    break;
                }
                if p < p_begin + num_p {
                    list.swap(k, front);
                    front += 1;
                }
            }
        }

        (num_x, num_p)
    }

    /// Whether `u` is adjacent to `c`, given that `c` is in the current
    /// P window. The P-prefix of `u`'s list is the only region that can
    /// contain `c`, so the scan stops at the first out-of-window entry.
    fn is_prefix_neighbor(&self, u: NI, c: NI, p_begin: usize, e_end: usize) -> bool {
        for &w in self.graph.neighbors(u) {
            let p = self.pos[w.index()];
            if p < p_begin || p >= e_end {
                return false;
            }
            if w == c {
                return true;
            }
        }
        false
    }

    /// Undoes the list-level effect of branching on `c`: every child
    /// window member is adjacent to `c`, and `c` must leave its P-prefix
    /// before `c` itself moves into X. Rotating `c` to the end of the
    /// prefix keeps the list a permutation of the neighbor set.
    fn restore_lists(
        &mut self,
        c: NI,
        window_begin: usize,
        window_end: usize,
        p_begin: usize,
        e_end: usize,
    ) {
        for i in window_begin..window_end {
            let u = self.vl[i];
            let list = self.graph.neighbors_mut(u);

            let at = list
                .iter()
                .position(|&w| w == c)
                .expect("branch vertex missing from a window neighbor list");

            let mut end = at + 1;
            while end < list.len() {
                let p = self.pos[list[end].index()];
                if p < p_begin || p >= e_end {
                    break;
                }
                end += 1;
            }

            list[at..end].rotate_left(1);
        }
    }

    /// Descends once into every branch the pivot rule skipped, recording
    /// the resulting subtrees. Counts below a shadow edge are discarded;
    /// the state is restored from a window snapshot instead of the usual
    /// undo steps.
    fn explore_shadows(
        &mut self,
        pivot: NI,
        x_begin: usize,
        p_begin: usize,
        e_end: usize,
        node: Option<usize>,
    ) {
        let mut pruned = Vec::new();
        for &w in self.graph.neighbors(pivot) {
            let p = self.pos[w.index()];
            if p < p_begin || p >= e_end {
                break;
            }
            pruned.push(w);
        }

        for c in pruned {
            let snapshot = self.snapshot_window(x_begin, e_end);
            let (num_x, num_p) = self.restrict(c, x_begin, p_begin, e_end);

            self.r.push(c);
            let _ = self.enumerate(p_begin - num_x, p_begin, p_begin + num_p, node, Some(c), true);
            self.r.pop();

            self.restore_window(snapshot, x_begin);
        }
    }

    fn snapshot_window(&self, x_begin: usize, e_end: usize) -> WindowSnapshot<NI> {
        let members = self.vl[x_begin..e_end].to_vec();
        let lists = members
            .iter()
            .map(|&u| self.graph.neighbors(u).as_slice().to_vec())
            .collect();

        WindowSnapshot { members, lists }
    }

    fn restore_window(&mut self, snapshot: WindowSnapshot<NI>, x_begin: usize) {
        for (offset, &u) in snapshot.members.iter().enumerate() {
            self.vl[x_begin + offset] = u;
            self.pos[u.index()] = x_begin + offset;
        }
        for (&u, list) in snapshot.members.iter().zip(&snapshot.lists) {
            self.graph.neighbors_mut(u).copy_from_slice(list);
        }
    }

    fn swap_vl(&mut self, a: usize, b: usize) {
        self.vl.swap(a, b);
        self.pos[self.vl[a].index()] = a;
        self.pos[self.vl[b].index()] = b;
    }
}
