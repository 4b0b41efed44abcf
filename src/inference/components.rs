//! Connected-component counting over small induced subgraphs.
//!
//! The objective function asks one question thousands of times per
//! iteration: how many components does this observation's sense set fall
//! into under the current edge set? Union-Find with path compression and
//! union by rank answers it without allocating adjacency lists.

/// Disjoint-set forest over `0..n`.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]); // path compression
        }
        self.parent[x]
    }

    pub fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        // union by rank
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }

    /// Number of disjoint sets.
    pub fn count(&mut self) -> usize {
        (0..self.parent.len()).filter(|&x| self.find(x) == x).count()
    }
}

/// Count connected components among `n` vertices whose adjacency is given
/// by the `linked` predicate. The predicate is queried once per unordered
/// pair, `i < j`.
pub fn count_components(n: usize, linked: impl Fn(usize, usize) -> bool) -> usize {
    let mut uf = UnionFind::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if linked(i, j) {
                uf.union(i, j);
            }
        }
    }
    uf.count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_links_means_all_singletons() {
        assert_eq!(count_components(5, |_, _| false), 5);
    }

    #[test]
    fn test_clique_is_one_component() {
        assert_eq!(count_components(6, |_, _| true), 1);
    }

    #[test]
    fn test_chain_is_one_component() {
        assert_eq!(count_components(4, |i, j| j == i + 1), 1);
    }

    #[test]
    fn test_disjoint_pairs() {
        // 0-1, 2-3, 4 isolated
        let linked = |i: usize, j: usize| (i, j) == (0, 1) || (i, j) == (2, 3);
        assert_eq!(count_components(5, linked), 3);
    }

    #[test]
    fn test_zero_vertices() {
        assert_eq!(count_components(0, |_, _| true), 0);
    }

    #[test]
    fn test_union_find_merges_and_counts() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.count(), 4);
        uf.union(0, 1);
        uf.union(1, 2);
        assert_eq!(uf.count(), 2);
        assert_eq!(uf.find(0), uf.find(2));
        assert_ne!(uf.find(0), uf.find(3));
        // redundant union is a no-op
        uf.union(2, 0);
        assert_eq!(uf.count(), 2);
    }
}
