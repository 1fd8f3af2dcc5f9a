//! Union-Find over dense station indices, used for component counting.

pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
    components: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    pub fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);

        if rx == ry {
            return;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        self.components -= 1;
    }

    /// Number of disjoint sets
    pub fn components(&self) -> usize {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_reduces_components() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.components(), 4);

        uf.union(0, 1);
        uf.union(2, 3);
        assert_eq!(uf.components(), 2);
        assert_ne!(uf.find(0), uf.find(2));

        uf.union(1, 3);
        assert_eq!(uf.components(), 1);
        assert_eq!(uf.find(0), uf.find(2));
    }

    #[test]
    fn test_repeated_union_is_noop() {
        let mut uf = UnionFind::new(2);
        uf.union(0, 1);
        uf.union(1, 0);
        uf.union(0, 0);
        assert_eq!(uf.components(), 1);
    }
}
