//! Disjoint-set forest with path compression and union by rank.
//!
//! [`UnionFind`] works on dense `usize` indices and backs Kruskal's
//! algorithm. [`KeyedUnionFind`] keeps the string-identifier contract for
//! callers that only have vertex ids, remapping each id to a dense index once
//! at construction so that `find`/`union` never hash on the parent chain.

use std::collections::HashMap;

/// Disjoint-set forest over the indices `0..len`.
///
/// # Examples
/// ```
/// use spanwise_core::UnionFind;
///
/// let mut sets = UnionFind::new(4);
/// assert!(sets.union(0, 1));
/// assert!(!sets.union(1, 0));
/// assert_eq!(sets.find(1), sets.find(0));
/// assert_eq!(sets.component_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl UnionFind {
    /// Creates `len` singleton sets, each element parented to itself.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Returns the number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when no elements are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `node`, re-parenting every node
    /// on the path directly to that root.
    ///
    /// # Panics
    /// Panics when `node >= self.len()`.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `false` when they were already in the same set.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        self.union_roots(left_root, right_root)
    }

    /// Merges two sets given their roots, skipping the `find` calls.
    ///
    /// The lower-rank root is attached under the higher-rank one; on equal
    /// ranks `right_root` goes under `left_root`, whose rank grows by one.
    pub(crate) fn union_roots(&mut self, left_root: usize, right_root: usize) -> bool {
        if left_root == right_root {
            return false;
        }
        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        let (parent, child) = if left_rank < right_rank {
            (right_root, left_root)
        } else {
            (left_root, right_root)
        };
        self.parent[child] = parent;
        if left_rank == right_rank {
            self.rank[parent] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }

    /// Returns `true` when `left` and `right` share a root.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    pub fn connected(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Returns the number of distinct roots across all tracked elements.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.components }
}

/// Disjoint-set forest addressed by vertex identifier.
///
/// # Examples
/// ```
/// use spanwise_core::KeyedUnionFind;
///
/// let mut sets = KeyedUnionFind::new(["A", "B", "C"]);
/// assert_eq!(sets.union("A", "B"), Some(true));
/// assert_eq!(sets.union("B", "A"), Some(false));
/// assert_eq!(sets.union("A", "Z"), None);
/// assert_eq!(sets.component_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct KeyedUnionFind<'a> {
    index: HashMap<&'a str, usize>,
    sets: UnionFind,
}

impl<'a> KeyedUnionFind<'a> {
    /// Creates a singleton set for every distinct identifier.
    pub fn new(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = HashMap::new();
        for id in ids {
            let next = index.len();
            index.entry(id).or_insert(next);
        }
        let sets = UnionFind::new(index.len());
        Self { index, sets }
    }

    /// Returns the dense index of the root of `id`'s set, or `None` for an
    /// untracked identifier.
    pub fn find(&mut self, id: &str) -> Option<usize> {
        let node = *self.index.get(id)?;
        Some(self.sets.find(node))
    }

    /// Merges the sets of `left` and `right`.
    ///
    /// Returns `None` when either identifier is untracked, otherwise whether a
    /// merge happened.
    pub fn union(&mut self, left: &str, right: &str) -> Option<bool> {
        let left = *self.index.get(left)?;
        let right = *self.index.get(right)?;
        Some(self.sets.union(left, right))
    }

    /// Returns the number of distinct sets.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sets.component_count()
    }
}
