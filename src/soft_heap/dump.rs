//! Human-readable printout of a soft heap's trees.

use std::fmt;

use super::SoftHeap;

/// Displays every tree of a [`SoftHeap`], head first.
///
/// Created by [`SoftHeap::dump`].
///
/// ```rust
/// use rust_soft_heap::soft_heap::SoftHeap;
///
/// let mut heap = SoftHeap::default();
/// heap.insert(2, 'b');
/// heap.insert(1, 'a');
/// assert_eq!(
///     heap.dump().to_string(),
///     "tree 0 (rank 1):\n  [rank: 1; key: 1; size: 1; elements: [1: 'a']]\n    [rank: 0; key: 2; size: 1; elements: [2: 'b']]\n"
/// );
/// ```
pub struct Dump<'a, T, P> {
    heap: &'a SoftHeap<T, P>,
}

impl<T: fmt::Debug, P: Ord + Clone + fmt::Debug> fmt::Display for Dump<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.heap.trees.is_empty() {
            return writeln!(f, "(empty)");
        }
        for (i, root) in self.heap.trees.roots().enumerate() {
            writeln!(f, "tree {} (rank {}):", i, root.rank())?;
            root.write_tree(f, 2)?;
        }
        Ok(())
    }
}

impl<T, P: Ord + Clone> SoftHeap<T, P> {
    /// Returns a [`Display`](fmt::Display) adapter printing the tree list.
    pub fn dump(&self) -> Dump<'_, T, P> {
        Dump { heap: self }
    }
}

#[cfg(test)]
mod tests {
    use crate::soft_heap::SoftHeap;

    #[test]
    fn test_dump_empty() {
        let heap: SoftHeap<u8, u8> = SoftHeap::default();
        assert_eq!(heap.dump().to_string(), "(empty)\n");
    }

    #[test]
    fn test_dump_lists_each_tree() {
        let mut heap = SoftHeap::default();
        for key in [4, 6, 5] {
            heap.insert(key, ());
        }
        let text = heap.dump().to_string();
        assert!(text.starts_with("tree 0 (rank 0):\n  [rank: 0; key: 5;"));
        assert!(text.contains("tree 1 (rank 1):\n  [rank: 1; key: 4;"));
    }
}
