//! Soft Heap implementation
//!
//! A soft heap is a priority queue that may *corrupt* keys: it sometimes
//! raises the key an element is ordered by above the key it was inserted
//! with. In exchange, a soft heap with error parameter ε supports
//! - O(1) amortized insert and meld
//! - O(log(1/ε)) amortized extract-min
//!
//! and the number of corrupted elements stays proportional to ε·n, where n
//! counts insertions. For ε ≤ 0.2 it stays below ε·n. Larger ε can exceed
//! that (about 0.56·n at ε = 0.5), most of all when n is a power of two and
//! the heap is a single tree.
//!
//! # Algorithm Overview
//!
//! The heap is a list of binary trees sorted by strictly increasing rank,
//! just like the digits of a binary counter:
//!
//! - **Tree nodes** buffer several elements behind one *current key*, the
//!   largest key that entered the buffer. Nodes of rank above the threshold
//!   `r = ceil(log₂(1/ε)) + 2` have buffers that grow by 1.5× per rank.
//! - **Sift** refills a buffer from the child with the smaller current key
//!   and adopts that child's current key. This is the only source of
//!   corruption.
//! - **Meld** merges two tree lists by rank and combines equal-rank
//!   neighbours (carry propagation). Combining two trees creates a parent
//!   and sifts into it.
//! - **Suffix minimum**: every list entry caches the entry at or after it
//!   with the smallest root current key, so the head finds the minimum in O(1).
//! - **Extract-min** pops from the root buffer of the minimum tree. Once the
//!   buffer is at half capacity or less it is sifted; fully drained trees are
//!   unlinked.
//!
//! Elements keep their original key. Corrupted keys only decide the order
//! of extraction, so every popped pair is exactly a pair that was inserted.
//!
//! # Example
//!
//! ```rust
//! use rust_soft_heap::soft_heap::SoftHeap;
//!
//! let mut heap = SoftHeap::with_error_parameter(0.25).unwrap();
//! for key in [5, 3, 8, 1] {
//!     heap.insert(key, key * 10);
//! }
//! assert_eq!(heap.extract_min(), Some((1, 10)));
//! assert_eq!(heap.len(), 3);
//! ```

mod dump;
mod node;
mod tree_list;

use log::debug;

use crate::params::ErrorParameter;
use crate::rank::Rank;
use crate::traits::{Heap, HeapError};
use node::TreeNode;
use tree_list::TreeList;

pub use dump::Dump;

/// An element returned by [`SoftHeap::extract_min_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T, P> {
    /// The key the element was inserted with
    pub key: P,
    /// The inserted item
    pub item: T,
    /// The current key that selected this element; never below `key`
    pub current_key: P,
}

impl<T, P: Ord> Extracted<T, P> {
    /// Returns true if the element was ordered by a raised key.
    pub fn is_corrupted(&self) -> bool {
        self.key < self.current_key
    }
}

/// Soft Heap
///
/// Melding consumes the other heap, so a melded-away heap cannot be used
/// again. There is no arbitrary deletion; only extract-min removes elements.
///
/// # Example
///
/// ```rust
/// use rust_soft_heap::soft_heap::SoftHeap;
/// use rust_soft_heap::Heap;
///
/// let mut left = SoftHeap::new();
/// left.push(2, "two");
/// left.push(4, "four");
/// let mut right = SoftHeap::new();
/// right.push(1, "one");
/// right.push(3, "three");
///
/// left.meld(right);
/// assert_eq!(left.len(), 4);
/// assert_eq!(left.pop(), Some((1, "one")));
/// ```
pub struct SoftHeap<T, P> {
    trees: TreeList<T, P>,
    params: ErrorParameter,
    /// Number of elements in the heap
    len: usize,
}

impl<T, P: Ord + Clone> Heap<T, P> for SoftHeap<T, P> {
    fn new() -> Self {
        Self::with_params(ErrorParameter::default())
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        SoftHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min()
    }

    fn merge(&mut self, other: Self) {
        self.meld(other);
    }
}

impl<T, P: Ord + Clone> Default for SoftHeap<T, P> {
    fn default() -> Self {
        Self::with_params(ErrorParameter::default())
    }
}

impl<T, P: Ord + Clone> SoftHeap<T, P> {
    /// Creates an empty heap allowing an `epsilon` fraction of corrupted keys.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::InvalidErrorParameter`] unless `0 < epsilon < 1`.
    pub fn with_error_parameter(epsilon: f64) -> Result<Self, HeapError> {
        ErrorParameter::new(epsilon).map(Self::with_params)
    }

    /// Creates an empty heap from an already validated error parameter.
    pub fn with_params(params: ErrorParameter) -> Self {
        debug!(
            "soft heap with epsilon {} (exact up to rank {})",
            params.epsilon(),
            params.threshold()
        );
        Self {
            trees: TreeList::default(),
            params,
            len: 0,
        }
    }

    /// The error parameter this heap combines trees with.
    #[inline]
    pub fn error_parameter(&self) -> ErrorParameter {
        self.params
    }

    /// Number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest tree rank in the heap, 0 when empty.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.trees.rank()
    }

    /// Number of trees in the rank list.
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Inserts `item` with `key`.
    ///
    /// **Time Complexity**: O(1) amortized
    ///
    /// The element becomes a one-node heap of rank 0 that is melded into
    /// this one.
    pub fn insert(&mut self, key: P, item: T) {
        let singleton = TreeList::singleton(TreeNode::leaf(key, item));
        self.trees.meld(singleton, &self.params);
        self.len += 1;
        self.debug_check();
    }

    /// Melds `other` into this heap, consuming it.
    ///
    /// **Time Complexity**: O(number of trees moved + carries)
    ///
    /// The list of the lower-rank heap is moved into the higher-rank one, so
    /// only the shorter list gets re-keyed. This heap's error parameter
    /// governs all later combines.
    pub fn meld(&mut self, mut other: Self) {
        if other.is_empty() {
            return;
        }
        if self.trees.rank() < other.trees.rank() {
            std::mem::swap(&mut self.trees, &mut other.trees);
        }
        self.trees.meld(other.trees, &self.params);
        self.len += other.len;
        self.debug_check();
    }

    /// Returns the element the next extraction would return.
    pub fn peek(&self) -> Option<(&P, &T)> {
        let element = self.trees.min_root()?.last()?;
        Some((&element.key, &element.item))
    }

    /// The smallest current key among all trees.
    ///
    /// This is the (possibly corrupted) key the next extraction is selected
    /// by. It is never smaller than the key returned by [`peek`](Self::peek).
    pub fn min_current_key(&self) -> Option<&P> {
        self.trees.min_root().map(TreeNode::current_key)
    }

    /// Removes and returns an element whose current key is minimal.
    ///
    /// **Time Complexity**: O(log(1/ε)) amortized
    ///
    /// Returns `None` without touching the heap if it is empty. The returned
    /// key is the element's original key.
    pub fn extract_min(&mut self) -> Option<(P, T)> {
        self.take_min().map(|element| (element.key, element.item))
    }

    /// Like [`extract_min`](Self::extract_min), additionally reporting the
    /// current key the element was selected by.
    pub fn extract_min_entry(&mut self) -> Option<Extracted<T, P>> {
        let current_key = self.min_current_key()?.clone();
        let element = self.take_min()?;
        Some(Extracted {
            key: element.key,
            item: element.item,
            current_key,
        })
    }

    fn take_min(&mut self) -> Option<node::Element<T, P>> {
        let min = self.trees.suffix_min()?;
        let (element, drained) = self.trees.extract_from(min)?;
        if drained {
            self.trees.remove(min);
        }
        self.len -= 1;
        self.debug_check();
        Some(element)
    }

    /// Number of elements currently ordered by a key larger than their own.
    ///
    /// **Time Complexity**: O(n)
    pub fn corrupted_count(&self) -> usize {
        self.trees.roots().map(TreeNode::corrupted).sum()
    }

    /// Checks every structural invariant of the heap.
    ///
    /// **Time Complexity**: O(n)
    ///
    /// - tree list ranks strictly increase from head to tail
    /// - every cached suffix minimum holds the smallest current key after it
    /// - children have rank one below their parent and current keys no
    ///   smaller than their parent's
    /// - every buffered key is at most its node's current key
    /// - root buffers are never empty and the element count matches `len`
    pub fn verify_invariants(&self) -> bool {
        self.trees.is_consistent()
            && self.trees.roots().all(|root| !root.is_empty() && root.verify(true))
            && self.trees.roots().map(TreeNode::count).sum::<usize>() == self.len
    }

    /// List-level checks after every mutation in debug builds, O(number of trees).
    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.trees.is_consistent(),
            "tree list out of rank order or stale suffix minimum"
        );
        debug_assert_eq!(self.trees.is_empty(), self.len == 0);
    }
}
