//! Binary tree nodes and their element buffers.
//!
//! Every node owns a buffer of `(key, item)` elements and a *current key*:
//! the largest key that was ever sifted or pushed into the buffer. Selection
//! always compares current keys, never the keys of individual elements.

use std::fmt;
use std::mem;

use smallvec::SmallVec;

use crate::params::ErrorParameter;
use crate::rank::{self, Rank};

/// An inserted element. Its key is never modified after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element<T, P> {
    pub(crate) key: P,
    pub(crate) item: T,
}

/// Leaves and low-rank nodes hold one element, so one slot stays inline.
type Buffer<T, P> = SmallVec<[Element<T, P>; 1]>;

/// A node of a soft heap binary tree.
///
/// Both children, when present, have rank `rank - 1`. Sifting may detach
/// children, so a node keeps its rank even after it became a leaf.
pub(crate) struct TreeNode<T, P> {
    current_key: P,
    elements: Buffer<T, P>,
    rank: Rank,
    /// Target buffer length: `size / 2 <= elements.len() <= 3 * size`
    size: usize,
    left: Option<Box<TreeNode<T, P>>>,
    right: Option<Box<TreeNode<T, P>>>,
}

impl<T, P: Ord + Clone> TreeNode<T, P> {
    /// Creates a rank-0 node holding a single element.
    pub(crate) fn leaf(key: P, item: T) -> Self {
        let mut node = TreeNode {
            current_key: key.clone(),
            elements: SmallVec::new(),
            rank: 0,
            size: 1,
            left: None,
            right: None,
        };
        node.push(key, item);
        node
    }

    #[inline]
    pub(crate) fn rank(&self) -> Rank {
        self.rank
    }

    #[inline]
    pub(crate) fn current_key(&self) -> &P {
        &self.current_key
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element the next [`pop`](Self::pop) returns.
    #[inline]
    pub(crate) fn last(&self) -> Option<&Element<T, P>> {
        self.elements.last()
    }

    pub(crate) fn push(&mut self, key: P, item: T) {
        if key > self.current_key {
            self.current_key = key.clone();
        }
        self.elements.push(Element { key, item });
    }

    /// Removes the most recently buffered element.
    ///
    /// Always popping from the back keeps the current key an upper bound
    /// of every remaining element.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Element<T, P>> {
        self.elements.pop()
    }

    /// Returns true if the buffer dropped to half its bound or below.
    #[inline]
    pub(crate) fn needs_sift(&self) -> bool {
        self.elements.len() <= self.size / 2
    }

    /// Refills the buffer from the children.
    ///
    /// The child with the smaller current key donates its whole buffer and
    /// its current key, then refills itself recursively. A donor that is a
    /// leaf is empty afterwards and gets detached. Taking over the donor's
    /// current key is where corruption happens: it can be larger than keys
    /// already waiting in this buffer.
    pub(crate) fn sift(&mut self) {
        while self.elements.len() < self.size && !self.is_leaf() {
            let right_donates = match (&self.left, &self.right) {
                (None, _) => true,
                (Some(left), Some(right)) => left.current_key > right.current_key,
                (Some(_), None) => false,
            };
            if right_donates {
                mem::swap(&mut self.left, &mut self.right);
            }

            let Some(donor) = self.left.as_mut() else {
                break;
            };
            self.elements.extend(donor.elements.drain(..));
            if donor.is_leaf() {
                if let Some(spent) = self.left.take() {
                    self.current_key = spent.current_key;
                }
            } else {
                self.current_key = donor.current_key.clone();
                donor.sift();
            }
        }
    }

    /// Makes `self` and `other` the children of a new node that takes the
    /// place of `self`, then fills the new node's buffer.
    ///
    /// Both trees must have the same rank and non-empty root buffers.
    pub(crate) fn combine(&mut self, other: TreeNode<T, P>, params: &ErrorParameter) {
        debug_assert_eq!(self.rank, other.rank, "combining trees of unequal rank");
        let rank = rank::checked_increment(self.rank);
        let size = params.size_for(rank, self.size.max(other.size));
        let parent = TreeNode {
            // Placeholder: the first sift pass overwrites it.
            current_key: self.current_key.clone(),
            elements: SmallVec::new(),
            rank,
            size,
            left: None,
            right: None,
        };
        let child = mem::replace(self, parent);
        self.left = Some(Box::new(child));
        self.right = Some(Box::new(other));
        self.sift();
    }

    /// Number of elements buffered in this subtree.
    pub(crate) fn count(&self) -> usize {
        self.elements.len() + self.children().map(TreeNode::count).sum::<usize>()
    }

    /// Number of elements in this subtree whose key is below their node's
    /// current key.
    pub(crate) fn corrupted(&self) -> usize {
        let here = self
            .elements
            .iter()
            .filter(|element| element.key < self.current_key)
            .count();
        here + self.children().map(TreeNode::corrupted).sum::<usize>()
    }

    /// Checks the structural invariants of this subtree.
    ///
    /// - children have rank `rank - 1` and a current key no smaller than ours
    /// - the current key bounds every buffered key
    /// - buffers hold at most `3 * size` elements
    /// - nodes below the root never sit with an empty buffer
    pub(crate) fn verify(&self, is_root: bool) -> bool {
        if !is_root && self.elements.is_empty() {
            return false;
        }
        if self.elements.len() > 3 * self.size {
            return false;
        }
        if self.elements.iter().any(|e| e.key > self.current_key) {
            return false;
        }
        self.children().all(|child| {
            self.rank > 0
                && child.rank == rank::saturating_decrement(self.rank)
                && child.current_key >= self.current_key
                && child.verify(false)
        })
    }

    fn children(&self) -> impl Iterator<Item = &TreeNode<T, P>> {
        self.left.iter().chain(self.right.iter()).map(|child| &**child)
    }
}

impl<T: fmt::Debug, P: fmt::Debug> TreeNode<T, P> {
    pub(crate) fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}[rank: {}; key: {:?}; size: {}; elements: [",
            "", self.rank, self.current_key, self.size
        )?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", element.key, element.item)?;
        }
        writeln!(f, "]]")?;
        for child in self.left.iter().chain(self.right.iter()) {
            child.write_tree(f, indent + 2)?;
        }
        Ok(())
    }
}
