//! The rank-ordered list of trees.
//!
//! List entries live in a [`SlotMap`] arena; `prev`, `next` and `suffmin`
//! are arena keys, so the list needs no reference counting and has no
//! ownership cycles. Each entry caches `suffmin`, the entry at or after it
//! whose root has the smallest current key. The head's `suffmin` is thus the
//! tree to extract from.
//!
//! Ranks strictly increase from head to tail outside of [`TreeList::meld`].

use std::iter;

use log::trace;
use slotmap::{new_key_type, SlotMap};

use super::node::{Element, TreeNode};
use crate::params::ErrorParameter;
use crate::rank::Rank;

new_key_type! {
    /// Arena key of a tree list entry
    pub(crate) struct TreeKey;
}

struct TreeListNode<T, P> {
    root: TreeNode<T, P>,
    prev: Option<TreeKey>,
    next: Option<TreeKey>,
    /// Entry at or after this one whose root has the smallest current key
    suffmin: TreeKey,
}

pub(crate) struct TreeList<T, P> {
    nodes: SlotMap<TreeKey, TreeListNode<T, P>>,
    head: Option<TreeKey>,
    tail: Option<TreeKey>,
}

impl<T, P> Default for TreeList<T, P> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }
}

impl<T, P: Ord + Clone> TreeList<T, P> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of trees in the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Rank of the tail, which is the largest rank in the list.
    pub(crate) fn rank(&self) -> Rank {
        self.tail.map_or(0, |tail| self.nodes[tail].root.rank())
    }

    /// Entry whose root has the globally smallest current key.
    #[inline]
    pub(crate) fn suffix_min(&self) -> Option<TreeKey> {
        self.head.map(|head| self.nodes[head].suffmin)
    }

    /// Root of the tree the next extraction reads from.
    pub(crate) fn min_root(&self) -> Option<&TreeNode<T, P>> {
        self.suffix_min().map(|key| &self.nodes[key].root)
    }

    /// Roots from head to tail.
    pub(crate) fn roots(&self) -> impl Iterator<Item = &TreeNode<T, P>> + '_ {
        iter::successors(self.head, move |&key| self.nodes[key].next)
            .map(move |key| &self.nodes[key].root)
    }

    /// Builds a one-tree list.
    pub(crate) fn singleton(root: TreeNode<T, P>) -> Self {
        let mut list = Self::default();
        list.link_before(None, root);
        list
    }

    /// Inserts `root` before `before`, or at the tail if `before` is `None`.
    fn link_before(&mut self, before: Option<TreeKey>, root: TreeNode<T, P>) -> TreeKey {
        let prev = match before {
            Some(before) => self.nodes[before].prev,
            None => self.tail,
        };
        let key = self.nodes.insert_with_key(|key| TreeListNode {
            root,
            prev,
            next: before,
            suffmin: key,
        });
        match prev {
            Some(prev) => self.nodes[prev].next = Some(key),
            None => self.head = Some(key),
        }
        match before {
            Some(before) => self.nodes[before].prev = Some(key),
            None => self.tail = Some(key),
        }
        key
    }

    /// Splices an entry out of the list without repairing `suffmin`.
    fn unlink(&mut self, key: TreeKey) -> Option<TreeListNode<T, P>> {
        let node = self.nodes.remove(key)?;
        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node)
    }

    /// Removes a tree and repairs the `suffmin` cache in front of it.
    pub(crate) fn remove(&mut self, key: TreeKey) -> Option<TreeNode<T, P>> {
        let node = self.unlink(key)?;
        trace!("unlinked drained tree of rank {}", node.root.rank());
        if let Some(prev) = node.prev {
            self.update_suffix_min(prev);
        }
        Some(node.root)
    }

    /// Merges the tree at `key` with its successor, which must have the same
    /// rank. The entry at `key` absorbs the successor.
    fn combine(&mut self, key: TreeKey, params: &ErrorParameter) {
        let Some(next) = self.nodes[key].next else {
            return;
        };
        debug_assert_eq!(
            self.nodes[key].root.rank(),
            self.nodes[next].root.rank(),
            "combine needs neighbours of equal rank"
        );
        let Some(absorbed) = self.unlink(next) else {
            return;
        };
        let root = &mut self.nodes[key].root;
        root.combine(absorbed.root, params);
        trace!("combined two trees into rank {}", root.rank());
    }

    /// Recomputes `suffmin` from `from` back to the head.
    ///
    /// Every entry after `from` must already hold a valid `suffmin`.
    pub(crate) fn update_suffix_min(&mut self, from: TreeKey) {
        let mut cursor = Some(from);
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            let suffmin = match node.next {
                Some(next) => {
                    let candidate = self.nodes[next].suffmin;
                    if node.root.current_key() <= self.nodes[candidate].root.current_key() {
                        key
                    } else {
                        candidate
                    }
                }
                None => key,
            };
            cursor = node.prev;
            self.nodes[key].suffmin = suffmin;
        }
    }

    /// Pops one element from the root buffer of the tree at `key`.
    ///
    /// Refills the root when it ran low and repairs `suffmin` if the root's
    /// current key moved. The flag is true when the whole tree is drained;
    /// the caller then has to [`remove`](Self::remove) it.
    pub(crate) fn extract_from(&mut self, key: TreeKey) -> Option<(Element<T, P>, bool)> {
        let root = &mut self.nodes[key].root;
        let element = root.pop()?;
        if !root.needs_sift() {
            return Some((element, false));
        }
        root.sift();
        if root.is_empty() {
            return Some((element, true));
        }
        self.update_suffix_min(key);
        Some((element, false))
    }

    /// Moves every tree of `other` into this list.
    ///
    /// Incoming trees are spliced in front of the first entry of equal or
    /// larger rank, then one left-to-right pass combines equal-rank
    /// neighbours like carries in a binary addition. Of three consecutive
    /// equal ranks only the last two combine. The pass stops once it is past
    /// every incoming rank with no carry pending.
    pub(crate) fn meld(&mut self, other: TreeList<T, P>, params: &ErrorParameter) {
        let incoming = other.into_roots();
        let Some(max_incoming) = incoming.last().map(TreeNode::rank) else {
            return;
        };
        let moved = incoming.len();

        let mut cursor = self.head;
        let mut first = None;
        for root in incoming {
            while let Some(key) = cursor {
                if self.nodes[key].root.rank() >= root.rank() {
                    break;
                }
                cursor = self.nodes[key].next;
            }
            let key = self.link_before(cursor, root);
            first.get_or_insert(key);
        }
        let Some(mut at) = first else {
            return;
        };

        while let Some(next) = self.nodes[at].next {
            let rank = self.nodes[at].root.rank();
            if rank == self.nodes[next].root.rank() {
                let after = self.nodes[next].next;
                if after.map_or(true, |after| self.nodes[after].root.rank() != rank) {
                    self.combine(at, params);
                    continue;
                }
            } else if rank > max_incoming {
                break;
            }
            at = next;
        }
        self.update_suffix_min(at);
        trace!(
            "melded {} incoming trees; {} trees, rank {}",
            moved,
            self.len(),
            self.rank()
        );
    }

    /// Empties the list, returning its roots from head to tail.
    fn into_roots(mut self) -> Vec<TreeNode<T, P>> {
        let mut roots = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let Some(node) = self.nodes.remove(key) else {
                break;
            };
            cursor = node.next;
            roots.push(node.root);
        }
        roots
    }

    /// Checks links, rank order and the `suffmin` cache. O(number of trees).
    pub(crate) fn is_consistent(&self) -> bool {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let Some(node) = self.nodes.get(key) else {
                return false;
            };
            if node.prev != prev {
                return false;
            }
            if let Some(prev) = prev {
                if self.nodes[prev].root.rank() >= node.root.rank() {
                    return false;
                }
            }
            order.push(key);
            prev = Some(key);
            cursor = node.next;
        }
        if prev != self.tail || order.len() != self.nodes.len() {
            return false;
        }

        let mut running_min: Option<&P> = None;
        for &key in order.iter().rev() {
            let node = &self.nodes[key];
            let key_here = node.root.current_key();
            running_min = Some(match running_min {
                Some(min) if min < key_here => min,
                _ => key_here,
            });
            let Some(suffmin) = self.nodes.get(node.suffmin) else {
                return false;
            };
            if Some(suffmin.root.current_key()) != running_min {
                return false;
            }
        }
        true
    }
}
