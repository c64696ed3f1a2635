//! Common heap trait and error type
//!
//! [`Heap`] is the priority queue surface shared by every heap in this crate.
//! It mirrors Rust's `BinaryHeap` API patterns (`push`, `peek`, `pop`) but
//! stores `(priority, item)` pairs and always yields the *minimum* priority.
//!
//! A soft heap implements the trait with one caveat: the order in which
//! `pop` returns elements is governed by possibly corrupted keys, so the
//! sequence of popped priorities is only approximately sorted. The popped
//! priority itself is always the one the element was inserted with.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The error parameter is not strictly between 0 and 1
    InvalidErrorParameter,
    /// The operation needs at least one element
    EmptyHeap,
    /// The requested order statistic does not exist
    SelectionOutOfRange {
        /// Requested 0-based rank
        k: usize,
        /// Number of available elements
        len: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidErrorParameter => {
                write!(f, "error parameter must lie strictly between 0 and 1")
            }
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::SelectionOutOfRange { k, len } => {
                write!(f, "cannot select element {k} out of {len}")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
/// - `merge` consumes another heap
///
/// # Example
///
/// ```rust
/// use rust_soft_heap::Heap;
/// use rust_soft_heap::soft_heap::SoftHeap;
///
/// let mut heap = SoftHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the priority and item that the next `pop` would return
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the element with the minimum (current) priority
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HeapError::InvalidErrorParameter.to_string(),
            "error parameter must lie strictly between 0 and 1"
        );
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert_eq!(
            HeapError::SelectionOutOfRange { k: 7, len: 3 }.to_string(),
            "cannot select element 7 out of 3"
        );
    }
}
