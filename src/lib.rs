//! Soft Heaps for Rust
//!
//! This crate provides a soft heap: a comparison-based priority queue that
//! may *corrupt* (raise) the keys elements are ordered by, in exchange for
//! cheaper amortized operations than any exact heap can offer.
//!
//! # Features
//!
//! - **Soft Heap**: O(1) amortized insert and meld; O(log(1/ε)) amortized
//!   extract-min; the number of corrupted elements stays proportional to ε·n
//! - **Approximate sorting**: drain a soft heap for a near-sorted sequence
//! - **Selection**: linear-time exact k-th smallest using a soft heap as
//!   pivot oracle
//!
//! Popped elements always carry the key they were inserted with; corruption
//! only affects the order in which they come out.
//!
//! # Example
//!
//! ```rust
//! use rust_soft_heap::soft_heap::SoftHeap;
//! use rust_soft_heap::Heap;
//!
//! let mut heap = SoftHeap::new();
//! heap.push(5, "item1");
//! heap.push(3, "item2");
//! assert_eq!(heap.peek(), Some((&3, &"item2")));
//! assert_eq!(heap.pop(), Some((3, "item2")));
//! ```

pub mod params;
pub mod rank;
pub mod selection;
pub mod soft_heap;
pub mod traits;

// Re-export the main types for convenience
pub use params::ErrorParameter;
pub use soft_heap::SoftHeap;
pub use traits::{Heap, HeapError};
