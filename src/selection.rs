//! Approximate sorting and exact selection on top of [`SoftHeap`].
//!
//! Both algorithms only use the public heap operations.
//!
//! # Approximate sorting
//!
//! Inserting n keys and extracting them all yields a near-sorted sequence.
//! Keys come out of order only while they sit behind a corrupted key, and
//! for ε ≤ 0.2 fewer than ε·n elements are corrupted at any moment.
//!
//! # Selection
//!
//! With ε = 1/3, the largest of the first ⌈n/3⌉ extracted keys serves as
//! pivot. At least ⌈n/3⌉ keys are no larger than it (the extracted ones),
//! and corruption only lets a bounded fraction of larger keys jump ahead, so
//! partitioning around it discards a constant fraction of the input per
//! round. The pivot is always an input key, so every round shrinks the
//! candidates and the result is exact whatever the pivot quality.

use std::cmp::Ordering;

use log::debug;

use crate::soft_heap::SoftHeap;
use crate::traits::HeapError;

/// Inputs at most this long are sorted directly.
const SMALL_INPUT: usize = 16;

/// Error parameter for pivot search.
const PIVOT_ERROR_PARAMETER: f64 = 1.0 / 3.0;

/// Extracts every key from a soft heap with error parameter `epsilon`.
///
/// # Errors
///
/// Returns [`HeapError::InvalidErrorParameter`] unless `0 < epsilon < 1`.
///
/// # Example
///
/// ```rust
/// use rust_soft_heap::selection::approximate_sort;
///
/// let sorted = approximate_sort(vec![4, 1, 3, 2], 1e-3).unwrap();
/// assert_eq!(sorted, vec![1, 2, 3, 4]);
/// ```
pub fn approximate_sort<P, I>(keys: I, epsilon: f64) -> Result<Vec<P>, HeapError>
where
    P: Ord + Clone,
    I: IntoIterator<Item = P>,
{
    let mut heap = SoftHeap::with_error_parameter(epsilon)?;
    for key in keys {
        heap.insert(key, ());
    }
    let mut sorted = Vec::with_capacity(heap.len());
    while let Some((key, ())) = heap.extract_min() {
        sorted.push(key);
    }
    Ok(sorted)
}

/// Returns the `k`-th smallest key (0-based), counting duplicates.
///
/// # Errors
///
/// Returns [`HeapError::EmptyHeap`] for empty input and
/// [`HeapError::SelectionOutOfRange`] if `k >= keys.len()`.
///
/// # Example
///
/// ```rust
/// use rust_soft_heap::selection::select;
///
/// let keys = [9, 2, 7, 4, 4, 1];
/// assert_eq!(select(&keys, 0), Ok(1));
/// assert_eq!(select(&keys, 3), Ok(4));
/// assert_eq!(select(&keys, 5), Ok(9));
/// ```
pub fn select<P: Ord + Clone>(keys: &[P], k: usize) -> Result<P, HeapError> {
    if keys.is_empty() {
        return Err(HeapError::EmptyHeap);
    }
    if k >= keys.len() {
        return Err(HeapError::SelectionOutOfRange { k, len: keys.len() });
    }

    let mut candidates = keys.to_vec();
    let mut k = k;
    loop {
        if candidates.len() <= SMALL_INPUT {
            candidates.sort_unstable();
            return Ok(candidates.swap_remove(k));
        }

        let pivot = soft_pivot(&candidates)?;
        let mut less = Vec::new();
        let mut greater = Vec::new();
        let mut equal = 0;
        for key in candidates {
            match key.cmp(&pivot) {
                Ordering::Less => less.push(key),
                Ordering::Equal => equal += 1,
                Ordering::Greater => greater.push(key),
            }
        }
        debug!(
            "selection round: {} below pivot, {} equal, {} above",
            less.len(),
            equal,
            greater.len()
        );

        if k < less.len() {
            candidates = less;
        } else if k < less.len() + equal {
            return Ok(pivot);
        } else {
            k -= less.len() + equal;
            candidates = greater;
        }
    }
}

/// Largest original key among the first ⌈n/3⌉ extracted elements.
fn soft_pivot<P: Ord + Clone>(keys: &[P]) -> Result<P, HeapError> {
    let mut heap = SoftHeap::with_error_parameter(PIVOT_ERROR_PARAMETER)?;
    for key in keys {
        heap.insert(key.clone(), ());
    }
    let mut pivot = None;
    for _ in 0..(keys.len() + 2) / 3 {
        let Some((key, ())) = heap.extract_min() else {
            break;
        };
        pivot = match pivot {
            Some(best) if best >= key => Some(best),
            _ => Some(key),
        };
    }
    pivot.ok_or(HeapError::EmptyHeap)
}
