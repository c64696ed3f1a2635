//! Error parameter and the buffer sizing rule derived from it.
//!
//! A soft heap is configured by a single number ε in `(0, 1)`: the fraction
//! of inserted elements that may be corrupted at any time. ε only matters
//! through the *no-corruption threshold*
//!
//! ```text
//! r = ceil(log₂(1/ε)) + 2
//! ```
//!
//! Nodes of rank `<= r` hold a single element, so their current key is always
//! the key of that element. Above the threshold each rank multiplies the
//! buffer bound by [`SIZE_FACTOR`], and sifting several elements into one
//! buffer is what lets keys become corrupted.

use crate::rank::{Rank, MAX_RANK};
use crate::traits::HeapError;

/// Error parameter used by [`SoftHeap::new`](crate::soft_heap::SoftHeap).
pub const DEFAULT_ERROR_PARAMETER: f64 = 1e-3;

/// Growth factor of the buffer bound per rank above the threshold.
pub const SIZE_FACTOR: f64 = 1.5;

/// A validated error parameter.
///
/// # Example
///
/// ```rust
/// use rust_soft_heap::params::ErrorParameter;
///
/// let eps = ErrorParameter::new(0.1).unwrap();
/// assert_eq!(eps.threshold(), 6);
/// assert!(ErrorParameter::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorParameter {
    epsilon: f64,
    threshold: Rank,
}

impl ErrorParameter {
    /// Validates `epsilon` and derives the no-corruption threshold.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::InvalidErrorParameter`] unless `0 < epsilon < 1`
    /// (NaN is rejected as well).
    pub fn new(epsilon: f64) -> Result<Self, HeapError> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(HeapError::InvalidErrorParameter);
        }
        // 1/ε overflows to infinity for subnormal ε; the clamp absorbs it.
        let bits = (1.0 / epsilon).log2().ceil();
        let threshold = (bits + 2.0).min(f64::from(MAX_RANK)) as Rank;
        Ok(Self { epsilon, threshold })
    }

    /// The fraction of elements allowed to be corrupted.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Highest rank whose nodes still hold exactly one element.
    #[inline]
    pub fn threshold(&self) -> Rank {
        self.threshold
    }

    /// Buffer bound for a node of `rank` whose children have bound `child_size`.
    ///
    /// Once sizes started growing they keep growing, even when the node is
    /// combined under a larger threshold after a meld.
    pub(crate) fn size_for(&self, rank: Rank, child_size: usize) -> usize {
        if rank > self.threshold || child_size > 1 {
            (SIZE_FACTOR * child_size as f64).ceil() as usize
        } else {
            1
        }
    }
}

impl Default for ErrorParameter {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_ERROR_PARAMETER,
            // ceil(log₂(1000)) + 2
            threshold: 12,
        }
    }
}
