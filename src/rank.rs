//! Rank type and utilities for soft heap trees.
//!
//! # Why u8?
//!
//! The rank of a soft heap tree grows by one each time two trees of equal
//! rank are combined, exactly like the carry position of a binary counter.
//! A tree of rank `k` therefore absorbed at least `2ᵏ` insertions, so ranks
//! never exceed `log₂(n)`:
//! - 2⁶⁴ insertions → max rank ~64
//! - 2²⁵⁵ insertions → max rank 255
//!
//! `u8` covers every heap that fits in memory and keeps [`TreeNode`] small.
//! The no-corruption threshold derived from the error parameter is also a
//! rank and is clamped to [`MAX_RANK`].
//!
//! [`TreeNode`]: crate::soft_heap
//!
//! # Runtime Checks
//!
//! [`checked_increment`] panics if the theoretical limit is exceeded, which
//! would indicate a bug in the combine logic.

/// Type alias for tree rank.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. This cannot happen with valid combines
/// since it would require more than 2²⁵⁵ insertions.
///
/// # Example
///
/// ```rust
/// use rust_soft_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: combining trees of rank 255 needs more than 2²⁵⁵ insertions",
    )
}

/// Decrement a rank value, returning 0 if already at minimum.
///
/// Children of a node of rank `k` have rank `k - 1`; a rank-0 node has none.
///
/// ```rust
/// use rust_soft_heap::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}
