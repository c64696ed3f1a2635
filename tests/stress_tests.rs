//! Stress tests that push the soft heap through long operation sequences
//!
//! Sequences below 2^13 total insertions run with the default error
//! parameter, where no key is ever corrupted, so exact order is asserted.
//! The remaining tests use large error parameters and check everything
//! that still holds under corruption.

use rust_soft_heap::soft_heap::SoftHeap;
use rust_soft_heap::Heap;

/// Test massive numbers of inserts and pops
fn test_massive_operations<H: Heap<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..4000 {
        heap.push(i, i);
    }
    assert_eq!(heap.len(), 4000);

    for i in 0..4000 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

/// Test alternating insert and pop
fn test_alternating_ops<H: Heap<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..1000 {
        heap.push(i * 2, i);
        heap.push(i * 2 + 1, i + 10_000);
        assert_eq!(heap.pop().map(|(p, _)| p), Some(i));
    }

    assert_eq!(heap.len(), 1000);
    for i in 1000..2000 {
        assert_eq!(heap.pop().map(|(p, _)| p), Some(i));
    }
    assert!(heap.is_empty());
}

/// Test melding many heaps of uneven sizes
fn test_large_merge<H: Heap<i32, i32>>() {
    let mut heap = H::new();

    for round in 0..60 {
        let mut other = H::new();
        for j in 0..round {
            let priority = (round * 61 + j * 17) % 3001;
            other.push(priority, j);
        }
        heap.merge(other);
    }

    let total: i32 = (0..60).sum();
    assert_eq!(heap.len(), total as usize);

    let mut last = i32::MIN;
    while let Some((priority, _)) = heap.pop() {
        assert!(priority >= last);
        last = priority;
    }
}

/// Test extreme priorities mixed with ordinary ones
fn test_large_priorities<H: Heap<i32, i64>>() {
    let mut heap = H::new();

    for i in 0..500 {
        heap.push(i64::MAX - i, 0);
        heap.push(i64::MIN + i, 1);
        heap.push(i * 1_000_000_007, 2);
    }

    let mut drained = Vec::new();
    while let Some((priority, _)) = heap.pop() {
        drained.push(priority);
    }
    assert_eq!(drained.len(), 1500);
    assert!(drained.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(drained.first(), Some(&i64::MIN));
    assert_eq!(drained.last(), Some(&i64::MAX));
}

/// Test bursts of inserts followed by partial drains
fn test_rapid_fire<H: Heap<i32, i32>>() {
    let mut heap = H::new();
    let mut model = std::collections::BinaryHeap::new();

    for burst in 0..50 {
        for j in 0..100 {
            let priority = (burst * 7919 + j * 104_729) % 10_007;
            heap.push(priority, j);
            model.push(std::cmp::Reverse(priority));
        }
        for _ in 0..60 {
            let expected = model.pop().map(|std::cmp::Reverse(p)| p);
            assert_eq!(heap.pop().map(|(p, _)| p), expected);
        }
    }

    assert_eq!(heap.len(), model.len());
}

#[test]
fn test_soft_massive() {
    test_massive_operations::<SoftHeap<i32, i32>>();
}

#[test]
fn test_soft_alternating() {
    test_alternating_ops::<SoftHeap<i32, i32>>();
}

#[test]
fn test_soft_large_merge() {
    test_large_merge::<SoftHeap<i32, i32>>();
}

#[test]
fn test_soft_large_priorities() {
    test_large_priorities::<SoftHeap<i32, i64>>();
}

#[test]
fn test_soft_rapid_fire() {
    test_rapid_fire::<SoftHeap<i32, i32>>();
}

/// Heavy corruption never loses or duplicates elements
#[test]
fn test_corrupting_heap_preserves_contents() {
    for eps in [0.05, 0.25, 0.5, 0.9] {
        let mut heap = SoftHeap::with_error_parameter(eps).unwrap();
        for i in 0..20_000u32 {
            heap.insert((i * 7_919) % 20_011, i);
        }
        assert!(heap.verify_invariants());

        let mut seen = vec![false; 20_000];
        let mut count = 0;
        while let Some((key, item)) = heap.extract_min() {
            assert_eq!(key, (item * 7_919) % 20_011);
            assert!(!seen[item as usize], "item {} extracted twice", item);
            seen[item as usize] = true;
            count += 1;
        }
        assert_eq!(count, 20_000);
        assert!(heap.is_empty());
        assert_eq!(heap.num_trees(), 0);
    }
}

/// Interleaved inserts, extractions and melds past the exact regime
#[test]
fn test_corrupting_heap_mixed_workload() {
    let mut heap = SoftHeap::with_error_parameter(0.2).unwrap();
    let mut expected_len = 0usize;

    for round in 0..200u64 {
        let mut other = SoftHeap::with_error_parameter(0.2).unwrap();
        for j in 0..(round % 37) {
            other.insert(round * 1_000 + j, ());
        }
        expected_len += (round % 37) as usize;

        for j in 0..50 {
            heap.insert((round * 31 + j * 97) % 5_003, ());
        }
        expected_len += 50;
        heap.meld(other);

        for _ in 0..30 {
            assert!(heap.extract_min().is_some());
        }
        expected_len -= 30;

        assert_eq!(heap.len(), expected_len);
        if round % 20 == 0 {
            assert!(heap.verify_invariants());
        }
    }

    let drained = std::iter::from_fn(|| heap.extract_min()).count();
    assert_eq!(drained, expected_len);
}

/// Rank grows logarithmically with the number of insertions
#[test]
fn test_rank_stays_logarithmic() {
    let mut heap = SoftHeap::with_error_parameter(0.1).unwrap();
    for i in 0..50_000 {
        heap.insert(i, ());
    }
    // 50_000 < 2^16
    assert!(heap.rank() <= 16);
    assert!(heap.num_trees() <= heap.rank() as usize + 1);
}
