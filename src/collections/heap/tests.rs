#![cfg(test)]

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::iter;

use proptest::prelude::*;

use super::*;
use crate::alloc::TrackingAlloc;
use crate::collections::contiguous::DynamicStack;
use crate::error::{OutOfMemory, Rejected};
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_extracts_in_order() {
    let mut heap = PriorityQueue::new();
    for value in [30, 10, 20, 5] {
        heap.insert(value).unwrap();
        assert!(heap.is_heap());
    }

    assert_eq!(heap.peek(), Some(&5));
    assert_eq!(heap.len(), 4);
    for expected in [5, 10, 20, 30] {
        assert_eq!(heap.extract_min(), Some(expected));
        assert!(heap.is_heap());
    }
    assert_eq!(heap.extract_min(), None, "Extracting from an empty heap should return None.");
    assert_eq!(heap.peek(), None);
}

#[test]
fn test_duplicates() {
    let mut heap = BinaryMinHeap::new();
    heap.try_extend([3, 1, 3, 1, 2, 1]).unwrap();
    assert!(heap.into_sorted().eq([1, 1, 1, 2, 3, 3]));
}

#[test]
fn test_left_child_preferred_on_tie() {
    let mut heap = BinaryMinHeap::with_compare(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    heap.try_extend([(1, 'a'), (2, 'b'), (2, 'c'), (5, 'd')]).unwrap();
    assert_eq!(heap.as_slice().iter().map(|e| e.1).collect::<String>(), "abcd");

    assert_eq!(heap.extract_min(), Some((1, 'a')));
    assert_eq!(
        heap.as_slice().iter().map(|e| e.1).collect::<String>(),
        "bdc",
        "The sifted element should be swapped with the left child when both children are equal."
    );
}

#[test]
fn test_custom_compare() {
    let mut max_heap = BinaryMinHeap::with_compare(Reversed(Natural));
    max_heap.try_extend(["pear", "apple", "quince"]).unwrap();
    assert_eq!(max_heap.peek(), Some(&"quince"));

    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut heap = BinaryMinHeap::with_compare(by_len);
    heap.try_extend(["pear", "fig", "banana"]).unwrap();
    assert_eq!(heap.extract_min(), Some("fig"));
    assert_eq!(heap.comparator()(&"a", &"bb"), Ordering::Less);
}

#[test]
fn test_from_stack() {
    let alloc = TrackingAlloc::new();
    let mut stack = DynamicStack::new_in(&alloc);
    stack.try_extend([9, 4, 7, 1, 8, 2, 6, 3, 5]).unwrap();
    let allocations = alloc.total_allocations();

    let heap = BinaryMinHeap::from_stack(stack, Natural);
    assert!(heap.is_heap());
    assert_eq!(alloc.total_allocations(), allocations, "Heapifying shouldn't allocate.");
    assert!(heap.into_sorted().eq(1..=9));

    let heap: BinaryMinHeap<_> = [5, 3, 4].into_iter().collect();
    assert!(heap.is_heap());
    let mut stack = heap.into_stack();
    stack.sort();
    assert_eq!(&*stack, &[3, 4, 5]);
}

#[test]
fn test_growth_and_reserve() {
    let mut heap = BinaryMinHeap::new();
    assert_eq!(heap.cap(), 0);
    heap.insert('z').unwrap();
    assert_eq!(heap.cap(), 4, "The heap should grow like a stack.");

    heap.reserve(10).unwrap();
    assert!(heap.cap() >= 11);

    heap.clear();
    assert!(heap.is_empty());
    assert!(heap.cap() >= 11, "Clearing should keep the capacity.");
}

#[test]
fn test_out_of_memory() {
    // Room for exactly four u64s.
    let alloc = TrackingAlloc::with_limit(32);
    let mut heap = BinaryMinHeap::new_in(&alloc);
    for value in [40_u64, 30, 20, 10] {
        heap.insert(value).unwrap();
    }

    assert_eq!(
        heap.insert(0),
        Err(Rejected { value: 0, error: OutOfMemory { size: 64 } }),
        "Growing past the limit should return the value with the error."
    );
    assert_eq!(heap.len(), 4, "A failed insertion shouldn't change the heap.");
    assert_eq!(heap.peek(), Some(&10));
    assert!(heap.is_heap());

    drop(heap);
    assert!(!alloc.has_leaks());
}

#[test]
fn test_extend_panics_when_out_of_memory() {
    assert_panics!({
        let mut heap = BinaryMinHeap::new_in(TrackingAlloc::with_limit(0));
        heap.extend([1_u8]);
    });
}

#[test]
fn test_into_sorted_drop() {
    #[derive(Debug)]
    #[allow(dead_code)]
    struct Ranked(u8, CountedDrop);

    let counter = CountedDrop::new(0);
    let alloc = TrackingAlloc::new();
    let mut heap = BinaryMinHeap::with_compare_in(|a: &Ranked, b: &Ranked| a.0.cmp(&b.0), &alloc);
    for (rank, counted) in (0..8).rev().zip(iter::repeat_with(|| counter.clone())) {
        heap.insert(Ranked(rank, counted)).unwrap();
    }

    let mut sorted = heap.into_sorted();
    assert_eq!(sorted.len(), 8);
    assert_eq!(sorted.next().map(|ranked| ranked.0), Some(0));
    assert_eq!(sorted.next().map(|ranked| ranked.0), Some(1));
    assert_eq!(counter.take(), 2);

    drop(sorted);
    assert_eq!(counter.take(), 6, "Dropping the iterator should drop the remaining elements.");
    assert!(!alloc.has_leaks());
}

#[test]
fn test_debug() {
    let heap: BinaryMinHeap<_> = [2, 1].into_iter().collect();
    assert_eq!(format!("{:?}", heap), "BinaryMinHeap { contents: [1, 2], len: 2, cap: 4 }");
}

proptest! {
    #[test]
    fn test_matches_reference_heap(ops in prop::collection::vec(any::<Option<i16>>(), 0..300)) {
        let alloc = TrackingAlloc::new();
        let mut heap = BinaryMinHeap::new_in(&alloc);
        let mut model = BinaryHeap::new();

        for op in ops {
            match op {
                Some(value) => {
                    heap.insert(value).unwrap();
                    model.push(Reverse(value));
                },
                None => prop_assert_eq!(heap.extract_min(), model.pop().map(|Reverse(v)| v)),
            }
            prop_assert!(heap.is_heap());
            prop_assert_eq!(heap.peek(), model.peek().map(|Reverse(v)| v));
        }

        drop(heap);
        prop_assert!(!alloc.has_leaks());
    }

    #[test]
    fn test_into_sorted_is_sorted(values in prop::collection::vec(any::<u32>(), 0..200)) {
        let heap: BinaryMinHeap<_> = values.iter().copied().collect();
        let mut expected = values;
        expected.sort();
        prop_assert!(heap.into_sorted().eq(expected));
    }
}
