#![cfg(test)]

use std::iter;

use proptest::prelude::*;

use super::*;
use crate::alloc::TrackingAlloc;
use crate::error::{OutOfMemory, Rejected};
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_lifo_order() {
    let mut stack = DynamicStack::new();
    for i in 1..=5 {
        stack.push(i).unwrap();
    }

    assert_eq!(stack.peek(), Some(&5));
    for i in (1..=5).rev() {
        assert_eq!(stack.pop(), Some(i), "Values should be popped in reverse order.");
    }
    assert_eq!(stack.pop(), None, "Popping an empty stack should return None.");
    assert_eq!(stack.peek(), None);
    assert!(stack.is_empty());
}

#[test]
fn test_growth_policy() {
    let mut stack = DynamicStack::new();
    assert_eq!(stack.cap(), 0, "A new stack shouldn't allocate.");

    stack.push(0_u64).unwrap();
    assert_eq!(stack.cap(), 4, "The first growth should allocate the minimum capacity.");

    for i in 1..5 {
        stack.push(i).unwrap();
    }
    assert_eq!(stack.cap(), 8, "Capacity should double when full.");

    for i in 5..9 {
        stack.push(i).unwrap();
    }
    assert_eq!(stack.cap(), 16);
    assert_eq!(stack.len(), 9);
}

#[test]
fn test_push_pop_round_trip() {
    let mut stack: DynamicStack<_> = (0..10).collect();
    let len = stack.len();

    stack.push(100).unwrap();
    assert_eq!(stack.pop(), Some(100));
    assert_eq!(stack.len(), len, "A push followed by a pop should restore the length.");
    assert_eq!(&*stack, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_peek_mut() {
    let mut stack = DynamicStack::new();
    stack.push(String::from("top")).unwrap();

    if let Some(top) = stack.peek_mut() {
        top.push_str("ped");
    }
    assert_eq!(stack.pop().as_deref(), Some("topped"));
}

#[test]
fn test_out_of_memory() {
    // Room for exactly four u64s.
    let alloc = TrackingAlloc::with_limit(32);
    let mut stack = DynamicStack::new_in(&alloc);

    for i in 0..4_u64 {
        stack.push(i).unwrap();
    }
    assert_eq!(
        stack.push(4),
        Err(Rejected { value: 4, error: OutOfMemory { size: 64 } }),
        "Growing past the limit should return the value with the error."
    );
    assert_eq!(&*stack, &[0, 1, 2, 3], "A failed push shouldn't change the stack.");
    assert_eq!(stack.cap(), 4);

    assert_eq!(stack.reserve(1), Err(OutOfMemory { size: 40 }));
    assert_eq!(stack.try_extend([10, 11]), Err(Rejected { value: 10, error: OutOfMemory { size: 64 } }));

    drop(stack);
    assert!(!alloc.has_leaks());
}

#[test]
fn test_extend_panics_when_out_of_memory() {
    assert_panics!({
        let mut stack = DynamicStack::new_in(TrackingAlloc::with_limit(0));
        stack.extend([1_u8, 2, 3]);
    });
}

#[test]
fn test_reserve() {
    let alloc = TrackingAlloc::new();
    let mut stack = DynamicStack::with_cap_in(2, &alloc).unwrap();
    stack.push('a').unwrap();

    stack.reserve(1).unwrap();
    assert_eq!(stack.cap(), 2, "Reserving within the capacity shouldn't reallocate.");
    assert_eq!(alloc.total_allocations(), 1);

    stack.reserve(10).unwrap();
    assert_eq!(stack.cap(), 11);
    assert_eq!(alloc.outstanding(), 1, "The previous buffer should have been released.");
    assert_eq!(stack.pop(), Some('a'));
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let alloc = TrackingAlloc::new();
    let mut stack = DynamicStack::new_in(&alloc);
    stack.try_extend(iter::repeat_with(|| counter.clone()).take(10)).unwrap();

    drop(stack.pop());
    assert_eq!(counter.take(), 1, "A popped value should be dropped by its new owner.");

    drop(stack);
    assert_eq!(counter.take(), 9, "All remaining values should be dropped with the stack.");
    assert!(!alloc.has_leaks(), "The backing storage should be released exactly once.");
}

#[test]
fn test_clear() {
    let counter = CountedDrop::new(0);
    let mut stack = DynamicStack::new();
    stack.extend(iter::repeat_with(|| counter.clone()).take(6));
    let cap = stack.cap();

    stack.clear();
    assert_eq!(counter.take(), 6);
    assert!(stack.is_empty());
    assert_eq!(stack.cap(), cap, "Clearing should keep the capacity.");
}

#[test]
fn test_iterators() {
    let mut stack: DynamicStack<_> = (1..=4).collect();

    for value in &mut stack {
        *value *= 10;
    }
    assert_eq!(
        stack.iter().copied().collect::<DynamicStack<_>>(),
        [10, 20, 30, 40].into_iter().collect(),
        "Borrowed iteration should go from bottom to top."
    );

    let mut iter = stack.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(40), "Owned iteration should go from top to bottom.");
    assert_eq!(iter.next(), Some(30));

    let counter = CountedDrop::new(0);
    let stack: DynamicStack<_> = iter::repeat_with(|| counter.clone()).take(5).collect();
    let mut iter = stack.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.take(), 5, "Dropping a partially consumed iterator should drop the rest.");
}

#[test]
fn test_zst_support() {
    let alloc = TrackingAlloc::new();
    let mut stack = DynamicStack::new_in(&alloc);
    for _ in 0..100 {
        stack.push(ZeroSizedType).unwrap();
    }

    assert_eq!(stack.len(), 100);
    assert_eq!(stack.pop(), Some(ZeroSizedType));
    assert_eq!(alloc.total_allocations(), 0, "Zero-sized values should never be allocated.");
}

proptest! {
    #[test]
    fn test_pops_reverse_pushes(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let alloc = TrackingAlloc::new();
        let mut stack = DynamicStack::new_in(&alloc);
        for value in values.iter() {
            stack.push(*value).unwrap();
        }
        prop_assert_eq!(stack.len(), values.len());

        for value in values.iter().rev() {
            prop_assert_eq!(stack.pop(), Some(*value));
        }
        prop_assert_eq!(stack.pop(), None);

        drop(stack);
        prop_assert!(!alloc.has_leaks());
    }
}
