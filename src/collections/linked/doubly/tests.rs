#![cfg(test)]

use std::collections::VecDeque;
use std::iter;

use proptest::prelude::*;

use super::*;
use crate::alloc::TrackingAlloc;
use crate::error::{OutOfMemory, Rejected};
use crate::util::alloc::CountedDrop;

#[test]
fn test_both_ends() {
    let mut list = DoublyLinkedList::new();
    assert_eq!(list.remove_first(), None::<i32>);
    assert_eq!(list.remove_last(), None);

    list.append(2).unwrap();
    list.append(3).unwrap();
    list.prepend(1).unwrap();
    list.prepend(0).unwrap();
    list.verify_links();
    assert_eq!(list.front(), Some(&0));
    assert_eq!(list.back(), Some(&3));

    assert_eq!(list.remove_last(), Some(3));
    list.verify_links();
    assert_eq!(list.remove_first(), Some(0));
    list.verify_links();
    assert_eq!(list.remove_last(), Some(2));
    assert_eq!(list.remove_last(), Some(1));
    list.verify_links();

    assert!(list.is_empty());
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);
}

#[test]
fn test_front_and_back_mut() {
    let mut list: DoublyLinkedList<_> = ["a", "b", "c"].into_iter().map(String::from).collect();
    if let Some(front) = list.front_mut() {
        front.push('!');
    }
    if let Some(back) = list.back_mut() {
        back.push('?');
    }
    assert!(list.iter().eq(["a!", "b", "c?"].iter()));
}

#[test]
fn test_double_ended_iter() {
    let list: DoublyLinkedList<_> = (1..=5).collect();

    assert!(list.iter().rev().eq(&[5, 4, 3, 2, 1]));

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.next(), None, "The ends of the iterator shouldn't cross.");
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_into_iter() {
    let list: DoublyLinkedList<_> = (1..=4).collect();
    let mut iter = list.into_iter();
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.collect::<VecDeque<_>>(), [2, 3]);

    let counter = CountedDrop::new(0);
    let alloc = TrackingAlloc::new();
    let mut list = DoublyLinkedList::new_in(&alloc);
    for value in iter::repeat_with(|| counter.clone()).take(6) {
        list.append(value).unwrap();
    }
    let mut iter = list.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    drop(iter);
    assert_eq!(counter.take(), 6, "Dropping a partially consumed iterator should drop the rest.");
    assert!(!alloc.has_leaks());
}

#[test]
fn test_slot_reuse() {
    let alloc = TrackingAlloc::new();
    let mut list = DoublyLinkedList::new_in(&alloc);
    for i in 0..4 {
        list.append(i).unwrap();
    }
    assert_eq!(list.cap(), 4);
    assert_eq!(alloc.total_allocations(), 1);

    for i in 4..20 {
        list.remove_first();
        list.append(i).unwrap();
        list.verify_links();
    }
    assert_eq!(list.cap(), 4, "Vacant slots should be reused before the arena grows.");
    assert_eq!(alloc.total_allocations(), 1);
    assert!(list.iter().eq(&[16, 17, 18, 19]));

    list.prepend(15).unwrap();
    assert_eq!(list.cap(), 8, "The arena should double when it is full.");
    assert_eq!(alloc.outstanding(), 1, "The previous arena should have been released.");
    list.verify_links();
}

#[test]
fn test_out_of_memory() {
    let alloc = TrackingAlloc::new();
    let mut list = DoublyLinkedList::new_in(&alloc);
    list.append(0_u64).unwrap();
    let arena_size = alloc.outstanding_bytes();
    drop(list);

    // Room for the initial arena, but not for the doubled one alongside it.
    let alloc = TrackingAlloc::with_limit(arena_size * 2);
    let mut list = DoublyLinkedList::new_in(&alloc);
    for i in 0..4_u64 {
        list.append(i).unwrap();
    }

    assert_eq!(
        list.append(4),
        Err(Rejected { value: 4, error: OutOfMemory { size: arena_size * 2 } }),
        "Growing past the limit should return the value with the error."
    );
    assert_eq!(list.prepend(5).map_err(Rejected::into_inner), Err(5));
    assert!(list.iter().eq(&[0, 1, 2, 3]), "A failed insertion shouldn't change the list.");
    list.verify_links();

    assert_eq!(list.remove_last(), Some(3));
    list.append(4).unwrap();
    assert!(list.iter().eq(&[0, 1, 2, 4]), "A freed slot should be usable without allocating.");
}

#[test]
fn test_drop_and_clear() {
    let counter = CountedDrop::new(0);
    let alloc = TrackingAlloc::new();
    let mut list = DoublyLinkedList::new_in(&alloc);
    for value in iter::repeat_with(|| counter.clone()).take(10) {
        list.append(value).unwrap();
    }
    drop(list.remove_first());
    drop(list.remove_last());
    assert_eq!(counter.take(), 2);

    list.clear();
    assert_eq!(counter.take(), 8, "Clearing should drop only the remaining elements.");
    assert!(!alloc.has_leaks(), "Clearing should release the arena.");
    assert!(list.is_empty());

    list.prepend(counter.clone()).unwrap();
    list.verify_links();
    drop(list);
    assert_eq!(counter.take(), 1);
    assert!(!alloc.has_leaks());
}

#[test]
fn test_debug() {
    let list: DoublyLinkedList<_> = ['x', 'y'].into_iter().collect();
    assert_eq!(format!("{:?}", list), "DoublyLinkedList { contents: ['x', 'y'], len: 2, cap: 4 }");
}

#[derive(Debug, Clone)]
enum Op {
    Append(u16),
    Prepend(u16),
    RemoveFirst,
    RemoveLast,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u16>().prop_map(Op::Append),
        any::<u16>().prop_map(Op::Prepend),
        Just(Op::RemoveFirst),
        Just(Op::RemoveLast),
    ]
}

proptest! {
    #[test]
    fn test_links_stay_symmetric(ops in prop::collection::vec(op(), 0..200)) {
        let alloc = TrackingAlloc::new();
        let mut list = DoublyLinkedList::new_in(&alloc);
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Append(value) => {
                    list.append(value).unwrap();
                    model.push_back(value);
                },
                Op::Prepend(value) => {
                    list.prepend(value).unwrap();
                    model.push_front(value);
                },
                Op::RemoveFirst => prop_assert_eq!(list.remove_first(), model.pop_front()),
                Op::RemoveLast => prop_assert_eq!(list.remove_last(), model.pop_back()),
            }
            list.verify_links();
            prop_assert_eq!(list.len(), model.len());
        }
        prop_assert!(list.iter().eq(model.iter()));
        prop_assert!(list.iter().rev().eq(model.iter().rev()));

        drop(list);
        prop_assert!(!alloc.has_leaks());
    }
}
