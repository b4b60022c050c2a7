#![cfg(test)]

use std::collections::HashSet as StdHashSet;
use std::hash::RandomState;
use std::mem;

use proptest::prelude::*;

use super::*;
use crate::alloc::{Global, TrackingAlloc};
use crate::error::{CollectionError, OutOfMemory, Rejected};
use crate::util::alloc::CountedDrop;
use crate::util::hash::{ManualHash, PassThroughBuilder};

#[test]
fn test_add_contains_remove() {
    let mut set = HashSet::new();
    assert_eq!(set.add("cat"), Ok(true));
    assert_eq!(set.add("dog"), Ok(true));
    assert_eq!(set.add("cat"), Ok(false), "Adding a present value should report false.");
    assert_eq!(set.len(), 2);

    assert!(set.contains("cat"));
    assert!(!set.contains("bird"));
    assert!(set.remove("cat"));
    assert!(!set.remove("cat"), "Removing an absent value should report false.");
    assert!(!set.contains("cat"));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_duplicate_never_grows() {
    let alloc = TrackingAlloc::new();
    let mut set = HashSet::with_hasher_in(PassThroughBuilder, &alloc);
    for i in 0..3 {
        set.add(ManualHash::new(i, i)).unwrap();
    }
    assert_eq!(set.cap(), 4);

    let allocations = alloc.total_allocations();
    assert_eq!(set.add(ManualHash::new(2, 2)), Ok(false));
    assert_eq!(alloc.total_allocations(), allocations, "Adding a duplicate shouldn't allocate.");
    assert_eq!(set.cap(), 4);
    assert_eq!(set.len(), 3);
}

#[test]
fn test_take_and_get() {
    let mut set = HashSet::new();
    set.add(String::from("kept")).unwrap();
    set.add(String::from("taken")).unwrap();

    assert_eq!(set.get("kept").map(String::as_str), Some("kept"));
    assert_eq!(set.take("taken"), Some(String::from("taken")));
    assert_eq!(set.take("taken"), None);
    assert_eq!(set.len(), 1);
}

#[test]
fn test_collisions() {
    let mut set = HashSet::with_hasher(PassThroughBuilder);
    set.add(ManualHash::new(0, "zero")).unwrap();
    set.add(ManualHash::new(0, "one")).unwrap();
    set.add(ManualHash::new(2, "two")).unwrap();
    set.add(ManualHash::new(0, "three")).unwrap();
    set.add(ManualHash::new(2, "four")).unwrap();
    set.add(ManualHash::new(1, "five")).unwrap();
    assert_eq!(set.cap(), 8);

    assert!(set.remove(&ManualHash::new(0, "zero")));
    assert!(set.remove(&ManualHash::new(2, "two")));

    for (hash, value) in [(0, "one"), (0, "three"), (2, "four"), (1, "five")] {
        assert!(set.contains(&ManualHash::new(hash, value)), "{value} should still be found.");
    }
    assert_eq!(
        set.into_iter().map(|v| v.value).collect::<Vec<_>>(),
        ["one", "three", "four", "five"]
    );

    let mut set = HashSet::with_cap_and_hasher_in(6, PassThroughBuilder, Global).unwrap();
    set.add(ManualHash::new(5, "zero")).unwrap();
    set.add(ManualHash::new(5, "one")).unwrap();
    set.add(ManualHash::new(1, "two")).unwrap();
    set.add(ManualHash::new(5, "three")).unwrap();
    assert_eq!(set.cap(), 6, "Four values should fit in six buckets without growing.");

    assert!(set.remove(&ManualHash::new(5, "zero")));
    assert_eq!(
        set.into_iter().map(|v| v.value).collect::<Vec<_>>(),
        ["three", "two", "one"]
    );
}

#[test]
fn test_out_of_memory() {
    let alloc = TrackingAlloc::with_limit(0);
    let mut set = HashSet::new_in(&alloc);
    assert_eq!(
        set.add(7_u32),
        Err(Rejected { value: 7, error: OutOfMemory { size: 2 * mem::size_of::<Option<(u32, ())>>() } }),
        "A failed add should return the value with the error."
    );
    assert!(set.is_empty());
    assert_eq!(set.reserve(0), Ok(()), "Reserving no room shouldn't need memory.");
    assert_eq!(set.cap(), 0);
    assert_eq!(set.reserve(4).map_err(|e| e.size > 0), Err(true));
    assert_eq!(
        set.add(8).map_err(|rejected| *rejected.error()),
        Err(OutOfMemory { size: 2 * mem::size_of::<Option<(u32, ())>>() })
    );

    fn add_all(set: &mut HashSet<u32, RandomState, &TrackingAlloc>) -> Result<(), CollectionError> {
        set.add(1)?;
        set.add(2)?;
        Ok(())
    }
    assert!(add_all(&mut set).is_err_and(|e| e.is_out_of_memory()));
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let alloc = TrackingAlloc::new();
    let mut set = HashSet::with_hasher_in(PassThroughBuilder, &alloc);
    for i in 0..12 {
        set.add(ManualHash::new(i, CountedEq(i, counter.clone()))).unwrap();
    }
    assert_eq!(counter.take(), 0, "Growing shouldn't drop any values.");

    assert!(set.remove(&ManualHash::new(4, CountedEq(4, counter.clone()))));
    // One for the removed value and one for the probe.
    assert_eq!(counter.take(), 2);

    set.clear();
    assert_eq!(counter.take(), 11);

    set.add(ManualHash::new(0, CountedEq(0, counter.clone()))).unwrap();
    drop(set);
    assert_eq!(counter.take(), 1);
    assert!(!alloc.has_leaks());
}

/// Compares by the number alone, dropping the counter along with the value.
#[derive(Debug)]
struct CountedEq(u64, #[allow(dead_code)] CountedDrop);

impl PartialEq for CountedEq {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for CountedEq {}

#[test]
fn test_equality_and_collect() {
    let a: HashSet<_> = [1, 2, 3, 3].into_iter().collect();
    let mut b = HashSet::new();
    b.try_extend([3, 2, 1]).unwrap();

    assert_eq!(a.len(), 3);
    assert_eq!(a, b, "Sets with the same values should be equal regardless of order.");

    b.remove(&1);
    assert_ne!(a, b);

    let mut sorted = a.iter().copied().collect::<Vec<_>>();
    sorted.sort();
    assert_eq!(sorted, [1, 2, 3]);
}

#[test]
fn test_debug() {
    let mut set = HashSet::with_hasher(PassThroughBuilder);
    set.add(1_u64).unwrap();
    assert_eq!(format!("{set:?}"), "HashSet { contents: [1], len: 1, cap: 2 }");
}

proptest! {
    #[test]
    fn test_matches_reference_set(ops in prop::collection::vec((any::<u8>(), any::<bool>()), 0..300)) {
        let alloc = TrackingAlloc::new();
        let mut set = HashSet::with_hasher_in(PassThroughBuilder, &alloc);
        let mut model = StdHashSet::new();

        for (value, add) in ops {
            let value = value % 24;
            if add {
                prop_assert_eq!(set.add(value), Ok(model.insert(value)));
            } else {
                prop_assert_eq!(set.remove(&value), model.remove(&value));
            }
            prop_assert_eq!(set.len(), model.len());
            prop_assert!(model.iter().all(|v| set.contains(v)));
        }

        drop(set);
        prop_assert!(!alloc.has_leaks());
    }
}
