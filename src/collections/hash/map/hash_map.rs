use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::{cmp, mem};

use super::{IntoKeys, Iter, Keys, Values};
use crate::alloc::{Alloc, Global, RawArray};
use crate::error::{OutOfMemory, Rejected};
use crate::util::fmt::DebugList;
use crate::util::option::OptionExtension;

const MIN_ALLOCATED_CAP: usize = 2;

const GROWTH_FACTOR: usize = 2;

const LOAD_FACTOR_NUMERATOR: usize = 4;
const LOAD_FACTOR_DENOMINATOR: usize = 5;

/// A map of keys to values which relies on the keys implementing [`Hash`], with all of its buckets
/// allocated from `A`.
///
/// Entries are stored inline in a single array of buckets, using open addressing with linear
/// probing: an entry lives at the first free bucket at or after the index given by its hash. A
/// custom load factor is not supported at this point, with the default being 4/5. Once the map is
/// that full, the next insertion doubles the number of buckets.
///
/// Removal shifts later entries of the same probe sequence back into the freed bucket, so no
/// tombstones are ever left behind.
///
/// It is a logic error for keys in a HashMap to be manipulated in a way that changes their hash.
/// Because of this, HashMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`**, `O(n)` |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains_key` | `O(1)`* |
/// | `reserve` | `O(n)`***, `O(1)` |
///
/// \* In the event of a hash collision, these functions will take additional time, while a valid
/// / correct location is found. This additional time is kept at a minimum and hash collisions are
/// unlikely especially with a large capacity.
///
/// \** If the HashMap doesn't have enough capacity for the new element, `insert` will take `O(n)`.
/// \* applies as well.
///
/// \*** If the HashMap has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct HashMap<K, V, B = RandomState, A: Alloc = Global> {
    /// Every bucket below the capacity is initialized, either as an entry or as [`None`].
    pub(crate) arr: RawArray<Bucket<K, V>>,
    pub(crate) len: usize,
    pub(crate) hasher: B,
    pub(crate) alloc: A,
}

pub(crate) type Bucket<K, V> = Option<(K, V)>;

impl<K: Hash + Eq, V> HashMap<K, V> {
    /// Creates a new HashMap with capacity 0 and a [`RandomState`] hasher, using the [`Global`]
    /// allocator. Memory will be allocated when the first entry is inserted.
    pub fn new() -> HashMap<K, V> {
        HashMap::with_hasher_in(RandomState::new(), Global)
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashMap<K, V, B> {
    /// Creates a new HashMap with capacity 0 and the provided `hasher`, using the [`Global`]
    /// allocator.
    pub const fn with_hasher(hasher: B) -> HashMap<K, V, B> {
        HashMap::with_hasher_in(hasher, Global)
    }
}

impl<K: Hash + Eq, V, A: Alloc> HashMap<K, V, RandomState, A> {
    /// Creates a new HashMap with capacity 0 and a [`RandomState`] hasher, which will allocate from
    /// `alloc`.
    pub fn new_in(alloc: A) -> HashMap<K, V, RandomState, A> {
        HashMap::with_hasher_in(RandomState::new(), alloc)
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> HashMap<K, V, B, A> {
    /// Creates a new HashMap with capacity 0 and the provided `hasher`, which will allocate from
    /// `alloc`.
    pub const fn with_hasher_in(hasher: B, alloc: A) -> HashMap<K, V, B, A> {
        HashMap {
            arr: RawArray::dangling(),
            len: 0,
            hasher,
            alloc,
        }
    }

    /// Creates a new HashMap with exactly `cap` buckets and the provided `hasher`, which will
    /// allocate from `alloc`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the buckets can't be allocated.
    pub fn with_cap_and_hasher_in(
        cap: usize,
        hasher: B,
        alloc: A,
    ) -> Result<HashMap<K, V, B, A>, OutOfMemory> {
        Ok(HashMap {
            arr: Self::allocate_buckets(cap, &alloc)?,
            len: 0,
            hasher,
            alloc,
        })
    }

    /// Returns the length of the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current capacity of the HashMap, which is the number of buckets it holds.
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Inserts the provided `key`-`value` pair into the HashMap, increasing the capacity if
    /// required. If the key was already associated with a value, the previous value is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists. Replacing the
    /// value of an existing key never allocates.
    ///
    /// # Errors
    /// If the map needs to grow and can't, the entry is returned inside of [`Rejected`] and the
    /// map is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Rejected<(K, V), OutOfMemory>> {
        if let Some(existing) = self.get_mut(&key) {
            return Ok(Some(mem::replace(existing, value)));
        }

        if self.should_grow() {
            if let Err(error) = self.grow() {
                return Err(Rejected { value: (key, value), error });
            }
        }

        // SAFETY: We've just grown if necessary, so the capacity isn't 0.
        let index = unsafe { self.find_index_for_key(&key).unreachable() };

        // The key isn't in the map, so the bucket at index is empty.
        self.buckets_mut()[index] = Some((key, value));
        self.len += 1;
        Ok(None)
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index_for_key(key)?;

        // If the bucket at index is empty, the map doesn't contain the key.
        match &self.buckets()[index] {
            Some(existing) => Some((&existing.0, &existing.1)),
            None => None,
        }
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no values for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if the
    /// map contains no values for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index_for_key(key)?;

        match &mut self.buckets_mut()[index] {
            Some(existing) => Some(&mut existing.1),
            None => None,
        }
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_entry(key).is_some()
    }

    /// Removes the entry associated with `key`, returning it if it exists.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut hole = self.find_index_for_key(key)?;

        // If the bucket at index is empty, the map doesn't contain the key.
        let removed = self.buckets_mut()[hole].take()?;
        self.len -= 1;

        let cap = self.cap();
        let mut next = (hole + 1) % cap;

        // Walk the rest of the cluster. Any entry that can't be reached from its ideal index once
        // the hole is left empty is moved back into the hole, which then moves to where it was.
        loop {
            let ideal = match &self.buckets()[next] {
                // SAFETY: find_index_for_key returned Some, so the capacity isn't 0.
                Some((next_key, _)) => unsafe { self.index_from_key(next_key).unreachable() },
                None => break,
            };

            // The distances travelled from the ideal index, both wrapping at the capacity.
            let probed = (next + cap - ideal) % cap;
            let to_hole = (next + cap - hole) % cap;

            if probed >= to_hole {
                let moving = self.buckets_mut()[next].take();
                self.buckets_mut()[hole] = moving;
                hole = next;
            }

            next = (next + 1) % cap;
        }

        Some(removed)
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Drops every entry in the HashMap. The capacity is left unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
        for bucket in self.buckets_mut() {
            *bucket = None;
        }
    }

    /// Increases the capacity of the HashMap to ensure that len + `extra` entries will fit without
    /// exceeding the load factor.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the new buckets can't be allocated. The map is unchanged.
    pub fn reserve(&mut self, extra: usize) -> Result<(), OutOfMemory> {
        let total = self.len.checked_add(extra).ok_or(OutOfMemory { size: usize::MAX })?;
        if total == 0 {
            return Ok(());
        }

        let new_cap = total
            .checked_mul(LOAD_FACTOR_DENOMINATOR)
            .map(|scaled| scaled / LOAD_FACTOR_NUMERATOR + 1)
            .ok_or(OutOfMemory { size: usize::MAX })?;

        if new_cap <= self.cap() {
            return Ok(());
        }

        self.realloc_with_cap(new_cap)
    }

    /// Returns an iterator over all key-value pairs in the HashMap, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in the HashMap, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over all values in the HashMap, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V, B, A> {
        IntoKeys(self.into_iter())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> HashMap<K, V, B, A> {
    /// Allocates `cap` buckets from `alloc`, all of which are empty.
    pub(crate) fn allocate_buckets(
        cap: usize,
        alloc: &A,
    ) -> Result<RawArray<Bucket<K, V>>, OutOfMemory> {
        let mut arr = RawArray::allocate_in(cap, alloc)?;
        for index in 0..cap {
            // SAFETY: index is less than the size of arr.
            unsafe { arr.write(index, None) };
        }
        Ok(arr)
    }

    pub(crate) fn buckets(&self) -> &[Bucket<K, V>] {
        // SAFETY: Every bucket below the capacity is initialized.
        unsafe { self.arr.as_slice(self.cap()) }
    }

    pub(crate) fn buckets_mut(&mut self) -> &mut [Bucket<K, V>] {
        let cap = self.cap();
        // SAFETY: Every bucket below the capacity is initialized.
        unsafe { self.arr.as_mut_slice(cap) }
    }

    /// Determines whether the HashMap's length exceeds the load capacity, suggesting that it should
    /// grow before inserting new entries.
    pub(crate) const fn should_grow(&self) -> bool {
        self.len >= self.arr.size() * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR
    }

    /// Grows the HashMap by the growth factor, ensuring that it can hold additional entries.
    pub(crate) fn grow(&mut self) -> Result<(), OutOfMemory> {
        let scaled = self.cap().checked_mul(GROWTH_FACTOR).ok_or(OutOfMemory { size: usize::MAX })?;

        self.realloc_with_cap(cmp::max(scaled, MIN_ALLOCATED_CAP))
    }

    /// Moves every entry into a new array of `new_cap` buckets, rehashing each key. The old buckets
    /// are returned to the allocator afterwards.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) -> Result<(), OutOfMemory> {
        debug_assert!(new_cap * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR >= self.len);

        let new_arr = Self::allocate_buckets(new_cap, &self.alloc)?;
        // Replace the array first so that entries are placed in the new one.
        let mut old_arr = mem::replace(&mut self.arr, new_arr);

        for index in 0..old_arr.size() {
            // SAFETY: Every bucket of the old array was initialized and each is read exactly once.
            // The array is released without dropping anything afterwards.
            if let Some(entry) = unsafe { old_arr.read(index) } {
                // SAFETY: The old array held an entry, so the new capacity isn't 0.
                let new_index = unsafe { self.find_index_for_key(&entry.0).unreachable() };
                self.buckets_mut()[new_index] = Some(entry);
            }
        }

        // SAFETY: old_arr was allocated from self.alloc and its contents have all been moved out.
        unsafe { old_arr.release_in(&self.alloc) };
        Ok(())
    }

    /// Calculates the ideal index of a bucket for the provided `hashable` (or None if the HashMap
    /// has 0 capacity). This method doesn't consider hash collisions, see
    /// [`HashMap::find_index_for_key`] for that functionality.
    pub(crate) fn index_from_key<H: Hash + ?Sized>(&self, hashable: &H) -> Option<usize> {
        let key_hash = self.hasher.hash_one(hashable);
        key_hash.checked_rem(self.cap() as u64).map(|i| i as usize)
    }

    /// Finds the first valid index for the provided `key` (or None if the HashMap has 0 capacity).
    /// This is done by calculating the ideal index and then iterating until a bucket is found that
    /// is empty or has an equal key.
    pub(crate) fn find_index_for_key<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = self.index_from_key(key)?;
        let buckets = self.buckets();

        // While there is an entry at the current index with a different key, move on to the next
        // bucket (wrapping at the capacity). The load factor guarantees that an empty bucket
        // exists, so this always terminates.
        while let Some((existing, _)) = &buckets[index] {
            if existing.borrow() == key {
                break;
            }
            index = (index + 1) % buckets.len();
        }

        // After that loop, index is either empty or contains an equal key.
        Some(index)
    }
}

impl<K, V, B, A: Alloc> Drop for HashMap<K, V, B, A> {
    fn drop(&mut self) {
        let cap = self.arr.size();

        // SAFETY: Every bucket below the capacity is initialized and arr is only ever allocated from
        // self.alloc. This is the only place that it is released.
        unsafe {
            self.arr.drop_range(0, cap);
            self.arr.release_in(&self.alloc);
        }
    }
}

impl<K: Hash + Eq, V> Default for HashMap<K, V> {
    fn default() -> Self {
        HashMap::new()
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher, A: Alloc> Debug for HashMap<K, V, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMap")
            .field("contents", &DebugList(self.iter()))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}
