use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};

use super::Iter;
use crate::alloc::{Alloc, Global};
use crate::collections::hash::HashMap;
use crate::error::{OutOfMemory, Rejected};
use crate::util::fmt::DebugList;
use crate::util::result::ResultExtension;

/// A set of unique values, backed by a [`HashMap`] with unit values.
///
/// # Examples
/// ```
/// # use managed_collections::collections::hash::HashSet;
/// let mut set = HashSet::new();
/// assert_eq!(set.add("apple"), Ok(true));
/// assert_eq!(set.add("apple"), Ok(false));
/// assert!(set.contains("apple"));
///
/// assert!(set.remove("apple"));
/// assert!(!set.remove("apple"));
/// assert!(set.is_empty());
/// ```
pub struct HashSet<T, B = RandomState, A: Alloc = Global> {
    // The unit type evaluates to a no-op, so each bucket holds nothing more than the value.
    pub(crate) inner: HashMap<T, (), B, A>,
}

impl<T: Hash + Eq> HashSet<T> {
    /// Creates a new HashSet with capacity 0 and a [`RandomState`] hasher, using the [`Global`]
    /// allocator.
    pub fn new() -> HashSet<T> {
        HashSet {
            inner: HashMap::new(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> HashSet<T, B> {
    /// Creates a new HashSet with capacity 0 and the provided `hasher`, using the [`Global`]
    /// allocator.
    pub const fn with_hasher(hasher: B) -> HashSet<T, B> {
        HashSet {
            inner: HashMap::with_hasher(hasher),
        }
    }
}

impl<T: Hash + Eq, A: Alloc> HashSet<T, RandomState, A> {
    /// Creates a new HashSet with capacity 0 and a [`RandomState`] hasher, which will allocate from
    /// `alloc`.
    pub fn new_in(alloc: A) -> HashSet<T, RandomState, A> {
        HashSet {
            inner: HashMap::new_in(alloc),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> HashSet<T, B, A> {
    /// Creates a new HashSet with capacity 0 and the provided `hasher`, which will allocate from
    /// `alloc`.
    pub const fn with_hasher_in(hasher: B, alloc: A) -> HashSet<T, B, A> {
        HashSet {
            inner: HashMap::with_hasher_in(hasher, alloc),
        }
    }

    /// Creates a new HashSet with exactly `cap` buckets and the provided `hasher`, which will
    /// allocate from `alloc`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the buckets can't be allocated.
    pub fn with_cap_and_hasher_in(
        cap: usize,
        hasher: B,
        alloc: A,
    ) -> Result<HashSet<T, B, A>, OutOfMemory> {
        Ok(HashSet {
            inner: HashMap::with_cap_and_hasher_in(cap, hasher, alloc)?,
        })
    }

    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub const fn cap(&self) -> usize {
        self.inner.cap()
    }

    pub const fn hasher(&self) -> &B {
        self.inner.hasher()
    }

    pub const fn allocator(&self) -> &A {
        self.inner.allocator()
    }

    /// Adds `value` to the set, returning true if it wasn't already present. Adding a value that is
    /// already present leaves the set as it was (including the stored value) and never allocates.
    ///
    /// # Errors
    /// If the set needs to grow and can't, `value` is returned inside of [`Rejected`] and the set
    /// is left unchanged.
    pub fn add(&mut self, value: T) -> Result<bool, Rejected<T, OutOfMemory>> {
        match self.inner.insert(value, ()) {
            Ok(previous) => Ok(previous.is_none()),
            Err(Rejected { value: (value, ()), error }) => Err(Rejected { value, error }),
        }
    }

    /// Removes `value` from the set, returning true if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove_entry(value).is_some()
    }

    /// Removes `value` from the set, returning the stored value if it was present.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove_entry(value).map(|(v, _)| v)
    }

    /// Returns a reference to the stored value equal to `value`, if there is one.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get_entry(value).map(|(v, _)| v)
    }

    /// Returns true if the set contains `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(value)
    }

    /// Drops every value in the set. The capacity is left unchanged.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Increases the capacity of the set to ensure that len + `extra` values will fit without
    /// growing.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the new buckets can't be allocated. The set is unchanged.
    pub fn reserve(&mut self, extra: usize) -> Result<(), OutOfMemory> {
        self.inner.reserve(extra)
    }

    /// Adds every value produced by `iter`, stopping at the first value that can't be added.
    ///
    /// # Errors
    /// Returns the first value that couldn't be added. Values before it remain in the set.
    pub fn try_extend<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    ) -> Result<(), Rejected<T, OutOfMemory>> {
        for value in iter {
            self.add(value)?;
        }
        Ok(())
    }

    /// Returns an iterator over the values in the set, in no particular order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for HashSet<T, B> {
    /// # Panics
    /// Panics if the set runs out of memory.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::with_hasher(B::default());
        set.try_extend(iter).map_err(|rejected| rejected.error).throw();
        set
    }
}

impl<T: Hash + Eq> Default for HashSet<T> {
    fn default() -> Self {
        HashSet::new()
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> PartialEq for HashSet<T, B, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> Eq for HashSet<T, B, A> {}

impl<T: Hash + Eq + Debug, B: BuildHasher, A: Alloc> Debug for HashSet<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSet")
            .field("contents", &DebugList(self.iter()))
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}
