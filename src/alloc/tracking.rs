use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use super::{Alloc, Global};
use crate::error::OutOfMemory;

/// An allocator that keeps track of every block it hands out, wrapping another allocator (by
/// default [`Global`]).
///
/// Optionally, a limit can be placed on the number of bytes that may be outstanding at once, past
/// which allocations fail with [`OutOfMemory`]. This makes it possible to exercise the allocation
/// failure paths of a collection deterministically.
///
/// TrackingAlloc uses interior mutability without synchronization and is therefore not [`Sync`].
/// Collections should be given a reference to it (`&TrackingAlloc` is an [`Alloc`] too), so that
/// it can be queried once they've been dropped.
///
/// # Examples
/// ```
/// # use managed_collections::alloc::TrackingAlloc;
/// # use managed_collections::collections::linked::SinglyLinkedList;
/// let alloc = TrackingAlloc::new();
/// let mut list = SinglyLinkedList::new_in(&alloc);
/// list.append(1_u32).unwrap();
/// list.append(2).unwrap();
/// assert_eq!(alloc.outstanding(), 2);
///
/// drop(list);
/// assert!(!alloc.has_leaks());
/// ```
#[derive(Debug, Default)]
pub struct TrackingAlloc<A: Alloc = Global> {
    inner: A,
    limit: Option<usize>,
    outstanding: Cell<usize>,
    outstanding_bytes: Cell<usize>,
    total: Cell<usize>,
}

impl TrackingAlloc {
    /// Creates a new TrackingAlloc without a limit, backed by [`Global`].
    pub const fn new() -> TrackingAlloc {
        TrackingAlloc::wrap(Global)
    }

    /// Creates a new TrackingAlloc, backed by [`Global`], that fails any allocation which would
    /// take the number of outstanding bytes past `limit`.
    pub const fn with_limit(limit: usize) -> TrackingAlloc {
        TrackingAlloc::wrap_with_limit(Global, limit)
    }
}

impl<A: Alloc> TrackingAlloc<A> {
    /// Creates a new TrackingAlloc without a limit, backed by `inner`.
    pub const fn wrap(inner: A) -> TrackingAlloc<A> {
        TrackingAlloc {
            inner,
            limit: None,
            outstanding: Cell::new(0),
            outstanding_bytes: Cell::new(0),
            total: Cell::new(0),
        }
    }

    /// Creates a new TrackingAlloc backed by `inner` with a limit on outstanding bytes.
    pub const fn wrap_with_limit(inner: A, limit: usize) -> TrackingAlloc<A> {
        TrackingAlloc {
            inner,
            limit: Some(limit),
            outstanding: Cell::new(0),
            outstanding_bytes: Cell::new(0),
            total: Cell::new(0),
        }
    }

    /// Returns the number of blocks that have been allocated but not yet deallocated.
    pub fn outstanding(&self) -> usize {
        self.outstanding.get()
    }

    /// Returns the total size of all blocks that have been allocated but not yet deallocated.
    pub fn outstanding_bytes(&self) -> usize {
        self.outstanding_bytes.get()
    }

    /// Returns the number of successful allocations made over the lifetime of this allocator.
    pub fn total_allocations(&self) -> usize {
        self.total.get()
    }

    /// Returns true if any blocks are still outstanding.
    pub fn has_leaks(&self) -> bool {
        self.outstanding() != 0
    }

    /// Changes the limit on outstanding bytes, or removes it with `None`.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }
}

impl<A: Alloc> Alloc for TrackingAlloc<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
        let new_bytes = self.outstanding_bytes.get()
            .checked_add(layout.size())
            .ok_or(OutOfMemory { size: layout.size() })?;

        if let Some(limit) = self.limit {
            if new_bytes > limit {
                return Err(OutOfMemory { size: layout.size() });
            }
        }

        let ptr = self.inner.allocate(layout)?;

        self.outstanding.set(self.outstanding.get() + 1);
        self.outstanding_bytes.set(new_bytes);
        self.total.set(self.total.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // A deallocation without a matching allocation is a double free.
        assert!(self.outstanding.get() > 0, "Deallocation with no outstanding allocations!");

        self.outstanding.set(self.outstanding.get() - 1);
        self.outstanding_bytes.set(self.outstanding_bytes.get() - layout.size());

        // SAFETY: The caller guarantees that ptr was allocated by this allocator, which means that
        // it was allocated by inner with the same layout.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_limit() {
        let alloc = TrackingAlloc::with_limit(64);
        let layout = Layout::array::<u64>(4).unwrap();

        let first = alloc.allocate(layout);
        assert!(first.is_ok());
        assert_eq!(alloc.outstanding(), 1);
        assert_eq!(alloc.outstanding_bytes(), 32);

        let second = alloc.allocate(layout);
        assert!(second.is_ok());
        assert_eq!(
            alloc.allocate(layout),
            Err(OutOfMemory { size: 32 }),
            "A third block would exceed the limit."
        );
        assert_eq!(alloc.total_allocations(), 2, "Failed allocations shouldn't be counted.");

        for ptr in [first, second].into_iter().flatten() {
            // SAFETY: Both pointers were allocated above with the same layout.
            unsafe { alloc.deallocate(ptr, layout) };
        }
        assert!(!alloc.has_leaks());
        assert_eq!(alloc.outstanding_bytes(), 0);
    }
}
