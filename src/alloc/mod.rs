//! Allocation primitives used by every collection in this crate.
//!
//! Rather than calling into the global allocator directly, each collection is generic over an
//! [`Alloc`] which it captures on construction and uses for every allocation that it makes over its
//! lifetime. When the collection is dropped, every block it holds is returned to that same
//! allocator exactly once.
//!
//! Allocation failure is never turned into an abort or a panic here: [`Alloc::allocate`] reports it
//! as [`OutOfMemory`] and collections pass it straight back to their caller.
//!
//! [`TrackingAlloc`] keeps count of outstanding allocations, which makes it possible to check that
//! a collection hasn't leaked (or double freed) anything.

mod global;
mod raw_array;
mod tracking;

use std::alloc::Layout;
use std::ptr::NonNull;

pub use global::*;
pub(crate) use raw_array::*;
pub use tracking::*;

#[doc(inline)]
pub use crate::error::OutOfMemory;

/// A source of memory for collections.
///
/// Implementations are handed non-zero sized layouts by the collections in this crate, although
/// [`Global`] accepts zero-sized layouts too.
pub trait Alloc {
    /// Allocates a block of memory fitting `layout`, returning a pointer to the start of it.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the block can't be provided.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory>;

    /// Returns a block of memory to the allocator.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`allocate`](Alloc::allocate) on this same allocator with
    /// the same `layout`, and must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: Alloc + ?Sized> Alloc for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller upholds the contract of the allocator being referenced.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
