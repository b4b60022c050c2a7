use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

use super::Alloc;
use crate::error::OutOfMemory;

/// The process-wide global allocator. This is the default allocator for every collection.
///
/// Unlike [`Box`] or [`Vec`], a failed allocation is reported as [`OutOfMemory`] instead of calling
/// [`alloc::handle_alloc_error`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl Alloc for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
        if layout.size() == 0 {
            // Zero-sized blocks are never handed to the system allocator, but they still need to
            // be properly aligned. Alignment is always non-zero.
            return NonNull::new(ptr::without_provenance_mut(layout.align()))
                .ok_or(OutOfMemory { size: 0 });
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr = unsafe { alloc::alloc(layout) };

        NonNull::new(raw_ptr).ok_or(OutOfMemory { size: layout.size() })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: The caller guarantees that ptr was allocated by this allocator with the same
            // layout. Zero-sized layouts were never allocated and are guarded against.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
        }
    }
}
