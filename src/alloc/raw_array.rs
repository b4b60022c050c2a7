use std::alloc::Layout;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::{cmp, mem, slice};

use super::Alloc;
use crate::error::OutOfMemory;

/// The size allocated by the first growth of an empty array.
pub(crate) const MIN_CAP: usize = 4;

pub(crate) const GROWTH_FACTOR: usize = 2;

/// A fixed number of uninitialized slots for values of `T`, allocated from an [`Alloc`].
///
/// RawArray doesn't hold onto its allocator. Instead, every method that (de)allocates takes the
/// allocator as an argument, leaving the owning collection to capture it once and pass it along. As
/// a result, RawArray doesn't implement [`Drop`] either: the owner is responsible for dropping any
/// values it initialized and for calling [`release_in`](RawArray::release_in) exactly once.
///
/// Zero-sized allocations (either a size of 0 or a zero-sized `T`) never reach the allocator.
pub(crate) struct RawArray<T> {
    ptr: NonNull<T>,
    size: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawArray<T> {
    /// Creates a RawArray with size 0, without allocating.
    pub const fn dangling() -> RawArray<T> {
        RawArray {
            ptr: NonNull::dangling(),
            size: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a RawArray with `size` uninitialized slots from `alloc`.
    pub fn allocate_in<A: Alloc>(size: usize, alloc: &A) -> Result<RawArray<T>, OutOfMemory> {
        let layout = Self::make_layout(size)?;

        Ok(RawArray {
            ptr: Self::make_ptr(layout, alloc)?,
            size,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of slots in the RawArray.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the size that the array should be resized to when it runs out of slots, which is
    /// `max(MIN_CAP, size * GROWTH_FACTOR)`.
    pub fn grown_size(&self) -> Result<usize, OutOfMemory> {
        let scaled = self.size.checked_mul(GROWTH_FACTOR).ok_or(OutOfMemory { size: usize::MAX })?;
        Ok(cmp::max(scaled, MIN_CAP))
    }

    /// Moves the RawArray into a new allocation of `new_size` slots, carrying the first `keep`
    /// slots across. The old allocation is released afterwards. If allocation fails, self is left
    /// untouched.
    ///
    /// # Safety
    /// Self must have been allocated by `alloc`. `keep` must be no greater than either size and
    /// any initialized values in slots `keep..` must already have been moved out or dropped.
    pub unsafe fn resize_in<A: Alloc>(
        &mut self,
        new_size: usize,
        keep: usize,
        alloc: &A,
    ) -> Result<(), OutOfMemory> {
        debug_assert!(keep <= cmp::min(self.size, new_size));

        if new_size == self.size {
            return Ok(());
        }

        let mut new_arr = Self::allocate_in(new_size, alloc)?;

        // SAFETY: Both allocations are valid for at least keep slots, properly aligned and are
        // distinct allocations, so they don't overlap.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_arr.ptr.as_ptr(), keep);
        }

        // Swap first, so that the old allocation ends up in new_arr and is released from there.
        mem::swap(self, &mut new_arr);
        // SAFETY: new_arr now holds the old allocation, which the caller guarantees came from
        // alloc. All values that remain in it have been copied bitwise and aren't dropped here.
        unsafe { new_arr.release_in(alloc) };

        Ok(())
    }

    /// Returns the allocation to `alloc`, leaving self dangling with size 0. Values in the slots
    /// aren't dropped.
    ///
    /// # Safety
    /// Self must have been allocated by `alloc`.
    pub unsafe fn release_in<A: Alloc>(&mut self, alloc: &A) {
        // The layout was valid when allocated, so it is valid now.
        if let Ok(layout) = Self::make_layout(self.size) {
            if layout.size() != 0 {
                // SAFETY: ptr was allocated by alloc with this same layout, as guaranteed by the
                // caller. Zero-sized layouts are never allocated and are guarded against.
                unsafe { alloc.deallocate(self.ptr.cast(), layout) }
            }
        }

        *self = RawArray::dangling();
    }

    /// Moves the value out of slot `index`, leaving the slot logically uninitialized.
    ///
    /// # Safety
    /// `index` must be less than the size and the slot must be initialized.
    pub const unsafe fn read(&self, index: usize) -> T {
        // SAFETY: The caller guarantees that index is in bounds and initialized.
        unsafe { self.ptr.add(index).read() }
    }

    /// Writes `value` into slot `index` without dropping the previous contents.
    ///
    /// # Safety
    /// `index` must be less than the size.
    pub unsafe fn write(&mut self, index: usize, value: T) {
        // SAFETY: The caller guarantees that index is in bounds. The pointer is properly aligned.
        unsafe { self.ptr.add(index).write(value) }
    }

    /// # Safety
    /// `index` must be less than the size and the slot must be initialized.
    pub const unsafe fn get(&self, index: usize) -> &T {
        // SAFETY: The caller guarantees that index is in bounds and initialized.
        unsafe { self.ptr.add(index).as_ref() }
    }

    /// # Safety
    /// `index` must be less than the size and the slot must be initialized.
    pub unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: The caller guarantees that index is in bounds and initialized.
        unsafe { self.ptr.add(index).as_mut() }
    }

    /// Returns a raw pointer to slot `index`, which may or may not be initialized.
    ///
    /// # Safety
    /// `index` must be no greater than the size.
    pub const unsafe fn get_ptr(&self, index: usize) -> *const T {
        // SAFETY: The caller guarantees that the offset stays within (or one past) the allocation.
        unsafe { self.ptr.add(index).as_ptr().cast_const() }
    }

    /// Views the first `len` slots as a slice.
    ///
    /// # Safety
    /// `len` must be no greater than the size and the first `len` slots must be initialized.
    pub const unsafe fn as_slice(&self, len: usize) -> &[T] {
        // SAFETY: The allocation is valid and properly aligned for size values, of which the
        // caller guarantees the first len are initialized. The total size is <= isize::MAX as the
        // layout was valid.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), len) }
    }

    /// Views the first `len` slots as a mutable slice.
    ///
    /// # Safety
    /// `len` must be no greater than the size and the first `len` slots must be initialized.
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        // SAFETY: As above, with unique access guaranteed by &mut self.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
    }

    /// Drops the values in slots `start..start + count` in place.
    ///
    /// # Safety
    /// The range must be in bounds and every slot in it must be initialized. The slots are
    /// logically uninitialized afterwards.
    pub unsafe fn drop_range(&mut self, start: usize, count: usize) {
        // SAFETY: The caller guarantees that the range is in bounds and initialized.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.add(start).as_ptr(),
                count,
            ));
        }
    }

    /// A helper function to create a [`Layout`] for `size` elements of type `T`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the layout's size would exceed [`isize::MAX`].
    fn make_layout(size: usize) -> Result<Layout, OutOfMemory> {
        Layout::array::<T>(size).map_err(|_| OutOfMemory {
            size: size.saturating_mul(size_of::<T>()),
        })
    }

    /// A helper function to allocate a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    fn make_ptr<A: Alloc>(layout: Layout, alloc: &A) -> Result<NonNull<T>, OutOfMemory> {
        if layout.size() == 0 {
            Ok(NonNull::dangling())
        } else {
            Ok(alloc.allocate(layout)?.cast())
        }
    }
}

// SAFETY: A RawArray is a unique pointer to its slots, so it can be sent when T can.
unsafe impl<T: Send> Send for RawArray<T> {}
// SAFETY: RawArray provides no interior mutability, shared access only hands out shared references.
unsafe impl<T: Sync> Sync for RawArray<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::TrackingAlloc;
    use crate::util::alloc::ZeroSizedType;

    #[test]
    fn test_resize_keeps_values() {
        let alloc = TrackingAlloc::new();
        let mut arr = RawArray::<u32>::allocate_in(2, &alloc).unwrap();
        // SAFETY: Both indices are in bounds, values are read back only after being written.
        unsafe {
            arr.write(0, 10);
            arr.write(1, 20);
            arr.resize_in(8, 2, &alloc).unwrap();
            assert_eq!(arr.as_slice(2), &[10, 20], "Kept values should survive a resize.");
        }
        assert_eq!(arr.size(), 8);
        assert_eq!(alloc.outstanding(), 1, "The old allocation should have been released.");
        assert_eq!(alloc.total_allocations(), 2);

        // SAFETY: arr was allocated by alloc.
        unsafe { arr.release_in(&alloc) };
        assert!(!alloc.has_leaks());
        assert_eq!(arr.size(), 0);
    }

    #[test]
    fn test_failed_resize_is_untouched() {
        let alloc = TrackingAlloc::with_limit(16);
        let mut arr = RawArray::<u64>::allocate_in(2, &alloc).unwrap();
        // SAFETY: arr was allocated by alloc and nothing is initialized.
        let result = unsafe { arr.resize_in(4, 0, &alloc) };
        assert_eq!(result, Err(OutOfMemory { size: 32 }));
        assert_eq!(arr.size(), 2);

        // SAFETY: arr was allocated by alloc.
        unsafe { arr.release_in(&alloc) };
        assert!(!alloc.has_leaks());
    }

    #[test]
    fn test_zst_never_allocates() {
        let alloc = TrackingAlloc::new();
        let mut arr = RawArray::<ZeroSizedType>::allocate_in(1000, &alloc).unwrap();
        // SAFETY: arr was allocated by alloc and nothing is initialized.
        unsafe { arr.resize_in(5000, 0, &alloc).unwrap() };
        assert_eq!(alloc.total_allocations(), 0);
        // SAFETY: As above.
        unsafe { arr.release_in(&alloc) };
    }

    #[test]
    fn test_capacity_overflow() {
        let alloc = TrackingAlloc::new();
        assert!(RawArray::<u64>::allocate_in(isize::MAX as usize, &alloc).is_err());
        assert_eq!(alloc.total_allocations(), 0);
    }
}
