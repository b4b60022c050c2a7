use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::{cmp, iter, slice};

use crate::alloc::{Alloc, Global, RawArray};
use crate::error::{Full, OutOfMemory};
use crate::util::fmt::DebugList;

/// A borrowed iterator over the contents of a [`RingBuffer`] in FIFO order. The contents may wrap
/// around the end of the storage, in which case they are made up of two slices.
pub type Iter<'a, T> = iter::Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>;

/// A first-in-first-out buffer holding at most `N` elements, with storage allocated once on
/// construction and never again.
///
/// Reading and writing are both `O(1)`: values are written at a write index and read from a read
/// index, both of which wrap around modulo `N`. The number of stored elements is tracked separately
/// from the indices, because the indices alone can't tell a full buffer from an empty one.
///
/// When the buffer is full, [`write`](RingBuffer::write) fails with [`Full`] rather than
/// overwriting the oldest element.
///
/// # Examples
/// ```
/// # use managed_collections::collections::circ::RingBuffer;
/// let mut buf = RingBuffer::<u8, 4>::new().unwrap();
/// buf.write(1).unwrap();
/// buf.write(2).unwrap();
/// buf.write(3).unwrap();
/// assert_eq!(buf.read(), Some(1));
///
/// buf.write(4).unwrap();
/// buf.write(5).unwrap();
/// assert_eq!(buf.write(6).map_err(|e| e.into_inner()), Err(6));
///
/// assert!(buf.iter().eq(&[2, 3, 4, 5]));
/// ```
pub struct RingBuffer<T, const N: usize, A: Alloc = Global> {
    pub(crate) arr: RawArray<T>,
    pub(crate) read_index: usize,
    pub(crate) write_index: usize,
    pub(crate) count: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Creates a new, empty RingBuffer with storage for `N` elements from the [`Global`] allocator.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the storage can't be allocated.
    pub fn new() -> Result<RingBuffer<T, N>, OutOfMemory> {
        RingBuffer::new_in(Global)
    }
}

impl<T, const N: usize, A: Alloc> RingBuffer<T, N, A> {
    const NON_ZERO_CAP: () = assert!(N > 0, "RingBuffer capacity must be greater than zero!");

    /// Creates a new, empty RingBuffer with storage for `N` elements allocated from `alloc`. This
    /// is the only allocation the buffer ever makes.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the storage can't be allocated.
    pub fn new_in(alloc: A) -> Result<RingBuffer<T, N, A>, OutOfMemory> {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO_CAP;

        Ok(RingBuffer {
            arr: RawArray::allocate_in(N, &alloc)?,
            read_index: 0,
            write_index: 0,
            count: 0,
            alloc,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of elements in the buffer.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns the capacity of the buffer, which is always `N`.
    pub const fn cap(&self) -> usize {
        N
    }

    /// Returns true if the buffer contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the buffer contains `N` elements, meaning that the next write will fail.
    pub const fn is_full(&self) -> bool {
        self.count == N
    }

    /// Writes `value` to the back of the buffer.
    ///
    /// # Errors
    /// If the buffer is full, `value` is returned inside of [`Full`].
    pub fn write(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }

        // SAFETY: write_index is always < N and the slot isn't initialized, because the buffer
        // isn't full.
        unsafe { self.arr.write(self.write_index, value) };
        self.write_index = (self.write_index + 1) % N;
        self.count += 1;
        Ok(())
    }

    /// Reads and removes the value at the front of the buffer, returning [`None`] if it is empty.
    pub fn read(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // SAFETY: read_index is always < N and points at the oldest initialized value, because the
        // buffer isn't empty. The slot is considered uninitialized once read_index moves on.
        let value = unsafe { self.arr.read(self.read_index) };
        self.read_index = (self.read_index + 1) % N;
        self.count -= 1;
        Some(value)
    }

    /// Returns a reference to the value at the front of the buffer without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: As with read, the slot at read_index is initialized.
            Some(unsafe { self.arr.get(self.read_index) })
        }
    }

    /// Drops all values in the buffer and resets both indices.
    pub fn clear(&mut self) {
        let (front, back) = self.live_ranges();
        self.read_index = 0;
        self.write_index = 0;
        self.count = 0;

        // SAFETY: Both ranges are within bounds and only cover initialized slots. The counters
        // have already been reset, so they won't be dropped again.
        unsafe {
            self.arr.drop_range(front.0, front.1);
            self.arr.drop_range(back.0, back.1);
        }
    }

    /// Returns the contents of the buffer as two slices, which, when joined, contain every element
    /// in FIFO order. The second slice is empty unless the contents wrap around the end of the
    /// storage.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.live_ranges();

        // SAFETY: Both ranges are within bounds and only cover initialized slots.
        unsafe {
            (
                slice::from_raw_parts(self.arr.get_ptr(front.0), front.1),
                slice::from_raw_parts(self.arr.get_ptr(back.0), back.1),
            )
        }
    }

    /// Returns a borrowed iterator over the buffer's contents in FIFO order.
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.as_slices();
        front.iter().chain(back.iter())
    }

    /// Returns the (start, count) pairs of the initialized slots, in FIFO order.
    pub(crate) fn live_ranges(&self) -> ((usize, usize), (usize, usize)) {
        if self.count == 0 {
            return ((0, 0), (0, 0));
        }

        let front_len = cmp::min(self.count, N - self.read_index);
        ((self.read_index, front_len), (0, self.count - front_len))
    }
}

impl<T, const N: usize, A: Alloc> Drop for RingBuffer<T, N, A> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: arr is only ever allocated from self.alloc and this is the only place that it is
        // released.
        unsafe { self.arr.release_in(&self.alloc) }
    }
}

impl<'a, T, const N: usize, A: Alloc> IntoIterator for &'a RingBuffer<T, N, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug, const N: usize, A: Alloc> Debug for RingBuffer<T, N, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("contents", &DebugList(self.iter()))
            .field("len", &self.count)
            .field("cap", &N)
            .field("read_index", &self.read_index)
            .field("write_index", &self.write_index)
            .finish()
    }
}
