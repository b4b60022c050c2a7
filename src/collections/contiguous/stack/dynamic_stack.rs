use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use crate::alloc::{Alloc, Global, RawArray};
use crate::error::{OutOfMemory, Rejected};
use crate::util::result::ResultExtension;

/// A last-in-first-out stack stored contiguously, growing its capacity by doubling whenever it is
/// full. All memory is allocated through `A`.
///
/// The stack dereferences to a slice of its contents, ordered from the bottom of the stack to the
/// top.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the stack.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `peek` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* If the stack doesn't have enough capacity for the new element, `push` will take `O(n)`. The
/// capacity doubles each time this happens, so the average cost of a push remains `O(1)`.
///
/// \** If the stack has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct DynamicStack<T, A: Alloc = Global> {
    pub(crate) arr: RawArray<T>,
    pub(crate) len: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> DynamicStack<T> {
    /// Creates a new, empty stack using the [`Global`] allocator. Nothing is allocated until the
    /// first push.
    ///
    /// # Examples
    /// ```
    /// # use managed_collections::collections::contiguous::DynamicStack;
    /// let stack: DynamicStack<u8> = DynamicStack::new();
    /// assert_eq!(stack.len(), 0);
    /// assert_eq!(stack.cap(), 0);
    /// ```
    pub const fn new() -> DynamicStack<T> {
        DynamicStack::new_in(Global)
    }

    /// Creates a new stack with exactly `cap` capacity, using the [`Global`] allocator.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the allocation fails.
    pub fn with_cap(cap: usize) -> Result<DynamicStack<T>, OutOfMemory> {
        DynamicStack::with_cap_in(cap, Global)
    }
}

impl<T, A: Alloc> DynamicStack<T, A> {
    /// Creates a new, empty stack which will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> DynamicStack<T, A> {
        DynamicStack {
            arr: RawArray::dangling(),
            len: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Creates a new stack with exactly `cap` capacity, allocated from `alloc`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the allocation fails.
    pub fn with_cap_in(cap: usize, alloc: A) -> Result<DynamicStack<T, A>, OutOfMemory> {
        Ok(DynamicStack {
            arr: RawArray::allocate_in(cap, &alloc)?,
            len: 0,
            alloc,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of elements on the stack.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the stack contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the stack can hold before it needs to grow.
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    /// Returns a reference to the allocator used by the stack.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pushes `value` onto the top of the stack, doubling the capacity first if the stack is full.
    ///
    /// # Errors
    /// If growing the stack fails, `value` is returned inside of [`Rejected`] alongside the
    /// [`OutOfMemory`] error, and the stack is left unchanged.
    ///
    /// # Examples
    /// ```
    /// # use managed_collections::collections::contiguous::DynamicStack;
    /// let mut stack = DynamicStack::new();
    /// for i in 0..5 {
    ///     stack.push(i).unwrap();
    /// }
    /// assert_eq!(&*stack, &[0, 1, 2, 3, 4]);
    /// assert_eq!(stack.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), Rejected<T, OutOfMemory>> {
        if self.len == self.cap() {
            if let Err(error) = self.grow() {
                return Err(Rejected { value, error });
            }
        }

        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Pushes `value` onto the top of the stack, assuming that there is enough capacity to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the stack has capacity for another value, using
    /// [`reserve`](DynamicStack::reserve) or [`with_cap_in`](DynamicStack::with_cap_in). Using this
    /// method on a full stack is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees that len is within the capacity.
        unsafe { self.arr.write(self.len, value) };
        self.len += 1;
    }

    /// Removes the value on top of the stack and returns it, or [`None`] if the stack is empty.
    ///
    /// # Examples
    /// ```
    /// # use managed_collections::collections::contiguous::DynamicStack;
    /// let mut stack: DynamicStack<_> = (0..3).collect();
    /// assert_eq!(stack.pop(), Some(2));
    /// assert_eq!(stack.pop(), Some(1));
    /// assert_eq!(stack.pop(), Some(0));
    /// assert_eq!(stack.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading, so that the slot is no longer considered initialized.
            self.len -= 1;

            // SAFETY: len has just been decremented, so it is within the capacity and the slot was
            // initialized. The value is copied off of the heap and then forgotten about there.
            Some(unsafe { self.arr.read(self.len) })
        }
    }

    /// Returns a reference to the value on top of the stack without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.last()
    }

    /// Returns a mutable reference to the value on top of the stack without removing it.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    /// Drops every value on the stack. The capacity is left unchanged.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set len first, so that a panicking drop can't lead to a double drop.
        self.len = 0;

        // SAFETY: All values less than the previous len are initialized and safe to drop.
        unsafe { self.arr.drop_range(0, len) };
    }

    /// Ensures that the stack has capacity to hold an additional `extra` elements. After invoking
    /// this method successfully, the capacity will be >= len + extra.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the new capacity can't be allocated. The stack is unchanged.
    pub fn reserve(&mut self, extra: usize) -> Result<(), OutOfMemory> {
        let new_cap = self.len.checked_add(extra).ok_or(OutOfMemory { size: usize::MAX })?;

        if new_cap <= self.cap() {
            return Ok(());
        }

        self.realloc_with_cap(new_cap)
    }

    /// Pushes every value produced by `iter`, stopping at the first value that can't be pushed.
    ///
    /// # Errors
    /// Returns the first value that couldn't be pushed. Values pushed before it remain on the
    /// stack, values after it are never taken from the iterator.
    pub fn try_extend<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    ) -> Result<(), Rejected<T, OutOfMemory>> {
        for value in iter {
            self.push(value)?;
        }
        Ok(())
    }

    /// Grows the backing storage to allow for the insertion of at least one more element, doubling
    /// the capacity (or allocating 4 slots for an empty stack).
    pub(crate) fn grow(&mut self) -> Result<(), OutOfMemory> {
        self.realloc_with_cap(self.arr.grown_size()?)
    }

    /// Moves the backing storage into a new allocation with `new_cap` slots.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) -> Result<(), OutOfMemory> {
        debug_assert!(new_cap >= self.len);

        // SAFETY: arr is only ever allocated from self.alloc, and every initialized value is below
        // len, which is kept.
        unsafe { self.arr.resize_in(new_cap, self.len, &self.alloc) }
    }
}

impl<T, A: Alloc> Extend<T> for DynamicStack<T, A> {
    /// Pushes every value produced by `iter`.
    ///
    /// # Panics
    /// Panics if the stack runs out of memory. See [`DynamicStack::try_extend`] for a fallible
    /// alternative.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.try_extend(iter).map_err(|rejected| rejected.error).throw()
    }
}

impl<T> FromIterator<T> for DynamicStack<T> {
    /// # Panics
    /// Panics if the stack runs out of memory.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = DynamicStack::new();
        stack.extend(iter);
        stack
    }
}

impl<T> Default for DynamicStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Alloc> Drop for DynamicStack<T, A> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: arr is only ever allocated from self.alloc and this is the only place that it is
        // released.
        unsafe { self.arr.release_in(&self.alloc) }
    }
}

impl<T, A: Alloc> Deref for DynamicStack<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: All values less than len are initialized, and len never exceeds the capacity.
        unsafe { self.arr.as_slice(self.len) }
    }
}

impl<T, A: Alloc> DerefMut for DynamicStack<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: All values less than len are initialized, and len never exceeds the capacity.
        unsafe { self.arr.as_mut_slice(self.len) }
    }
}

impl<T, A: Alloc> AsRef<[T]> for DynamicStack<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Alloc> AsMut<[T]> for DynamicStack<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Alloc> Borrow<[T]> for DynamicStack<T, A> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Alloc> BorrowMut<[T]> for DynamicStack<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: PartialEq, A: Alloc> PartialEq for DynamicStack<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: Alloc> Eq for DynamicStack<T, A> {}

impl<T: Debug, A: Alloc> Debug for DynamicStack<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicStack")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}
