use std::fmt::{self, Debug, Formatter};

use super::{Iter, RingBuffer};
use crate::alloc::{Alloc, Global};
use crate::error::{Full, OutOfMemory};
use crate::util::fmt::DebugList;

/// A first-in-first-out queue with a fixed capacity of `N` elements.
///
/// BoundedQueue is backed by a [`RingBuffer`] and shares its behavior, exposing it through queue
/// terminology instead: [`enqueue`](BoundedQueue::enqueue) fails with [`Full`] once the queue holds
/// `N` elements, and [`dequeue`](BoundedQueue::dequeue) returns [`None`] when it is empty.
///
/// # Examples
/// ```
/// # use managed_collections::collections::circ::BoundedQueue;
/// let mut queue = BoundedQueue::<&str, 2>::new().unwrap();
/// queue.enqueue("first").unwrap();
/// queue.enqueue("second").unwrap();
/// assert!(queue.is_full());
/// assert!(queue.enqueue("third").is_err());
///
/// assert_eq!(queue.dequeue(), Some("first"));
/// assert_eq!(queue.peek(), Some(&"second"));
/// ```
pub struct BoundedQueue<T, const N: usize, A: Alloc = Global> {
    pub(crate) inner: RingBuffer<T, N, A>,
}

impl<T, const N: usize> BoundedQueue<T, N> {
    /// Creates a new, empty queue with storage for `N` elements from the [`Global`] allocator.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the storage can't be allocated.
    pub fn new() -> Result<BoundedQueue<T, N>, OutOfMemory> {
        BoundedQueue::new_in(Global)
    }
}

impl<T, const N: usize, A: Alloc> BoundedQueue<T, N, A> {
    /// Creates a new, empty queue with storage for `N` elements allocated from `alloc`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the storage can't be allocated.
    pub fn new_in(alloc: A) -> Result<BoundedQueue<T, N, A>, OutOfMemory> {
        Ok(BoundedQueue {
            inner: RingBuffer::new_in(alloc)?,
        })
    }

    /// Returns the number of elements in the queue.
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns the capacity of the queue, which is always `N`.
    pub const fn cap(&self) -> usize {
        N
    }

    /// Returns true if the queue contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the queue contains `N` elements, meaning that the next enqueue will fail.
    pub const fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Adds `value` to the back of the queue.
    ///
    /// # Errors
    /// If the queue is full, `value` is returned inside of [`Full`].
    pub fn enqueue(&mut self, value: T) -> Result<(), Full<T>> {
        self.inner.write(value)
    }

    /// Removes the value at the front of the queue, returning [`None`] if it is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.inner.read()
    }

    /// Returns a reference to the value at the front of the queue without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }

    /// Drops every value in the queue.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Returns a borrowed iterator over the queue's contents, from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.inner.iter()
    }
}

impl<'a, T, const N: usize, A: Alloc> IntoIterator for &'a BoundedQueue<T, N, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug, const N: usize, A: Alloc> Debug for BoundedQueue<T, N, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("contents", &DebugList(self.iter()))
            .field("len", &self.len())
            .field("cap", &N)
            .finish()
    }
}
