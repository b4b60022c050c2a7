use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::{mem, slice};

use super::{Compare, Natural};
use crate::alloc::{Alloc, Global};
use crate::collections::contiguous::DynamicStack;
use crate::error::{OutOfMemory, Rejected};
use crate::util::result::ResultExtension;

/// A priority queue, keeping the least element (according to `C`) on top. See [`BinaryMinHeap`].
pub type PriorityQueue<T, C = Natural, A = Global> = BinaryMinHeap<T, C, A>;

/// A min-heap stored as a complete binary tree in a [`DynamicStack`], which grows by the same
/// doubling rule.
///
/// Element `i` is the parent of elements `2i + 1` and `2i + 2`, and no element compares as less
/// than its parent. This makes the least element the root, at index 0. The order is provided by a
/// [`Compare`] strategy, [`Natural`] by default.
///
/// Equal elements are kept in no particular order. When both children of an element being sifted
/// down are equal, the left child is preferred.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the heap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `peek` | `O(1)` |
/// | `insert` | `O(log n)`*, `O(n)` |
/// | `extract_min` | `O(log n)` |
/// | `from_stack` | `O(n)` |
/// | `into_sorted` | `O(n log n)` |
///
/// \* If the heap doesn't have enough capacity for the new element, it is reallocated first.
///
/// # Examples
/// ```
/// # use managed_collections::collections::heap::BinaryMinHeap;
/// let mut heap = BinaryMinHeap::new();
/// for value in [30, 10, 20, 5] {
///     heap.insert(value).unwrap();
/// }
///
/// assert_eq!(heap.peek(), Some(&5));
/// assert_eq!(heap.extract_min(), Some(5));
/// assert_eq!(heap.extract_min(), Some(10));
/// assert_eq!(heap.extract_min(), Some(20));
/// assert_eq!(heap.extract_min(), Some(30));
/// assert_eq!(heap.extract_min(), None);
/// ```
pub struct BinaryMinHeap<T, C = Natural, A: Alloc = Global> {
    pub(crate) data: DynamicStack<T, A>,
    pub(crate) compare: C,
}

impl<T: Ord> BinaryMinHeap<T> {
    /// Creates a new, empty heap ordered by [`Ord`], using the [`Global`] allocator.
    pub const fn new() -> BinaryMinHeap<T> {
        BinaryMinHeap::with_compare_in(Natural, Global)
    }
}

impl<T: Ord, A: Alloc> BinaryMinHeap<T, Natural, A> {
    /// Creates a new, empty heap ordered by [`Ord`], which will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> BinaryMinHeap<T, Natural, A> {
        BinaryMinHeap::with_compare_in(Natural, alloc)
    }
}

impl<T, C: Compare<T>> BinaryMinHeap<T, C> {
    /// Creates a new, empty heap ordered by `compare`, using the [`Global`] allocator.
    pub const fn with_compare(compare: C) -> BinaryMinHeap<T, C> {
        BinaryMinHeap::with_compare_in(compare, Global)
    }
}

impl<T, C: Compare<T>, A: Alloc> BinaryMinHeap<T, C, A> {
    /// Creates a new, empty heap ordered by `compare`, which will allocate from `alloc`. Nothing is
    /// allocated until the first insertion.
    pub const fn with_compare_in(compare: C, alloc: A) -> BinaryMinHeap<T, C, A> {
        BinaryMinHeap {
            data: DynamicStack::new_in(alloc),
            compare,
        }
    }

    /// Turns `stack` into a heap ordered by `compare`, without allocating. The elements are
    /// rearranged in place, starting from the last parent and sifting each one down.
    pub fn from_stack(stack: DynamicStack<T, A>, compare: C) -> BinaryMinHeap<T, C, A> {
        let mut heap = BinaryMinHeap { data: stack, compare };

        for index in (0..heap.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }

    /// Returns the heap's underlying stack, with its elements in no particular order.
    pub fn into_stack(self) -> DynamicStack<T, A> {
        self.data
    }

    /// Returns the number of elements in the heap.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements the heap can hold before it needs to grow.
    pub const fn cap(&self) -> usize {
        self.data.cap()
    }

    /// Returns a reference to the allocator used by the heap.
    pub const fn allocator(&self) -> &A {
        self.data.allocator()
    }

    /// Returns a reference to the comparator used to order the heap.
    pub const fn comparator(&self) -> &C {
        &self.compare
    }

    /// Adds `value` to the heap. The value is placed at the end of the tree and then swapped with
    /// its parent for as long as it is less than it.
    ///
    /// # Errors
    /// If the heap needs to grow and can't, `value` is returned inside of [`Rejected`] and the heap
    /// is left unchanged.
    pub fn insert(&mut self, value: T) -> Result<(), Rejected<T, OutOfMemory>> {
        self.data.push(value)?;
        self.sift_up(self.len() - 1);
        Ok(())
    }

    /// Removes the least element from the heap and returns it, or [`None`] if the heap is empty.
    /// The last element in the tree takes its place and is then sifted down.
    pub fn extract_min(&mut self) -> Option<T> {
        let last = self.data.pop()?;

        if self.data.is_empty() {
            return Some(last);
        }

        let min = mem::replace(&mut self.data[0], last);
        self.sift_down(0);
        Some(min)
    }

    /// Returns a reference to the least element in the heap without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Drops every element in the heap. The capacity is left unchanged.
    pub fn clear(&mut self) {
        self.data.clear()
    }

    /// Ensures that the heap has capacity to hold an additional `extra` elements.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the new capacity can't be allocated. The heap is unchanged.
    pub fn reserve(&mut self, extra: usize) -> Result<(), OutOfMemory> {
        self.data.reserve(extra)
    }

    /// Inserts every value produced by `iter`, stopping at the first value that can't be inserted.
    ///
    /// # Errors
    /// Returns the first value that couldn't be inserted. Values before it remain in the heap.
    pub fn try_extend<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    ) -> Result<(), Rejected<T, OutOfMemory>> {
        for value in iter {
            self.insert(value)?;
        }
        Ok(())
    }

    /// Returns the elements of the heap in their internal order, which is level by level through
    /// the tree. The first element is always the least.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a borrowed iterator over the heap's elements, in no particular order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the heap, returning an iterator which extracts its elements in ascending order.
    ///
    /// # Examples
    /// ```
    /// # use managed_collections::collections::heap::BinaryMinHeap;
    /// let heap: BinaryMinHeap<_> = [4, 1, 3, 2].into_iter().collect();
    /// assert!(heap.into_sorted().eq([1, 2, 3, 4]));
    /// ```
    pub fn into_sorted(self) -> IntoSorted<T, C, A> {
        IntoSorted { heap: self }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.compare.less(&self.data[a], &self.data[b])
    }

    pub(crate) fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;

            if self.less(index, parent) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    pub(crate) fn sift_down(&mut self, mut index: usize) {
        let len = self.len();

        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            // The right child is only taken when it is strictly less than the left.
            let smaller = if right < len && self.less(right, left) {
                right
            } else {
                left
            };

            if self.less(smaller, index) {
                self.data.swap(index, smaller);
                index = smaller;
            } else {
                break;
            }
        }
    }

    /// Checks that no element is less than its parent.
    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.len()).all(|index| !self.less(index, (index - 1) / 2))
    }
}

impl<T, C: Compare<T>, A: Alloc> Extend<T> for BinaryMinHeap<T, C, A> {
    /// Inserts every value produced by `iter`.
    ///
    /// # Panics
    /// Panics if the heap runs out of memory. See [`BinaryMinHeap::try_extend`] for a fallible
    /// alternative.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.try_extend(iter).map_err(|rejected| rejected.error).throw()
    }
}

impl<T: Ord> FromIterator<T> for BinaryMinHeap<T> {
    /// Collects every value into a stack and then heapifies it in place.
    ///
    /// # Panics
    /// Panics if the heap runs out of memory.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        BinaryMinHeap::from_stack(iter.into_iter().collect(), Natural)
    }
}

impl<T: Ord> Default for BinaryMinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, C, A: Alloc> IntoIterator for &'a BinaryMinHeap<T, C, A> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Debug, C, A: Alloc> Debug for BinaryMinHeap<T, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryMinHeap")
            .field("contents", &&*self.data)
            .field("len", &self.data.len())
            .field("cap", &self.data.cap())
            .finish()
    }
}

/// An owned iterator which extracts the elements of a [`BinaryMinHeap`] in ascending order. Any
/// elements that aren't yielded are dropped along with the iterator.
pub struct IntoSorted<T, C = Natural, A: Alloc = Global> {
    pub(crate) heap: BinaryMinHeap<T, C, A>,
}

impl<T, C: Compare<T>, A: Alloc> Iterator for IntoSorted<T, C, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.extract_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T, C: Compare<T>, A: Alloc> FusedIterator for IntoSorted<T, C, A> {}

impl<T, C: Compare<T>, A: Alloc> ExactSizeIterator for IntoSorted<T, C, A> {
    fn len(&self) -> usize {
        self.heap.len()
    }
}
