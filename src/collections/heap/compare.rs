use std::cmp::Ordering;

/// A strategy for ordering the elements of a [`BinaryMinHeap`](super::BinaryMinHeap).
///
/// The heap keeps the element which compares as the least on top. Any closure of the form
/// `Fn(&T, &T) -> Ordering` can be used as a Compare, so a max-heap is as simple as:
/// ```
/// # use managed_collections::collections::heap::BinaryMinHeap;
/// let mut heap = BinaryMinHeap::with_compare(|a: &u8, b: &u8| b.cmp(a));
/// heap.insert(1).unwrap();
/// heap.insert(3).unwrap();
/// assert_eq!(heap.peek(), Some(&3));
/// ```
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b).is_lt()
    }
}

/// Orders elements by their [`Ord`] implementation. This is the default for every heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another comparator, turning a min-heap into a max-heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C = Natural>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reversed<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Compare<T> for F {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
