use std::iter::FusedIterator;

use super::{Arena, DoublyLinkedList};
use crate::alloc::{Alloc, Global};

impl<T, A: Alloc> IntoIterator for DoublyLinkedList<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// An owned iterator over the elements of a [`DoublyLinkedList`], which can be consumed from
/// either end.
pub struct IntoIter<T, A: Alloc = Global> {
    pub(crate) list: DoublyLinkedList<T, A>,
}

impl<T, A: Alloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: Alloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_last()
    }
}

impl<T, A: Alloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: Alloc> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.list.len()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a DoublyLinkedList<T, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            arena: &self.arena,
            front: self.ends.map(|ends| ends.head),
            back: self.ends.map(|ends| ends.tail),
            len: self.len(),
        }
    }
}

/// A borrowed iterator over the elements of a [`DoublyLinkedList`]. The front and back of the
/// iterator meet in the middle, with `len` tracking how many elements remain between them.
pub struct Iter<'a, T> {
    pub(crate) arena: &'a Arena<T>,
    pub(crate) front: Option<usize>,
    pub(crate) back: Option<usize>,
    pub(crate) len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.arena.get(self.front?)?;
        self.front = node.next;
        self.len -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let node = self.arena.get(self.back?)?;
        self.back = node.prev;
        self.len -= 1;
        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}
