use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Link, ListContents, ListState, SinglyLinkedList};
use crate::alloc::{Alloc, Global};

impl<T, A: Alloc> IntoIterator for SinglyLinkedList<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// An owned iterator over the elements of a [`SinglyLinkedList`], from head to tail. Each node is
/// returned to the allocator as soon as its element is yielded.
pub struct IntoIter<T, A: Alloc = Global> {
    pub(crate) list: SinglyLinkedList<T, A>,
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

impl<T, A: Alloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: Alloc> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.list.len()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a SinglyLinkedList<T, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            next: head_of(&self.state),
            len: self.len(),
            _phantom: PhantomData,
        }
    }
}

/// A borrowed iterator over the elements of a [`SinglyLinkedList`], from head to tail.
pub struct Iter<'a, T> {
    pub(crate) next: Link<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: The list is borrowed for 'a, so every node reachable from the head stays
        // allocated and unmodified.
        unsafe {
            self.next = node.next();
            self.len -= 1;
            Some(node.value())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            next: self.next,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a mut SinglyLinkedList<T, A> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            next: head_of(&self.state),
            len: self.len(),
            _phantom: PhantomData,
        }
    }
}

/// A mutable borrowed iterator over the elements of a [`SinglyLinkedList`], from head to tail.
pub struct IterMut<'a, T> {
    pub(crate) next: Link<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: The list is borrowed mutably for 'a and each node is only yielded once, so the
        // references handed out never alias.
        unsafe {
            self.next = node.next();
            self.len -= 1;
            Some(node.value_mut())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T, A: Alloc> SinglyLinkedList<T, A> {
    /// Returns a mutable borrowed iterator over the list's elements, from head to tail.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }
}

const fn head_of<T>(state: &ListState<T>) -> Link<T> {
    match state {
        ListState::Empty => None,
        ListState::Full(ListContents { head, .. }) => Some(*head),
    }
}
