use std::iter::FusedIterator;
use std::slice;

use super::DynamicStack;
use crate::alloc::{Alloc, Global};

impl<T, A: Alloc> IntoIterator for DynamicStack<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { stack: self }
    }
}

/// An owned iterator over the values of a [`DynamicStack`], yielding them from top to bottom (the
/// order in which they would be popped). Any values that aren't yielded are dropped along with the
/// iterator.
pub struct IntoIter<T, A: Alloc = Global> {
    pub(crate) stack: DynamicStack<T, A>,
}

impl<T, A: Alloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl<T, A: Alloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: Alloc> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.stack.len()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a DynamicStack<T, A> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a mut DynamicStack<T, A> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
