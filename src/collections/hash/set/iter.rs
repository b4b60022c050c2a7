use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::HashSet;
use crate::alloc::{Alloc, Global};
use crate::collections::hash::map::{IntoKeys, Keys};

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> IntoIterator for HashSet<T, B, A> {
    type Item = T;

    type IntoIter = IntoIter<T, B, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.inner.into_keys())
    }
}

/// A type for owned iteration over a [`HashSet`]. Produces values of type `T`.
pub struct IntoIter<T, B, A: Alloc = Global>(pub(crate) IntoKeys<T, (), B, A>);

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> Iterator for IntoIter<T, B, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> FusedIterator for IntoIter<T, B, A> {}

impl<T: Hash + Eq, B: BuildHasher, A: Alloc> ExactSizeIterator for IntoIter<T, B, A> {}

impl<'a, T: Hash + Eq, B: BuildHasher, A: Alloc> IntoIterator for &'a HashSet<T, B, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.inner.keys())
    }
}

/// A type for borrowed iteration over a [`HashSet`]. Produces values of type `&T`.
///
/// See [`HashSet::iter`].
pub struct Iter<'a, T>(pub(crate) Keys<'a, T, ()>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter(self.0.clone())
    }
}
