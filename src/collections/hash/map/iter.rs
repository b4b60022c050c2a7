use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::slice;

use super::{Bucket, HashMap};
use crate::alloc::Alloc;

impl<'a, K: Hash + Eq, V, B: BuildHasher, A: Alloc> IntoIterator for &'a HashMap<K, V, B, A> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            len: self.len(),
            inner: self.buckets().iter(),
        }
    }
}

/// A type for borrowed iteration over a [`HashMap`]'s entries, in bucket order. Produces values
/// of type `(&K, &V)`.
///
/// See [`HashMap::iter`].
pub struct Iter<'a, K, V> {
    pub(crate) inner: slice::Iter<'a, Bucket<K, V>>,
    pub(crate) len: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.inner.by_ref() {
            if let Some((key, value)) = bucket {
                self.len -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
            len: self.len,
        }
    }
}

/// A type for borrowed iteration over a [`HashMap`]'s keys. Produces values of type `&K`.
///
/// See [`HashMap::keys`].
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys(self.0.clone())
    }
}

/// A type for borrowed iteration over a [`HashMap`]'s values. Produces values of type `&V`.
///
/// See [`HashMap::values`].
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> IntoIterator for HashMap<K, V, B, A> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, B, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            map: self,
            index: 0,
        }
    }
}

/// A type for owned iteration over a [`HashMap`]'s entries, in bucket order. Entries are taken out
/// of the map one by one. Any that remain are dropped with the iterator, along with the buckets.
pub struct IntoIter<K, V, B, A: Alloc> {
    pub(crate) map: HashMap<K, V, B, A>,
    pub(crate) index: usize,
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> Iterator for IntoIter<K, V, B, A> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.map.cap() {
            let index = self.index;
            self.index += 1;

            if let Some(entry) = self.map.buckets_mut()[index].take() {
                self.map.len -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> FusedIterator for IntoIter<K, V, B, A> {}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> ExactSizeIterator for IntoIter<K, V, B, A> {}

/// A type for owned iteration over a [`HashMap`]'s keys. Produces values of type `K`.
///
/// See [`HashMap::into_keys`].
pub struct IntoKeys<K, V, B, A: Alloc>(pub(crate) IntoIter<K, V, B, A>);

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> Iterator for IntoKeys<K, V, B, A> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> FusedIterator for IntoKeys<K, V, B, A> {}

impl<K: Hash + Eq, V, B: BuildHasher, A: Alloc> ExactSizeIterator for IntoKeys<K, V, B, A> {}
