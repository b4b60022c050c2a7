#![cfg(test)]

use std::hash::{BuildHasher, Hash, Hasher};

/// A value paired with a hash chosen by the test, so that collisions can be set up on purpose.
/// Equality only considers the value.
#[derive(Debug, Clone, Copy)]
pub struct ManualHash<T: Eq> {
    pub hash: u64,
    pub value: T,
}

impl<T: Eq> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash { hash, value }
    }
}

impl<T: Eq> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: Eq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// A hasher that passes through the last `u64` written to it, so that [`ManualHash`] controls the
/// bucket that a value lands in.
#[derive(Debug, Default)]
pub struct PassThroughHasher {
    state: u64,
}

impl Hasher for PassThroughHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = (self.state << 8) | *byte as u64;
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.state = i;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughBuilder;

impl BuildHasher for PassThroughBuilder {
    type Hasher = PassThroughHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PassThroughHasher::default()
    }
}
