//! Error types shared by every collection in this crate.
//!
//! There are three ways that a collection operation can fail to do what was asked of it:
//! - The allocator couldn't provide memory: [`OutOfMemory`].
//! - A fixed-capacity collection has no room left: [`Full`].
//! - There was nothing to take out of the collection. This one isn't an error at all, it is
//!   represented by [`None`], because polling an empty queue is an entirely normal thing to do.
//!
//! Operations that consume a value hand it back alongside the error (see [`Full`] and
//! [`Rejected`]) so that a failed insertion never silently drops anything.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant};

/// The allocator was unable to provide a block of memory with the requested size.
///
/// This is also returned when the requested size can't be represented as a valid
/// [`Layout`](std::alloc::Layout), seeing as that allocation could never succeed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("out of memory (failed to allocate {size} bytes)")]
pub struct OutOfMemory {
    pub size: usize,
}

/// A fixed-capacity collection rejected a value because it was already at capacity. No allocation
/// is attempted in this case, so this is always distinct from [`OutOfMemory`].
///
/// The rejected value is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that couldn't be written.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Display for Full<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "collection is full")
    }
}

impl<T: Debug> Error for Full<T> {}

/// An operation which took ownership of `value` failed with `error`, returning the value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected<T, E> {
    pub value: T,
    pub error: E,
}

impl<T, E> Rejected<T, E> {
    /// Returns the value that was rejected, discarding the error.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Returns the error that caused the value to be rejected.
    pub const fn error(&self) -> &E {
        &self.error
    }
}

impl<T, E: Display> Display for Rejected<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "value rejected: {}", self.error)
    }
}

impl<T: Debug, E: Error + 'static> Error for Rejected<T, E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// The value-less form of [`Full`], used by [`CollectionError`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("collection is full")]
pub struct FullError;

/// A single error type for callers who want to propagate any collection failure with `?` and don't
/// need the rejected value back.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, From, Error, IsVariant)]
pub enum CollectionError {
    OutOfMemory(OutOfMemory),
    Full(FullError),
}

impl<T> From<Full<T>> for CollectionError {
    fn from(_: Full<T>) -> Self {
        CollectionError::Full(FullError)
    }
}

impl<T> From<Rejected<T, OutOfMemory>> for CollectionError {
    fn from(value: Rejected<T, OutOfMemory>) -> Self {
        CollectionError::OutOfMemory(value.error)
    }
}
