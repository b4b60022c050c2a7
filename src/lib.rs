//! A small set of classic collections, where every byte of storage is requested from an explicit,
//! pluggable allocator.
//!
//! # Purpose
//! Each collection here owns its memory outright: it captures an [`Alloc`](alloc::Alloc) when it
//! is constructed, requests every allocation through it and returns every allocation to it exactly
//! once. Pairing a collection with a [`TrackingAlloc`](alloc::TrackingAlloc) makes that
//! observable, which is how the tests check for leaks and simulate running out of memory.
//!
//! # Collections
//! - [`DynamicStack`](collections::contiguous::DynamicStack), a contiguous LIFO stack that grows by
//!   doubling.
//! - [`RingBuffer`](collections::circ::RingBuffer) and
//!   [`BoundedQueue`](collections::circ::BoundedQueue), fixed capacity FIFO buffers that allocate
//!   once.
//! - [`SinglyLinkedList`](collections::linked::SinglyLinkedList), with one allocation per node.
//! - [`DoublyLinkedList`](collections::linked::DoublyLinkedList), which stores its nodes in a
//!   growable arena and links them by index.
//! - [`BinaryMinHeap`](collections::heap::BinaryMinHeap), a priority queue with a pluggable
//!   comparator.
//! - [`HashSet`](collections::hash::HashSet), a thin wrapper over an open addressing
//!   [`HashMap`](collections::hash::HashMap).
//!
//! # Error Handling
//! Running out of memory is never a panic. Any operation that may allocate returns a [`Result`],
//! and where the operation was handed a value, that value comes back inside of the error so that
//! nothing is lost. Attempting to take from an empty collection isn't an error at all, it just
//! returns [`None`].
//!
//! Errors are strongly typed, using structs that implement [`Error`](std::error::Error) and a
//! single enum, [`CollectionError`](error::CollectionError), for callers that would rather
//! propagate everything with `?`. The exceptions are the std traits that can't fail, such as
//! [`Extend`] and [`FromIterator`], which panic when allocation fails and document it.
//!
//! # Dependencies
//! None of the collections use [`Vec`], [`Box`] or [`std::collections`] internally. This crate
//! depends on some derive macros because they're helpful and remove the need for some very
//! repetitive programming.
//!
//! # Threading
//! Collections are single threaded. They are [`Send`] and [`Sync`] wherever their contents and
//! allocator are, but nothing inside of them synchronizes access.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
pub mod collections;
pub mod error;

pub(crate) mod util;
