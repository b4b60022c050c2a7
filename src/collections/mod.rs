//! Generic collection types, all of which allocate through an [`Alloc`](crate::alloc::Alloc).
//!
//! # Purpose
//! Each of these types is a small, self-contained take on a classic data structure, written with
//! explicit ownership of every byte it allocates. Nothing here uses [`Vec`], [`Box`] or the
//! collections in [`std::collections`] internally.
//!
//! # Method
//! Every collection captures its allocator on construction (`new_in`), with `new` as a shortcut for
//! [`Global`](crate::alloc::Global). Fallible insertions return the value back to the caller on
//! failure, while attempts to take from an empty collection return [`None`].

#[cfg(feature = "circ")]
pub mod circ;
#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "heap")]
pub mod heap;
#[cfg(feature = "linked")]
pub mod linked;
