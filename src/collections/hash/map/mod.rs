//! A module containing [`HashMap`] and associated types.
//!
//! The other included types are for iteration, providing borrowed iteration over entries, keys or
//! values and owned iteration over entries or keys.
//!
//! As a note, there is no mutable iterator over entries or keys because mutating the keys of a
//! HashMap in place would cause a logic error.

mod hash_map;
mod iter;

pub use hash_map::*;
pub use iter::*;
