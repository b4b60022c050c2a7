//! Hash-based collections, [`HashMap`] and [`HashSet`], which share an open addressing bucket
//! layout. Both default to the standard library's [`RandomState`](std::hash::RandomState) for
//! hashing and take a [`BuildHasher`](std::hash::BuildHasher) for anything else.

pub mod map;
pub mod set;

#[doc(inline)]
pub use map::HashMap;
#[doc(inline)]
pub use set::HashSet;
