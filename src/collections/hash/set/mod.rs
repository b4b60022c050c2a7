//! A module containing [`HashSet`] and the types used to iterate over it.

mod hash_set;
mod iter;
mod tests;

pub use hash_set::*;
pub use iter::*;
