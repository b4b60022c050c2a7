//! A binary min-heap, [`BinaryMinHeap`] (also available as [`PriorityQueue`]), and the [`Compare`]
//! strategies used to order it.

mod binary_heap;
mod compare;
mod tests;

pub use binary_heap::*;
pub use compare::*;
