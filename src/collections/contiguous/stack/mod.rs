//! A module containing [`DynamicStack`] and associated types.
//!
//! Currently, the only other included type is [`IntoIter`] for owned iteration over a stack, which
//! yields values in the order they would be popped. Borrowed iteration uses the slice iterators
//! from [`std::slice`], ordered from the bottom of the stack to the top.
//!
//! [`DynamicStack`] is also re-exported under the parent module.

mod dynamic_stack;
mod iter;
mod tests;

pub use dynamic_stack::*;
pub use iter::*;
