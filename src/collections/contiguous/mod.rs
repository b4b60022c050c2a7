//! Contiguous collection types. Namely [`DynamicStack`], a LIFO stack that grows by doubling.

pub mod stack;

#[doc(inline)]
pub use stack::DynamicStack;
