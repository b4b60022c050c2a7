mod arena;
mod doubly_linked_list;
mod iter;
mod tests;

pub(crate) use arena::*;
pub use doubly_linked_list::*;
pub use iter::*;
