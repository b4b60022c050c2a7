//! Linked collection types: [`SinglyLinkedList`], made up of individually allocated nodes, and
//! [`DoublyLinkedList`], which keeps its nodes in a single allocator-backed arena and links them by
//! index.

mod length;

pub mod doubly;
pub mod singly;

pub(crate) use length::*;

#[doc(inline)]
pub use doubly::DoublyLinkedList;
#[doc(inline)]
pub use singly::SinglyLinkedList;
