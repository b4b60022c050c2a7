//! Circular collection types, with storage of a fixed capacity `N` that is allocated once on
//! construction. Namely [`RingBuffer`] and [`BoundedQueue`], a queue-flavoured interface to the
//! same structure.
//!
//! Neither type ever grows: writing to a full collection fails with [`Full`](crate::error::Full)
//! and hands the value back.

mod bounded_queue;
mod ring_buffer;

pub use bounded_queue::*;
pub use ring_buffer::*;
