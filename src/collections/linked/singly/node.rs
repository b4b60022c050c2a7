use std::alloc::Layout;
use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use crate::alloc::Alloc;
use crate::error::{OutOfMemory, Rejected};

pub(crate) type Link<T> = Option<NodePtr<T>>;

pub(crate) struct Node<T> {
    pub value: T,
    pub next: Link<T>,
}

/// A pointer to a [`Node`] allocated from the allocator of the list that owns it.
///
/// NodePtr is [`Copy`], so it is up to the owning list to make sure that each node is taken out of
/// its allocation exactly once and that no copies are used afterwards.
pub(crate) struct NodePtr<T>(NonNull<Node<T>>);

impl<T> NodePtr<T> {
    // A Node always contains a pointer, so this layout is never zero-sized.
    const LAYOUT: Layout = Layout::new::<Node<T>>();

    /// Allocates a new node from `alloc` and moves `value` into it. If the allocation fails, the
    /// value is handed back.
    pub fn allocate_in<A: Alloc>(
        value: T,
        next: Link<T>,
        alloc: &A,
    ) -> Result<NodePtr<T>, Rejected<T, OutOfMemory>> {
        match alloc.allocate(Self::LAYOUT) {
            Ok(ptr) => {
                let ptr = ptr.cast::<Node<T>>();
                // SAFETY: ptr was just allocated with the layout of a Node<T>, so it is valid for
                // writes and properly aligned.
                unsafe { ptr.write(Node { value, next }) };
                Ok(NodePtr(ptr))
            },
            Err(error) => Err(Rejected { value, error }),
        }
    }

    /// Moves the node out of its allocation and returns the allocation to `alloc`.
    ///
    /// # Safety
    /// The node must have been allocated by `alloc` and not taken already. Neither self nor any
    /// copy of it may be used afterwards.
    pub unsafe fn take_node_in<A: Alloc>(self, alloc: &A) -> Node<T> {
        // SAFETY: The node is initialized, because it hasn't been taken yet.
        let node = unsafe { self.0.read() };
        // SAFETY: The caller guarantees that the node was allocated by alloc, with this layout.
        unsafe { alloc.deallocate(self.0.cast(), Self::LAYOUT) };
        node
    }

    /// # Safety
    /// The node must remain allocated for `'a` and must not be mutated in that time.
    pub unsafe fn value<'a>(self) -> &'a T {
        // SAFETY: The caller guarantees that the node is live and not being mutated.
        unsafe { &(*self.0.as_ptr()).value }
    }

    /// # Safety
    /// The node must remain allocated for `'a` and must not be accessed through any other pointer
    /// in that time.
    pub unsafe fn value_mut<'a>(self) -> &'a mut T {
        // SAFETY: The caller guarantees that the node is live and that this access is unique.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    /// # Safety
    /// The node must be allocated.
    pub unsafe fn next(self) -> Link<T> {
        // SAFETY: The caller guarantees that the node is live.
        unsafe { (*self.0.as_ptr()).next }
    }

    /// # Safety
    /// The node must be allocated and no references to it may be held.
    pub unsafe fn set_next(self, next: Link<T>) {
        // SAFETY: The caller guarantees that the node is live and not borrowed.
        unsafe { (*self.0.as_ptr()).next = next }
    }
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Debug for NodePtr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodePtr").field(&self.0).finish()
    }
}
