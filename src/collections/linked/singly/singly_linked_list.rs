use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;

use derive_more::IsVariant;

use super::{Iter, NodePtr};
use crate::alloc::{Alloc, Global};
use crate::collections::linked::Length;
use crate::error::{OutOfMemory, Rejected};
use crate::util::fmt::DebugList;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// A list with links in one direction, made up of nodes that are each allocated individually
/// from `A`.
///
/// The list keeps track of both its head and its tail, so adding to either end is `O(1)`, but only
/// the first element can be removed in constant time.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the SinglyLinkedList.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `append` | `O(1)` |
/// | `prepend` | `O(1)` |
/// | `remove_first` | `O(1)` |
/// | `contains` | `O(n)` |
/// | `clear` | `O(n)` |
///
/// # Examples
/// ```
/// # use managed_collections::collections::linked::SinglyLinkedList;
/// let mut list = SinglyLinkedList::new();
/// list.append(2).unwrap();
/// list.append(3).unwrap();
/// list.prepend(1).unwrap();
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.remove_first(), Some(1));
/// assert_eq!(list.front(), Some(&2));
/// assert_eq!(list.back(), Some(&3));
/// ```
pub struct SinglyLinkedList<T, A: Alloc = Global> {
    pub(crate) state: ListState<T>,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

#[derive(IsVariant)]
pub(crate) enum ListState<T> {
    Empty,
    Full(ListContents<T>),
}

use ListState::*;

pub(crate) struct ListContents<T> {
    pub len: Length,
    pub head: NodePtr<T>,
    pub tail: NodePtr<T>,
}

impl<T> SinglyLinkedList<T> {
    /// Creates a new, empty SinglyLinkedList using the [`Global`] allocator.
    pub const fn new() -> SinglyLinkedList<T> {
        SinglyLinkedList::new_in(Global)
    }
}

impl<T, A: Alloc> SinglyLinkedList<T, A> {
    /// Creates a new, empty SinglyLinkedList which will allocate its nodes from `alloc`.
    pub const fn new_in(alloc: A) -> SinglyLinkedList<T, A> {
        SinglyLinkedList {
            state: Empty,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the length of the SinglyLinkedList.
    pub const fn len(&self) -> usize {
        match &self.state {
            Empty => 0,
            Full(ListContents { len, .. }) => len.get(),
        }
    }

    /// Returns true if the SinglyLinkedList contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Returns a reference to the allocator used by the list.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a reference to the first element in the list, if it exists.
    pub fn front(&self) -> Option<&T> {
        match self.state {
            Empty => None,
            // SAFETY: The head is allocated for as long as the list is borrowed.
            Full(ListContents { head, .. }) => Some(unsafe { head.value() }),
        }
    }

    /// Returns a mutable reference to the first element in the list, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        match self.state {
            Empty => None,
            // SAFETY: The head is allocated for as long as the list is borrowed, and the list is
            // borrowed mutably.
            Full(ListContents { head, .. }) => Some(unsafe { head.value_mut() }),
        }
    }

    /// Returns a reference to the last element in the list, if it exists.
    pub fn back(&self) -> Option<&T> {
        match self.state {
            Empty => None,
            // SAFETY: The tail is allocated for as long as the list is borrowed.
            Full(ListContents { tail, .. }) => Some(unsafe { tail.value() }),
        }
    }

    /// Returns a mutable reference to the last element in the list, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.state {
            Empty => None,
            // SAFETY: As with front_mut.
            Full(ListContents { tail, .. }) => Some(unsafe { tail.value_mut() }),
        }
    }

    /// Adds `value` to the back of the list, after the current tail.
    ///
    /// # Errors
    /// If a node can't be allocated for `value`, it is returned inside of [`Rejected`] and the list
    /// is left unchanged.
    pub fn append(&mut self, value: T) -> Result<(), Rejected<T, OutOfMemory>> {
        let node = NodePtr::allocate_in(value, None, &self.alloc)?;

        match &mut self.state {
            Empty => self.state = ListState::single(node),
            Full(contents) => {
                // SAFETY: The tail is allocated and isn't borrowed while the list is borrowed
                // mutably.
                unsafe { contents.tail.set_next(Some(node)) };
                contents.tail = node;
                contents.len = contents.len_plus_one();
            },
        }
        Ok(())
    }

    /// Adds `value` to the front of the list, before the current head.
    ///
    /// # Errors
    /// If a node can't be allocated for `value`, it is returned inside of [`Rejected`] and the list
    /// is left unchanged.
    pub fn prepend(&mut self, value: T) -> Result<(), Rejected<T, OutOfMemory>> {
        match &mut self.state {
            Empty => {
                let node = NodePtr::allocate_in(value, None, &self.alloc)?;
                self.state = ListState::single(node);
            },
            Full(contents) => {
                contents.head = NodePtr::allocate_in(value, Some(contents.head), &self.alloc)?;
                contents.len = contents.len_plus_one();
            },
        }
        Ok(())
    }

    /// Removes the first element from the list and returns it, if the list isn't empty. The node
    /// that held it is returned to the allocator.
    pub fn remove_first(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, head, .. }) => {
                // SAFETY: The head was allocated by self.alloc, and it is unlinked from the list
                // below, before anything else can access it.
                let node = unsafe { head.take_node_in(&self.alloc) };

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so the head had a next
                        // node.
                        *head = unsafe { node.next.unreachable() };
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Drops every element in the list and returns every node to the allocator. The list remains
    /// usable afterwards.
    pub fn clear(&mut self) {
        if let Full(ListContents { head, .. }) = mem::replace(&mut self.state, Empty) {
            // Walk the nodes iteratively, so that long lists can't overflow the stack.
            let mut curr = Some(head);
            while let Some(ptr) = curr {
                // SAFETY: Each node was allocated by self.alloc and is only visited once, because
                // the list is acyclic. The state has already been reset, so nothing else refers
                // to the nodes.
                let node = unsafe { ptr.take_node_in(&self.alloc) };
                curr = node.next;
            }
        }
    }

    /// Returns a borrowed iterator over the list's elements, from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        match self.state {
            Empty => {},
            Full(ListContents { len, head, tail }) => {
                let mut count = 1;
                let mut curr = head;
                // SAFETY: Every node reachable from the head is allocated.
                while let Some(next) = unsafe { curr.next() } {
                    count += 1;
                    curr = next;
                }
                assert!(curr == tail, "The last node reachable from the head should be the tail.");
                assert_eq!(count, len.get());
            },
        }
    }
}

impl<T: PartialEq, A: Alloc> SinglyLinkedList<T, A> {
    /// Returns true if the list contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|element| element == value)
    }
}

impl<T> ListState<T> {
    pub const fn single(node: NodePtr<T>) -> ListState<T> {
        Full(ListContents {
            len: Length::ONE,
            head: node,
            tail: node,
        })
    }
}

impl<T> ListContents<T> {
    pub fn len_plus_one(&self) -> Length {
        // SAFETY: Every node occupies at least one byte of memory, so there can never be more than
        // usize::MAX of them.
        unsafe { self.len.checked_add(1).unreachable() }
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    /// # Panics
    /// Panics if a node can't be allocated.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SinglyLinkedList::new();
        for item in iter {
            list.append(item).map_err(|rejected| rejected.error).throw();
        }
        list
    }
}

// SAFETY: The list uniquely owns its nodes, so it can be sent to another thread when its elements
// and allocator can.
unsafe impl<T: Send, A: Alloc + Send> Send for SinglyLinkedList<T, A> {}
// SAFETY: Shared access to the list only hands out shared references to its elements.
unsafe impl<T: Sync, A: Alloc + Sync> Sync for SinglyLinkedList<T, A> {}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Alloc> Drop for SinglyLinkedList<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug, A: Alloc> Debug for SinglyLinkedList<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinglyLinkedList")
            .field("contents", &DebugList(self.iter()))
            .field("len", &self.len())
            .finish()
    }
}
