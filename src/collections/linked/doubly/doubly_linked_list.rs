use std::fmt::{self, Debug, Formatter};

use super::{Arena, Iter, Node};
use crate::alloc::{Alloc, Global};
use crate::error::{OutOfMemory, Rejected};
use crate::util::fmt::DebugList;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// A list with links in both directions, storing its nodes in an arena which is allocated from `A`.
///
/// Rather than pointing at each other, nodes refer to their neighbours by their index in the arena.
/// Removed nodes leave a vacant slot behind, which is reused by the next insertion before the arena
/// grows. Either end of the list can be added to or removed from in constant time.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DoublyLinkedList.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `append/prepend` | `O(1)`*, `O(n)` |
/// | `remove_first/last` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* If the arena has no free slots, it has to be reallocated, which takes `O(n)`. The size of the
/// arena doubles each time this happens.
///
/// # Examples
/// ```
/// # use managed_collections::collections::linked::DoublyLinkedList;
/// let mut list = DoublyLinkedList::new();
/// list.append("b").unwrap();
/// list.append("c").unwrap();
/// list.prepend("a").unwrap();
///
/// assert_eq!(list.remove_last(), Some("c"));
/// assert_eq!(list.remove_first(), Some("a"));
/// assert!(list.iter().eq(["b"].iter()));
/// ```
pub struct DoublyLinkedList<T, A: Alloc = Global> {
    pub(crate) arena: Arena<T>,
    pub(crate) ends: Option<Ends>,
    pub(crate) alloc: A,
}

/// The indices of the first and last nodes of a non-empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ends {
    pub head: usize,
    pub tail: usize,
}

impl<T> DoublyLinkedList<T> {
    /// Creates a new, empty DoublyLinkedList using the [`Global`] allocator.
    pub const fn new() -> DoublyLinkedList<T> {
        DoublyLinkedList::new_in(Global)
    }
}

impl<T, A: Alloc> DoublyLinkedList<T, A> {
    /// Creates a new, empty DoublyLinkedList which will allocate its arena from `alloc`. Nothing is
    /// allocated until the first insertion.
    pub const fn new_in(alloc: A) -> DoublyLinkedList<T, A> {
        DoublyLinkedList {
            arena: Arena::new(),
            ends: None,
            alloc,
        }
    }

    /// Returns the length of the DoublyLinkedList.
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the DoublyLinkedList contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.ends.is_none()
    }

    /// Returns the number of nodes the list can hold before its arena needs to grow.
    pub const fn cap(&self) -> usize {
        self.arena.cap()
    }

    /// Returns a reference to the allocator used by the list.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a reference to the first element in the list, if it exists.
    pub fn front(&self) -> Option<&T> {
        Some(&self.arena.get(self.ends?.head)?.value)
    }

    /// Returns a mutable reference to the first element in the list, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.ends?.head;
        Some(&mut self.node_mut(head).value)
    }

    /// Returns a reference to the last element in the list, if it exists.
    pub fn back(&self) -> Option<&T> {
        Some(&self.arena.get(self.ends?.tail)?.value)
    }

    /// Returns a mutable reference to the last element in the list, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.ends?.tail;
        Some(&mut self.node_mut(tail).value)
    }

    /// Adds `value` to the back of the list, after the current tail.
    ///
    /// # Errors
    /// If the arena needs to grow and can't, `value` is returned inside of [`Rejected`] and the
    /// list is left unchanged.
    pub fn append(&mut self, value: T) -> Result<(), Rejected<T, OutOfMemory>> {
        let index = self.insert_node(Node {
            value,
            prev: self.ends.map(|ends| ends.tail),
            next: None,
        })?;

        self.ends = match self.ends {
            None => Some(Ends { head: index, tail: index }),
            Some(Ends { head, tail }) => {
                self.node_mut(tail).next = Some(index);
                Some(Ends { head, tail: index })
            },
        };
        Ok(())
    }

    /// Adds `value` to the front of the list, before the current head.
    ///
    /// # Errors
    /// If the arena needs to grow and can't, `value` is returned inside of [`Rejected`] and the
    /// list is left unchanged.
    pub fn prepend(&mut self, value: T) -> Result<(), Rejected<T, OutOfMemory>> {
        let index = self.insert_node(Node {
            value,
            prev: None,
            next: self.ends.map(|ends| ends.head),
        })?;

        self.ends = match self.ends {
            None => Some(Ends { head: index, tail: index }),
            Some(Ends { head, tail }) => {
                self.node_mut(head).prev = Some(index);
                Some(Ends { head: index, tail })
            },
        };
        Ok(())
    }

    /// Removes the first element from the list and returns it, if the list isn't empty.
    pub fn remove_first(&mut self) -> Option<T> {
        let Ends { head, tail } = self.ends?;
        // SAFETY: The head of the list is always occupied.
        let node = unsafe { self.arena.remove(head) };

        self.ends = match node.next {
            Some(next) => {
                self.node_mut(next).prev = None;
                Some(Ends { head: next, tail })
            },
            None => None,
        };
        Some(node.value)
    }

    /// Removes the last element from the list and returns it, if the list isn't empty.
    pub fn remove_last(&mut self) -> Option<T> {
        let Ends { head, tail } = self.ends?;
        // SAFETY: The tail of the list is always occupied.
        let node = unsafe { self.arena.remove(tail) };

        self.ends = match node.prev {
            Some(prev) => {
                self.node_mut(prev).next = None;
                Some(Ends { head, tail: prev })
            },
            None => None,
        };
        Some(node.value)
    }

    /// Drops every element in the list and returns the arena to the allocator. The list remains
    /// usable afterwards.
    pub fn clear(&mut self) {
        self.ends = None;
        // SAFETY: The arena is only ever given self.alloc.
        unsafe { self.arena.release_in(&self.alloc) }
    }

    /// Returns a borrowed iterator over the list's elements, which can be traversed from either
    /// end.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Reserves a slot and inserts `node` into it, returning its index. The node isn't linked into
    /// the list.
    fn insert_node(&mut self, node: Node<T>) -> Result<usize, Rejected<T, OutOfMemory>> {
        // SAFETY: The arena is only ever given self.alloc.
        if let Err(error) = unsafe { self.arena.reserve_in(&self.alloc) } {
            return Err(Rejected { value: node.value, error });
        }

        // SAFETY: A slot has just been reserved.
        Ok(unsafe { self.arena.insert(node) })
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        // SAFETY: Every index stored in the list's ends or links refers to an occupied slot.
        unsafe { self.arena.get_mut(index).unreachable() }
    }

    /// Walks the list in both directions, checking that every link is mirrored by one going the
    /// other way.
    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        let Some(Ends { head, tail }) = self.ends else {
            assert_eq!(self.len(), 0);
            return;
        };

        let mut prev = None;
        let mut curr = Some(head);
        let mut count = 0;
        while let Some(index) = curr {
            let node = self.arena.get(index).expect("Linked slots should be occupied.");
            assert_eq!(node.prev, prev, "A node's prev should be the node that links to it.");
            prev = Some(index);
            curr = node.next;
            count += 1;
        }

        assert_eq!(prev, Some(tail), "The last node reachable from the head should be the tail.");
        assert_eq!(count, self.len());
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    /// # Panics
    /// Panics if the arena can't be grown.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DoublyLinkedList::new();
        for item in iter {
            list.append(item).map_err(|rejected| rejected.error).throw();
        }
        list
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Alloc> Drop for DoublyLinkedList<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug, A: Alloc> Debug for DoublyLinkedList<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoublyLinkedList")
            .field("contents", &DebugList(self.iter()))
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}
