use std::mem;

use crate::alloc::{Alloc, RawArray};
use crate::error::OutOfMemory;
use crate::util::option::OptionExtension;

pub(crate) struct Node<T> {
    pub value: T,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

pub(crate) enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

impl<T> Slot<T> {
    pub fn into_node(self) -> Option<Node<T>> {
        match self {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }
}

/// The storage for the nodes of a [`DoublyLinkedList`](super::DoublyLinkedList), with nodes
/// addressed by their index.
///
/// Slots are initialized in order, so every slot below `initialized` is either occupied or vacant
/// and every slot above it is uninitialized. Vacant slots form a free list, which is used up before
/// any new slots are initialized. When both run out, the arena grows using the same rule as a
/// [`DynamicStack`](crate::collections::contiguous::DynamicStack), which moves the nodes but keeps
/// their indices.
///
/// Like [`RawArray`], the arena doesn't hold onto its allocator and must be given the same one on
/// every call.
pub(crate) struct Arena<T> {
    slots: RawArray<Slot<T>>,
    initialized: usize,
    free: Option<usize>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub const fn new() -> Arena<T> {
        Arena {
            slots: RawArray::dangling(),
            initialized: 0,
            free: None,
            occupied: 0,
        }
    }

    /// Returns the number of occupied slots.
    pub const fn len(&self) -> usize {
        self.occupied
    }

    pub const fn cap(&self) -> usize {
        self.slots.size()
    }

    /// Ensures that there is a slot available for the next [`insert`](Arena::insert), growing the
    /// arena if there isn't.
    ///
    /// # Safety
    /// The arena must only ever be given the same allocator.
    pub unsafe fn reserve_in<A: Alloc>(&mut self, alloc: &A) -> Result<(), OutOfMemory> {
        if self.free.is_some() || self.initialized < self.slots.size() {
            return Ok(());
        }

        let new_size = self.slots.grown_size()?;
        // SAFETY: The caller guarantees that slots was allocated by alloc. Only the first
        // initialized slots are in use.
        unsafe { self.slots.resize_in(new_size, self.initialized, alloc) }
    }

    /// Places `node` into a free slot and returns its index.
    ///
    /// # Safety
    /// A slot must have been made available with [`reserve_in`](Arena::reserve_in).
    pub unsafe fn insert(&mut self, node: Node<T>) -> usize {
        let index = match self.free {
            Some(index) => {
                // SAFETY: Indices on the free list are below initialized, with vacant slots.
                let slot = unsafe { self.slots.get_mut(index) };
                if let Slot::Vacant { next_free } = slot {
                    self.free = *next_free;
                }
                *slot = Slot::Occupied(node);
                index
            },
            None => {
                let index = self.initialized;
                // SAFETY: The caller guarantees that a slot was reserved, so without a free slot,
                // initialized is less than the size.
                unsafe { self.slots.write(index, Slot::Occupied(node)) };
                self.initialized += 1;
                index
            },
        };

        self.occupied += 1;
        index
    }

    /// Moves the node out of slot `index` and adds the slot to the free list.
    ///
    /// # Safety
    /// Slot `index` must be occupied.
    pub unsafe fn remove(&mut self, index: usize) -> Node<T> {
        let vacant = Slot::Vacant { next_free: self.free };
        // SAFETY: The caller guarantees that index refers to an occupied, and therefore
        // initialized, slot.
        let node = unsafe { mem::replace(self.slots.get_mut(index), vacant).into_node().unreachable() };

        self.free = Some(index);
        self.occupied -= 1;
        node
    }

    pub fn get(&self, index: usize) -> Option<&Node<T>> {
        if index >= self.initialized {
            return None;
        }

        // SAFETY: Every slot below initialized is initialized.
        match unsafe { self.slots.get(index) } {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        if index >= self.initialized {
            return None;
        }

        // SAFETY: Every slot below initialized is initialized.
        match unsafe { self.slots.get_mut(index) } {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Drops every node and returns the storage to `alloc`, leaving the arena empty.
    ///
    /// # Safety
    /// The arena must only ever be given the same allocator.
    pub unsafe fn release_in<A: Alloc>(&mut self, alloc: &A) {
        let initialized = self.initialized;
        self.initialized = 0;
        self.free = None;
        self.occupied = 0;

        // SAFETY: All slots below initialized are initialized, and dropping a vacant slot is a
        // no-op. The counters have already been reset, so nothing can be dropped twice. The caller
        // guarantees that slots was allocated by alloc.
        unsafe {
            self.slots.drop_range(0, initialized);
            self.slots.release_in(alloc);
        }
    }
}
