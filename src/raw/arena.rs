use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::{Error, Result};

/// Slot storage for tree nodes.
///
/// Every node occupies its own slot and is dropped individually when freed;
/// vacated slots are recycled by later allocations.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element` and returns its handle.
    ///
    /// On failure the arena is left exactly as it was and `element` is dropped.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }

        let handle = Handle::try_from_index(self.slots.len()).ok_or(Error::CapacityExceeded {
            max: Handle::MAX + 1,
        })?;
        self.slots.try_reserve(1)?;
        // Keep room for every slot on the free list so `take()` never reallocates.
        self.free.try_reserve(self.slots.len() + 1 - self.free.len())?;
        self.slots.push(Some(element));
        Ok(handle)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element behind `handle` and recycles its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
