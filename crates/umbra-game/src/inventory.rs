//! Inventory container
//!
//! Fixed-capacity, insertion-ordered item storage. Slot 0 holds the active item.

use crate::item::{Item, ItemId};

/// Default number of slots
pub const DEFAULT_INVENTORY_SIZE: usize = 1;

/// Character inventory
#[derive(Debug, Clone)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INVENTORY_SIZE)
    }
}

impl Inventory {
    /// Create an empty inventory holding at most `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item. Returns `Err(item)` if the inventory is full; existing
    /// slots are left untouched.
    #[allow(clippy::result_large_err)]
    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return the item at the given index
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// The item used by the use action
    pub fn active(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn active_mut(&mut self) -> Option<&mut Item> {
        self.items.first_mut()
    }

    /// Get a reference to the item at the given index
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Slot index of an item id
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the inventory is at capacity
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}
