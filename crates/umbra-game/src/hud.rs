//! Collaborators the character reports to
//!
//! The inventory list and health bar are drawn elsewhere; the controller only
//! pushes updates through these traits.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::item::Item;

/// Receives the full inventory after every change
pub trait InventoryDisplay {
    fn set_inventory(&mut self, items: &[Item]);
}

/// Receives damage notifications
pub trait Healthbar {
    fn take_damage(&mut self, amount: i32);
}

impl<T: InventoryDisplay> InventoryDisplay for Rc<RefCell<T>> {
    fn set_inventory(&mut self, items: &[Item]) {
        self.borrow_mut().set_inventory(items);
    }
}

impl<T: Healthbar> Healthbar for Rc<RefCell<T>> {
    fn take_damage(&mut self, amount: i32) {
        self.borrow_mut().take_damage(amount);
    }
}

/// Inventory display that keeps the item names it was last shown
#[derive(Debug, Clone, Default)]
pub struct InventoryList {
    pub entries: Vec<String>,
    /// Number of updates received
    pub updates: usize,
}

impl InventoryDisplay for InventoryList {
    fn set_inventory(&mut self, items: &[Item]) {
        self.entries = items.iter().map(|item| item.name.clone()).collect();
        self.updates += 1;
        debug!("Inventory display now shows {:?}", self.entries);
    }
}

/// Simple clamped hit point pool
#[derive(Debug, Clone)]
pub struct HealthMeter {
    pub current: i32,
    pub max: i32,
}

impl HealthMeter {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

impl Healthbar for HealthMeter {
    fn take_damage(&mut self, amount: i32) {
        self.current = (self.current - amount).clamp(0, self.max);
        debug!("Health {}/{}", self.current, self.max);
    }
}
