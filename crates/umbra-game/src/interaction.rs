//! Interaction system for interactable objects in the world
//!
//! Interactables live on the Interactable physics layer. The registry maps
//! their colliders to behaviour; the character focuses the nearest one in
//! reach and interacts with it on the interact key.

use std::collections::HashMap;

use tracing::{debug, info};
use umbra_physics::ColliderHandle;

use crate::item::{Item, ItemId};
use crate::player::Character;

/// Result of interacting with an object
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResult {
    /// Show text to the player (from a sign)
    ShowText(String),
    /// An item moved into the actor's inventory
    PickedUp(ItemId),
    /// The actor had no room; the item stays in the world
    InventoryFull(ItemId),
    /// Nothing left to do here
    Nothing,
}

/// Something the character can interact with
pub trait Interactable {
    /// Prompt text shown when focused (e.g., "Read", "Pick up")
    fn prompt(&self) -> &str;

    fn interact(&mut self, actor: &mut Character) -> InteractionResult;

    /// Spent interactables are removed from the world after interacting
    fn is_spent(&self) -> bool {
        false
    }
}

/// An item lying in the world
#[derive(Debug)]
pub struct ItemPickup {
    item: Option<Item>,
    prompt: String,
}

impl ItemPickup {
    pub fn new(item: Item) -> Self {
        let prompt = format!("Pick up {}", item.name);
        Self {
            item: Some(item),
            prompt,
        }
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }
}

impl Interactable for ItemPickup {
    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn interact(&mut self, actor: &mut Character) -> InteractionResult {
        let Some(item) = self.item.take() else {
            return InteractionResult::Nothing;
        };
        let id = item.id;
        match actor.pick_up_item(item) {
            Ok(()) => InteractionResult::PickedUp(id),
            Err(item) => {
                self.item = Some(item);
                InteractionResult::InventoryFull(id)
            }
        }
    }

    fn is_spent(&self) -> bool {
        self.item.is_none()
    }
}

/// A sign that displays text when read
#[derive(Debug, Clone)]
pub struct Sign {
    pub text: String,
    pub times_read: u32,
}

impl Sign {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            times_read: 0,
        }
    }
}

impl Interactable for Sign {
    fn prompt(&self) -> &str {
        "Read"
    }

    fn interact(&mut self, _actor: &mut Character) -> InteractionResult {
        self.times_read += 1;
        info!("Sign reads: {}", self.text);
        InteractionResult::ShowText(self.text.clone())
    }
}

/// Manages all interactables and tracks which one is focused
#[derive(Default)]
pub struct InteractionSystem {
    targets: HashMap<ColliderHandle, Box<dyn Interactable>>,
    focused: Option<ColliderHandle>,
    /// Text of the last sign read
    last_text: Option<String>,
    /// Colliders whose interactable was used up, waiting for the scene to remove them
    despawned: Vec<ColliderHandle>,
}

impl InteractionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach behaviour to an Interactable-layer collider
    pub fn register(&mut self, collider: ColliderHandle, target: impl Interactable + 'static) {
        self.targets.insert(collider, Box::new(target));
    }

    pub fn remove(&mut self, collider: ColliderHandle) -> Option<Box<dyn Interactable>> {
        if self.focused == Some(collider) {
            self.focused = None;
        }
        self.targets.remove(&collider)
    }

    pub fn contains(&self, collider: ColliderHandle) -> bool {
        self.targets.contains_key(&collider)
    }

    pub fn count(&self) -> usize {
        self.targets.len()
    }

    pub fn set_focus(&mut self, collider: Option<ColliderHandle>) {
        if collider != self.focused {
            debug!("Interaction focus {:?} -> {:?}", self.focused, collider);
        }
        self.focused = collider.filter(|handle| self.targets.contains_key(handle));
    }

    /// Get the currently focused collider, if any
    pub fn focused(&self) -> Option<ColliderHandle> {
        self.focused
    }

    pub fn focused_prompt(&self) -> Option<&str> {
        self.focused
            .and_then(|handle| self.targets.get(&handle))
            .map(|target| target.prompt())
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Interact with the target attached to `collider`
    pub fn interact(
        &mut self,
        collider: ColliderHandle,
        actor: &mut Character,
    ) -> Option<InteractionResult> {
        let target = self.targets.get_mut(&collider)?;
        let result = target.interact(actor);
        let spent = target.is_spent();

        if let InteractionResult::ShowText(text) = &result {
            self.last_text = Some(text.clone());
        }
        if spent {
            self.remove(collider);
            self.despawned.push(collider);
        }
        debug!("Interaction with {:?}: {:?}", collider, result);
        Some(result)
    }

    /// Colliders the scene should remove, emptied by the call
    pub fn take_despawned(&mut self) -> Vec<ColliderHandle> {
        std::mem::take(&mut self.despawned)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use umbra_physics::CharacterBody;

    use super::*;
    use crate::hud::{HealthMeter, InventoryList};
    use crate::item::SpriteId;
    use crate::player::CharacterConfig;
    use crate::testing::{flash_item, StubPhysics};

    fn character(physics: &StubPhysics) -> Character {
        Character::builder(CharacterConfig::default())
            .inventory_display(Rc::new(RefCell::new(InventoryList::default())))
            .healthbar(HealthMeter::new(5))
            .build(
                physics,
                CharacterBody {
                    body: physics.body,
                    collider: physics.collider,
                },
            )
            .unwrap()
    }

    fn handle(index: u32) -> ColliderHandle {
        ColliderHandle::from_raw_parts(index, 0)
    }

    #[test]
    fn test_pickup_is_consumed() {
        let physics = StubPhysics::default();
        let mut actor = character(&physics);
        let mut system = InteractionSystem::new();
        system.register(handle(1), ItemPickup::new(flash_item(4, SpriteId(0))));
        system.set_focus(Some(handle(1)));
        assert_eq!(system.focused_prompt(), Some("Pick up Camera 4"));

        let result = system.interact(handle(1), &mut actor);
        assert_eq!(result, Some(InteractionResult::PickedUp(ItemId(4))));
        assert_eq!(system.count(), 0);
        assert_eq!(system.focused(), None);
        assert_eq!(system.take_despawned(), vec![handle(1)]);
        assert!(system.take_despawned().is_empty());
        assert_eq!(actor.inventory().len(), 1);
    }

    #[test]
    fn test_pickup_stays_when_inventory_full() {
        let physics = StubPhysics::default();
        let mut actor = character(&physics);
        actor.pick_up_item(flash_item(1, SpriteId(0))).unwrap();

        let mut system = InteractionSystem::new();
        system.register(handle(2), ItemPickup::new(flash_item(2, SpriteId(0))));

        let result = system.interact(handle(2), &mut actor);
        assert_eq!(result, Some(InteractionResult::InventoryFull(ItemId(2))));
        assert!(system.contains(handle(2)));
        assert!(system.take_despawned().is_empty());
    }

    #[test]
    fn test_sign_records_last_text() {
        let physics = StubPhysics::default();
        let mut actor = character(&physics);
        let mut system = InteractionSystem::new();
        system.register(handle(3), Sign::new("Mind the gap"));

        system.interact(handle(3), &mut actor);
        system.interact(handle(3), &mut actor);
        assert_eq!(system.last_text(), Some("Mind the gap"));
        assert!(system.contains(handle(3)));
    }

    #[test]
    fn test_focus_ignores_unknown_colliders() {
        let mut system = InteractionSystem::new();
        system.set_focus(Some(handle(9)));
        assert_eq!(system.focused(), None);
        assert!(system.focused_prompt().is_none());
    }

    #[test]
    fn test_interact_unknown_collider() {
        let physics = StubPhysics::default();
        let mut actor = character(&physics);
        let mut system = InteractionSystem::new();
        assert!(system.interact(handle(5), &mut actor).is_none());
    }
}
