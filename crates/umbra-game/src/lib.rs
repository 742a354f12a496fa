//! Umbra Game - Character gameplay for a side-view world
//!
//! Provides the character controller, inventory, items, interactions, input
//! snapshot and the 2D camera used to place the cursor in the world.

pub mod camera;
pub mod hud;
pub mod input;
pub mod interaction;
pub mod inventory;
pub mod item;
pub mod player;

#[cfg(test)]
mod testing;

pub use camera::{Camera2D, CameraConfig, CameraError, Viewport};
pub use hud::{HealthMeter, Healthbar, InventoryDisplay, InventoryList};
pub use input::{InputAction, InputState};
pub use interaction::{Interactable, InteractionResult, InteractionSystem, ItemPickup, Sign};
pub use inventory::{Inventory, DEFAULT_INVENTORY_SIZE};
pub use item::{
    ActionReport, FlashCamera, FlashCameraConfig, Item, ItemError, ItemId, ItemKind, LightConfig,
    LightSource, MarkLayer, Marker, SpriteId,
};
pub use player::{
    Character, CharacterBuilder, CharacterConfig, CharacterError, FrameContext, FrameEvents,
    LocomotionSpeeds, LocomotionState,
};
