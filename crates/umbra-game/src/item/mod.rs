//! Item data model
//!
//! Every item shares one shape (id, name, sprite) and carries its behaviour
//! in a [`ItemKind`] payload. The character only ever calls [`Item::use_item`],
//! [`Item::on_drop`] and [`Item::update`].

pub mod flash_camera;
pub mod light;
pub mod marks;
pub mod fan;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;
use umbra_core::{EntityId, FacingDirection};
use umbra_physics::PhysicsBackend;

pub use flash_camera::{FlashCamera, FlashCameraBuilder, FlashCameraConfig, MAX_RAYS};
pub use light::{aim_angle, LightConfig, LightSource};
pub use marks::{MarkLayer, Marker};
pub use fan::{FanRay, RayFan};

/// Unique item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Sprite handle resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Configuration errors raised when an item is built
#[derive(Debug, Clone, thiserror::Error)]
pub enum ItemError {
    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Ray length must be greater than zero")]
    ZeroRayLength,

    #[error("Split width must be positive, got {0}")]
    InvalidSplitWidth(f32),

    #[error("Cone would cast {count} rays, at most {max} are allowed")]
    TooManyRays { count: f64, max: usize },

    #[error("Flash camera has no light source bound")]
    MissingLightSource,
}

/// What the user of an item looks like to the item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemActor {
    pub position: Vec2,
    pub facing: FacingDirection,
}

/// World access an item gets while it is being used
pub struct UseContext<'a> {
    pub physics: &'a dyn PhysicsBackend,
    /// Cursor already converted to world space
    pub cursor_world: Vec2,
    /// Current game time in seconds
    pub now: f64,
    pub marks: &'a mut MarkLayer,
}

/// Outcome of one item use
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionReport {
    pub item: Option<ItemId>,
    pub rays: Vec<FanRay>,
    pub marks: Vec<EntityId>,
}

impl ActionReport {
    pub fn hit_count(&self) -> usize {
        self.rays.iter().filter(|ray| ray.hit.is_some()).count()
    }
}

/// Per-kind item behaviour
#[derive(Debug, Clone)]
pub enum ItemKind {
    FlashCamera(FlashCamera),
}

/// An item that can sit in an inventory
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub sprite: SpriteId,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, sprite: SpriteId, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            sprite,
            kind,
        }
    }

    /// Build a flash camera item
    pub fn flash_camera(
        id: ItemId,
        name: impl Into<String>,
        sprite: SpriteId,
        config: FlashCameraConfig,
        light: LightSource,
    ) -> Result<Self, ItemError> {
        let camera = FlashCamera::builder(config).light(light).build()?;
        Ok(Self::new(id, name, sprite, ItemKind::FlashCamera(camera)))
    }

    /// Perform the item's action on behalf of `actor`
    pub fn use_item(&mut self, actor: &ItemActor, ctx: &mut UseContext<'_>) -> ActionReport {
        let mut report = ActionReport {
            item: Some(self.id),
            ..ActionReport::default()
        };

        match &mut self.kind {
            ItemKind::FlashCamera(camera) => {
                report.rays = camera.fire(ctx.physics, actor.position, ctx.cursor_world, ctx.now);
                for point in report.rays.iter().filter_map(|ray| ray.hit) {
                    report.marks.push(ctx.marks.spawn(point, self.sprite));
                }
            }
        }

        info!(
            "{} used: {} rays, {} marks",
            self.name,
            report.rays.len(),
            report.marks.len()
        );
        report
    }

    /// Called when the item leaves its holder
    pub fn on_drop(&mut self) {
        match &mut self.kind {
            ItemKind::FlashCamera(camera) => camera.on_drop(),
        }
        info!("{} dropped", self.name);
    }

    /// Per-frame upkeep while held
    pub fn update(&mut self, holder: Vec2, cursor_world: Vec2, now: f64) {
        match &mut self.kind {
            ItemKind::FlashCamera(camera) => camera.track(holder, cursor_world, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{flash_item, StubPhysics};

    #[test]
    fn test_use_marks_every_hit() {
        let mut physics = StubPhysics::default();
        physics.wall_x = Some(2.0);
        let mut marks = MarkLayer::new();
        let mut item = flash_item(1, SpriteId(9));

        let actor = ItemActor {
            position: Vec2::ZERO,
            facing: FacingDirection::Right,
        };
        let mut ctx = UseContext {
            physics: &physics,
            cursor_world: Vec2::new(5.0, 0.0),
            now: 0.0,
            marks: &mut marks,
        };

        let report = item.use_item(&actor, &mut ctx);
        assert_eq!(report.item, Some(ItemId(1)));
        assert_eq!(report.hit_count(), 7);
        assert_eq!(report.marks.len(), 7);
        assert_eq!(marks.len(), 7);
        assert!(marks.iter().all(|mark| mark.sprite == SpriteId(9)));
    }

    #[test]
    fn test_use_without_walls_leaves_no_marks() {
        let physics = StubPhysics::default();
        let mut marks = MarkLayer::new();
        let mut item = flash_item(1, SpriteId(9));

        let actor = ItemActor {
            position: Vec2::ZERO,
            facing: FacingDirection::Left,
        };
        let mut ctx = UseContext {
            physics: &physics,
            cursor_world: Vec2::new(-5.0, 0.0),
            now: 0.0,
            marks: &mut marks,
        };

        let report = item.use_item(&actor, &mut ctx);
        assert_eq!(report.rays.len(), 7);
        assert_eq!(report.hit_count(), 0);
        assert!(marks.is_empty());
    }

    #[test]
    fn test_flash_camera_constructor_validates() {
        let result = Item::flash_camera(
            ItemId(3),
            "Broken",
            SpriteId(0),
            FlashCameraConfig {
                ray_angle: -1.0,
                ..FlashCameraConfig::default()
            },
            LightSource::new(LightConfig::default()),
        );
        assert!(result.is_err());
    }
}
