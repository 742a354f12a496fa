//! Persistent marks left where a fan ray hit

use glam::Vec2;
use umbra_core::EntityId;

use super::SpriteId;

/// A marked point in the world carrying a copy of the marking item's sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: EntityId,
    pub position: Vec2,
    pub sprite: SpriteId,
}

/// All marks spawned in the scene. Marks are never merged, two hits on the
/// same point produce two marks.
#[derive(Debug, Clone, Default)]
pub struct MarkLayer {
    markers: Vec<Marker>,
}

impl MarkLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a new mark and return its id
    pub fn spawn(&mut self, position: Vec2, sprite: SpriteId) -> EntityId {
        let id = EntityId::new();
        self.markers.push(Marker {
            id,
            position,
            sprite,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }
}
