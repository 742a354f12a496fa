//! The query/force contract the gameplay core consumes
//!
//! Gameplay code never touches rapier directly; it talks to a
//! [`PhysicsBackend`]. [`crate::PhysicsWorld`] is the rapier2d implementation.

use glam::Vec2;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};
use umbra_core::LayerMask;

/// Detailed raycast hit information
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec2,
    /// Surface normal at hit point
    pub normal: Vec2,
}

/// Vertical capsule dimensions, expressed like an editor capsule:
/// full width/height plus an offset from the owning body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleShape {
    pub size: Vec2,
    pub offset: Vec2,
}

impl CapsuleShape {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size.x.min(self.size.y) / 2.0
    }

    /// Half length of the straight segment between the two caps
    pub fn half_segment(&self) -> f32 {
        (self.size.y / 2.0 - self.radius()).max(0.0)
    }

    /// Same width, new height and vertical offset
    pub fn with_height(self, height: f32, offset_y: f32) -> Self {
        Self {
            size: Vec2::new(self.size.x, height),
            offset: Vec2::new(self.offset.x, offset_y),
        }
    }
}

/// Query and impulse operations required by the character controller and items.
///
/// Queries are synchronous and never fail; missing handles read as empty/zero.
pub trait PhysicsBackend {
    /// All colliders on `mask` overlapping a circle
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<ColliderHandle>;

    /// Whether any collider on `mask` overlaps a circle
    fn overlap_circle_any(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        !self.overlap_circle(center, radius, mask).is_empty()
    }

    /// First hit along a ray. `direction` does not need to be normalized;
    /// `max_distance` is in world units.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;

    /// Apply an instantaneous velocity-changing impulse
    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2);

    /// Current linear velocity of a body
    fn linear_velocity(&self, body: RigidBodyHandle) -> Vec2;

    /// World position of a body
    fn body_position(&self, body: RigidBodyHandle) -> Vec2;

    /// World position of a collider
    fn collider_position(&self, collider: ColliderHandle) -> Option<Vec2>;

    /// Whether the collider is currently in contact with any collider on `mask`
    fn is_touching_layer(&self, collider: ColliderHandle, mask: LayerMask) -> bool;

    /// Current capsule of a collider, if it is one
    fn capsule(&self, collider: ColliderHandle) -> Option<CapsuleShape>;

    /// Replace a collider's capsule shape and offset
    fn set_capsule(&mut self, collider: ColliderHandle, shape: CapsuleShape);
}
