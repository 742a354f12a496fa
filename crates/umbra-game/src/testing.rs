//! In-memory physics double and fixtures for unit tests

use std::cell::RefCell;

use glam::Vec2;
use umbra_core::{Layer, LayerMask};
use umbra_physics::{CapsuleShape, ColliderHandle, PhysicsBackend, RaycastHit, RigidBodyHandle};

use crate::item::{FlashCameraConfig, Item, ItemId, LightConfig, LightSource, SpriteId};

/// A circle standing in for a collider
#[derive(Debug, Clone)]
pub struct StubCollider {
    pub handle: ColliderHandle,
    pub position: Vec2,
    pub radius: f32,
    pub layer: Layer,
}

/// Single-body physics double.
///
/// Impulses change the velocity by `impulse / mass`, like a rigid body would.
#[derive(Debug)]
pub struct StubPhysics {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub capsule: CapsuleShape,
    pub colliders: Vec<StubCollider>,
    /// Layers the body collider currently touches
    pub touching: LayerMask,
    /// A vertical wall on the Walls layer at this x
    pub wall_x: Option<f32>,
    pub impulses: Vec<Vec2>,
    pub raycasts: RefCell<Vec<(Vec2, Vec2, LayerMask)>>,
}

impl Default for StubPhysics {
    fn default() -> Self {
        Self {
            body: RigidBodyHandle::from_raw_parts(0, 0),
            collider: ColliderHandle::from_raw_parts(0, 0),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            capsule: CapsuleShape::new(0.8, 1.8),
            colliders: Vec::new(),
            touching: LayerMask::NONE,
            wall_x: None,
            impulses: Vec::new(),
            raycasts: RefCell::new(Vec::new()),
        }
    }
}

impl StubPhysics {
    /// Add a circle collider and return its handle
    pub fn add_collider(&mut self, position: Vec2, radius: f32, layer: Layer) -> ColliderHandle {
        let handle = ColliderHandle::from_raw_parts(self.colliders.len() as u32 + 1, 0);
        self.colliders.push(StubCollider {
            handle,
            position,
            radius,
            layer,
        });
        handle
    }

    pub fn remove_colliders_on(&mut self, layer: Layer) {
        self.colliders.retain(|collider| collider.layer != layer);
    }
}

impl PhysicsBackend for StubPhysics {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<ColliderHandle> {
        self.colliders
            .iter()
            .filter(|c| mask.contains(c.layer))
            .filter(|c| c.position.distance(center) <= c.radius + radius)
            .map(|c| c.handle)
            .collect()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        self.raycasts.borrow_mut().push((origin, direction, mask));

        let wall_x = self.wall_x?;
        if !mask.contains(Layer::Walls) {
            return None;
        }
        let direction = direction.try_normalize()?;
        if direction.x.abs() < f32::EPSILON {
            return None;
        }
        let distance = (wall_x - origin.x) / direction.x;
        (0.0..=max_distance).contains(&distance).then(|| RaycastHit {
            collider: ColliderHandle::from_raw_parts(u32::MAX, 0),
            distance,
            point: origin + direction * distance,
            normal: Vec2::new(-direction.x.signum(), 0.0),
        })
    }

    fn apply_impulse(&mut self, _body: RigidBodyHandle, impulse: Vec2) {
        self.impulses.push(impulse);
        self.velocity += impulse / self.mass;
    }

    fn linear_velocity(&self, _body: RigidBodyHandle) -> Vec2 {
        self.velocity
    }

    fn body_position(&self, _body: RigidBodyHandle) -> Vec2 {
        self.position
    }

    fn collider_position(&self, collider: ColliderHandle) -> Option<Vec2> {
        self.colliders
            .iter()
            .find(|c| c.handle == collider)
            .map(|c| c.position)
    }

    fn is_touching_layer(&self, _collider: ColliderHandle, mask: LayerMask) -> bool {
        self.touching.intersects(mask)
    }

    fn capsule(&self, _collider: ColliderHandle) -> Option<CapsuleShape> {
        Some(self.capsule)
    }

    fn set_capsule(&mut self, _collider: ColliderHandle, shape: CapsuleShape) {
        self.capsule = shape;
    }
}

/// A flash camera item with default tuning
pub fn flash_item(id: u64, sprite: SpriteId) -> Item {
    Item::flash_camera(
        ItemId(id),
        format!("Camera {id}"),
        sprite,
        FlashCameraConfig::default(),
        LightSource::new(LightConfig::default()),
    )
    .unwrap()
}
