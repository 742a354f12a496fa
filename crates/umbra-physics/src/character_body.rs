//! Dynamic capsule bodies for side-view characters

use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use umbra_core::Layer;

use crate::{layer_groups, CapsuleShape, PhysicsWorld};

/// Character body configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterBodyConfig {
    /// Capsule width (default: 0.8)
    pub width: f32,
    /// Standing capsule height (default: 1.8)
    pub height: f32,
    /// Mass of the body in kilograms (default: 1.0)
    pub mass: f32,
    /// Layer the capsule lives on
    pub layer: Layer,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            width: 0.8,
            height: 1.8,
            mass: 1.0,
            layer: Layer::Player,
        }
    }
}

impl CharacterBodyConfig {
    /// Capsule described by this config
    pub fn capsule(&self) -> CapsuleShape {
        CapsuleShape::new(self.width, self.height)
    }
}

/// Handles of a spawned character body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl CharacterBody {
    /// Spawn an upright dynamic capsule centred on `position`
    pub fn spawn(physics: &mut PhysicsWorld, config: &CharacterBodyConfig, position: Vec2) -> Self {
        let capsule = config.capsule();

        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .lock_rotations()
            .build();

        let collider = ColliderBuilder::capsule_y(capsule.half_segment().max(0.01), capsule.radius())
            .collision_groups(layer_groups(config.layer))
            .mass(config.mass)
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .build();

        let (body, collider) = physics.add_body(rigid_body, collider);
        Self { body, collider }
    }
}
