//! Umbra Physics - 2D physics world using rapier2d
//!
//! Provides the [`PhysicsBackend`] contract consumed by the gameplay crate and a
//! rapier2d-backed [`PhysicsWorld`] implementing it.

mod backend;
mod character_body;

pub use backend::{CapsuleShape, PhysicsBackend, RaycastHit};
pub use character_body::{CharacterBody, CharacterBodyConfig};
pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use umbra_core::{Layer, LayerMask};

/// Errors raised while wiring bodies into the world
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhysicsError {
    #[error("Collider {0:?} is not a capsule in the physics world")]
    NotACapsule(ColliderHandle),

    #[error("Physics timestep must be positive, got {0}")]
    InvalidTimestep(f32),
}

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec2,
    /// Physics timestep (default: 1/50)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            timestep: 1.0 / 50.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.timestep.is_nan() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(self.timestep));
        }
        Ok(())
    }
}

/// Interaction groups for a collider that lives on `layer` and touches everything
pub fn layer_groups(layer: Layer) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(layer.bit()), Group::ALL)
}

/// Query filter that only accepts colliders on `mask`
pub fn layer_filter(mask: LayerMask) -> QueryFilter<'static> {
    QueryFilter::new().groups(InteractionGroups::new(
        Group::ALL,
        Group::from_bits_truncate(mask.bits()),
    ))
}

fn to_vector(v: Vec2) -> nalgebra::Vector2<Real> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn from_vector(v: &nalgebra::Vector2<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn collider_on(collider: &Collider, mask: LayerMask) -> bool {
    collider.collision_groups().memberships.bits() & mask.bits() != 0
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = to_vector(self.config.gravity);

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        // Update query pipeline after physics step
        self.query_pipeline.update(&self.collider_set);
    }

    /// Refresh the query pipeline without stepping (after adding static geometry)
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a rigid body with a collider
    pub fn add_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        (rb_handle, col_handle)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    /// Create a static box collider on a layer
    pub fn create_static_box(
        &mut self,
        half_extents: Vec2,
        position: Vec2,
        layer: Layer,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![position.x, position.y])
            .collision_groups(layer_groups(layer))
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// Create a sensor circle (pickups, signs) that overlaps but never collides
    pub fn create_sensor(&mut self, radius: f32, position: Vec2, layer: Layer) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![position.x, position.y])
            .collision_groups(layer_groups(layer))
            .sensor(true)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);
        let mut hits = Vec::new();

        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            layer_filter(mask),
            |handle| {
                hits.push(handle);
                true
            },
        );

        hits
    }

    fn overlap_circle_any(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);

        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape,
                layer_filter(mask),
            )
            .is_some()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let direction = direction.try_normalize()?;
        let ray = Ray::new(point![origin.x, origin.y], vector![direction.x, direction.y]);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                layer_filter(mask),
            )
            .map(|(handle, intersection)| RaycastHit {
                collider: handle,
                distance: intersection.time_of_impact,
                point: origin + direction * intersection.time_of_impact,
                normal: from_vector(&intersection.normal),
            })
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(body) {
            body.apply_impulse(to_vector(impulse), true);
        }
    }

    fn linear_velocity(&self, body: RigidBodyHandle) -> Vec2 {
        self.rigid_body_set
            .get(body)
            .map(|body| from_vector(body.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    fn body_position(&self, body: RigidBodyHandle) -> Vec2 {
        self.rigid_body_set
            .get(body)
            .map(|body| from_vector(body.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    fn collider_position(&self, collider: ColliderHandle) -> Option<Vec2> {
        self.collider_set
            .get(collider)
            .map(|collider| from_vector(collider.translation()))
    }

    fn is_touching_layer(&self, collider: ColliderHandle, mask: LayerMask) -> bool {
        let other_on_mask = |c1: ColliderHandle, c2: ColliderHandle| {
            let other = if c1 == collider { c2 } else { c1 };
            self.collider_set
                .get(other)
                .is_some_and(|other| collider_on(other, mask))
        };

        let touching = self
            .narrow_phase
            .contact_pairs_with(collider)
            .any(|pair| pair.has_any_active_contact && other_on_mask(pair.collider1, pair.collider2));

        touching
            || self
                .narrow_phase
                .intersection_pairs_with(collider)
                .any(|(c1, c2, intersecting)| intersecting && other_on_mask(c1, c2))
    }

    fn capsule(&self, collider: ColliderHandle) -> Option<CapsuleShape> {
        let collider = self.collider_set.get(collider)?;
        let capsule = collider.shape().as_capsule()?;
        let offset = collider
            .position_wrt_parent()
            .map(|iso| from_vector(&iso.translation.vector))
            .unwrap_or(Vec2::ZERO);

        Some(CapsuleShape {
            size: Vec2::new(
                capsule.radius * 2.0,
                capsule.half_height() * 2.0 + capsule.radius * 2.0,
            ),
            offset,
        })
    }

    fn set_capsule(&mut self, collider: ColliderHandle, shape: CapsuleShape) {
        if let Some(collider) = self.collider_set.get_mut(collider) {
            collider.set_shape(SharedShape::capsule_y(
                shape.half_segment().max(0.01),
                shape.radius(),
            ));
            collider.set_translation_wrt_parent(to_vector(shape.offset));
        }
    }
}
