//! Umbra Core - Core types and utilities for the Umbra workspace
//!
//! This crate provides the foundational types used by the physics and game crates:
//! - Mathematical primitives (re-exported from glam)
//! - 2D transform and facing direction
//! - Collision layers resolved to bit masks
//! - Frame and fixed-timestep time tracking

pub mod layers;
pub mod time;
pub mod types;

pub use glam::Vec2;
pub use layers::{Layer, LayerMask};
pub use time::{GameTime, TimeConfig, TimeConfigError};
pub use types::{Color, EntityId, FacingDirection, Transform2D};
