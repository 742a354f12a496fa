//! Player character
//!
//! Locomotion states, tuning and the side-view controller that drives a
//! physics body from input.

mod config;
mod controller;
mod locomotion;

pub use config::CharacterConfig;
pub use controller::{Character, CharacterBuilder, FrameContext, FrameEvents};
pub use locomotion::{Locomotion, LocomotionSpeeds, LocomotionState};

use umbra_physics::PhysicsError;

/// Errors raised while building a character
#[derive(Debug, Clone, thiserror::Error)]
pub enum CharacterError {
    #[error("Character has no inventory display")]
    MissingInventoryDisplay,

    #[error("Character has no health bar")]
    MissingHealthbar,

    #[error("Invalid locomotion speeds: {0}")]
    InvalidSpeeds(String),

    #[error("{name} must be non-negative, got {value}")]
    InvalidSize { name: &'static str, value: f32 },

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
