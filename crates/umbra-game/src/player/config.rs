//! Character tuning

use glam::Vec2;
use serde::{Deserialize, Serialize};
use umbra_physics::CharacterBodyConfig;

use super::{CharacterError, LocomotionSpeeds};

/// Character configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub speeds: LocomotionSpeeds,
    /// Upward impulse applied by a jump
    pub jump_force: f32,
    /// Horizontal knockback speed on enemy contact
    pub horizontal_knockback: f32,
    /// Vertical knockback speed on enemy contact
    pub vertical_knockback: f32,
    /// Seconds during which repeated enemy contact is ignored (0 = every tick)
    pub contact_cooldown: f32,
    pub inventory_size: usize,
    /// Radius of the ground and ceiling sensor circles
    pub sensor_radius: f32,
    /// Ground sensor position relative to the body
    pub ground_sensor_offset: Vec2,
    /// Ceiling sensor position relative to the body
    pub ceiling_sensor_offset: Vec2,
    /// Reach for interactables
    pub interact_radius: f32,
    /// Search radius for the enemy being touched
    pub enemy_radius: f32,
    pub body: CharacterBodyConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            speeds: LocomotionSpeeds::default(),
            jump_force: 5.0,
            horizontal_knockback: 0.73,
            vertical_knockback: 0.73,
            contact_cooldown: 0.5,
            inventory_size: 1,
            sensor_radius: 0.2,
            ground_sensor_offset: Vec2::new(0.0, -0.9),
            ceiling_sensor_offset: Vec2::new(0.0, 0.9),
            interact_radius: 1.5,
            enemy_radius: 1.5,
            body: CharacterBodyConfig::default(),
        }
    }
}

impl CharacterConfig {
    pub fn validate(&self) -> Result<(), CharacterError> {
        self.speeds.validate()?;

        let sizes = [
            ("jump_force", self.jump_force),
            ("contact_cooldown", self.contact_cooldown),
            ("sensor_radius", self.sensor_radius),
            ("interact_radius", self.interact_radius),
            ("enemy_radius", self.enemy_radius),
        ];
        for (name, value) in sizes {
            if value.is_nan() || value < 0.0 {
                return Err(CharacterError::InvalidSize { name, value });
            }
        }
        if self.body.width <= 0.0 || self.body.height <= 0.0 {
            return Err(CharacterError::InvalidSize {
                name: "body",
                value: self.body.width.min(self.body.height),
            });
        }
        Ok(())
    }
}
