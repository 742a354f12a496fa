//! Core types used throughout the Umbra workspace

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for spawned scene entities (marks, pickups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal facing of a side-view character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacingDirection {
    Left = -1,
    Right = 1,
}

impl FacingDirection {
    /// Facing for a horizontal axis value. `None` when the axis is exactly zero.
    pub fn from_axis(horizontal: f32) -> Option<Self> {
        if horizontal > 0.0 {
            Some(Self::Right)
        } else if horizontal < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// Signed multiplier (-1.0 or 1.0)
    pub fn sign(self) -> f32 {
        self as i32 as f32
    }
}

impl Default for FacingDirection {
    fn default() -> Self {
        Self::Right
    }
}

/// 2D transform: position, rotation (radians, counter-clockwise) and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2D {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Local up axis in world space
    pub fn up(&self) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate(Vec2::Y)
    }

    /// Rotation in degrees
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.to_degrees()
    }

    /// Mirror the horizontal scale so its sign matches `facing`, keeping its magnitude
    pub fn face(&mut self, facing: FacingDirection) {
        self.scale.x = facing.sign() * self.scale.x.abs();
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_from_axis() {
        assert_eq!(FacingDirection::from_axis(1.0), Some(FacingDirection::Right));
        assert_eq!(FacingDirection::from_axis(-0.3), Some(FacingDirection::Left));
        assert_eq!(FacingDirection::from_axis(0.0), None);
        assert_eq!(FacingDirection::Left.sign(), -1.0);
    }

    #[test]
    fn test_face_preserves_magnitude() {
        let mut transform = Transform2D::default();
        transform.scale = Vec2::new(2.5, 1.0);

        transform.face(FacingDirection::Left);
        assert_eq!(transform.scale.x, -2.5);

        transform.face(FacingDirection::Left);
        assert_eq!(transform.scale.x, -2.5);

        transform.face(FacingDirection::Right);
        assert_eq!(transform.scale.x, 2.5);
    }

    #[test]
    fn test_up_follows_rotation() {
        let mut transform = Transform2D::default();
        assert!((transform.up() - Vec2::Y).length() < 1e-6);

        transform.rotation = std::f32::consts::FRAC_PI_2;
        assert!((transform.up() - Vec2::new(-1.0, 0.0)).length() < 1e-6);
    }
}
