//! Aimable light attached to an item

use glam::Vec2;
use serde::{Deserialize, Serialize};
use umbra_core::{Color, Transform2D};

/// Signed rotation (degrees) that turns the up axis towards `target` as seen from `from`.
///
/// The unsigned angle to +Y is negated when the target lies to the right, so
/// rotation stays counter-clockwise positive. Returns `None` when both points
/// coincide.
pub fn aim_angle(from: Vec2, target: Vec2) -> Option<f32> {
    let difference = (target - from).try_normalize()?;
    let unsigned = difference.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees();
    let sign = if difference.x > 0.0 { -1.0 } else { 1.0 };
    Some(unsigned * sign)
}

/// Light source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    /// Offset from the holder's position
    pub offset: Vec2,
    /// Light tint
    pub color: Color,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, 0.5),
            color: Color::WHITE,
        }
    }
}

/// A light whose intensity can be flashed and whose rotation tracks a point
#[derive(Debug, Clone)]
pub struct LightSource {
    pub config: LightConfig,
    /// World transform; rotation is in radians
    pub transform: Transform2D,
    intensity: f32,
    /// Time at which a pending flash turns the light back off
    pending_reset_at: Option<f64>,
}

impl LightSource {
    pub fn new(config: LightConfig) -> Self {
        Self {
            config,
            transform: Transform2D::default(),
            intensity: 0.0,
            pending_reset_at: None,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Rotation in degrees
    pub fn rotation_degrees(&self) -> f32 {
        self.transform.rotation_degrees()
    }

    pub fn pending_reset_at(&self) -> Option<f64> {
        self.pending_reset_at
    }

    /// Place the light relative to its holder
    pub fn follow(&mut self, holder: Vec2) {
        self.transform.position = holder + self.config.offset;
    }

    /// Rotate so the light points at `target`. Leaves the rotation alone when
    /// the target sits exactly on the light.
    pub fn aim_at(&mut self, target: Vec2) {
        if let Some(angle) = aim_angle(self.transform.position, target) {
            self.transform.rotation = angle.to_radians();
        }
    }

    /// Switch to `intensity` until `now + duration`. A flash while one is
    /// pending restarts the timer.
    pub fn flash(&mut self, intensity: f32, now: f64, duration: f32) {
        self.intensity = intensity;
        self.pending_reset_at = Some(now + duration as f64);
    }

    /// Complete a pending flash once its deadline has passed
    pub fn tick(&mut self, now: f64) {
        if let Some(deadline) = self.pending_reset_at {
            if now >= deadline {
                self.intensity = 0.0;
                self.pending_reset_at = None;
            }
        }
    }

    /// Turn the light off immediately and forget any pending flash
    pub fn extinguish(&mut self) {
        self.intensity = 0.0;
        self.pending_reset_at = None;
    }
}
