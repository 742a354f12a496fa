//! A fan of ray casts towards a target

use glam::Vec2;
use tracing::debug;
use umbra_core::LayerMask;
use umbra_physics::PhysicsBackend;

/// One ray of a fan and what it hit
#[derive(Debug, Clone, PartialEq)]
pub struct FanRay {
    pub origin: Vec2,
    /// Rotated direction scaled to the ray length
    pub direction: Vec2,
    pub hit: Option<Vec2>,
}

/// Fan of rays spread symmetrically around an aim direction.
///
/// Offsets run from `-half_angle` in steps of `split_width` for as long as they
/// stay within the `2 * half_angle` span, so both endpoints are included when
/// the span divides evenly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFan {
    /// Half of the cone opening, degrees
    pub half_angle: f32,
    /// Angular spacing between rays, degrees
    pub split_width: f32,
    /// Ray length in world units
    pub length: f32,
    /// Layers the rays stop on
    pub mask: LayerMask,
}

impl RayFan {
    /// Number of rays in the fan
    pub fn ray_count(&self) -> usize {
        (2.0 * self.half_angle / self.split_width).floor() as usize + 1
    }

    /// Signed offset of every ray from the aim direction, in degrees
    pub fn offsets(&self) -> Vec<f32> {
        (0..self.ray_count())
            .map(|i| self.split_width * i as f32 - self.half_angle)
            .collect()
    }

    /// Ray vectors for an aim direction, each `length` long.
    /// Empty when the direction has no length.
    pub fn fan(&self, direction: Vec2) -> Vec<Vec2> {
        let Some(direction) = direction.try_normalize() else {
            return Vec::new();
        };
        let direction = direction * self.length;

        self.offsets()
            .into_iter()
            .map(|offset| Vec2::from_angle(offset.to_radians()).rotate(direction))
            .collect()
    }

    /// Cast the fan from `start` towards `target`
    pub fn cast(&self, physics: &dyn PhysicsBackend, start: Vec2, target: Vec2) -> Vec<FanRay> {
        let rays: Vec<FanRay> = self
            .fan(target - start)
            .into_iter()
            .map(|direction| FanRay {
                origin: start,
                direction,
                hit: physics
                    .raycast(start, direction, self.length, self.mask)
                    .map(|hit| hit.point),
            })
            .collect();

        debug!(
            "Ray fan cast {} rays, {} hits",
            rays.len(),
            rays.iter().filter(|ray| ray.hit.is_some()).count()
        );
        rays
    }
}
