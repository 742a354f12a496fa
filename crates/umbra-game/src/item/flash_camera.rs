//! Flash camera: a handheld light that marks walls inside a cone

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;
use umbra_core::Layer;
use umbra_physics::PhysicsBackend;

use super::light::LightSource;
use super::fan::{FanRay, RayFan};
use super::ItemError;

/// Upper bound on the rays a single flash may cast
pub const MAX_RAYS: usize = 361;

/// Flash camera tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashCameraConfig {
    /// Half opening of the cone in degrees (0..=180)
    pub ray_angle: f32,
    /// Ray length in world units (0 < length <= 10)
    pub ray_length: f32,
    /// Light intensity during a flash (0..=15)
    pub flash_intensity: f32,
    /// Degrees between neighbouring rays
    pub split_width: f32,
    /// How long the flash stays lit, seconds
    pub flash_duration: f32,
}

impl Default for FlashCameraConfig {
    fn default() -> Self {
        Self {
            ray_angle: 15.0,
            ray_length: 5.0,
            flash_intensity: 0.8,
            split_width: 5.0,
            flash_duration: 0.1,
        }
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ItemError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ItemError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

impl FlashCameraConfig {
    pub fn validate(&self) -> Result<(), ItemError> {
        check_range("ray_angle", self.ray_angle, 0.0, 180.0)?;
        check_range("ray_length", self.ray_length, 0.0, 10.0)?;
        if self.ray_length == 0.0 {
            return Err(ItemError::ZeroRayLength);
        }
        check_range("flash_intensity", self.flash_intensity, 0.0, 15.0)?;
        check_range("flash_duration", self.flash_duration, 0.0, f32::MAX)?;
        if self.split_width.is_nan() || self.split_width <= 0.0 {
            return Err(ItemError::InvalidSplitWidth(self.split_width));
        }
        let rays = (2.0 * f64::from(self.ray_angle) / f64::from(self.split_width)).floor() + 1.0;
        if rays > MAX_RAYS as f64 {
            return Err(ItemError::TooManyRays {
                count: rays,
                max: MAX_RAYS,
            });
        }
        Ok(())
    }
}

/// Builder that refuses to produce a camera without a light
#[derive(Debug, Clone)]
pub struct FlashCameraBuilder {
    config: FlashCameraConfig,
    light: Option<LightSource>,
}

impl FlashCameraBuilder {
    /// Bind the light the camera flashes and aims
    pub fn light(mut self, light: LightSource) -> Self {
        self.light = Some(light);
        self
    }

    pub fn build(self) -> Result<FlashCamera, ItemError> {
        self.config.validate()?;
        let light = self.light.ok_or(ItemError::MissingLightSource)?;

        let fan = RayFan {
            half_angle: self.config.ray_angle,
            split_width: self.config.split_width,
            length: self.config.ray_length,
            mask: Layer::Walls.mask(),
        };

        Ok(FlashCamera {
            config: self.config,
            fan,
            light,
        })
    }
}

/// The ray-fan item behaviour
#[derive(Debug, Clone)]
pub struct FlashCamera {
    config: FlashCameraConfig,
    fan: RayFan,
    light: LightSource,
}

impl FlashCamera {
    pub fn builder(config: FlashCameraConfig) -> FlashCameraBuilder {
        FlashCameraBuilder {
            config,
            light: None,
        }
    }

    pub fn config(&self) -> &FlashCameraConfig {
        &self.config
    }

    pub fn fan(&self) -> &RayFan {
        &self.fan
    }

    pub fn light(&self) -> &LightSource {
        &self.light
    }

    /// Per-frame upkeep: keep the light on the holder, aimed at the cursor,
    /// and finish any flash whose time is up.
    pub fn track(&mut self, holder: Vec2, cursor: Vec2, now: f64) {
        self.light.follow(holder);
        self.light.aim_at(cursor);
        self.light.tick(now);
    }

    /// Flash and sweep the cone from `start` towards `target`
    pub fn fire(
        &mut self,
        physics: &dyn PhysicsBackend,
        start: Vec2,
        target: Vec2,
        now: f64,
    ) -> Vec<FanRay> {
        self.light
            .flash(self.config.flash_intensity, now, self.config.flash_duration);
        self.fan.cast(physics, start, target)
    }

    /// Put the camera down: the light goes dark immediately
    pub fn on_drop(&mut self) {
        self.light.extinguish();
        info!("Flash camera dropped");
    }
}
