//! Camera configuration

use serde::{Deserialize, Serialize};

/// Rejected camera settings
#[derive(Debug, Clone, thiserror::Error)]
pub enum CameraError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("Follow smoothing must be within 0..=1, got {0}")]
    InvalidSmoothing(f32),
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Screen pixels per world unit
    pub pixels_per_unit: f32,
    /// Follow interpolation smoothing (0-1, lower = smoother, 1 = snap)
    pub follow_smoothing: f32,
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 32.0,
            follow_smoothing: 0.15,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl CameraConfig {
    /// Scale and viewport size must be positive so screen positions map back
    /// to finite world positions
    pub fn validate(&self) -> Result<(), CameraError> {
        let fields = [
            ("pixels_per_unit", self.pixels_per_unit),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CameraError::NotPositive { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.follow_smoothing) {
            return Err(CameraError::InvalidSmoothing(self.follow_smoothing));
        }
        Ok(())
    }
}
