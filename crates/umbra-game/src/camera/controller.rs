//! Orthographic side-view camera

use glam::Vec2;

use super::CameraConfig;

/// Maps screen-space pointer positions into the world.
///
/// Items and the character controller receive this explicitly instead of
/// reaching for a global main camera.
pub trait Viewport {
    /// Convert a screen position (pixels, origin top-left, y down) to world units
    fn screen_to_world(&self, screen: Vec2) -> Vec2;
}

/// Orthographic 2D camera centred on `position`
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Configuration
    pub config: CameraConfig,
    /// World position at the centre of the screen
    position: Vec2,
}

impl Camera2D {
    /// Create a new camera at the origin
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
        }
    }

    /// Get the camera's current world position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Snap the camera to a world position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Move towards `target` using the configured smoothing
    pub fn follow(&mut self, target: Vec2) {
        let t = self.config.follow_smoothing.clamp(0.0, 1.0);
        self.position = self.position.lerp(target, t);
    }

    fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.config.viewport_width, self.config.viewport_height)
    }

    /// Convert a world position to screen pixels
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let offset = (world - self.position) * self.config.pixels_per_unit;
        self.viewport_size() / 2.0 + Vec2::new(offset.x, -offset.y)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport for Camera2D {
    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let centered = screen - self.viewport_size() / 2.0;
        self.position + Vec2::new(centered.x, -centered.y) / self.config.pixels_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_centre_is_camera_position() {
        let mut camera = Camera2D::new();
        camera.set_position(Vec2::new(3.0, -2.0));
        let centre = Vec2::new(640.0, 360.0);
        assert_eq!(camera.screen_to_world(centre), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_screen_y_points_down() {
        let camera = Camera2D::new();
        let above = camera.screen_to_world(Vec2::new(640.0, 360.0 - 64.0));
        assert_eq!(above, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_world_screen_round_trip() {
        let mut camera = Camera2D::new();
        camera.set_position(Vec2::new(1.5, 4.0));
        let world = Vec2::new(-2.0, 7.25);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!((back - world).length() < 1e-4);
    }

    #[test]
    fn test_follow_moves_towards_target() {
        let mut camera = Camera2D::new();
        camera.config.follow_smoothing = 0.5;
        camera.follow(Vec2::new(10.0, 0.0));
        assert_eq!(camera.position(), Vec2::new(5.0, 0.0));
    }
}
