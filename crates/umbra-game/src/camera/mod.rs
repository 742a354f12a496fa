//! Camera system module
//!
//! Provides the orthographic side-view camera and the [`Viewport`] used to
//! place the cursor in the world.

mod config;
mod controller;

pub use config::{CameraConfig, CameraError};
pub use controller::{Camera2D, Viewport};
