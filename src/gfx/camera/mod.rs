pub mod camera;
pub mod camera_utils;
pub mod controller;
pub mod spherical_camera;
pub mod standard_camera;

// Re-export main types
pub use camera::{Camera, Perspective};
pub use camera_utils::CameraUniform;
pub use controller::{CameraController, CameraManager};
pub use spherical_camera::SphericalCamera;
pub use standard_camera::StandardCamera;
