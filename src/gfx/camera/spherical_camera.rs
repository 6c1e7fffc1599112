use std::any::Any;

use cgmath::{Deg, Matrix, Matrix3, Vector3, Zero};

use super::camera::Camera;
use super::controller::{wrap_degrees, CameraController};
use crate::input::event::{MouseButton, MouseEvent, WheelEvent};

/// Orbit camera circling a center point.
///
/// Right drag changes heading and elevation, middle drag slides the center in
/// the view plane, the wheel changes the orbit distance.
#[derive(Debug, Clone)]
pub struct SphericalCamera {
    pub center: Vector3<f64>,
    pub distance: f64,
    /// Degrees about world Z.
    pub heading: f64,
    /// Degrees; negative looks down on the center.
    pub elevation: f64,
    pub rotate_speed: f64,
    pub pan_speed: f64,
    /// Distance change per wheel tick.
    pub zoom_speed: f64,
    pub min_distance: f64,
}

impl Default for SphericalCamera {
    fn default() -> Self {
        Self {
            center: Vector3::zero(),
            distance: 5.0,
            heading: 0.0,
            elevation: -45.0,
            rotate_speed: 0.5,
            pan_speed: 0.01,
            zoom_speed: 0.02,
            min_distance: 0.1,
        }
    }
}

impl SphericalCamera {
    pub fn new(center: Vector3<f64>, distance: f64) -> Self {
        Self {
            center,
            distance,
            ..Self::default()
        }
    }

    /// World-to-camera rotation (without the distance offset).
    fn orbit(&self) -> Matrix3<f64> {
        Matrix3::from_angle_x(Deg(self.elevation)) * Matrix3::from_angle_z(Deg(self.heading))
    }

    /// Camera-to-world rotation.
    pub fn rotation(&self) -> Matrix3<f64> {
        self.orbit().transpose()
    }

    pub fn position(&self) -> Vector3<f64> {
        self.center + self.rotation() * Vector3::new(0.0, 0.0, self.distance)
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance.max(self.min_distance);
    }

    fn sync(&self, camera: &mut Camera) {
        camera.set_pose(self.position(), self.rotation());
    }
}

impl CameraController for SphericalCamera {
    fn name(&self) -> &str {
        "spherical"
    }

    fn update(&mut self, camera: &mut Camera) {
        self.sync(camera);
    }

    fn mouse_move(&mut self, event: &MouseEvent, camera: &mut Camera) {
        match event.button {
            Some(MouseButton::Right) => {
                self.heading = wrap_degrees(self.heading + event.dx * self.rotate_speed);
                self.elevation = wrap_degrees(self.elevation + event.dy * self.rotate_speed);
            }
            Some(MouseButton::Middle) => {
                let r = self.rotation();
                self.center += (r.x * -event.dx + r.y * event.dy) * self.pan_speed;
            }
            _ => return,
        }
        self.sync(camera);
    }

    fn wheel(&mut self, event: &WheelEvent, camera: &mut Camera) {
        self.set_distance(self.distance + self.zoom_speed * event.ticks() as f64);
        self.sync(camera);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::Perspective;
    use cgmath::InnerSpace;

    #[test]
    fn test_camera_looks_at_center() {
        let mut controller = SphericalCamera::new(Vector3::new(1.0, 2.0, 0.5), 4.0);
        controller.heading = 30.0;
        let mut camera = Camera::new(Perspective::default(), 100, 100);
        controller.update(&mut camera);
        let to_center = (controller.center - camera.position()).normalize();
        assert!((to_center - camera.view_direction()).magnitude() < 1e-12);
        assert!(((camera.position() - controller.center).magnitude() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_clamps_distance() {
        let mut controller = SphericalCamera::default();
        let mut camera = Camera::new(Perspective::default(), 100, 100);
        controller.wheel(&WheelEvent::new(0.0, 0.0, -1200), &mut camera);
        assert_eq!(controller.distance, controller.min_distance);
    }

    #[test]
    fn test_right_drag_orbits() {
        let mut controller = SphericalCamera::default();
        let mut camera = Camera::new(Perspective::default(), 100, 100);
        let event = MouseEvent {
            x: 0.0,
            y: 0.0,
            dx: 20.0,
            dy: 0.0,
            button: Some(MouseButton::Right),
        };
        controller.mouse_move(&event, &mut camera);
        assert_eq!(controller.heading, 10.0);
        assert_eq!(controller.elevation, -45.0);
    }
}
