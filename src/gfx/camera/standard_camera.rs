use std::any::Any;

use cgmath::{Deg, Matrix, Matrix3, Vector3};

use super::camera::Camera;
use super::controller::{wrap_degrees, CameraController};
use crate::input::event::{MouseButton, MouseEvent, WheelEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Turn(f64, f64),
    Pan(f64, f64),
    Advance(f64),
}

/// First-person camera for a Z-up world.
///
/// Heading turns about world Z (0 looks along +X), pitch tilts the view up
/// and down, roll spins it. Right drag turns, middle drag pans sideways and
/// vertically, the wheel moves forward along the heading.
#[derive(Debug, Clone)]
pub struct StandardCamera {
    pub position: Vector3<f64>,
    /// Heading, pitch and roll in degrees.
    pub hpr: Vector3<f64>,
    /// Degrees per pixel of right drag.
    pub rotate_speed: f64,
    /// World units per pixel of middle drag.
    pub pan_speed: f64,
    /// World units per wheel tick.
    pub zoom_speed: f64,
    /// Keep repeating the last drag motion every frame after release.
    pub allow_throw: bool,
    last_motion: Option<Motion>,
    thrown: bool,
}

impl Default for StandardCamera {
    fn default() -> Self {
        Self::new(Vector3::new(2.7, -3.0, 1.6), Vector3::new(120.0, -12.0, 0.0))
    }
}

impl StandardCamera {
    pub fn new(position: Vector3<f64>, hpr: Vector3<f64>) -> Self {
        Self {
            position,
            hpr,
            rotate_speed: 0.5,
            pan_speed: 0.01,
            zoom_speed: 0.01,
            allow_throw: false,
            last_motion: None,
            thrown: false,
        }
    }

    pub fn set(&mut self, position: Vector3<f64>, hpr: Vector3<f64>) {
        self.position = position;
        self.hpr = hpr;
        self.wrap_angles();
    }

    /// Camera-to-world rotation for the current angles.
    pub fn rotation(&self) -> Matrix3<f64> {
        let view = Matrix3::from_angle_z(Deg(90.0))
            * Matrix3::from_angle_y(Deg(90.0))
            * Matrix3::from_angle_x(Deg(self.hpr.z))
            * Matrix3::from_angle_y(Deg(self.hpr.y))
            * Matrix3::from_angle_z(Deg(-self.hpr.x));
        view.transpose()
    }

    fn heading_sin_cos(&self) -> (f64, f64) {
        self.hpr.x.to_radians().sin_cos()
    }

    fn turn(&mut self, dx: f64, dy: f64) {
        self.hpr.x += dx * self.rotate_speed;
        self.hpr.y += dy * self.rotate_speed;
        self.wrap_angles();
    }

    fn pan(&mut self, dx: f64, dy: f64) {
        let side = self.pan_speed * dx;
        let (s, c) = self.heading_sin_cos();
        self.position.x += -s * side;
        self.position.y += c * side;
        self.position.z += self.pan_speed * dy;
    }

    fn advance(&mut self, ticks: f64) {
        let forward = self.zoom_speed * ticks;
        let (s, c) = self.heading_sin_cos();
        self.position.x += c * forward;
        self.position.y += s * forward;
    }

    fn apply(&mut self, motion: Motion) {
        match motion {
            Motion::Turn(dx, dy) => self.turn(dx, dy),
            Motion::Pan(dx, dy) => self.pan(dx, dy),
            Motion::Advance(ticks) => self.advance(ticks),
        }
    }

    fn wrap_angles(&mut self) {
        self.hpr.x = wrap_degrees(self.hpr.x);
        self.hpr.y = wrap_degrees(self.hpr.y);
        self.hpr.z = wrap_degrees(self.hpr.z);
    }
}

impl CameraController for StandardCamera {
    fn name(&self) -> &str {
        "standard"
    }

    fn update(&mut self, camera: &mut Camera) {
        if self.thrown {
            if let Some(motion) = self.last_motion {
                self.apply(motion);
            }
        }
        camera.set_pose(self.position, self.rotation());
    }

    fn mouse_press(&mut self, _event: &MouseEvent, _camera: &mut Camera) {
        self.thrown = false;
    }

    fn mouse_move(&mut self, event: &MouseEvent, camera: &mut Camera) {
        let motion = match event.button {
            Some(MouseButton::Right) => Motion::Turn(event.dx, event.dy),
            Some(MouseButton::Middle) => Motion::Pan(event.dx, event.dy),
            _ => return,
        };
        self.apply(motion);
        self.last_motion = Some(motion);
        self.thrown = false;
        camera.set_pose(self.position, self.rotation());
    }

    fn mouse_release(&mut self, _event: &MouseEvent, _camera: &mut Camera) {
        self.thrown = self.allow_throw;
    }

    fn wheel(&mut self, event: &WheelEvent, camera: &mut Camera) {
        self.apply(Motion::Advance(event.ticks() as f64));
        camera.set_pose(self.position, self.rotation());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
