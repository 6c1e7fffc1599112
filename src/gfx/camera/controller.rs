use std::any::Any;

use super::camera::Camera;
use crate::input::event::{Key, MouseEvent, WheelEvent};

/// Drives a [`Camera`] from right/middle-button drags, the wheel and keys.
///
/// Controllers only ever see events the dispatcher routed to the camera; the
/// left button never reaches them.
pub trait CameraController: Any {
    fn name(&self) -> &str;

    /// Pushes the controller's parameters into the camera pose. Called once
    /// per frame before the camera matrices are cached.
    fn update(&mut self, camera: &mut Camera);

    fn mouse_press(&mut self, _event: &MouseEvent, _camera: &mut Camera) {}

    fn mouse_move(&mut self, _event: &MouseEvent, _camera: &mut Camera) {}

    fn mouse_release(&mut self, _event: &MouseEvent, _camera: &mut Camera) {}

    fn wheel(&mut self, _event: &WheelEvent, _camera: &mut Camera) {}

    fn key_press(&mut self, _key: Key, _camera: &mut Camera) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The camera plus the controller currently steering it.
pub struct CameraManager {
    pub camera: Camera,
    controller: Option<Box<dyn CameraController>>,
}

impl CameraManager {
    pub fn new(camera: Camera, controller: Option<Box<dyn CameraController>>) -> Self {
        Self { camera, controller }
    }

    /// Replaces the controller, returning the previous one. `None` leaves the
    /// camera pose entirely to the host.
    pub fn set_controller(
        &mut self,
        controller: Option<Box<dyn CameraController>>,
    ) -> Option<Box<dyn CameraController>> {
        if let Some(c) = &controller {
            log::debug!("camera controller set to {}", c.name());
        }
        std::mem::replace(&mut self.controller, controller)
    }

    pub fn controller(&self) -> Option<&dyn CameraController> {
        self.controller.as_deref()
    }

    /// Downcasts the active controller.
    pub fn controller_as<T: CameraController>(&self) -> Option<&T> {
        self.controller.as_ref()?.as_any().downcast_ref::<T>()
    }

    pub fn controller_as_mut<T: CameraController>(&mut self) -> Option<&mut T> {
        self.controller.as_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Per-frame update: controller first, then the matrix cache.
    pub fn update(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.update(&mut self.camera);
        }
        self.camera.update_matrices();
    }

    pub fn mouse_press(&mut self, event: &MouseEvent) {
        if let Some(controller) = self.controller.as_mut() {
            controller.mouse_press(event, &mut self.camera);
        }
    }

    pub fn mouse_move(&mut self, event: &MouseEvent) {
        if let Some(controller) = self.controller.as_mut() {
            controller.mouse_move(event, &mut self.camera);
        }
    }

    pub fn mouse_release(&mut self, event: &MouseEvent) {
        if let Some(controller) = self.controller.as_mut() {
            controller.mouse_release(event, &mut self.camera);
        }
    }

    pub fn wheel(&mut self, event: &WheelEvent) {
        if let Some(controller) = self.controller.as_mut() {
            controller.wheel(event, &mut self.camera);
        }
    }

    pub fn key_press(&mut self, key: Key) {
        if let Some(controller) = self.controller.as_mut() {
            controller.key_press(key, &mut self.camera);
        }
    }
}

/// Wraps an angle in degrees into (-180, 180].
pub fn wrap_degrees(mut angle: f64) -> f64 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}
