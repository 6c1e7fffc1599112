use cgmath::{Vector3, Zero};

use super::handle::{GizmoState, SharedGizmo};
use super::translate_gizmo::GizmoConfig;
use crate::gfx::camera::{Camera, Perspective};
use crate::gfx::scene::{Pose, SharedPose};
use crate::input::event::{MouseButton, MouseEvent};

pub(crate) struct Fixture {
    pub pose: SharedPose,
    pub gizmo: SharedGizmo,
}

/// Fixed-scale gizmo state bound to a pose at `position`.
pub(crate) fn bound_gizmo(position: Vector3<f64>) -> Fixture {
    let pose = SharedPose::new(Pose::at(position));
    let gizmo = GizmoState::new_shared(GizmoConfig {
        auto_scale: false,
        ..GizmoConfig::default()
    });
    {
        let mut state = gizmo.borrow_mut();
        assert!(pose.claim(state.owner));
        state.pose = Some(pose.downgrade());
    }
    Fixture { pose, gizmo }
}

/// 640x480 camera on +Z looking at the origin.
pub(crate) fn camera_looking_down_z(distance: f64) -> Camera {
    let mut camera = Camera::new(Perspective::default(), 640, 480);
    camera.look_at(Vector3::new(0.0, 0.0, distance), Vector3::zero(), Vector3::unit_y());
    camera.update_matrices();
    camera
}

pub(crate) fn mouse_at(x: f64, y: f64) -> MouseEvent {
    MouseEvent {
        x,
        y,
        dx: 0.0,
        dy: 0.0,
        button: Some(MouseButton::Left),
    }
}
