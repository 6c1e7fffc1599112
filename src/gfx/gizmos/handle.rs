//! # Shared Handle State
//!
//! Everything the sub-handles of one gizmo have in common: the bound pose,
//! the current visual scale, the configuration and the position-changed
//! signal. Each handle holds an `Rc` to the same [`GizmoState`].

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::{Matrix3, SquareMatrix, Vector3};

use super::translate_gizmo::{GizmoConfig, GizmoSpace};
use crate::gfx::rendering::painter::Color;
use crate::gfx::scene::{SharedPose, WeakPose};
use crate::observer::Signal;

/// Highlight for a handle under the cursor.
pub const HOVER_COLOR: Color = [0.0, 0.8, 1.0, 1.0];

pub const X_COLOR: Color = [1.0, 0.0, 0.0, 1.0];
pub const Y_COLOR: Color = [0.0, 1.0, 0.0, 1.0];
pub const Z_COLOR: Color = [0.0, 0.0, 1.0, 1.0];
pub const PLANE_COLOR: Color = [1.0, 1.0, 0.0, 1.0];
pub const FREE_COLOR: Color = [1.0, 1.0, 0.0, 1.0];

/// Colours of one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleStyle {
    /// Idle colour
    pub color: Color,

    /// Colour while the cursor is over the handle
    pub hover_color: Color,

    /// Colour while the handle is being dragged
    pub drag_color: Color,
}

impl HandleStyle {
    pub fn new(color: Color, config: &GizmoConfig) -> Self {
        Self {
            color,
            hover_color: config.hover_color,
            drag_color: config.drag_color,
        }
    }
}

/// Hover and drag flags, each set and cleared only by its own events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleState {
    pub hovered: bool,
    pub dragging: bool,
}

impl HandleState {
    pub fn is_active(&self) -> bool {
        self.hovered || self.dragging
    }

    pub fn draw_color(&self, style: &HandleStyle) -> Color {
        if self.dragging {
            style.drag_color
        } else if self.hovered {
            style.hover_color
        } else {
            style.color
        }
    }
}

/// State shared by a gizmo and all of its handles.
pub struct GizmoState {
    /// The pose being manipulated; never keeps it alive
    pub(crate) pose: Option<WeakPose>,

    /// Identity used to claim poses
    pub(crate) owner: usize,

    /// Visual scale, recomputed each frame when auto-scaling
    pub(crate) scale: f64,

    pub(crate) config: GizmoConfig,

    /// Fired with the new position after every drag update
    pub(crate) position_changed: Rc<Signal<Vector3<f64>>>,
}

pub(crate) type SharedGizmo = Rc<RefCell<GizmoState>>;

impl GizmoState {
    pub(crate) fn new_shared(config: GizmoConfig) -> SharedGizmo {
        let state = Rc::new(RefCell::new(GizmoState {
            pose: None,
            owner: 0,
            scale: config.base_scale,
            config,
            position_changed: Rc::new(Signal::new()),
        }));
        state.borrow_mut().owner = Rc::as_ptr(&state) as *const () as usize;
        state
    }

    /// The bound pose, if bound and still alive.
    pub(crate) fn pose(&self) -> Option<SharedPose> {
        self.pose.as_ref()?.upgrade()
    }

    /// World-space directions of the gizmo's X, Y and Z handles.
    pub(crate) fn axes(&self, attitude: Matrix3<f64>) -> [Vector3<f64>; 3] {
        let basis = match self.config.space {
            GizmoSpace::World => Matrix3::identity(),
            GizmoSpace::Local => attitude,
        };
        [basis.x, basis.y, basis.z]
    }

    /// Orientation used to draw boxes.
    pub(crate) fn frame(&self, attitude: Matrix3<f64>) -> Matrix3<f64> {
        match self.config.space {
            GizmoSpace::World => Matrix3::identity(),
            GizmoSpace::Local => attitude,
        }
    }
}

impl Drop for GizmoState {
    fn drop(&mut self) {
        if let Some(pose) = self.pose() {
            pose.release(self.owner);
        }
    }
}

/// Snapshot of what a handle needs to draw or drag, taken without holding a
/// borrow on the shared state.
#[derive(Debug, Clone)]
pub(crate) struct HandleFrame {
    pub pose: SharedPose,
    pub position: Vector3<f64>,
    pub axes: [Vector3<f64>; 3],
    pub rotation: Matrix3<f64>,
    pub scale: f64,
}

pub(crate) fn handle_frame(gizmo: &SharedGizmo) -> Option<HandleFrame> {
    let state = gizmo.borrow();
    let pose = state.pose()?;
    let current = pose.get();
    Some(HandleFrame {
        position: current.position,
        axes: state.axes(current.attitude),
        rotation: state.frame(current.attitude),
        scale: state.scale,
        pose,
    })
}

/// Moves the pose and notifies observers once the new position is stored.
pub(crate) fn move_pose(gizmo: &SharedGizmo, pose: &SharedPose, position: Vector3<f64>) {
    pose.set_position(position);
    let signal = gizmo.borrow().position_changed.clone();
    signal.emit(&position);
}
