//! # Plane Handle
//!
//! Drags the pose within the plane spanned by two gizmo axes. Drawn as a
//! small square patch in the corner between the two axes, outlined on its
//! two outer edges and filled translucent while active.

use std::any::Any;

use cgmath::Vector3;

use super::handle::{handle_frame, move_pose, HandleFrame, HandleState, HandleStyle, SharedGizmo};
use crate::gfx::geometry::line_plane_intersection;
use crate::gfx::rendering::painter::Painter3D;
use crate::gfx::scene::{EventContext, HoverEvent, RenderContext, SceneItem};
use crate::input::event::MouseEvent;

/// Side of the patch as a fraction of the gizmo scale.
pub const PLANE_FRACTION: f64 = 0.2;

const ACTIVE_FILL_ALPHA: f32 = 0.4;
const OUTLINE_WIDTH: f32 = 2.0;

/// Which pair of axes a plane handle constrains motion to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneAxes {
    XY,
    YZ,
    ZX,
}

impl PlaneAxes {
    fn indices(self) -> (usize, usize) {
        match self {
            PlaneAxes::XY => (0, 1),
            PlaneAxes::YZ => (1, 2),
            PlaneAxes::ZX => (2, 0),
        }
    }
}

/// Pose origin, the two outer corners on each axis, and the far corner.
struct Patch {
    origin: Vector3<f64>,
    p1: Vector3<f64>,
    p2: Vector3<f64>,
    p3: Vector3<f64>,
}

fn patch(frame: &HandleFrame, plane: PlaneAxes) -> Patch {
    let (i, j) = plane.indices();
    let length = frame.scale * PLANE_FRACTION;
    let (a1, a2) = (frame.axes[i] * length, frame.axes[j] * length);
    Patch {
        origin: frame.position,
        p1: frame.position + a1,
        p2: frame.position + a2,
        p3: frame.position + a1 + a2,
    }
}

/// Two-axis translation handle.
pub struct PlaneHandle {
    gizmo: SharedGizmo,

    plane: PlaneAxes,

    pub style: HandleStyle,

    state: HandleState,

    /// Pose position minus the grabbed point on the plane, valid while
    /// dragging.
    capture_offset: Option<Vector3<f64>>,
}

impl PlaneHandle {
    pub(crate) fn new(gizmo: SharedGizmo, plane: PlaneAxes, style: HandleStyle) -> Self {
        Self {
            gizmo,
            plane,
            style,
            state: HandleState::default(),
            capture_offset: None,
        }
    }

    pub fn plane(&self) -> PlaneAxes {
        self.plane
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    fn grab_point(&self, patch: &Patch, event: &MouseEvent, ctx: &EventContext) -> Option<Vector3<f64>> {
        let ray = ctx.cursor_ray(event.x, event.y)?;
        let hit = line_plane_intersection(ray.origin, ray.second_point(), patch.p1, patch.p2, patch.p3);
        if hit.is_none() {
            log::warn!("cursor ray parallel to drag plane, sample skipped");
        }
        hit
    }
}

impl SceneItem for PlaneHandle {
    fn render_overlay(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        let patch = patch(&frame, self.plane);
        let mut color = self.state.draw_color(&self.style);

        painter.set_line_width(OUTLINE_WIDTH);
        painter.set_color(color);
        painter.draw_line(patch.p1, patch.p3);
        painter.draw_line(patch.p2, patch.p3);

        color[3] = if self.state.is_active() { ACTIVE_FILL_ALPHA } else { 0.0 };
        painter.set_color(color);
        painter.draw_polygon(&[patch.origin, patch.p1, patch.p3, patch.p2]);
    }

    fn hover_enter(&mut self, _event: &HoverEvent, _ctx: &EventContext) {
        self.state.hovered = true;
    }

    fn hover_leave(&mut self, _event: &HoverEvent, _ctx: &EventContext) {
        self.state.hovered = false;
    }

    fn mouse_press(&mut self, event: &MouseEvent, ctx: &EventContext) {
        self.state.dragging = true;
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        let patch = patch(&frame, self.plane);
        self.capture_offset = self.grab_point(&patch, event, ctx).map(|p| frame.position - p);
    }

    fn mouse_move(&mut self, event: &MouseEvent, ctx: &EventContext) {
        let Some(offset) = self.capture_offset else {
            return;
        };
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        let patch = patch(&frame, self.plane);
        if let Some(p) = self.grab_point(&patch, event, ctx) {
            move_pose(&self.gizmo, &frame.pose, p + offset);
        }
    }

    fn mouse_release(&mut self, _event: &MouseEvent, _ctx: &EventContext) {
        self.state.dragging = false;
        self.capture_offset = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
