//! # Free Handle
//!
//! A small cube at the pose origin. Dragging it moves the pose in the plane
//! facing the camera, fixed at press time.

use std::any::Any;

use cgmath::{InnerSpace, Vector3};

use super::handle::{handle_frame, move_pose, HandleState, HandleStyle, SharedGizmo};
use crate::gfx::geometry::line_plane_intersection_with_normal;
use crate::gfx::rendering::painter::{DrawMode, Painter3D};
use crate::gfx::scene::{EventContext, HoverEvent, RenderContext, SceneItem};
use crate::input::event::MouseEvent;

/// Cube side as a fraction of the gizmo scale.
pub const FREE_FRACTION: f64 = 0.15;

#[derive(Debug, Clone, Copy)]
struct ScreenDrag {
    /// Unit normal of the drag plane (towards the camera)
    normal: Vector3<f64>,

    /// Pose position minus the grabbed point
    offset: Vector3<f64>,
}

/// Screen-plane translation handle.
pub struct FreeHandle {
    gizmo: SharedGizmo,
    pub style: HandleStyle,
    state: HandleState,
    drag: Option<ScreenDrag>,
}

impl FreeHandle {
    pub(crate) fn new(gizmo: SharedGizmo, style: HandleStyle) -> Self {
        Self {
            gizmo,
            style,
            state: HandleState::default(),
            drag: None,
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }
}

fn grab_point(
    origin: Vector3<f64>,
    normal: Vector3<f64>,
    event: &MouseEvent,
    ctx: &EventContext,
) -> Option<Vector3<f64>> {
    let ray = ctx.cursor_ray(event.x, event.y)?;
    line_plane_intersection_with_normal(ray.origin, ray.second_point(), origin, normal)
}

impl SceneItem for FreeHandle {
    fn render_overlay(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        let side = frame.scale * FREE_FRACTION;
        painter.set_color(self.state.draw_color(&self.style));
        painter.draw_box(frame.position, frame.rotation, Vector3::new(side, side, side), DrawMode::Solid);
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
        let normal = -ctx.camera.view_direction().normalize();
        self.drag = grab_point(frame.position, normal, event, ctx).map(|p| ScreenDrag {
            normal,
            offset: frame.position - p,
        });
    }

    fn mouse_move(&mut self, event: &MouseEvent, ctx: &EventContext) {
        let Some(drag) = self.drag else {
            return;
        };
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        if let Some(p) = grab_point(frame.position, drag.normal, event, ctx) {
            move_pose(&self.gizmo, &frame.pose, p + drag.offset);
        }
    }

    fn mouse_release(&mut self, _event: &MouseEvent, _ctx: &EventContext) {
        self.state.dragging = false;
        self.drag = None;
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
    use crate::gfx::gizmos::handle::FREE_COLOR;
    use crate::gfx::gizmos::test_support::{bound_gizmo, camera_looking_down_z, mouse_at};
    use crate::gfx::rendering::depth::UniformDepth;
    use crate::gfx::scene::NodeId;

    #[test]
    fn test_drag_follows_cursor_in_screen_plane() {
        let fixture = bound_gizmo(Vector3::new(1.0, 0.0, 0.0));
        let camera = camera_looking_down_z(10.0);
        let depth = UniformDepth::default();
        let ctx = EventContext {
            camera: &camera,
            depth: &depth,
            node: NodeId::dangling(),
        };
        let style = HandleStyle::new(FREE_COLOR, &fixture.gizmo.borrow().config);
        let mut handle = FreeHandle::new(fixture.gizmo.clone(), style);

        let start = camera.project_2d(Vector3::new(1.02, 0.01, 0.0)).unwrap();
        handle.mouse_press(&mouse_at(start.x, start.y), &ctx);
        let target = camera.project_2d(Vector3::new(2.02, -0.99, 0.0)).unwrap();
        handle.mouse_move(&mouse_at(target.x, target.y), &ctx);

        let p = fixture.pose.position();
        assert!((p - Vector3::new(2.0, -1.0, 0.0)).magnitude() < 1e-6);

        handle.mouse_release(&mouse_at(target.x, target.y), &ctx);
        assert!(!handle.state().dragging);
    }
}
