//! # Axis Handle
//!
//! Drags the pose along one axis. Drawn as a white stem from the pose
//! position with a coloured arrow cone at the end; only the cone is
//! pickable.

use std::any::Any;

use cgmath::Vector3;

use super::handle::{handle_frame, move_pose, HandleFrame, HandleState, HandleStyle, SharedGizmo};
use crate::gfx::geometry::{line_line_intersection, rotation_z_to};
use crate::gfx::rendering::painter::Painter3D;
use crate::gfx::scene::{EventContext, HoverEvent, RenderContext, SceneItem};
use crate::input::event::MouseEvent;

/// Fraction of the handle length taken by the arrow cone.
pub const CAP_FRACTION: f64 = 0.2;

const STEM_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const STEM_WIDTH: f32 = 2.0;

struct Arrow {
    cap: Vector3<f64>,
    axis: Vector3<f64>,
    length: f64,
    radius: f64,
}

fn arrow(frame: &HandleFrame, axis_index: usize) -> Arrow {
    let axis = frame.axes[axis_index];
    let length = frame.scale * CAP_FRACTION;
    Arrow {
        cap: frame.position + axis * (frame.scale * (1.0 - CAP_FRACTION)),
        axis,
        length,
        radius: length * 0.3,
    }
}

/// One-axis translation handle.
pub struct AxisHandle {
    gizmo: SharedGizmo,

    /// 0, 1 or 2 for X, Y or Z
    axis_index: usize,

    pub style: HandleStyle,

    state: HandleState,

    /// Offset from the grabbed point on the axis to the cap centre, valid
    /// while dragging.
    capture_offset: Option<Vector3<f64>>,
}

impl AxisHandle {
    pub(crate) fn new(gizmo: SharedGizmo, axis_index: usize, style: HandleStyle) -> Self {
        Self {
            gizmo,
            axis_index,
            style,
            state: HandleState::default(),
            capture_offset: None,
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Point on the handle's axis nearest to the cursor ray.
    fn grab_point(&self, frame: &HandleFrame, cap: Vector3<f64>, event: &MouseEvent, ctx: &EventContext) -> Option<Vector3<f64>> {
        let ray = ctx.cursor_ray(event.x, event.y)?;
        let hit = line_line_intersection(frame.position, cap, ray.origin, ray.second_point());
        if hit.is_none() {
            log::warn!("cursor ray parallel to drag axis, sample skipped");
        }
        hit.map(|h| h.on_first)
    }

    fn draw_cone(&self, painter: &mut dyn Painter3D, arrow: &Arrow) {
        painter.draw_cone(arrow.cap, rotation_z_to(arrow.axis), arrow.length, arrow.radius);
    }
}

impl SceneItem for AxisHandle {
    fn render_overlay(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        let arrow = arrow(&frame, self.axis_index);

        painter.set_color(STEM_COLOR);
        painter.set_line_width(STEM_WIDTH);
        painter.draw_line(frame.position, arrow.cap);

        let active = self.state.is_active();
        if active {
            painter.set_lighting(false);
        }
        painter.set_color(self.state.draw_color(&self.style));
        self.draw_cone(painter, &arrow);
        if active {
            painter.set_lighting(true);
        }
    }

    fn pick_overlay(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        if let Some(frame) = handle_frame(&self.gizmo) {
            self.draw_cone(painter, &arrow(&frame, self.axis_index));
        }
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
        let cap = arrow(&frame, self.axis_index).cap;
        self.capture_offset = self.grab_point(&frame, cap, event, ctx).map(|p| cap - p);
    }

    fn mouse_move(&mut self, event: &MouseEvent, ctx: &EventContext) {
        let Some(offset) = self.capture_offset else {
            return;
        };
        let Some(frame) = handle_frame(&self.gizmo) else {
            return;
        };
        let cap = arrow(&frame, self.axis_index).cap;
        let Some(p) = self.grab_point(&frame, cap, event, ctx) else {
            return;
        };
        let position = frame.position + (p - cap) + offset;
        move_pose(&self.gizmo, &frame.pose, position);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::gizmos::test_support::{bound_gizmo, camera_looking_down_z, mouse_at, Fixture};
    use crate::gfx::rendering::draw_list::{DrawCommand, DrawList};
    use crate::gfx::rendering::painter::Layer;
    use crate::gfx::scene::NodeId;
    use crate::gfx::rendering::depth::UniformDepth;
    use cgmath::InnerSpace;

    fn x_handle(fixture: &Fixture) -> AxisHandle {
        AxisHandle::new(
            fixture.gizmo.clone(),
            0,
            HandleStyle::new([1.0, 0.0, 0.0, 1.0], &fixture.gizmo.borrow().config),
        )
    }

    #[test]
    fn test_drag_along_x_keeps_y_and_z() {
        let fixture = bound_gizmo(Vector3::new(0.0, 0.0, 0.0));
        let camera = camera_looking_down_z(10.0);
        let depth = UniformDepth::default();
        let ctx = EventContext {
            camera: &camera,
            depth: &depth,
            node: NodeId::dangling(),
        };
        let mut handle = x_handle(&fixture);

        let tip = camera.project_2d(Vector3::new(0.8, 0.0, 0.0)).unwrap();
        handle.mouse_press(&mouse_at(tip.x, tip.y), &ctx);
        assert!(handle.state().dragging);
        handle.mouse_move(&mouse_at(tip.x + 10.0, tip.y), &ctx);

        let p = fixture.pose.position();
        assert!(p.x > 0.0);
        assert!(p.y.abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);

        handle.mouse_release(&mouse_at(tip.x + 10.0, tip.y), &ctx);
        assert!(!handle.state().dragging);
    }

    #[test]
    fn test_first_move_does_not_jump() {
        let fixture = bound_gizmo(Vector3::new(0.0, 0.0, 0.0));
        let camera = camera_looking_down_z(10.0);
        let depth = UniformDepth::default();
        let ctx = EventContext {
            camera: &camera,
            depth: &depth,
            node: NodeId::dangling(),
        };
        let mut handle = x_handle(&fixture);

        // grab near the apex, well away from the cap centre
        let grab = camera.project_2d(Vector3::new(0.95, 0.0, 0.0)).unwrap();
        handle.mouse_press(&mouse_at(grab.x, grab.y), &ctx);
        handle.mouse_move(&mouse_at(grab.x, grab.y), &ctx);
        assert!(fixture.pose.position().magnitude() < 1e-9);

        handle.mouse_move(&mouse_at(grab.x + 1.0, grab.y), &ctx);
        let moved = fixture.pose.position().magnitude();
        assert!(moved > 0.0);
        assert!(moved < 0.05);
    }

    #[test]
    fn test_unbound_handle_draws_nothing_and_ignores_drags() {
        let fixture = bound_gizmo(Vector3::new(0.0, 0.0, 0.0));
        fixture.gizmo.borrow_mut().pose = None;
        let camera = camera_looking_down_z(10.0);
        let depth = UniformDepth::default();
        let mut handle = x_handle(&fixture);
        let ctx = EventContext {
            camera: &camera,
            depth: &depth,
            node: NodeId::dangling(),
        };
        handle.mouse_press(&mouse_at(400.0, 240.0), &ctx);
        handle.mouse_move(&mouse_at(410.0, 240.0), &ctx);
        assert_eq!(fixture.pose.position(), Vector3::new(0.0, 0.0, 0.0));

        let mut list = DrawList::new();
        list.begin_layer(Layer::Overlay);
        handle.render_overlay(&mut list, &RenderContext { camera: &camera, node: NodeId::dangling() });
        assert!(list.layer(Layer::Overlay).is_empty());
    }

    #[test]
    fn test_hover_switches_cone_color() {
        let fixture = bound_gizmo(Vector3::new(0.0, 0.0, 0.0));
        let camera = camera_looking_down_z(10.0);
        let depth = UniformDepth::default();
        let mut handle = x_handle(&fixture);
        let ctx = EventContext {
            camera: &camera,
            depth: &depth,
            node: NodeId::dangling(),
        };
        handle.hover_enter(&HoverEvent { x: 0.0, y: 0.0 }, &ctx);

        let mut list = DrawList::new();
        handle.render_overlay(&mut list, &RenderContext { camera: &camera, node: NodeId::dangling() });
        let colors: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Color(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![STEM_COLOR, handle.style.hover_color]);
    }
}
