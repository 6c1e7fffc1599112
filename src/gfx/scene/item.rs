//! # Scene Items
//!
//! A [`SceneItem`] is the behaviour attached to a scene node: how it draws in
//! each layer, how it draws for hit-testing, and how it reacts to pointer
//! events routed to it by the view.

use std::any::Any;

use cgmath::Vector3;

use super::graph::NodeId;
use crate::gfx::camera::Camera;
use crate::gfx::geometry::Ray;
use crate::gfx::rendering::depth::DepthBuffer;
use crate::gfx::rendering::painter::{Painter2D, Painter3D, TextPainter};
use crate::input::event::MouseEvent;

/// Per-node state available while drawing.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub camera: &'a Camera,
    /// The node being drawn.
    pub node: NodeId,
}

impl<'a> RenderContext<'a> {
    pub fn view_width(&self) -> u32 {
        self.camera.width()
    }

    pub fn view_height(&self) -> u32 {
        self.camera.height()
    }
}

/// Per-node state available while handling an event.
#[derive(Clone, Copy)]
pub struct EventContext<'a> {
    pub camera: &'a Camera,
    /// Depth left by the most recent render.
    pub depth: &'a dyn DepthBuffer,
    /// The node receiving the event.
    pub node: NodeId,
}

impl<'a> EventContext<'a> {
    /// World point under a window position (Y from the top).
    pub fn cursor_world(&self, x: f64, y: f64) -> Option<Vector3<f64>> {
        self.camera.unproject_2d(x, y, self.depth)
    }

    /// Ray from the camera eye through a window position (Y from the top).
    pub fn cursor_ray(&self, x: f64, y: f64) -> Option<Ray> {
        let eye = self.camera.position();
        self.cursor_world(x, y)
            .and_then(|p| Ray::through(eye, p))
            .or_else(|| {
                // depth at the eye: fall back to the far plane
                let far = self
                    .camera
                    .unproject_at_depth(x, self.camera.height() as f64 - y, 1.0)?;
                Ray::through(eye, far)
            })
    }
}

/// Cursor position for hover notifications, window pixels (Y from the top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverEvent {
    pub x: f64,
    pub y: f64,
}

/// Cursor position of the click that changed the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectEvent {
    pub x: f64,
    pub y: f64,
}

/// Behaviour of a scene node.
///
/// All methods have empty defaults, so an item only implements what it
/// needs. The `pick_*` methods default to the matching `render_*` method:
/// an item that draws itself is pickable without further work. Items whose
/// visible shape is too thin to hit (lines, outlines) should override the
/// picking variant with a fatter invisible volume.
///
/// ## Examples
///
/// ```
/// use std::any::Any;
/// use cgmath::{Matrix3, SquareMatrix, Vector3};
/// use tgizmo::gfx::rendering::{DrawMode, Painter3D};
/// use tgizmo::gfx::scene::{RenderContext, SceneItem};
///
/// struct Crate;
///
/// impl SceneItem for Crate {
///     fn render_scene(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
///         painter.set_color([0.6, 0.4, 0.2, 1.0]);
///         painter.draw_box(
///             Vector3::new(0.0, 0.0, 0.0),
///             Matrix3::identity(),
///             Vector3::new(1.0, 1.0, 1.0),
///             DrawMode::Solid,
///         );
///     }
///
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait SceneItem: Any {
    /// Called once per frame before any layer is drawn or picked.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Camera with this frame's cached matrices
    fn update_frame(&mut self, _ctx: &RenderContext) {}

    /// Draw into the opaque 3D scene layer.
    fn render_scene(&self, _painter: &mut dyn Painter3D, _ctx: &RenderContext) {}

    /// Draw into the 3D overlay layer, which is drawn after a depth clear and
    /// therefore always lands in front of the scene.
    fn render_overlay(&self, _painter: &mut dyn Painter3D, _ctx: &RenderContext) {}

    /// Draw into the 2D screen layer (window pixels, Y from the top).
    fn render_2d(&self, _painter: &mut dyn Painter2D, _ctx: &RenderContext) {}

    /// Draw into the text layer.
    fn render_text(&self, _painter: &mut dyn TextPainter, _ctx: &RenderContext) {}

    fn pick_scene(&self, painter: &mut dyn Painter3D, ctx: &RenderContext) {
        self.render_scene(painter, ctx);
    }

    fn pick_overlay(&self, painter: &mut dyn Painter3D, ctx: &RenderContext) {
        self.render_overlay(painter, ctx);
    }

    fn pick_2d(&self, painter: &mut dyn Painter2D, ctx: &RenderContext) {
        self.render_2d(painter, ctx);
    }

    /// Text counts towards the screen layer when picking.
    fn pick_text(&self, painter: &mut dyn TextPainter, ctx: &RenderContext) {
        self.render_text(painter, ctx);
    }

    /// The cursor moved onto this item.
    fn hover_enter(&mut self, _event: &HoverEvent, _ctx: &EventContext) {}

    /// The cursor left this item.
    fn hover_leave(&mut self, _event: &HoverEvent, _ctx: &EventContext) {}

    /// The cursor moved while staying over this item.
    fn hover_move(&mut self, _event: &HoverEvent, _ctx: &EventContext) {}

    /// Left press on this item. The item holds the capture until the left
    /// button is released.
    fn mouse_press(&mut self, _event: &MouseEvent, _ctx: &EventContext) {}

    /// Move while this item holds the capture.
    fn mouse_move(&mut self, _event: &MouseEvent, _ctx: &EventContext) {}

    /// Release ending the capture.
    fn mouse_release(&mut self, _event: &MouseEvent, _ctx: &EventContext) {}

    /// This item became the selection.
    fn select_enter(&mut self, _event: &SelectEvent, _ctx: &EventContext) {}

    /// This item stopped being the selection.
    fn select_leave(&mut self, _event: &SelectEvent, _ctx: &EventContext) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// An item that draws nothing; used for grouping nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Group;

impl SceneItem for Group {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
