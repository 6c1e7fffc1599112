//! # Painter Interfaces
//!
//! The drawing-primitive collaborator. Scene items and gizmos describe
//! themselves only through these calls; a backend (immediate-mode GL, a wgpu
//! batcher, or the hit-test pass) decides what the calls mean.
//!
//! Three painters exist, one per coordinate convention:
//!
//! - [`Painter3D`] - world space, used by the scene and overlay layers
//! - [`Painter2D`] - window pixels with Y measured from the top
//! - [`TextPainter`] - window pixels, text only

use cgmath::{Matrix3, Matrix4, SquareMatrix, Vector2, Vector3};

use crate::gfx::scene::light::Light;

/// RGBA colour, components in 0.0-1.0.
pub type Color = [f32; 4];

/// Solid or wireframe drawing of closed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Solid,
    Wire,
}

/// One of the per-frame rendering passes.
///
/// The scene layer draws with depth testing against itself; the overlay layer
/// starts from a cleared depth buffer so it always lands in front of the
/// scene; screen and text layers are flat 2D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Scene,
    Overlay,
    Screen,
    Text,
}

impl Layer {
    /// Hit-test precedence: the first layer producing hits wins.
    pub const PICK_ORDER: [Layer; 3] = [Layer::Screen, Layer::Overlay, Layer::Scene];

    /// Draw order within a frame.
    pub const RENDER_ORDER: [Layer; 4] = [Layer::Scene, Layer::Overlay, Layer::Screen, Layer::Text];
}

/// World-space drawing primitives.
pub trait Painter3D {
    /// Called before the first primitive of each layer.
    fn begin_layer(&mut self, _layer: Layer) {}

    /// Called once per enabled light at the start of the scene layer.
    fn apply_light(&mut self, _light: &Light) {}

    fn set_color(&mut self, color: Color);

    fn set_line_width(&mut self, _width: f32) {}

    fn set_lighting(&mut self, _enabled: bool) {}

    fn draw_line(&mut self, a: Vector3<f64>, b: Vector3<f64>);

    fn draw_line_strip(&mut self, points: &[Vector3<f64>]) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1]);
        }
    }

    fn draw_line_loop(&mut self, points: &[Vector3<f64>]) {
        self.draw_line_strip(points);
        if points.len() > 2 {
            self.draw_line(points[points.len() - 1], points[0]);
        }
    }

    /// Box of edge lengths `sides` centred at `center`.
    fn draw_box(&mut self, center: Vector3<f64>, rotation: Matrix3<f64>, sides: Vector3<f64>, mode: DrawMode);

    /// Cone with its base disk centred at `base` and apex `length` along the
    /// rotated +Z axis.
    fn draw_cone(&mut self, base: Vector3<f64>, rotation: Matrix3<f64>, length: f64, radius: f64);

    /// Filled convex polygon.
    fn draw_polygon(&mut self, points: &[Vector3<f64>]);

    fn push_matrix(&mut self);

    fn pop_matrix(&mut self);

    fn translate(&mut self, offset: Vector3<f64>);

    fn rotate(&mut self, rotation: Matrix3<f64>);
}

/// Screen-space drawing primitives. Coordinates are window pixels with the
/// origin at the top-left corner.
pub trait Painter2D {
    fn begin_layer(&mut self, _layer: Layer) {}

    fn set_color(&mut self, color: Color);

    fn set_line_width(&mut self, _width: f32) {}

    fn draw_line(&mut self, a: Vector2<f64>, b: Vector2<f64>);

    fn draw_line_strip(&mut self, points: &[Vector2<f64>]) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1]);
        }
    }

    fn draw_line_loop(&mut self, points: &[Vector2<f64>]) {
        self.draw_line_strip(points);
        if points.len() > 2 {
            self.draw_line(points[points.len() - 1], points[0]);
        }
    }

    /// Axis-aligned rectangle between two corners.
    fn draw_rect(&mut self, min: Vector2<f64>, max: Vector2<f64>, mode: DrawMode);

    /// Filled convex polygon.
    fn draw_polygon(&mut self, points: &[Vector2<f64>]);

    fn push_matrix(&mut self);

    fn pop_matrix(&mut self);

    fn translate(&mut self, offset: Vector2<f64>);
}

/// Advance of one glyph of the fixed-width text font, in pixels.
pub const GLYPH_WIDTH: f64 = 8.0;

/// Height of the text font above the baseline, in pixels.
pub const GLYPH_HEIGHT: f64 = 13.0;

/// Screen rectangle covered by `text` drawn at `position`, as `(min, max)`.
/// `None` for empty text.
pub fn text_bounds(position: Vector2<f64>, text: &str) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let glyphs = text.chars().count();
    if glyphs == 0 {
        return None;
    }
    Some((
        Vector2::new(position.x, position.y - GLYPH_HEIGHT),
        Vector2::new(position.x + glyphs as f64 * GLYPH_WIDTH, position.y),
    ))
}

/// Text output in window pixels (origin top-left). `position` is the left
/// end of the baseline.
pub trait TextPainter {
    fn begin_layer(&mut self, _layer: Layer) {}

    fn set_text_color(&mut self, color: Color);

    fn draw_text(&mut self, position: Vector2<f64>, text: &str);
}

/// Matrix stack shared by painters that need to resolve transforms on the CPU.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Matrix4<f64>>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }

    /// The current model transform.
    pub fn top(&self) -> Matrix4<f64> {
        self.stack.last().copied().unwrap_or_else(Matrix4::identity)
    }

    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Pops one level; the bottom identity entry is never removed.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn multiply(&mut self, m: Matrix4<f64>) {
        if let Some(top) = self.stack.last_mut() {
            *top = *top * m;
        }
    }

    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.multiply(Matrix4::from_translation(offset));
    }

    pub fn rotate(&mut self, rotation: Matrix3<f64>) {
        self.multiply(Matrix4::from(rotation));
    }

    /// Applies the current transform to a point.
    pub fn apply(&self, p: Vector3<f64>) -> Vector3<f64> {
        (self.top() * p.extend(1.0)).truncate()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, InnerSpace};

    #[test]
    fn test_transform_stack_push_pop() {
        let mut stack = TransformStack::new();
        stack.push();
        stack.translate(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(stack.apply(Vector3::new(0.0, 0.0, 0.0)), Vector3::new(1.0, 2.0, 3.0));
        stack.pop();
        assert_eq!(stack.apply(Vector3::new(0.0, 0.0, 0.0)), Vector3::new(0.0, 0.0, 0.0));

        // Popping past the bottom keeps the identity.
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_text_bounds_sit_on_the_baseline() {
        let (min, max) = text_bounds(Vector2::new(10.0, 40.0), "abc").unwrap();
        assert_eq!(min, Vector2::new(10.0, 27.0));
        assert_eq!(max, Vector2::new(34.0, 40.0));
        assert!(text_bounds(Vector2::new(10.0, 40.0), "").is_none());
    }

    #[test]
    fn test_transform_stack_composes_in_order() {
        let mut stack = TransformStack::new();
        stack.translate(Vector3::new(1.0, 0.0, 0.0));
        stack.rotate(Matrix3::from_angle_z(Deg(90.0)));
        let p = stack.apply(Vector3::new(1.0, 0.0, 0.0));
        assert!((p - Vector3::new(1.0, 1.0, 0.0)).magnitude() < 1e-12);
    }
}
