//! Recording painters.
//!
//! [`DrawList`] and [`ScreenDrawList`] capture a frame as plain commands so a
//! GPU backend can replay them after the scene traversal, and so tests can
//! inspect exactly what an item drew.

use cgmath::{Matrix3, Vector2, Vector3};

use super::painter::{Color, DrawMode, Layer, Painter2D, Painter3D, TextPainter};
use crate::gfx::scene::light::Light;

/// A recorded world-space drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginLayer(Layer),
    Light(Light),
    Color(Color),
    LineWidth(f32),
    Lighting(bool),
    Line(Vector3<f64>, Vector3<f64>),
    Box {
        center: Vector3<f64>,
        rotation: Matrix3<f64>,
        sides: Vector3<f64>,
        mode: DrawMode,
    },
    Cone {
        base: Vector3<f64>,
        rotation: Matrix3<f64>,
        length: f64,
        radius: f64,
    },
    Polygon(Vec<Vector3<f64>>),
    PushMatrix,
    PopMatrix,
    Translate(Vector3<f64>),
    Rotate(Matrix3<f64>),
}

/// A recorded screen-space or text command.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenCommand {
    BeginLayer(Layer),
    Color(Color),
    LineWidth(f32),
    Line(Vector2<f64>, Vector2<f64>),
    Rect {
        min: Vector2<f64>,
        max: Vector2<f64>,
        mode: DrawMode,
    },
    Polygon(Vec<Vector2<f64>>),
    PushMatrix,
    PopMatrix,
    Translate(Vector2<f64>),
    Text {
        position: Vector2<f64>,
        text: String,
    },
}

/// Records world-space commands.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded between the start of `layer` and the next layer.
    pub fn layer(&self, layer: Layer) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .position(|c| *c == DrawCommand::BeginLayer(layer))
            .map(|i| i + 1);
        let Some(start) = start else {
            return &[];
        };
        let end = self.commands[start..]
            .iter()
            .position(|c| matches!(c, DrawCommand::BeginLayer(_)))
            .map_or(self.commands.len(), |i| start + i);
        &self.commands[start..end]
    }
}

impl Painter3D for DrawList {
    fn begin_layer(&mut self, layer: Layer) {
        self.commands.push(DrawCommand::BeginLayer(layer));
    }

    fn apply_light(&mut self, light: &Light) {
        self.commands.push(DrawCommand::Light(light.clone()));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::Color(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::Lighting(enabled));
    }

    fn draw_line(&mut self, a: Vector3<f64>, b: Vector3<f64>) {
        self.commands.push(DrawCommand::Line(a, b));
    }

    fn draw_box(&mut self, center: Vector3<f64>, rotation: Matrix3<f64>, sides: Vector3<f64>, mode: DrawMode) {
        self.commands.push(DrawCommand::Box {
            center,
            rotation,
            sides,
            mode,
        });
    }

    fn draw_cone(&mut self, base: Vector3<f64>, rotation: Matrix3<f64>, length: f64, radius: f64) {
        self.commands.push(DrawCommand::Cone {
            base,
            rotation,
            length,
            radius,
        });
    }

    fn draw_polygon(&mut self, points: &[Vector3<f64>]) {
        self.commands.push(DrawCommand::Polygon(points.to_vec()));
    }

    fn push_matrix(&mut self) {
        self.commands.push(DrawCommand::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.commands.push(DrawCommand::PopMatrix);
    }

    fn translate(&mut self, offset: Vector3<f64>) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, rotation: Matrix3<f64>) {
        self.commands.push(DrawCommand::Rotate(rotation));
    }
}

/// Records screen-space and text commands.
#[derive(Debug, Clone, Default)]
pub struct ScreenDrawList {
    commands: Vec<ScreenCommand>,
}

impl ScreenDrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ScreenCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ScreenCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Painter2D for ScreenDrawList {
    fn begin_layer(&mut self, layer: Layer) {
        self.commands.push(ScreenCommand::BeginLayer(layer));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(ScreenCommand::Color(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(ScreenCommand::LineWidth(width));
    }

    fn draw_line(&mut self, a: Vector2<f64>, b: Vector2<f64>) {
        self.commands.push(ScreenCommand::Line(a, b));
    }

    fn draw_rect(&mut self, min: Vector2<f64>, max: Vector2<f64>, mode: DrawMode) {
        self.commands.push(ScreenCommand::Rect { min, max, mode });
    }

    fn draw_polygon(&mut self, points: &[Vector2<f64>]) {
        self.commands.push(ScreenCommand::Polygon(points.to_vec()));
    }

    fn push_matrix(&mut self) {
        self.commands.push(ScreenCommand::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.commands.push(ScreenCommand::PopMatrix);
    }

    fn translate(&mut self, offset: Vector2<f64>) {
        self.commands.push(ScreenCommand::Translate(offset));
    }
}

impl TextPainter for ScreenDrawList {
    fn begin_layer(&mut self, layer: Layer) {
        self.commands.push(ScreenCommand::BeginLayer(layer));
    }

    fn set_text_color(&mut self, color: Color) {
        self.commands.push(ScreenCommand::Color(color));
    }

    fn draw_text(&mut self, position: Vector2<f64>, text: &str) {
        self.commands.push(ScreenCommand::Text {
            position,
            text: text.to_string(),
        });
    }
}
