// src/gfx/rendering/mod.rs
//! Rendering collaborator interfaces
//!
//! The toolkit never touches GPU state. Items draw through the painter traits,
//! the hit-test pass implements the same traits, and the host's backend reads
//! depth back through [`DepthBuffer`].

pub mod depth;
pub mod draw_list;
pub mod painter;

// Re-export main types
pub use depth::{DepthBuffer, DepthImage, UniformDepth};
pub use draw_list::{DrawCommand, DrawList, ScreenCommand, ScreenDrawList};
pub use painter::{
    text_bounds, Color, DrawMode, Layer, Painter2D, Painter3D, TextPainter, TransformStack, GLYPH_HEIGHT,
    GLYPH_WIDTH,
};
