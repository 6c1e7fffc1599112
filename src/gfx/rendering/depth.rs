//! Depth-buffer read-back.
//!
//! Unprojecting a cursor position needs the depth the last render left under
//! that pixel. The rendering backend exposes it through [`DepthBuffer`]; the
//! value is only meaningful until the next clear.

/// Read access to the window depth buffer of the most recent frame.
///
/// Coordinates follow the 3D convention: `y` counts from the bottom row.
pub trait DepthBuffer {
    /// Normalized window depth (0.0 near, 1.0 far) at a pixel, or `None`
    /// outside the buffer.
    fn read_depth(&self, x: i32, y: i32) -> Option<f32>;
}

/// A depth buffer holding the same value everywhere.
///
/// The default `1.0` (far plane) is what a cleared buffer reads as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformDepth(pub f32);

impl Default for UniformDepth {
    fn default() -> Self {
        Self(1.0)
    }
}

impl DepthBuffer for UniformDepth {
    fn read_depth(&self, _x: i32, _y: i32) -> Option<f32> {
        Some(self.0)
    }
}

/// A read-back copy of a depth attachment, rows stored bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DepthImage {
    /// Wraps `data`; returns `None` if its length is not `width * height`.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self { width, height, data })
    }

    /// A cleared image (every texel at the far plane).
    pub fn cleared(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![1.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32, depth: f32) {
        if x < self.width && y < self.height {
            let i = y as usize * self.width as usize + x as usize;
            self.data[i] = depth;
        }
    }
}

impl DepthBuffer for DepthImage {
    fn read_depth(&self, x: i32, y: i32) -> Option<f32> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.data.get(y as usize * self.width as usize + x as usize).copied()
    }
}
