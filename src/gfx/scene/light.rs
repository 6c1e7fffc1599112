use cgmath::Vector3;

use crate::gfx::rendering::painter::Color;

/// A positional light handed to the 3D painter at the start of each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Backend light slot.
    pub index: usize,
    pub position: Vector3<f64>,
    pub enabled: bool,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Light {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            position: Vector3::new(100.0, 100.0, 150.0),
            enabled: true,
            ambient: [0.5, 0.5, 0.5, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_position(mut self, position: Vector3<f64>) -> Self {
        self.position = position;
        self
    }
}

/// The two lights a fresh view starts with.
pub fn default_lights() -> Vec<Light> {
    vec![
        Light::new(0).with_position(Vector3::new(100.0, 100.0, 200.0)),
        Light::new(1).with_position(Vector3::new(100.0, -100.0, 200.0)),
    ]
}
