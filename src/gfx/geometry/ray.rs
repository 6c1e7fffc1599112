use cgmath::{InnerSpace, Vector3};

/// A world-space ray, typically from the camera eye through the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f64>,
    /// Ray direction (normalized)
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a new ray. Returns `None` for a zero-length direction.
    pub fn new(origin: Vector3<f64>, direction: Vector3<f64>) -> Option<Self> {
        if direction.magnitude2() == 0.0 {
            return None;
        }
        Some(Self {
            origin,
            direction: direction.normalize(),
        })
    }

    /// Ray from `from` passing through `through`.
    pub fn through(from: Vector3<f64>, through: Vector3<f64>) -> Option<Self> {
        Self::new(from, through - from)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f64) -> Vector3<f64> {
        self.origin + self.direction * t
    }

    /// Second point defining the ray as a two-point line.
    pub fn second_point(&self) -> Vector3<f64> {
        self.point_at(1.0)
    }
}
