//! # Primitive Shape Tessellation
//!
//! Breaks the drawing primitives of the painter interface into convex faces so
//! the hit-test pass can clip them against the pick window. Faces are returned
//! in world space (or whatever space the inputs are in).

use cgmath::{Basis3, InnerSpace, Matrix3, Rad, Rotation, SquareMatrix, Vector3};
use std::f64::consts::PI;

/// Number of segments used for cone tessellation.
pub const CONE_SEGMENTS: usize = 16;

/// A convex planar polygon.
pub type Face = Vec<Vector3<f64>>;

/// Corner signs of a unit box, indexed by the quads below.
const BOX_CORNERS: [[f64; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Quads of the unit box (counter-clockwise seen from outside).
const BOX_QUADS: [[usize; 4]; 6] = [
    [4, 5, 6, 7], // +Z
    [1, 0, 3, 2], // -Z
    [0, 4, 7, 3], // -X
    [5, 1, 2, 6], // +X
    [7, 6, 2, 3], // +Y
    [0, 1, 5, 4], // -Y
];

/// World-space corners of an oriented box.
pub fn box_corners(center: Vector3<f64>, rotation: Matrix3<f64>, sides: Vector3<f64>) -> [Vector3<f64>; 8] {
    BOX_CORNERS.map(|c| center + rotation * Vector3::new(c[0] * sides.x, c[1] * sides.y, c[2] * sides.z))
}

/// The six faces of an oriented box.
pub fn box_faces(center: Vector3<f64>, rotation: Matrix3<f64>, sides: Vector3<f64>) -> Vec<Face> {
    let corners = box_corners(center, rotation, sides);
    BOX_QUADS
        .iter()
        .map(|quad| quad.iter().map(|&i| corners[i]).collect())
        .collect()
}

/// The twelve edges of an oriented box, for wire drawing.
pub fn box_edges(center: Vector3<f64>, rotation: Matrix3<f64>, sides: Vector3<f64>) -> Vec<[Vector3<f64>; 2]> {
    let c = box_corners(center, rotation, sides);
    let pairs = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    pairs.iter().map(|&(a, b)| [c[a], c[b]]).collect()
}

/// Faces of a cone whose base disk is centred at `base` and whose apex sits
/// `length` along the rotated +Z axis.
pub fn cone_faces(
    base: Vector3<f64>,
    rotation: Matrix3<f64>,
    length: f64,
    radius: f64,
    segments: usize,
) -> Vec<Face> {
    let segs = segments.max(3);
    let apex = base + rotation * Vector3::new(0.0, 0.0, length);

    let rim: Vec<Vector3<f64>> = (0..segs)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / segs as f64;
            base + rotation * Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        })
        .collect();

    let mut faces = Vec::with_capacity(segs + 1);
    // Base cap
    faces.push(rim.iter().rev().copied().collect());
    // Side triangles
    for i in 0..segs {
        let next = (i + 1) % segs;
        faces.push(vec![rim[i], rim[next], apex]);
    }
    faces
}

/// Rotation that maps local +Z onto `axis`.
///
/// Used to orient cones along gizmo axes.
pub fn rotation_z_to(axis: Vector3<f64>) -> Matrix3<f64> {
    let z = Vector3::unit_z();
    let a = axis.normalize();
    let cos = z.dot(a);
    if cos > 1.0 - 1e-12 {
        return Matrix3::identity();
    }
    if cos < -1.0 + 1e-12 {
        return Matrix3::from_angle_x(Rad(PI));
    }
    let r: Basis3<f64> = Rotation::between_vectors(z, a);
    *r.as_ref()
}
