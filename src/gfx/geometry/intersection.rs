//! # Intersection Math
//!
//! Stateless double-precision helpers used by the gizmo handles to turn a
//! camera ray into constrained 3D motion. Every function treats its inputs as
//! infinite lines (two points each) rather than segments.
//!
//! Geometric degeneracy is reported through `Option`: callers interpret `None`
//! as "no change this frame", never as an error.

use cgmath::{InnerSpace, Vector3};

/// Squared cross-product magnitude below which two lines count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Line direction dot plane normal below which the line lies parallel to the plane.
pub const PLANE_PARALLEL_EPSILON: f64 = 1e-7;

/// Closest points between two lines, one on each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoints {
    /// Point on the first line; callers treat this one as the answer.
    pub on_first: Vector3<f64>,
    /// Point on the second line.
    pub on_second: Vector3<f64>,
}

impl NearestPoints {
    /// Gap between the two lines at their closest approach.
    pub fn distance(&self) -> f64 {
        (self.on_second - self.on_first).magnitude()
    }
}

/// Returns the closest point to `p` on the infinite line through `a` and `b`.
///
/// When `a == b` the line is undefined and `a` is returned.
pub fn point_projected_on_line(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    let d = b - a;
    let len2 = d.magnitude2();
    if len2 == 0.0 {
        return a;
    }
    let d = d / len2.sqrt();
    let t = d.dot(p - a);
    a + d * t
}

/// Closest points between the line through `a1, a2` and the line through `b1, b2`.
///
/// Returns `None` when the lines are parallel (`|d1 x d2|^2 < 1e-6`). For
/// skew lines the two returned points differ; they coincide only when the
/// lines actually intersect.
pub fn line_line_intersection(
    a1: Vector3<f64>,
    a2: Vector3<f64>,
    b1: Vector3<f64>,
    b2: Vector3<f64>,
) -> Option<NearestPoints> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;

    let c = d1.cross(d2);
    let c2 = c.magnitude2();
    if c2 < PARALLEL_EPSILON {
        return None;
    }

    let w = b1 - a1;
    let t1 = w.cross(d2).dot(c) / c2;
    let t2 = w.cross(d1).dot(c) / c2;

    Some(NearestPoints {
        on_first: a1 + d1 * t1,
        on_second: b1 + d2 * t2,
    })
}

/// Intersection of the line through `line_p1, line_p2` with the plane through
/// three points.
///
/// Returns `None` when the line runs parallel to the plane or when the three
/// plane points are collinear.
pub fn line_plane_intersection(
    line_p1: Vector3<f64>,
    line_p2: Vector3<f64>,
    plane_p1: Vector3<f64>,
    plane_p2: Vector3<f64>,
    plane_p3: Vector3<f64>,
) -> Option<Vector3<f64>> {
    let n = (plane_p1 - plane_p2).cross(plane_p1 - plane_p3);
    if n.magnitude2() == 0.0 {
        return None;
    }
    line_plane_intersection_with_normal(line_p1, line_p2, plane_p1, n.normalize())
}

/// Same as [`line_plane_intersection`] with the plane given as point + unit normal.
pub fn line_plane_intersection_with_normal(
    line_p1: Vector3<f64>,
    line_p2: Vector3<f64>,
    plane_point: Vector3<f64>,
    normal: Vector3<f64>,
) -> Option<Vector3<f64>> {
    let d1 = line_p2 - line_p1;
    let dn = d1.dot(normal);
    if dn.abs() < PLANE_PARALLEL_EPSILON {
        return None;
    }
    let t = (normal.dot(plane_point) - line_p1.dot(normal)) / dn;
    Some(line_p1 + d1 * t)
}

/// Near intersection of the line through `line_p1, line_p2` with a sphere.
///
/// The near root is measured along the direction `line_p1 -> line_p2` and may
/// lie behind `line_p1`. Returns `None` when the line misses the sphere.
pub fn line_sphere_intersection(
    line_p1: Vector3<f64>,
    line_p2: Vector3<f64>,
    center: Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    let d = line_p2 - line_p1;
    if d.magnitude2() == 0.0 {
        return None;
    }
    let d = d.normalize();

    let ev = center - line_p1;
    let a = ev.dot(d);
    let discriminant = radius * radius - ev.magnitude2() + a * a;
    if discriminant < 0.0 {
        return None;
    }

    let t = a - discriminant.sqrt();
    Some(line_p1 + d * t)
}
