//! # Geometry
//!
//! Pure geometry used by picking and manipulation:
//!
//! - **Intersection math** ([`intersection`]): point/line, line/line,
//!   line/plane and line/sphere queries in double precision
//! - **Rays** ([`Ray`]): camera rays through the cursor
//! - **Tessellation** ([`primitives`]): boxes and cones split into convex
//!   faces for the hit-test pass
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use tgizmo::gfx::geometry::line_line_intersection;
//!
//! let hit = line_line_intersection(
//!     Vector3::new(-1.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, -1.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//! assert!(hit.is_some());
//! ```

pub mod intersection;
pub mod primitives;
pub mod ray;

pub use intersection::{
    line_line_intersection, line_plane_intersection, line_plane_intersection_with_normal,
    line_sphere_intersection, point_projected_on_line, NearestPoints,
};
pub use primitives::{box_edges, box_faces, cone_faces, rotation_z_to, Face, CONE_SEGMENTS};
pub use ray::Ray;
