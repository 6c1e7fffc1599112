//! # Graphics Module
//!
//! Everything between the scene tree and the painter collaborators.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Intersection math, rays, tessellation
//! - **Camera System** ([`camera`]) - Cached matrices, project/unproject, controllers
//! - **Rendering Interfaces** ([`rendering`]) - Painter traits, recorders, depth read-back
//! - **Scene Management** ([`scene`]) - Node arena, items, poses, lights
//! - **Picking** ([`picking`]) - Layered software hit-testing
//! - **Gizmos** ([`gizmos`]) - Translation handles
//!
//! Nothing here touches GPU state; a host backend replays what the painters
//! receive.

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use scene::SceneGraph;
