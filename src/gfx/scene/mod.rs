//! # Scene Module
//!
//! The node tree and what hangs off it.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - arena of [`SceneNode`]s addressed by [`NodeId`]
//! - [`SceneItem`] - per-node drawing, picking and event behaviour
//! - [`Pose`] / [`SharedPose`] - an object's placement, shared with gizmos
//! - [`Light`] - lights handed to the 3D painter each frame
//!
//! ## Usage
//!
//! ```
//! use tgizmo::gfx::scene::{Group, SceneGraph};
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.insert("root", Box::new(Group));
//! let child = graph.insert("child", Box::new(Group));
//! graph.add_child(root, child).unwrap();
//! assert_eq!(graph.collect_preorder(root), vec![root, child]);
//! ```

pub mod graph;
pub mod item;
pub mod light;
pub mod pose;

// Re-export main types
pub use graph::{NodeId, SceneError, SceneGraph, SceneNode};
pub use item::{EventContext, Group, HoverEvent, RenderContext, SceneItem, SelectEvent};
pub use light::{default_lights, Light};
pub use pose::{Pose, SharedPose, WeakPose};
