//! # tgizmo Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use tgizmo::prelude::*;
//!
//! let mut view = View::new(ViewConfig::default());
//! let gizmo = TranslateGizmo::new(&mut view, GizmoConfig::default()).unwrap();
//! let pose = SharedPose::new(Pose::at(Vector3::zero()));
//! gizmo.bind(&pose).unwrap();
//! ```

// Re-export the view and its configuration
pub use crate::view::{View, ViewConfig};

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, CameraController, SphericalCamera, StandardCamera};
pub use crate::gfx::gizmos::{GizmoConfig, GizmoError, GizmoSpace, TranslateGizmo};
pub use crate::gfx::picking::{PickHit, PickResult};
pub use crate::gfx::rendering::{
    DepthBuffer, DrawList, DrawMode, Layer, Painter2D, Painter3D, ScreenDrawList, TextPainter,
};
pub use crate::gfx::scene::{
    EventContext, Group, HoverEvent, Light, NodeId, Pose, RenderContext, SceneError, SceneItem, SelectEvent,
    SharedPose,
};

// Re-export input types
pub use crate::input::{InputEvent, Key, MouseButton, MouseEvent, PointerEvent, WheelEvent};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Matrix3, SquareMatrix, Vector2, Vector3, Zero};
