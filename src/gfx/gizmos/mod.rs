//! # Gizmo System
//!
//! On-screen handles that move a [`Pose`](crate::gfx::scene::Pose) with a 2D
//! pointer. Each handle is an ordinary scene item; the view's drag capture
//! keeps feeding it moves after the cursor leaves its shape.
//!
//! ## Key Components
//!
//! - [`TranslateGizmo`] - three axis arrows, three plane patches and a free cube
//! - [`AxisHandle`] - motion along one axis
//! - [`PlaneHandle`] - motion within a plane spanned by two axes
//! - [`FreeHandle`] - motion in the plane facing the camera

pub mod axis_handle;
pub mod free_handle;
pub mod handle;
pub mod plane_handle;
pub mod translate_gizmo;

#[cfg(test)]
mod test_support;

use thiserror::Error;

use crate::gfx::scene::SceneError;

// Re-export main types
pub use axis_handle::AxisHandle;
pub use free_handle::FreeHandle;
pub use handle::{HandleState, HandleStyle};
pub use plane_handle::{PlaneAxes, PlaneHandle};
pub use translate_gizmo::{GizmoConfig, GizmoSpace, TranslateGizmo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GizmoError {
    #[error("pose is already bound to another gizmo")]
    PoseAlreadyBound,
    #[error("gizmo is not bound to a pose")]
    NotBound,
    #[error(transparent)]
    Scene(#[from] SceneError),
}
