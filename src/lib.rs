// src/lib.rs
//! tgizmo
//!
//! An embeddable interactive 3D scene toolkit: a node tree drawn through
//! painter interfaces, layered hit-testing under the cursor, hover/select/drag
//! routing, and translation gizmos that move a pose with a 2D pointer.

pub mod gfx;
pub mod input;
pub mod observer;
pub mod prelude;
pub mod view;

pub use view::{View, ViewConfig};
