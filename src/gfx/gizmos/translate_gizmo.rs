//! # Translate Gizmo
//!
//! Three axis arrows, three plane patches and a centre cube that move a bound
//! [`SharedPose`]. The gizmo lives in the scene as a root node (which does the
//! per-frame auto-scaling) with one child node per handle.
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector3;
//! use tgizmo::gfx::gizmos::{GizmoConfig, TranslateGizmo};
//! use tgizmo::gfx::scene::{Pose, SharedPose};
//! use tgizmo::view::{View, ViewConfig};
//!
//! let mut view = View::new(ViewConfig::default());
//! let gizmo = TranslateGizmo::new(&mut view, GizmoConfig::default()).unwrap();
//!
//! let pose = SharedPose::new(Pose::at(Vector3::new(0.0, 0.0, 0.0)));
//! gizmo.bind(&pose).unwrap();
//! gizmo.on_position_changed(|p| println!("moved to {:?}", p));
//! assert!(gizmo.is_bound());
//! ```

use std::any::Any;
use std::rc::Rc;

use cgmath::{InnerSpace, Vector3};

use super::axis_handle::AxisHandle;
use super::free_handle::FreeHandle;
use super::handle::{
    GizmoState, HandleStyle, SharedGizmo, FREE_COLOR, HOVER_COLOR, PLANE_COLOR, X_COLOR, Y_COLOR, Z_COLOR,
};
use super::plane_handle::{PlaneAxes, PlaneHandle};
use super::GizmoError;
use crate::gfx::rendering::painter::Color;
use crate::gfx::scene::{NodeId, RenderContext, SceneItem, SharedPose};
use crate::observer::SlotId;
use crate::view::View;

/// Smallest camera distance used for auto-scaling.
const MIN_SCALE_DISTANCE: f64 = 1e-4;

/// Axes the handles follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoSpace {
    /// World X, Y, Z
    #[default]
    World,
    /// The bound pose's attitude columns
    Local,
}

/// Gizmo construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoConfig {
    /// Scale factor applied on top of auto-scaling, or the fixed scale
    /// without it.
    pub base_scale: f64,

    /// Keep a constant on-screen size regardless of camera distance and
    /// window height.
    pub auto_scale: bool,

    /// Window height at which auto-scaling yields exactly `base_scale * k * d`.
    pub reference_height: f64,

    /// Scale per unit of camera distance (`k`).
    pub auto_scale_factor: f64,

    pub space: GizmoSpace,

    pub hover_color: Color,

    pub drag_color: Color,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            auto_scale: true,
            reference_height: 480.0,
            auto_scale_factor: 0.16,
            space: GizmoSpace::World,
            hover_color: HOVER_COLOR,
            drag_color: HOVER_COLOR,
        }
    }
}

impl GizmoConfig {
    /// Visual scale for a pose at distance `distance` from the camera in a
    /// window `view_height` pixels high.
    pub fn auto_scale_for(&self, distance: f64, view_height: f64) -> f64 {
        self.base_scale
            * self.auto_scale_factor
            * distance.max(MIN_SCALE_DISTANCE)
            * (self.reference_height / view_height.max(1.0))
    }
}

/// Root node item: keeps the shared scale current and drops dead bindings.
struct GizmoRoot {
    gizmo: SharedGizmo,
}

impl SceneItem for GizmoRoot {
    fn update_frame(&mut self, ctx: &RenderContext) {
        let mut state = self.gizmo.borrow_mut();
        if state.pose.is_some() && state.pose().is_none() {
            log::debug!("bound pose dropped, gizmo unbound");
            state.pose = None;
        }
        if !state.config.auto_scale {
            state.scale = state.config.base_scale;
            return;
        }
        if let Some(pose) = state.pose() {
            let distance = (pose.position() - ctx.camera.position()).magnitude();
            state.scale = state.config.auto_scale_for(distance, ctx.view_height() as f64);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Translation gizmo handle set.
///
/// Created into a [`View`]; the gizmo's nodes stay in the view until removed
/// through [`View::remove_node`] with [`TranslateGizmo::root`].
pub struct TranslateGizmo {
    root: NodeId,
    handles: Vec<NodeId>,
    state: SharedGizmo,
}

impl TranslateGizmo {
    pub fn new(view: &mut View, config: GizmoConfig) -> Result<Self, GizmoError> {
        let state = GizmoState::new_shared(config);
        let root = view.create_node("translate_gizmo", Box::new(GizmoRoot { gizmo: state.clone() }));

        let axes = [("x_axis", X_COLOR), ("y_axis", Y_COLOR), ("z_axis", Z_COLOR)];
        let planes = [
            ("xy_plane", PlaneAxes::XY),
            ("yz_plane", PlaneAxes::YZ),
            ("zx_plane", PlaneAxes::ZX),
        ];

        let mut handles = Vec::with_capacity(7);
        for (i, (name, color)) in axes.into_iter().enumerate() {
            let style = HandleStyle::new(color, &config);
            handles.push(view.create_node(name, Box::new(AxisHandle::new(state.clone(), i, style))));
        }
        for (name, plane) in planes {
            let style = HandleStyle::new(PLANE_COLOR, &config);
            handles.push(view.create_node(name, Box::new(PlaneHandle::new(state.clone(), plane, style))));
        }
        let style = HandleStyle::new(FREE_COLOR, &config);
        handles.push(view.create_node("free", Box::new(FreeHandle::new(state.clone(), style))));

        for handle in &handles {
            view.add_child(root, *handle)?;
        }
        view.add_node(root)?;

        Ok(Self { root, handles, state })
    }

    /// The gizmo's root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Handle nodes: X, Y, Z axes, XY, YZ, ZX planes, then the free cube.
    pub fn handles(&self) -> &[NodeId] {
        &self.handles
    }

    fn owner(&self) -> usize {
        self.state.borrow().owner
    }

    /// Attaches the gizmo to `pose`, releasing any previous pose.
    ///
    /// A pose can be manipulated by one gizmo at a time.
    pub fn bind(&self, pose: &SharedPose) -> Result<(), GizmoError> {
        let owner = self.owner();
        if !pose.claim(owner) {
            return Err(GizmoError::PoseAlreadyBound);
        }
        let previous = self.state.borrow_mut().pose.replace(pose.downgrade());
        if let Some(previous) = previous.and_then(|w| w.upgrade()) {
            if !previous.ptr_eq(pose) {
                previous.release(owner);
            }
        }
        log::debug!("gizmo bound to pose at {:?}", pose.position());
        Ok(())
    }

    pub fn unbind(&self) -> Result<(), GizmoError> {
        let previous = self.state.borrow_mut().pose.take();
        let Some(previous) = previous else {
            return Err(GizmoError::NotBound);
        };
        if let Some(pose) = previous.upgrade() {
            pose.release(self.owner());
        }
        log::debug!("gizmo unbound");
        Ok(())
    }

    /// Whether a live pose is bound.
    pub fn is_bound(&self) -> bool {
        self.state.borrow().pose().is_some()
    }

    pub fn pose(&self) -> Option<SharedPose> {
        self.state.borrow().pose()
    }

    /// Sets the base scale. Without auto-scaling this is the visual scale.
    pub fn set_scale(&self, scale: f64) {
        let mut state = self.state.borrow_mut();
        state.config.base_scale = scale;
        if !state.config.auto_scale {
            state.scale = scale;
        }
    }

    pub fn set_auto_scale(&self, enabled: bool) {
        let mut state = self.state.borrow_mut();
        state.config.auto_scale = enabled;
        if !enabled {
            state.scale = state.config.base_scale;
        }
    }

    /// Current visual scale.
    pub fn scale(&self) -> f64 {
        self.state.borrow().scale
    }

    pub fn config(&self) -> GizmoConfig {
        self.state.borrow().config
    }

    /// Registers a callback fired with the new position after each drag
    /// update.
    pub fn on_position_changed<F>(&self, callback: F) -> SlotId
    where
        F: FnMut(&Vector3<f64>) + 'static,
    {
        let signal = Rc::clone(&self.state.borrow().position_changed);
        signal.connect(callback)
    }

    pub fn disconnect_position_changed(&self, id: SlotId) -> bool {
        let signal = Rc::clone(&self.state.borrow().position_changed);
        signal.disconnect(id)
    }
}
