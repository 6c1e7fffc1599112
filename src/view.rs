//! # View
//!
//! The scene root container and pointer dispatcher. A [`View`] owns the node
//! tree, the camera, the lights and the interaction state (hovered, selected
//! and captured nodes), and turns raw pointer events into item callbacks.
//!
//! ## Event routing
//!
//! - Right and middle buttons drive the camera controller only.
//! - A left press picks; the nearest hit becomes the selection and captures
//!   the pointer until the left button is released. A press that arrives
//!   while a capture is held first sends the old holder a release.
//! - While a node holds the capture, left-button moves go to it directly,
//!   without picking.
//! - Every move re-picks to update hover.
//! - The wheel always goes to the camera.
//!
//! ## Frame cycle
//!
//! ```
//! use tgizmo::gfx::rendering::{DrawList, ScreenDrawList};
//! use tgizmo::view::{View, ViewConfig};
//!
//! let mut view = View::new(ViewConfig::default().with_size(800, 600));
//! let mut scene = DrawList::new();
//! let mut screen = ScreenDrawList::new();
//! let mut text = ScreenDrawList::new();
//!
//! view.begin_frame();
//! view.render(&mut scene, &mut screen, &mut text);
//! ```

use std::time::Duration;

use cgmath::Vector3;

use crate::gfx::camera::{Camera, CameraController, CameraManager, Perspective, StandardCamera};
use crate::gfx::picking::{PickResult, Picker};
use crate::gfx::rendering::depth::{DepthBuffer, UniformDepth};
use crate::gfx::rendering::painter::{Color, Layer, Painter2D, Painter3D, TextPainter};
use crate::gfx::scene::{
    default_lights, EventContext, HoverEvent, Light, NodeId, RenderContext, SceneError, SceneGraph, SceneItem,
    SelectEvent,
};
use crate::input::event::{InputEvent, Key, MouseButton, MouseEvent, MouseTracker, PointerEvent, WheelEvent};
use crate::observer::{Signal, SlotId};

/// View construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub fovy_degrees: f64,
    pub z_near: f64,
    pub z_far: f64,

    /// Side of the picking square around the cursor, in pixels
    pub pick_tolerance: f64,

    /// Colour the host should clear to before [`View::render`]
    pub background_color: Color,

    /// Target frames per second for the host's render loop
    pub frame_rate: u32,

    pub width: u32,
    pub height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.0,
            z_near: 0.01,
            z_far: 100.0,
            pick_tolerance: 5.0,
            background_color: [0.8, 0.8, 0.8, 1.0],
            frame_rate: 30,
            width: 640,
            height: 480,
        }
    }
}

impl ViewConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_perspective(mut self, fovy_degrees: f64, z_near: f64, z_far: f64) -> Self {
        self.fovy_degrees = fovy_degrees;
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn with_pick_tolerance(mut self, pixels: f64) -> Self {
        self.pick_tolerance = pixels;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    pub fn perspective(&self) -> Perspective {
        Perspective {
            fovy_degrees: self.fovy_degrees,
            z_near: self.z_near,
            z_far: self.z_far,
        }
    }

    /// Time between frames at `frame_rate`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }
}

/// Scene container, camera owner and pointer dispatcher.
pub struct View {
    config: ViewConfig,
    scene: SceneGraph,
    roots: Vec<NodeId>,
    camera_manager: CameraManager,
    lights: Vec<Light>,
    depth: Box<dyn DepthBuffer>,
    picker: Picker,
    tracker: MouseTracker,
    hovered: Option<NodeId>,
    picked: Option<NodeId>,
    captured: Option<NodeId>,
    key_pressed: Signal<Key>,
}

impl View {
    pub fn new(config: ViewConfig) -> Self {
        let camera = Camera::new(config.perspective(), config.width, config.height);
        let mut camera_manager = CameraManager::new(camera, Some(Box::new(StandardCamera::default())));
        camera_manager.update();

        Self {
            config,
            scene: SceneGraph::new(),
            roots: Vec::new(),
            camera_manager,
            lights: default_lights(),
            depth: Box::new(UniformDepth::default()),
            picker: Picker::new(config.pick_tolerance),
            tracker: MouseTracker::new(),
            hovered: None,
            picked: None,
            captured: None,
            key_pressed: Signal::new(),
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    // ---------------------------------------------------------------
    // Tree
    // ---------------------------------------------------------------

    /// Creates a detached node. It is neither drawn nor picked until attached
    /// with [`View::add_node`] or under an attached parent.
    pub fn create_node(&mut self, name: impl Into<String>, item: Box<dyn SceneItem>) -> NodeId {
        self.scene.insert(name, item)
    }

    /// Attaches a node (and its subtree) as a top-level node, detaching it
    /// from any parent first.
    pub fn add_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        if !self.scene.contains(id) {
            return Err(SceneError::StaleNode(id));
        }
        self.scene.detach(id);
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.scene.set_in_view(id, true);
        log::debug!("node {id} added to view");
        Ok(())
    }

    /// Detaches a top-level node from the view without destroying it.
    /// Returns whether it was top-level.
    pub fn remove_node(&mut self, id: NodeId) -> Result<bool, SceneError> {
        if !self.scene.contains(id) {
            return Err(SceneError::StaleNode(id));
        }
        let Some(i) = self.roots.iter().position(|r| *r == id) else {
            return Ok(false);
        };
        self.roots.remove(i);
        self.scene.set_in_view(id, false);
        let subtree = self.scene.collect_preorder(id);
        self.forget(&subtree);
        log::debug!("node {id} removed from view");
        Ok(true)
    }

    /// Attaches `child` under `parent`, taking it out of the top-level list
    /// if it was there. On error the view is left as it was.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.scene.add_child(parent, child)?;
        self.roots.retain(|r| *r != child);
        if !self.scene.node(child).is_some_and(|n| n.is_in_view()) {
            let subtree = self.scene.collect_preorder(child);
            self.forget(&subtree);
        }
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        let removed = self.scene.remove_child(parent, child)?;
        if removed {
            let subtree = self.scene.collect_preorder(child);
            self.forget(&subtree);
        }
        Ok(removed)
    }

    /// Destroys a node and its subtree. Returns the destroyed ids.
    pub fn destroy_node(&mut self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let removed = self.scene.remove(id)?;
        self.roots.retain(|r| *r != id);
        self.forget(&removed);
        Ok(removed)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.scene.set_visible(id, visible)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Downcasts a node's item.
    pub fn item<T: SceneItem>(&self, id: NodeId) -> Option<&T> {
        self.scene.item::<T>(id)
    }

    pub fn item_mut<T: SceneItem>(&mut self, id: NodeId) -> Option<&mut T> {
        self.scene.item_mut::<T>(id)
    }

    /// Every attached node in pre-order, top-level nodes in insertion order.
    pub fn traversal(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.scene.len());
        for root in &self.roots {
            self.scene.traverse(*root, |id, _| order.push(id));
        }
        order
    }

    /// Clears interaction state pointing into `ids`.
    fn forget(&mut self, ids: &[NodeId]) {
        for (slot, what) in [
            (&mut self.hovered, "hovered"),
            (&mut self.picked, "selected"),
            (&mut self.captured, "captured"),
        ] {
            if let Some(id) = *slot {
                if ids.contains(&id) {
                    log::debug!("{what} node {id} left the view");
                    *slot = None;
                }
            }
        }
    }

    /// Interaction targets must still exist and be attached.
    fn is_live(&self, id: NodeId) -> bool {
        self.scene.node(id).is_some_and(|n| n.is_in_view())
    }

    // ---------------------------------------------------------------
    // Frame
    // ---------------------------------------------------------------

    /// Updates the camera and its matrix cache, then lets every attached item
    /// prepare for the frame. Call once per frame before rendering or picking.
    pub fn begin_frame(&mut self) {
        self.camera_manager.update();
        for id in self.traversal() {
            let Some(node) = self.scene.node_mut(id) else {
                continue;
            };
            let ctx = RenderContext {
                camera: &self.camera_manager.camera,
                node: id,
            };
            node.item_mut().update_frame(&ctx);
        }
    }

    /// Draws every visible attached node, layer by layer: scene, overlay,
    /// screen, then text.
    pub fn render(&self, painter: &mut dyn Painter3D, screen: &mut dyn Painter2D, text: &mut dyn TextPainter) {
        let camera = &self.camera_manager.camera;
        let order: Vec<NodeId> = self
            .traversal()
            .into_iter()
            .filter(|id| self.scene.node(*id).is_some_and(|n| n.is_visible()))
            .collect();

        for layer in Layer::RENDER_ORDER {
            match layer {
                Layer::Scene | Layer::Overlay => {
                    painter.begin_layer(layer);
                    if layer == Layer::Scene {
                        for light in self.lights.iter().filter(|l| l.enabled) {
                            painter.apply_light(light);
                        }
                    }
                    for id in &order {
                        let Some(node) = self.scene.node(*id) else {
                            continue;
                        };
                        let ctx = RenderContext { camera, node: *id };
                        if layer == Layer::Scene {
                            node.item().render_scene(painter, &ctx);
                        } else {
                            node.item().render_overlay(painter, &ctx);
                        }
                    }
                }
                Layer::Screen => {
                    screen.begin_layer(layer);
                    for id in &order {
                        if let Some(node) = self.scene.node(*id) {
                            node.item().render_2d(screen, &RenderContext { camera, node: *id });
                        }
                    }
                }
                Layer::Text => {
                    text.begin_layer(layer);
                    for id in &order {
                        if let Some(node) = self.scene.node(*id) {
                            node.item().render_text(text, &RenderContext { camera, node: *id });
                        }
                    }
                }
            }
        }
    }

    /// Nodes under a window position (Y from the top), nearest first, from
    /// the highest-precedence layer with any hit.
    pub fn pick(&self, x: f64, y: f64) -> PickResult {
        self.picker
            .pick(&self.scene, &self.traversal(), &self.camera_manager.camera, x, y)
    }

    // ---------------------------------------------------------------
    // Pointer dispatch
    // ---------------------------------------------------------------

    /// Runs `f` on a node's item with an event context. Returns false if the
    /// node is gone.
    fn dispatch<F>(&mut self, id: NodeId, f: F) -> bool
    where
        F: FnOnce(&mut dyn SceneItem, &EventContext),
    {
        let Some(node) = self.scene.node_mut(id) else {
            return false;
        };
        let ctx = EventContext {
            camera: &self.camera_manager.camera,
            depth: self.depth.as_ref(),
            node: id,
        };
        f(node.item_mut(), &ctx);
        true
    }

    pub fn mouse_press(&mut self, event: &PointerEvent) {
        let me = self.tracker.press(event);
        match event.button {
            Some(MouseButton::Right | MouseButton::Middle) => self.camera_manager.mouse_press(&me),
            Some(MouseButton::Left) => self.left_press(&me),
            None => {}
        }
    }

    fn left_press(&mut self, me: &MouseEvent) {
        self.end_capture(me);
        let nearest = self.pick(me.x, me.y).nearest();
        let select = SelectEvent { x: me.x, y: me.y };

        let Some(hit) = nearest else {
            if let Some(old) = self.picked.take() {
                self.dispatch(old, |item, ctx| item.select_leave(&select, ctx));
                log::debug!("selection cleared");
            }
            return;
        };

        if self.picked != Some(hit) {
            if let Some(old) = self.picked.take() {
                self.dispatch(old, |item, ctx| item.select_leave(&select, ctx));
            }
            self.picked = Some(hit);
            self.dispatch(hit, |item, ctx| item.select_enter(&select, ctx));
            log::debug!("selected node {hit}");
        }

        self.captured = Some(hit);
        log::debug!("node {hit} captured the pointer");
        self.dispatch(hit, |item, ctx| item.mouse_press(me, ctx));
    }

    /// Sends a left release to the item holding the capture, if any.
    fn end_capture(&mut self, me: &MouseEvent) {
        if let Some(captured) = self.captured.take() {
            let release = MouseEvent {
                dx: 0.0,
                dy: 0.0,
                button: Some(MouseButton::Left),
                ..*me
            };
            self.dispatch(captured, |item, ctx| item.mouse_release(&release, ctx));
            log::debug!("capture of node {captured} ended");
        }
    }

    pub fn mouse_move(&mut self, event: &PointerEvent) {
        let me = self.tracker.moved(event);
        match event.button {
            Some(MouseButton::Right | MouseButton::Middle) => self.camera_manager.mouse_move(&me),
            Some(MouseButton::Left) => {
                if let Some(captured) = self.captured {
                    if self.is_live(captured) {
                        self.dispatch(captured, |item, ctx| item.mouse_move(&me, ctx));
                    } else {
                        log::warn!("captured node {captured} is gone, capture dropped");
                        self.captured = None;
                    }
                }
            }
            None => {}
        }
        self.update_hover(me.x, me.y);
    }

    fn update_hover(&mut self, x: f64, y: f64) {
        let nearest = self.pick(x, y).nearest();
        let hover = HoverEvent { x, y };

        if nearest.is_some() && nearest == self.hovered {
            if let Some(id) = nearest {
                self.dispatch(id, |item, ctx| item.hover_move(&hover, ctx));
            }
            return;
        }
        if let Some(old) = self.hovered.take() {
            self.dispatch(old, |item, ctx| item.hover_leave(&hover, ctx));
            log::debug!("hover left node {old}");
        }
        if let Some(new) = nearest {
            self.hovered = Some(new);
            self.dispatch(new, |item, ctx| item.hover_enter(&hover, ctx));
            log::debug!("hover entered node {new}");
        }
    }

    pub fn mouse_release(&mut self, event: &PointerEvent) {
        let me = self.tracker.release(event);
        match event.button {
            Some(MouseButton::Right | MouseButton::Middle) => self.camera_manager.mouse_release(&me),
            Some(MouseButton::Left) => {
                if let Some(captured) = self.captured.take() {
                    self.dispatch(captured, |item, ctx| item.mouse_release(&me, ctx));
                    log::debug!("node {captured} released the pointer");
                }
            }
            None => {}
        }
    }

    pub fn wheel(&mut self, event: &WheelEvent) {
        self.camera_manager.wheel(event);
    }

    /// Forwards a key to the camera controller and the `key_pressed` signal.
    pub fn key_press(&mut self, key: Key) {
        self.camera_manager.key_press(key);
        self.key_pressed.emit(&key);
    }

    pub fn on_key_pressed<F>(&self, callback: F) -> SlotId
    where
        F: FnMut(&Key) + 'static,
    {
        self.key_pressed.connect(callback)
    }

    /// The window lost focus: ends any capture with a synthetic release and
    /// clears hover, since the real release will never arrive.
    pub fn focus_lost(&mut self) {
        let (x, y) = self.tracker.position().unwrap_or((0.0, 0.0));
        if self.captured.is_some() {
            let me = self.tracker.release(&PointerEvent::left(x, y));
            log::debug!("focus lost");
            self.end_capture(&me);
        }
        if let Some(hovered) = self.hovered.take() {
            let hover = HoverEvent { x, y };
            self.dispatch(hovered, |item, ctx| item.hover_leave(&hover, ctx));
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MousePress(e) => self.mouse_press(e),
            InputEvent::MouseMove(e) => self.mouse_move(e),
            InputEvent::MouseRelease(e) => self.mouse_release(e),
            InputEvent::Wheel(e) => self.wheel(e),
            InputEvent::KeyPress(key) => self.key_press(*key),
            InputEvent::FocusLost => self.focus_lost(),
            InputEvent::Resize { width, height } => self.resize(*width, *height),
        }
    }

    pub fn hovered_item(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn picked_item(&self) -> Option<NodeId> {
        self.picked
    }

    pub fn captured_item(&self) -> Option<NodeId> {
        self.captured
    }

    // ---------------------------------------------------------------
    // Camera
    // ---------------------------------------------------------------

    pub fn camera(&self) -> &Camera {
        &self.camera_manager.camera
    }

    /// Direct camera access. With a controller installed, the controller
    /// overwrites the pose on the next [`View::begin_frame`].
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera_manager.camera
    }

    pub fn camera_manager(&self) -> &CameraManager {
        &self.camera_manager
    }

    pub fn camera_manager_mut(&mut self) -> &mut CameraManager {
        &mut self.camera_manager
    }

    /// Installs a camera controller, returning the previous one.
    pub fn set_camera_controller(
        &mut self,
        controller: Option<Box<dyn CameraController>>,
    ) -> Option<Box<dyn CameraController>> {
        let previous = self.camera_manager.set_controller(controller);
        self.camera_manager.update();
        previous
    }

    /// Replaces the depth read-back used for unprojection. Hosts with a GPU
    /// backend install the buffer of the most recent render here.
    pub fn set_depth_buffer(&mut self, depth: Box<dyn DepthBuffer>) {
        self.depth = depth;
    }

    pub fn depth_buffer(&self) -> &dyn DepthBuffer {
        self.depth.as_ref()
    }

    /// World point to window coordinates (Y from the bottom, depth 0..1).
    pub fn project(&self, p: Vector3<f64>) -> Option<Vector3<f64>> {
        self.camera_manager.camera.project(p)
    }

    /// World point to window coordinates (Y from the top).
    pub fn project_2d(&self, p: Vector3<f64>) -> Option<Vector3<f64>> {
        self.camera_manager.camera.project_2d(p)
    }

    /// Window coordinates (Y from the bottom) plus the stored depth back to a
    /// world point.
    pub fn unproject(&self, x: f64, y: f64) -> Option<Vector3<f64>> {
        self.camera_manager.camera.unproject(x, y, self.depth.as_ref())
    }

    /// As [`View::unproject`] with Y from the top.
    pub fn unproject_2d(&self, x: f64, y: f64) -> Option<Vector3<f64>> {
        self.camera_manager.camera.unproject_2d(x, y, self.depth.as_ref())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.camera_manager.camera.resize(width, height);
        self.camera_manager.camera.update_matrices();
        log::debug!("view resized to {width}x{height}");
    }

    // ---------------------------------------------------------------
    // Lights
    // ---------------------------------------------------------------

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    pub fn light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::draw_list::{DrawCommand, DrawList, ScreenDrawList};
    use crate::gfx::rendering::painter::DrawMode;
    use crate::gfx::scene::Group;
    use cgmath::{Matrix3, SquareMatrix, Zero};
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        center: Vector3<f64>,
        log: Log,
    }

    impl SceneItem for Recorder {
        fn render_scene(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
            painter.set_color([1.0, 1.0, 1.0, 1.0]);
            painter.draw_box(self.center, Matrix3::identity(), Vector3::new(0.5, 0.5, 0.5), DrawMode::Solid);
        }

        fn hover_enter(&mut self, _e: &HoverEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn hover_leave(&mut self, _e: &HoverEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("leave {}", self.name));
        }

        fn mouse_press(&mut self, _e: &MouseEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("press {}", self.name));
        }

        fn mouse_move(&mut self, e: &MouseEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("move {} {}", self.name, e.dx));
        }

        fn mouse_release(&mut self, _e: &MouseEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("release {}", self.name));
        }

        fn select_enter(&mut self, _e: &SelectEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("select {}", self.name));
        }

        fn select_leave(&mut self, _e: &SelectEvent, _ctx: &EventContext) {
            self.log.borrow_mut().push(format!("deselect {}", self.name));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn fixed_view() -> View {
        let mut view = View::new(ViewConfig::default());
        view.set_camera_controller(None);
        view.camera_mut()
            .look_at(Vector3::new(0.0, 0.0, 10.0), Vector3::zero(), Vector3::unit_y());
        view.begin_frame();
        view
    }

    fn add_recorder(view: &mut View, name: &'static str, center: Vector3<f64>, log: &Log) -> NodeId {
        let id = view.create_node(
            name,
            Box::new(Recorder {
                name,
                center,
                log: log.clone(),
            }),
        );
        view.add_node(id).unwrap();
        id
    }

    fn screen_of(view: &View, p: Vector3<f64>) -> (f64, f64) {
        let w = view.project_2d(p).unwrap();
        (w.x, w.y)
    }

    #[test]
    fn test_press_selects_and_captures() {
        let log = Log::default();
        let mut view = fixed_view();
        let a = add_recorder(&mut view, "a", Vector3::zero(), &log);

        let (x, y) = screen_of(&view, Vector3::zero());
        view.mouse_press(&PointerEvent::left(x, y));
        assert_eq!(view.picked_item(), Some(a));
        assert_eq!(view.captured_item(), Some(a));

        // leaving the box keeps the capture
        view.mouse_move(&PointerEvent::left(x + 200.0, y));
        view.mouse_release(&PointerEvent::left(x + 200.0, y));
        assert_eq!(view.captured_item(), None);
        assert_eq!(view.picked_item(), Some(a));

        assert_eq!(
            *log.borrow(),
            vec!["select a", "press a", "move a 200", "release a"]
        );

        // click on empty space clears the selection
        view.mouse_press(&PointerEvent::left(5.0, 5.0));
        assert_eq!(view.picked_item(), None);
        assert_eq!(log.borrow().last().map(String::as_str), Some("deselect a"));
    }

    #[test]
    fn test_camera_buttons_never_reach_items() {
        let log = Log::default();
        let mut view = fixed_view();
        add_recorder(&mut view, "a", Vector3::zero(), &log);

        let (x, y) = screen_of(&view, Vector3::zero());
        view.mouse_press(&PointerEvent::right(x, y));
        view.mouse_release(&PointerEvent::right(x, y));
        view.mouse_press(&PointerEvent::middle(x, y));
        assert!(log.borrow().is_empty());
        assert_eq!(view.captured_item(), None);
    }

    #[test]
    fn test_destroying_captured_node_clears_state() {
        let log = Log::default();
        let mut view = fixed_view();
        let a = add_recorder(&mut view, "a", Vector3::zero(), &log);
        let (x, y) = screen_of(&view, Vector3::zero());
        view.mouse_move(&PointerEvent::hover(x, y));
        view.mouse_press(&PointerEvent::left(x, y));

        view.destroy_node(a).unwrap();
        assert_eq!(view.captured_item(), None);
        assert_eq!(view.hovered_item(), None);
        assert_eq!(view.picked_item(), None);

        // later events are harmless
        view.mouse_move(&PointerEvent::left(x + 1.0, y));
        view.mouse_release(&PointerEvent::left(x + 1.0, y));
    }

    #[test]
    fn test_focus_loss_releases_capture() {
        let log = Log::default();
        let mut view = fixed_view();
        add_recorder(&mut view, "a", Vector3::zero(), &log);
        let (x, y) = screen_of(&view, Vector3::zero());
        view.mouse_move(&PointerEvent::hover(x, y));
        view.mouse_press(&PointerEvent::left(x, y));
        view.focus_lost();

        assert_eq!(view.captured_item(), None);
        assert_eq!(view.hovered_item(), None);
        let log = log.borrow();
        assert!(log.iter().any(|l| l == "release a"));
        assert_eq!(log.last().map(String::as_str), Some("leave a"));
    }

    #[test]
    fn test_second_press_releases_previous_capture() {
        let log = Log::default();
        let mut view = fixed_view();
        add_recorder(&mut view, "a", Vector3::new(-1.5, 0.0, 0.0), &log);
        let b = add_recorder(&mut view, "b", Vector3::new(1.5, 0.0, 0.0), &log);
        let (ax, ay) = screen_of(&view, Vector3::new(-1.5, 0.0, 0.0));
        let (bx, by) = screen_of(&view, Vector3::new(1.5, 0.0, 0.0));

        view.mouse_press(&PointerEvent::left(ax, ay));
        view.mouse_press(&PointerEvent::left(bx, by));
        assert_eq!(view.captured_item(), Some(b));
        assert_eq!(
            *log.borrow(),
            vec!["select a", "press a", "release a", "deselect a", "select b", "press b"]
        );
    }

    #[test]
    fn test_failed_add_child_leaves_roots_alone() {
        let log = Log::default();
        let mut view = fixed_view();
        let group = view.create_node("group", Box::new(Group));
        view.add_node(group).unwrap();
        let a = add_recorder(&mut view, "a", Vector3::zero(), &log);
        view.add_child(group, a).unwrap();

        assert_eq!(
            view.add_child(a, group),
            Err(SceneError::CycleDetected { parent: a, child: group })
        );
        assert_eq!(view.add_child(group, group), Err(SceneError::SelfParent(group)));
        assert_eq!(view.roots(), &[group]);
        let (x, y) = screen_of(&view, Vector3::zero());
        assert_eq!(view.pick(x, y).nearest(), Some(a));
    }

    #[test]
    fn test_detached_nodes_are_not_picked() {
        let log = Log::default();
        let mut view = fixed_view();
        let a = add_recorder(&mut view, "a", Vector3::zero(), &log);
        let (x, y) = screen_of(&view, Vector3::zero());
        assert_eq!(view.pick(x, y).nearest(), Some(a));

        assert!(view.remove_node(a).unwrap());
        assert!(view.pick(x, y).is_empty());
        assert!(!view.remove_node(a).unwrap());
    }

    #[test]
    fn test_render_visits_layers_in_order_with_lights() {
        let log = Log::default();
        let mut view = fixed_view();
        add_recorder(&mut view, "a", Vector3::zero(), &log);
        let mut scene = DrawList::new();
        let mut screen = ScreenDrawList::new();
        let mut text = ScreenDrawList::new();
        view.render(&mut scene, &mut screen, &mut text);

        let commands = scene.commands();
        assert_eq!(commands[0], DrawCommand::BeginLayer(Layer::Scene));
        let lights = commands.iter().filter(|c| matches!(c, DrawCommand::Light(_))).count();
        assert_eq!(lights, 2);
        assert!(scene.layer(Layer::Scene).iter().any(|c| matches!(c, DrawCommand::Box { .. })));
        assert!(commands.contains(&DrawCommand::BeginLayer(Layer::Overlay)));
    }

    #[test]
    fn test_key_press_emits_signal() {
        let mut view = fixed_view();
        let keys = Rc::new(RefCell::new(Vec::new()));
        let k = keys.clone();
        view.on_key_pressed(move |key| k.borrow_mut().push(*key));
        view.handle_event(&InputEvent::KeyPress(Key::Char('W')));
        assert_eq!(*keys.borrow(), vec![Key::Char('W')]);
    }

    #[test]
    fn test_lights_api() {
        let mut view = View::new(ViewConfig::default());
        assert_eq!(view.num_lights(), 2);
        view.add_light(Light::new(2));
        assert_eq!(view.light(2).map(|l| l.index), Some(2));
        assert!(view.remove_light(0).is_some());
        assert!(view.remove_light(5).is_none());
        assert_eq!(view.num_lights(), 2);
    }

    #[test]
    fn test_resize_updates_camera() {
        let mut view = View::new(ViewConfig::default());
        view.handle_event(&InputEvent::Resize { width: 1024, height: 768 });
        assert_eq!((view.camera().width(), view.camera().height()), (1024, 768));
        assert_eq!(view.config().height, 768);
    }
}
