#![allow(dead_code)]

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tgizmo::prelude::*;

pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// View with no camera controller, camera on +Z at `distance` looking at the
/// origin, matrices current.
pub fn view_looking_down_z(distance: f64) -> View {
    init_logging();
    let mut view = View::new(ViewConfig::default());
    view.set_camera_controller(None);
    view.camera_mut()
        .look_at(Vector3::new(0.0, 0.0, distance), Vector3::zero(), Vector3::unit_y());
    view.begin_frame();
    view
}

pub fn screen_of(view: &View, p: Vector3<f64>) -> (f64, f64) {
    let w = view.project_2d(p).expect("point in front of the camera");
    (w.x, w.y)
}

/// Solid cube in the scene layer that logs hover and selection.
pub struct Cube {
    pub name: &'static str,
    pub center: Vector3<f64>,
    pub side: f64,
    pub log: EventLog,
}

impl SceneItem for Cube {
    fn render_scene(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        painter.set_color([0.6, 0.6, 0.6, 1.0]);
        painter.draw_box(
            self.center,
            Matrix3::identity(),
            Vector3::new(self.side, self.side, self.side),
            DrawMode::Solid,
        );
    }

    fn hover_enter(&mut self, _e: &HoverEvent, _ctx: &EventContext) {
        self.log.borrow_mut().push(format!("enter {}", self.name));
    }

    fn hover_leave(&mut self, _e: &HoverEvent, _ctx: &EventContext) {
        self.log.borrow_mut().push(format!("leave {}", self.name));
    }

    fn select_enter(&mut self, _e: &SelectEvent, _ctx: &EventContext) {
        self.log.borrow_mut().push(format!("select {}", self.name));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Solid cube drawn in the overlay layer, in front of all scene geometry.
pub struct Marker {
    pub center: Vector3<f64>,
    pub side: f64,
}

impl SceneItem for Marker {
    fn render_overlay(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        painter.set_color([1.0, 0.5, 0.0, 1.0]);
        painter.draw_box(
            self.center,
            Matrix3::identity(),
            Vector3::new(self.side, self.side, self.side),
            DrawMode::Solid,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Filled screen-space rectangle (window pixels, Y from the top).
pub struct Panel {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl SceneItem for Panel {
    fn render_2d(&self, painter: &mut dyn Painter2D, _ctx: &RenderContext) {
        painter.set_color([0.2, 0.2, 0.2, 0.8]);
        painter.draw_rect(self.min, self.max, DrawMode::Solid);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn add_cube(view: &mut View, name: &'static str, center: Vector3<f64>, log: &EventLog) -> NodeId {
    let id = view.create_node(
        name,
        Box::new(Cube {
            name,
            center,
            side: 0.5,
            log: log.clone(),
        }),
    );
    view.add_node(id).expect("fresh node");
    id
}
