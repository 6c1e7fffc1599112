//! Scripted, windowless gizmo session.
//!
//! Builds a view with one cube, binds a translate gizmo to the cube's pose and
//! replays a few pointer drags, logging every position notification.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example drag_gizmo
//! ```

use std::any::Any;

use anyhow::{anyhow, Result};
use tgizmo::prelude::*;

/// A cube drawn at its shared pose.
struct Crate {
    pose: SharedPose,
}

impl SceneItem for Crate {
    fn render_scene(&self, painter: &mut dyn Painter3D, _ctx: &RenderContext) {
        let pose = self.pose.get();
        painter.set_color([0.6, 0.45, 0.3, 1.0]);
        painter.draw_box(pose.position, pose.attitude, Vector3::new(0.5, 0.5, 0.5), DrawMode::Solid);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn screen(view: &View, p: Vector3<f64>) -> Result<(f64, f64)> {
    let w = view
        .project_2d(p)
        .ok_or_else(|| anyhow!("{p:?} is behind the camera"))?;
    Ok((w.x, w.y))
}

/// Press at `from`, move in `steps` equal increments by `delta`, release.
fn drag(view: &mut View, from: (f64, f64), delta: (f64, f64), steps: u32) {
    view.mouse_move(&PointerEvent::hover(from.0, from.1));
    view.mouse_press(&PointerEvent::left(from.0, from.1));
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        view.mouse_move(&PointerEvent::left(from.0 + delta.0 * t, from.1 + delta.1 * t));
        view.begin_frame();
    }
    view.mouse_release(&PointerEvent::left(from.0 + delta.0, from.1 + delta.1));
}

fn main() -> Result<()> {
    env_logger::init();

    let mut view = View::new(ViewConfig::default().with_size(800, 600));
    view.set_camera_controller(None);
    view.camera_mut()
        .look_at(Vector3::new(4.0, -6.0, 5.0), Vector3::zero(), Vector3::unit_z());

    let pose = SharedPose::new(Pose::default());
    let cube = view.create_node("crate", Box::new(Crate { pose: pose.clone() }));
    view.add_node(cube)?;

    let gizmo = TranslateGizmo::new(&mut view, GizmoConfig::default())?;
    gizmo.bind(&pose)?;
    gizmo.on_position_changed(|p| log::info!("pose moved to ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z));
    view.begin_frame();

    // X arrow
    let from = screen(&view, Vector3::new(gizmo.scale() * 0.9, 0.0, 0.0))?;
    drag(&mut view, from, (60.0, 0.0), 6);
    println!("after X drag: {:?}", pose.position());

    // XY patch
    let s = gizmo.scale() * 0.1;
    let p = pose.position();
    let from = screen(&view, p + Vector3::new(s, s, 0.0))?;
    drag(&mut view, from, (-30.0, -30.0), 3);
    println!("after XY drag: {:?}", pose.position());

    // centre cube
    let from = screen(&view, pose.position())?;
    drag(&mut view, from, (0.0, 40.0), 4);
    println!("after free drag: {:?}", pose.position());

    let mut scene = DrawList::new();
    let mut overlay_2d = ScreenDrawList::new();
    let mut text = ScreenDrawList::new();
    view.begin_frame();
    view.render(&mut scene, &mut overlay_2d, &mut text);
    println!(
        "frame: {} scene commands, {} overlay commands",
        scene.layer(Layer::Scene).len(),
        scene.layer(Layer::Overlay).len()
    );

    gizmo.unbind()?;
    Ok(())
}
