mod common;

use common::{add_cube, screen_of, view_looking_down_z, EventLog, Marker, Panel};
use tgizmo::prelude::*;

#[test]
fn test_hover_moves_fire_one_enter_and_leave_per_transition() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    let a = add_cube(&mut view, "a", Vector3::new(-1.5, 0.0, 0.0), &log);
    let b = add_cube(&mut view, "b", Vector3::new(1.5, 0.0, 0.0), &log);

    let (ax, ay) = screen_of(&view, Vector3::new(-1.5, 0.0, 0.0));
    let (bx, by) = screen_of(&view, Vector3::new(1.5, 0.0, 0.0));

    view.mouse_move(&PointerEvent::hover(ax, ay));
    view.mouse_move(&PointerEvent::hover(ax + 1.0, ay));
    assert_eq!(view.hovered_item(), Some(a));
    view.mouse_move(&PointerEvent::hover(bx, by));
    view.mouse_move(&PointerEvent::hover(bx, by + 1.0));
    assert_eq!(view.hovered_item(), Some(b));
    view.mouse_move(&PointerEvent::hover(10.0, 10.0));
    view.mouse_move(&PointerEvent::hover(12.0, 10.0));
    assert_eq!(view.hovered_item(), None);

    assert_eq!(*log.borrow(), vec!["enter a", "leave a", "enter b", "leave b"]);
}

#[test]
fn test_screen_layer_beats_nearer_scene_geometry() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    // cube right in front of the camera
    add_cube(&mut view, "near", Vector3::new(0.0, 0.0, 8.0), &log);
    let panel = view.create_node(
        "panel",
        Box::new(Panel {
            min: Vector2::new(300.0, 220.0),
            max: Vector2::new(340.0, 260.0),
        }),
    );
    view.add_node(panel).unwrap();

    let result = view.pick(320.0, 240.0);
    assert_eq!(result.layer, Some(Layer::Screen));
    assert_eq!(result.nodes(), vec![panel]);
}

#[test]
fn test_nearer_cube_is_picked_first() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    let far = add_cube(&mut view, "far", Vector3::new(0.0, 0.0, -2.0), &log);
    let near = add_cube(&mut view, "near", Vector3::new(0.0, 0.0, 2.0), &log);

    let result = view.pick(320.0, 240.0);
    assert_eq!(result.layer, Some(Layer::Scene));
    assert_eq!(result.nodes(), vec![near, far]);
    assert!(result.hits[0].depth < result.hits[1].depth);
}

#[test]
fn test_hiding_a_parent_hides_its_subtree_from_picking() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    let group = view.create_node("group", Box::new(Group));
    view.add_node(group).unwrap();
    let cube = add_cube(&mut view, "a", Vector3::zero(), &log);
    view.add_child(group, cube).unwrap();
    assert_eq!(view.roots(), &[group]);
    assert_eq!(view.pick(320.0, 240.0).nearest(), Some(cube));

    view.set_visible(group, false).unwrap();
    assert!(!view.scene().node(cube).unwrap().is_visible());
    assert!(view.pick(320.0, 240.0).is_empty());
}

#[test]
fn test_detaching_the_hovered_node_clears_hover() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    let group = view.create_node("group", Box::new(Group));
    view.add_node(group).unwrap();
    let cube = add_cube(&mut view, "a", Vector3::zero(), &log);
    view.add_child(group, cube).unwrap();

    view.mouse_move(&PointerEvent::hover(320.0, 240.0));
    view.mouse_press(&PointerEvent::left(320.0, 240.0));
    assert_eq!(view.hovered_item(), Some(cube));
    assert_eq!(view.captured_item(), Some(cube));

    assert!(view.remove_child(group, cube).unwrap());
    assert_eq!(view.hovered_item(), None);
    assert_eq!(view.captured_item(), None);
    assert_eq!(view.picked_item(), None);
}

#[test]
fn test_queued_events_are_handled_in_order() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    let cube = add_cube(&mut view, "a", Vector3::zero(), &log);

    let (sender, queue) = tgizmo::input::channel();
    sender.send(InputEvent::MouseMove(PointerEvent::hover(320.0, 240.0))).unwrap();
    sender.send(InputEvent::MousePress(PointerEvent::left(320.0, 240.0))).unwrap();
    assert_eq!(queue.drain(&mut view), 2);

    assert_eq!(view.hovered_item(), Some(cube));
    assert_eq!(view.picked_item(), Some(cube));
    assert_eq!(*log.borrow(), vec!["enter a", "select a"]);
}

#[test]
fn test_overlay_beats_nearer_scene_geometry() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    add_cube(&mut view, "near", Vector3::new(0.0, 0.0, 3.0), &log);
    let marker = view.create_node(
        "marker",
        Box::new(Marker {
            center: Vector3::new(0.0, 0.0, -3.0),
            side: 0.5,
        }),
    );
    view.add_node(marker).unwrap();

    let result = view.pick(320.0, 240.0);
    assert_eq!(result.layer, Some(Layer::Overlay));
    assert_eq!(result.nodes(), vec![marker]);

    // same depth as the cube
    view.destroy_node(marker).unwrap();
    let level = view.create_node(
        "level",
        Box::new(Marker {
            center: Vector3::new(0.0, 0.0, 3.0),
            side: 0.5,
        }),
    );
    view.add_node(level).unwrap();
    view.mouse_move(&PointerEvent::hover(320.0, 240.0));
    assert_eq!(view.hovered_item(), Some(level));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_failed_add_child_leaves_the_view_unchanged() {
    let log = EventLog::default();
    let mut view = view_looking_down_z(10.0);
    let group = view.create_node("group", Box::new(Group));
    view.add_node(group).unwrap();
    let cube = add_cube(&mut view, "a", Vector3::zero(), &log);
    view.add_child(group, cube).unwrap();
    let before = view.pick(320.0, 240.0);
    assert_eq!(before.nearest(), Some(cube));

    let err = view.add_child(cube, group).unwrap_err();
    assert_eq!(err, SceneError::CycleDetected { parent: cube, child: group });
    assert_eq!(view.roots(), &[group]);
    assert!(view.scene().node(group).unwrap().is_in_view());
    assert_eq!(view.scene().node(cube).unwrap().parent(), Some(group));
    assert_eq!(view.pick(320.0, 240.0), before);

    // a stale child is rejected the same way
    let gone = view.create_node("gone", Box::new(Group));
    view.destroy_node(gone).unwrap();
    assert_eq!(view.add_child(group, gone), Err(SceneError::StaleNode(gone)));
    assert_eq!(view.roots(), &[group]);
}
