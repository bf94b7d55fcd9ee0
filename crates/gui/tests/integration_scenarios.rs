//! End-to-end editing scenarios driven by simulated pointer rays.

use glam::Vec3;

use cellgrid_lib::annotation::DragTarget;
use cellgrid_lib::fixtures;
use cellgrid_lib::harness::TestHarness;
use cellgrid_lib::hit_test::Hittable;
use cellgrid_lib::viewport::picking::Ray;

const RED: &str = "#ff0000";

/// Off both diagonals of quad (2, 2) on the 5x5 lattice
fn over_center_quad() -> Ray {
    TestHarness::ray_down(0.3, 0.6)
}

#[test]
fn test_place_then_remove_single_cell() {
    let mut h = TestHarness::with_grid(5);
    let key = h.place_cell(2, 2, 0, RED).unwrap();
    assert_eq!(key, "2,2,0,#ff0000");

    let v = h.validate_cell(&key).unwrap();
    assert_eq!(v.vertex_count(), 8);
    assert!(h
        .cell(&key)
        .unwrap()
        .solid
        .positions()
        .all(|p| p.y == 0.0 || p.y == 0.5));
    assert_eq!(h.cell(&key).unwrap().outline.segment_count(), 12);

    h.remove_cells(2, 2, 0);
    assert!(!h.has_cell(&key));
    assert_eq!(h.cell_count(), 0);
}

#[test]
fn test_clicks_stack_cells() {
    let mut h = TestHarness::with_grid(5);

    let first = h.click_place(&over_center_quad(), RED).unwrap();
    assert_eq!(first.as_deref(), Some("2,2,0,#ff0000"));

    // Each click now lands on the top face of the highest cell
    let second = h.click_place(&over_center_quad(), RED).unwrap();
    assert_eq!(second.as_deref(), Some("2,2,1,#ff0000"));
    let third = h.click_place(&over_center_quad(), "#00ff00").unwrap();
    assert_eq!(third.as_deref(), Some("2,2,2,#00ff00"));

    assert_eq!(h.cell_count(), 3);
    let top = h.validate_cell("2,2,2,#00ff00").unwrap();
    assert_eq!(top.heights(), vec![1.0, 1.5]);
}

#[test]
fn test_click_on_side_face_places_neighbour() {
    let mut h = TestHarness::with_grid(5);
    h.place_cell(2, 2, 0, RED).unwrap();

    // Horizontal ray from +x hits the x = 1 face of quad (2, 2)
    let ray = Ray::new(Vec3::new(5.0, 0.25, 0.6), Vec3::NEG_X);
    match h.pick(&ray) {
        Some(Hittable::CellSurface { normal, .. }) => assert!((normal - Vec3::X).length() < 1e-5),
        other => panic!("expected a cell face, got {other:?}"),
    }

    let key = h.click_place(&ray, RED).unwrap();
    assert_eq!(key.as_deref(), Some("3,2,0,#ff0000"));
}

#[test]
fn test_click_on_bottom_face_places_below() {
    let mut h = TestHarness::with_grid(5);
    h.place_cell(2, 2, 2, RED).unwrap();

    // Looking up at the underside of a raised cell: the insertion point
    // lands in the layer below it
    let ray = Ray::new(Vec3::new(0.3, -5.0, 0.6), Vec3::Y);
    let key = h.click_place(&ray, RED).unwrap();
    assert_eq!(key.as_deref(), Some("2,2,1,#ff0000"));
}

#[test]
fn test_click_lattice_point_places_on_base() {
    let mut h = TestHarness::with_grid(5);
    // Straight onto lattice point (3, 3) at world (1, 0, 1)
    let ray = TestHarness::ray_down(1.0, 1.0);
    assert!(matches!(h.pick(&ray), Some(Hittable::LatticePoint { .. })));

    let key = h.click_place(&ray, RED).unwrap().unwrap();
    // Shared corners resolve to the lowest-index quad
    assert_eq!(key, "2,2,0,#ff0000");
}

#[test]
fn test_click_remove_top_of_stack() {
    let mut h = TestHarness::with_grid(5);
    for layer in 0..3 {
        h.place_cell(2, 2, layer, RED).unwrap();
    }
    let removed = h.click_remove(&over_center_quad());
    assert_eq!(removed, vec!["2,2,2,#ff0000".to_string()]);
    assert_eq!(h.cell_count(), 2);

    // Missing everything removes nothing
    assert!(h.click_remove(&TestHarness::ray_down(30.0, 30.0)).is_empty());
}

#[test]
fn test_click_outside_grid_places_nothing() {
    let mut h = TestHarness::with_grid(5);
    assert_eq!(h.click_place(&TestHarness::ray_down(3.5, 0.0), RED).unwrap(), None);
    assert_eq!(h.cell_count(), 0);
    assert!(!h.undo());
}

#[test]
fn test_drag_line_handle_moves_both_endpoints() {
    let mut h = TestHarness::with_grid(5);
    h.create_line(&[(0, 0), (4, 0)]).unwrap();
    // Handle sits midway at (0, 0, -2)
    let handle = h.scene.lines()[0].handle.position;
    assert_eq!(handle, Vec3::new(0.0, 0.0, -2.0));

    let ray = TestHarness::ray_down(handle.x, handle.z);
    let (index, target) = h.scene.pick_line_marker(&ray).unwrap();
    assert_eq!((index, target), (0, DragTarget::Handle));

    h.scene.begin_line_drag(index, target).unwrap();
    h.scene.drag_line_to(Vec3::new(0.0, 0.0, -1.0)).unwrap();
    h.scene.drag_line_to(Vec3::new(0.5, 0.0, -1.0)).unwrap();
    h.scene.end_line_drag();
    h.resync();

    let line = &h.scene.lines()[0];
    assert_eq!(line.endpoints[0].position, Vec3::new(-1.5, 0.0, -1.0));
    assert_eq!(line.endpoints[1].position, Vec3::new(2.5, 0.0, -1.0));
    assert_eq!(line.handle.position, Vec3::new(0.5, 0.0, -1.0));

    // One undo step for the whole drag
    assert!(h.undo());
    assert_eq!(h.scene.lines()[0].endpoints[0].position, Vec3::new(-2.0, 0.0, -2.0));
}

#[test]
fn test_drag_endpoint_recentres_handle() {
    let mut h = TestHarness::with_grid(5);
    h.create_line(&[(0, 0), (1, 1), (2, 2)]).unwrap();

    let start = h.scene.lines()[0].endpoints[0].position;
    let (index, target) = h
        .scene
        .pick_line_marker(&TestHarness::ray_down(start.x, start.z))
        .unwrap();
    assert_eq!(target, DragTarget::Start);

    h.scene.begin_line_drag(index, target).unwrap();
    h.scene.drag_line_to(Vec3::new(-2.0, 0.0, 2.0)).unwrap();
    h.scene.end_line_drag();

    let line = &h.scene.lines()[0];
    assert_eq!(line.polyline, vec![Vec3::new(-2.0, 0.0, 2.0), Vec3::ZERO]);
    assert_eq!(line.handle.position, Vec3::new(-1.0, 0.0, 1.0));
}

#[test]
fn test_dragging_point_reshapes_cell_once_undoable() {
    let mut h = TestHarness::with_grid(5);
    h.place_cell(2, 2, 0, RED).unwrap();
    let index = h.scene.grid().index_of(3, 3).unwrap();

    h.scene.begin_drag();
    for step in 1..=4 {
        let offset = step as f32 * 0.1;
        h.scene
            .drag_point_to(index, Vec3::new(1.0 + offset, 0.0, 1.0 + offset))
            .unwrap();
        h.resync();
    }

    let cell = h.cell("2,2,0,#ff0000").unwrap();
    assert!(cell
        .solid
        .positions()
        .any(|p| (p - Vec3::new(1.4, 0.0, 1.4)).length() < 1e-5));

    assert!(h.undo());
    h.resync();
    let cell = h.cell("2,2,0,#ff0000").unwrap();
    assert!(cell.solid.positions().any(|p| p == Vec3::new(1.0, 0.5, 1.0)));
}

#[test]
fn test_fixture_scene_loads() {
    let mut h = TestHarness::new();
    h.load_scene_json(&fixtures::to_json(&fixtures::single_cell_scene()))
        .unwrap();
    assert_eq!(h.cell_keys(), vec!["2,2,0,#ff0000".to_string()]);
    assert!(h.validate_cell("2,2,0,#ff0000").unwrap().validate_all().is_empty());
}
