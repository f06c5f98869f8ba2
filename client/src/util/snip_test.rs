use super::*;

fn viewer() -> ViewerGeometry {
    ViewerGeometry {
        left: 100.0,
        top: 50.0,
        width: 620.0,
        height: 820.0,
        scroll_left: 0.0,
        scroll_top: 400.0,
        client_width: 600.0,
        client_height: 800.0,
    }
}

fn armed() -> SnipCapture {
    let mut capture = SnipCapture::default();
    capture.arm();
    capture
}

// =============================================================
// Coordinates
// =============================================================

#[test]
fn client_points_map_to_scrolled_content() {
    let p = viewer().to_content(150.0, 60.0);
    assert_eq!(p, Point { x: 50.0, y: 410.0 });
}

#[test]
fn clamp_keeps_points_inside_visible_content() {
    let g = viewer();
    assert_eq!(g.clamp(Point { x: -20.0, y: 100.0 }), Point { x: 0.0, y: 400.0 });
    assert_eq!(g.clamp(Point { x: 900.0, y: 2000.0 }), Point { x: 600.0, y: 1200.0 });
}

// =============================================================
// State machine
// =============================================================

#[test]
fn press_requires_arming() {
    let mut capture = SnipCapture::default();
    assert!(!capture.press(&viewer(), 200.0, 200.0));
    assert_eq!(capture, SnipCapture::Idle);
}

#[test]
fn press_outside_viewer_is_ignored() {
    let mut capture = armed();
    assert!(!capture.press(&viewer(), 10.0, 10.0));
    assert_eq!(capture, SnipCapture::Armed);
}

#[test]
fn drag_tracks_live_rectangle_in_any_direction() {
    let g = viewer();
    let mut capture = armed();
    assert!(capture.press(&g, 300.0, 300.0));
    let rect = capture.drag(&g, 250.0, 200.0).expect("dragging");
    assert_eq!(rect, SnipRect { x: 150.0, y: 550.0, width: 50.0, height: 100.0 });
    assert_eq!(capture.live_rect(), Some(rect));
}

#[test]
fn release_emits_one_record_when_large_enough() {
    let g = viewer();
    let mut capture = armed();
    capture.press(&g, 200.0, 100.0);
    capture.drag(&g, 260.0, 180.0);
    let rect = capture.release(&g, 260.0, 180.0).expect("record");
    assert_eq!(rect.width, 60.0);
    assert_eq!(rect.height, 80.0);
    assert_eq!(capture, SnipCapture::Idle);
    assert_eq!(capture.release(&g, 260.0, 180.0), None);
}

#[test]
fn release_below_threshold_emits_nothing() {
    let g = viewer();
    for (dx, dy) in [(4.0, 100.0), (100.0, 3.0), (5.0, 5.0), (5.0, 50.0)] {
        let mut capture = armed();
        capture.press(&g, 200.0, 200.0);
        assert_eq!(capture.release(&g, 200.0 + dx, 200.0 + dy), None, "dx={dx} dy={dy}");
        assert!(!capture.is_armed());
    }
}

#[test]
fn drag_beyond_viewer_is_clamped_and_non_negative() {
    let g = viewer();
    let mut capture = armed();
    capture.press(&g, 650.0, 800.0);
    let rect = capture.release(&g, 5_000.0, -5_000.0).expect("record");
    assert!(rect.width >= 0.0 && rect.height >= 0.0);
    assert!(rect.x >= g.scroll_left && rect.x + rect.width <= g.scroll_left + g.client_width);
    assert!(rect.y >= g.scroll_top && rect.y + rect.height <= g.scroll_top + g.client_height);
}

#[test]
fn arm_does_not_interrupt_drag() {
    let g = viewer();
    let mut capture = armed();
    capture.press(&g, 200.0, 200.0);
    capture.arm();
    assert!(capture.is_dragging());
    capture.cancel();
    assert_eq!(capture, SnipCapture::Idle);
}
