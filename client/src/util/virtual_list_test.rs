use super::*;

fn msg(id: &str, content: &str) -> Message {
    Message::user(id, content, "2024-01-01T00:00:00Z")
}

fn messages(n: usize) -> Vec<Message> {
    (0..n).map(|i| msg(&format!("m{i}"), &format!("body {i}"))).collect()
}

fn list_of(n: usize) -> VirtualList {
    let mut list = VirtualList::default();
    list.sync_messages(&messages(n));
    list
}

// =============================================================
// Sizes and offsets
// =============================================================

#[test]
fn unmeasured_rows_use_estimate_plus_gap() {
    let list = list_of(3);
    assert_eq!(list.item_size(0), ESTIMATED_HEIGHT + GAP);
    assert_eq!(list.offset_of(2), 2.0 * (ESTIMATED_HEIGHT + GAP));
    assert_eq!(list.total_height(), 3.0 * (ESTIMATED_HEIGHT + GAP));
}

#[test]
fn reported_height_shifts_every_later_row_without_drift() {
    let mut list = list_of(5);
    assert!(list.report_height(1, 240.0));
    assert!(list.report_height(3, 60.0));

    let expected_4 = (ESTIMATED_HEIGHT + GAP) + (240.0 + GAP) + (ESTIMATED_HEIGHT + GAP) + (60.0 + GAP);
    assert_eq!(list.offset_of(4), expected_4);
    assert_eq!(list.offset_of(2), ESTIMATED_HEIGHT + GAP + 240.0 + GAP);
}

#[test]
fn offset_of_next_row_is_sum_of_prior_sizes() {
    let mut list = list_of(8);
    for (i, h) in [(0, 40.0), (2, 310.5), (5, 77.0), (7, 12.0)] {
        list.report_height(i, h);
    }
    for k in 0..8 {
        let sum: f64 = (0..=k).map(|i| list.measured(i).unwrap_or(ESTIMATED_HEIGHT) + GAP).sum();
        assert!((list.offset_of(k + 1) - sum).abs() < 1e-9, "row {k}");
    }
}

#[test]
fn unchanged_height_reports_no_change() {
    let mut list = list_of(2);
    assert!(list.report_height(0, 120.0));
    assert!(!list.report_height(0, 120.2));
    assert!(list.report_height(0, 150.0));
}

#[test]
fn out_of_range_or_invalid_height_is_ignored() {
    let mut list = list_of(2);
    assert!(!list.report_height(9, 50.0));
    assert!(!list.report_height(0, f64::NAN));
    assert!(!list.report_height(0, -1.0));
    assert_eq!(list.total_height(), 2.0 * (ESTIMATED_HEIGHT + GAP));
}

// =============================================================
// Message sync
// =============================================================

#[test]
fn longer_sequence_requests_auto_scroll() {
    let mut list = list_of(2);
    let outcome = list.sync_messages(&messages(3));
    assert!(outcome.should_auto_scroll());
    assert_eq!(outcome.first_changed, Some(2));
}

#[test]
fn content_edit_does_not_auto_scroll_and_drops_measurement() {
    let mut list = list_of(3);
    list.report_height(1, 300.0);
    list.report_height(2, 50.0);

    let mut edited = messages(3);
    edited[1].content = "rewritten".to_owned();
    let outcome = list.sync_messages(&edited);

    assert!(!outcome.should_auto_scroll());
    assert_eq!(outcome.first_changed, Some(1));
    assert_eq!(list.measured(1), None);
    assert_eq!(list.measured(2), Some(50.0));
    assert_eq!(list.offset_of(3), 2.0 * (ESTIMATED_HEIGHT + GAP) + 50.0 + GAP);
}

#[test]
fn identical_sequence_keeps_measurements() {
    let mut list = list_of(2);
    list.report_height(0, 42.0);
    let outcome = list.sync_messages(&messages(2));
    assert!(!outcome.grew);
    assert_eq!(outcome.first_changed, None);
    assert_eq!(list.measured(0), Some(42.0));
}

#[test]
fn shorter_sequence_truncates_and_does_not_scroll() {
    let mut list = list_of(4);
    let outcome = list.sync_messages(&messages(2));
    assert!(!outcome.grew);
    assert_eq!(list.len(), 2);
    assert_eq!(list.total_height(), 2.0 * (ESTIMATED_HEIGHT + GAP));
}

#[test]
fn new_conversation_replaces_rows() {
    let mut list = list_of(3);
    list.report_height(2, 999.0);
    let other: Vec<_> = (0..3).map(|i| msg(&format!("x{i}"), "other")).collect();
    let outcome = list.sync_messages(&other);
    assert!(!outcome.grew);
    assert_eq!(outcome.first_changed, Some(0));
    assert_eq!(list.measured(2), None);
}

// =============================================================
// Scrolling
// =============================================================

#[test]
fn scrolling_down_resets_from_estimated_first_visible() {
    let mut list = list_of(10);
    assert_eq!(list.on_scroll(250.0), Some(2));
    assert_eq!(list.on_scroll(260.0), Some(2));
}

#[test]
fn scrolling_up_does_nothing() {
    let mut list = list_of(10);
    list.on_scroll(500.0);
    assert_eq!(list.on_scroll(100.0), None);
    assert_eq!(list.on_scroll(100.0), None);
}

#[test]
fn estimated_first_visible_floors() {
    assert_eq!(estimated_first_visible(0.0), 0);
    assert_eq!(estimated_first_visible(99.9), 0);
    assert_eq!(estimated_first_visible(100.0), 1);
    assert_eq!(estimated_first_visible(-40.0), 0);
}

#[test]
fn visible_range_covers_viewport_plus_overscan() {
    let list = list_of(50);
    // Rows are 125px; a 300px viewport at 1250 shows rows 10..=12.
    let range = list.visible_range(1250.0, 300.0);
    assert_eq!(range, (10 - OVERSCAN)..(13 + OVERSCAN));
}

#[test]
fn visible_range_clamps_at_edges() {
    let list = list_of(4);
    assert_eq!(list.visible_range(0.0, 10_000.0), 0..4);
    assert_eq!(VirtualList::default().visible_range(0.0, 500.0), 0..0);
    let beyond = list.visible_range(99_999.0, 100.0);
    assert_eq!(beyond.end, 4);
}

#[test]
fn scroll_to_end_aligns_last_row_with_viewport_end() {
    let mut list = list_of(4);
    list.report_height(3, 75.0);
    let total = 3.0 * (ESTIMATED_HEIGHT + GAP) + 75.0 + GAP;
    assert_eq!(list.scroll_to_end_offset(200.0), total - 200.0);
    assert_eq!(list_of(1).scroll_to_end_offset(500.0), 0.0);
}

// =============================================================
// Viewport
// =============================================================

fn measured_list(n: usize, height: f64) -> VirtualList {
    let mut list = list_of(n);
    for i in 0..n {
        list.report_height(i, height);
    }
    list
}

#[test]
fn unmeasured_viewport_uses_fallback() {
    let list = list_of(2);
    assert_eq!(list.viewport_height(), FALLBACK_VIEWPORT_HEIGHT);
}

#[test]
fn tall_viewport_renders_every_row_of_a_short_list() {
    let mut list = measured_list(14, 40.0);
    assert_eq!(list.total_height(), 910.0);
    assert_eq!(list.rendered_range(0.0), 0..13);

    assert!(list.set_viewport_height(1000.0));
    assert_eq!(list.rendered_range(0.0), 0..14);
}

#[test]
fn viewport_height_ignores_unusable_measurements() {
    let mut list = list_of(1);
    assert!(list.set_viewport_height(800.0));
    assert!(!list.set_viewport_height(800.2));
    assert!(!list.set_viewport_height(0.0));
    assert!(!list.set_viewport_height(f64::NAN));
    assert_eq!(list.viewport_height(), 800.0);
}
