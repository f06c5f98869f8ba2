use super::*;

fn row(pdf_id: i64, scoring: Option<i64>) -> PdfStateRow {
    PdfStateRow {
        pdf_id,
        device_id: 4,
        last_modified: None,
        pdf_label: None,
        pdf_scoring: scoring,
        brand: None,
        category: Some("Oven".to_owned()),
    }
}

fn page(rows: Vec<PdfStateRow>, has_prev: bool, has_next: bool) -> PdfStatesPage {
    PdfStatesPage { pdfs: Some(rows), has_prev, has_next }
}

// =============================================================
// Query + paging
// =============================================================

#[test]
fn new_state_queries_everything_from_page_one() {
    let state = TrackingState::new();
    assert_eq!(state.query(), PdfListQuery::default());
}

#[test]
fn paging_follows_backend_flags() {
    let mut state = TrackingState::new();
    state.apply_page(page(vec![row(1, Some(1))], false, true));
    assert!(!state.cursor.prev());
    assert!(state.cursor.next());
    assert_eq!(state.query().page, 2);
    state.apply_page(page(vec![row(2, Some(2))], true, false));
    assert!(!state.cursor.next());
    assert!(state.cursor.prev());
    assert_eq!(state.query().page, 1);
}

#[test]
fn filter_change_resets_page_and_selection() {
    let mut state = TrackingState::new();
    state.apply_page(page(vec![row(1, Some(1))], false, true));
    state.cursor.next();
    state.select(1);
    state.status = StatusFilter::Complete;
    state.filters_changed();
    assert_eq!(state.query().page, 1);
    assert_eq!(state.query().status, StatusFilter::Complete);
    assert_eq!(state.selected, None);
}

#[test]
fn failed_load_empties_rows() {
    let mut state = TrackingState::new();
    state.apply_page(page(vec![row(1, Some(1))], false, true));
    state.fail_page(&ApiError::Transport("down".to_owned()));
    assert!(state.rows.is_empty());
    assert!(!state.cursor.has_next);
    assert!(state.notice.is_some());
}

// =============================================================
// Selection + routing
// =============================================================

#[test]
fn select_toggles() {
    let mut state = TrackingState::new();
    state.apply_page(page(vec![row(1, Some(1)), row(2, Some(3))], false, false));
    state.select(2);
    assert_eq!(state.selected_row().map(|r| r.pdf_id), Some(2));
    state.select(2);
    assert_eq!(state.selected, None);
}

#[test]
fn selection_dropped_when_row_disappears() {
    let mut state = TrackingState::new();
    state.apply_page(page(vec![row(1, Some(1))], false, false));
    state.select(1);
    state.apply_page(page(vec![row(9, Some(1))], false, false));
    assert_eq!(state.selected, None);
}

#[test]
fn rows_route_by_stage() {
    assert_eq!(route_for(&row(5, Some(3))), Ok(RowRoute::Finish { pdf_id: 5 }));
    assert_eq!(route_for(&row(5, Some(2))), Ok(RowRoute::Finish { pdf_id: 5 }));
    assert_eq!(route_for(&row(5, Some(1))), Ok(RowRoute::ResumeImport { pdf_id: 5 }));
    assert!(route_for(&row(5, None)).is_err());
    assert!(route_for(&row(5, Some(0))).is_err());
}

#[test]
fn processing_without_selection_is_rejected() {
    let state = TrackingState::new();
    assert!(state.process_selected().is_err());
}

#[test]
fn unknown_fallback_for_blank_values() {
    assert_eq!(or_unknown(None), "Unknown");
    assert_eq!(or_unknown(Some("  ")), "Unknown");
    assert_eq!(or_unknown(Some("Acme")), "Acme");
}
