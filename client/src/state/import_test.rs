use super::*;

#[test]
fn fresh_wizard_starts_at_device_step() {
    let state = ImportState::resume(None, Some(5));
    assert_eq!(state.step, ImportStep::Device);
    assert!(!state.show_ocr);
}

#[test]
fn scoring_one_with_pdf_resumes_at_ocr() {
    let state = ImportState::resume(Some("1"), Some(5));
    assert_eq!(state.step, ImportStep::Upload);
    assert!(state.show_ocr);
    assert_eq!(ImportState::resume(Some("1"), None).step, ImportStep::Device);
    assert_eq!(ImportState::resume(Some("2"), Some(5)).step, ImportStep::Device);
}

#[test]
fn catalog_fills_missing_lists_with_empty() {
    let mut state = ImportState::default();
    state.set_catalog(BrandsAndTypes {
        brands: Some(vec![Brand { id: 1, label: "Acme".to_owned() }]),
        device_types: None,
    });
    assert_eq!(state.brands.len(), 1);
    assert!(state.device_types.is_empty());
}

#[test]
fn device_form_needs_every_field() {
    let mut state = ImportState::default();
    state.label = "  ".to_owned();
    state.brand_id = Some(1);
    state.device_type_id = Some(2);
    assert!(state.device_form().is_err());
    state.label = " Oven ".to_owned();
    state.device_type_id = None;
    assert!(state.device_form().is_err());
    state.device_type_id = Some(2);
    let form = state.device_form().expect("complete");
    assert_eq!(form, DeviceForm { label: "Oven".to_owned(), brand_id: 1, device_type_id: 2 });
}

#[test]
fn saving_device_resets_upload_step() {
    let mut state = ImportState::resume(Some("1"), Some(5));
    state.device_saved();
    assert_eq!(state.step, ImportStep::Upload);
    assert!(!state.show_ocr);
}

#[test]
fn only_pdfs_are_accepted() {
    let mut state = ImportState::default();
    assert!(state.select_file("manual.docx", "application/msword").is_err());
    assert!(state.upload_name().is_err());
    state.select_file("manual.pdf", PDF_MIME).expect("pdf");
    assert_eq!(state.upload_name().expect("name"), "manual");
}

#[test]
fn pdf_name_strips_only_trailing_extension() {
    assert_eq!(default_pdf_name("a.pdf.pdf"), "a.pdf");
    assert_eq!(default_pdf_name("notes"), "notes");
    assert_eq!(default_pdf_name("X.PDF"), "X.PDF");
}

#[test]
fn ocr_button_disabled_while_agent_busy() {
    let mut state = ImportState::default();
    assert!(!state.can_run_ocr());
    state.uploaded();
    assert!(state.can_run_ocr());
    state.agent_extracting = true;
    assert!(!state.can_run_ocr());
}
