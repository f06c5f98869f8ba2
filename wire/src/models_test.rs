use super::*;
use crate::envelope::decode_data;

// =============================================================
// Conversation detail
// =============================================================

#[test]
fn conversation_pairs_flatten_to_request_then_response() {
    let body = r#"{"success":true,"data":{"title":"Oven","device_id":7,"pairs":[
        {"id":3,"request":"How hot?","response":"250C","created_time":"2024-01-01T10:00:00Z","images":[11,12]}
    ]}}"#;
    let detail: ConversationDetail = decode_data(200, body).expect("detail");
    let messages = detail.messages();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, "req-3");
    assert_eq!(messages[0].sender, Sender::User);
    assert!(messages[0].images_ids.is_empty());
    assert_eq!(messages[1].id, "res-3");
    assert!(messages[1].is_ai());
    assert_eq!(messages[1].images_ids, vec![11, 12]);
    assert_eq!(detail.device_id, Some(7));
}

#[test]
fn conversation_null_pairs_are_empty() {
    let detail: ConversationDetail =
        decode_data(200, r#"{"success":true,"data":{"title":"x","pairs":null}}"#).expect("detail");
    assert!(detail.messages().is_empty());
}

#[test]
fn summary_without_title_is_untitled() {
    let summary = ConversationSummary {
        conversation_id: "c1".to_owned(),
        conversation_title: Some("  ".to_owned()),
        device_name: None,
        conversation_updated_time: None,
    };
    let conversation = summary.into_conversation();
    assert_eq!(conversation.title, "Untitled");
    assert_eq!(conversation.device_name, "");
}

#[test]
fn conversation_list_reads_status_envelope() {
    let body = r#"{"status":true,"data":{"conversations":[
        {"conversation_id":"a","conversation_title":"First","device_name":"Oven","conversation_updated_time":"t"}
    ]}}"#;
    let list: ConversationList = decode_data(200, body).expect("list");
    let first = list.conversations.unwrap_or_default().remove(0);
    assert_eq!(first.into_conversation().title, "First");
}

// =============================================================
// Requests
// =============================================================

#[test]
fn storing_request_omits_missing_device() {
    let body = serde_json::to_value(StoreConversationRequest { device_id: None, query: "hi".to_owned() })
        .expect("json");
    assert_eq!(body, serde_json::json!({ "query": "hi" }));
}

#[test]
fn rag_request_includes_present_fields_only() {
    let body = serde_json::to_value(RagQueryRequest {
        query: "q".to_owned(),
        conversation_id: Some("c".to_owned()),
        device_id: None,
    })
    .expect("json");
    assert_eq!(body, serde_json::json!({ "query": "q", "conversation_id": "c" }));
}

#[test]
fn take_note_uses_backend_field_name() {
    let body = serde_json::to_value(TakeNoteRequest { pair_id: 4, title: "t".to_owned() }).expect("json");
    assert_eq!(body["requestresponsepairid"], 4);
}

#[test]
fn rag_answer_becomes_ai_message_keyed_by_pair() {
    let answer: RagAnswer =
        serde_json::from_str(r#"{"pair_id":-1,"response":"ok","images_ids":null}"#).expect("answer");
    let message = answer.into_message("2024-01-01T00:00:00Z");
    assert_eq!(message.id, "-1");
    assert!(message.is_ai());
    assert!(message.images_ids.is_empty());
}

// =============================================================
// Devices and PDF pipeline
// =============================================================

#[test]
fn brands_and_types_accepts_both_type_keys() {
    let a: BrandsAndTypes = serde_json::from_str(r#"{"brands":[],"deviceTypes":[{"id":1,"label":"Oven"}]}"#)
        .expect("camel");
    let b: BrandsAndTypes =
        serde_json::from_str(r#"{"brands":null,"devices":[{"id":1,"label":"Oven"}]}"#).expect("alias");
    assert_eq!(a.device_types, b.device_types);
}

#[test]
fn initial_state_flattens_first_page() {
    let body = r#"{"pdf_gcs_signed_read_url":"u","pdf_ocr_flag":true,"pdf_name":"m","pdf_number_of_pages":4,
        "images":[{"id":9,"alt":"knob","modified":false}],"page_paragraph":{"id":2,"context":"text","modified":true}}"#;
    let state: PdfInitialState = serde_json::from_str(body).expect("state");
    assert!(state.pdf_ocr_flag);
    assert_eq!(state.pdf_number_of_pages, 4);
    assert_eq!(state.first_page.images().len(), 1);
    assert_eq!(state.first_page.page_paragraph.and_then(|p| p.id), Some(2));
}

#[test]
fn embedding_all_done_requires_nonempty() {
    assert!(!EmbeddingStatuses::default().all_done());
    let statuses = EmbeddingStatuses {
        embedded_statuses: Some(vec![
            PageEmbeddingStatus { page_number: 1, done: true },
            PageEmbeddingStatus { page_number: 2, done: false },
        ]),
    };
    assert!(!statuses.all_done());
}

#[test]
fn stage_maps_scoring_values() {
    assert_eq!(PdfStage::from_scoring(1), PdfStage::NeedsOcr);
    assert_eq!(PdfStage::from_scoring(2), PdfStage::NotFullyEmbedded);
    assert_eq!(PdfStage::from_scoring(3), PdfStage::Complete);
    assert_eq!(PdfStage::from_scoring(0), PdfStage::NeedsOcr);
}

#[test]
fn scoring_percent_rounds() {
    assert_eq!(scoring_percent(1), 33);
    assert_eq!(scoring_percent(2), 67);
    assert_eq!(scoring_percent(3), 100);
    assert_eq!(scoring_percent(9), 100);
}

#[test]
fn status_filter_ranges() {
    assert_eq!(StatusFilter::All.scoring_range(), (1, 3));
    assert_eq!(StatusFilter::InProgress.scoring_range(), (1, 2));
    assert_eq!(StatusFilter::Complete.scoring_range(), (3, 3));
    assert_eq!(StatusFilter::parse("bogus"), StatusFilter::All);
    assert_eq!(StatusFilter::parse(StatusFilter::InProgress.as_str()), StatusFilter::InProgress);
}

#[test]
fn pdf_row_reads_odd_field_names() {
    let body = r#"{"status":true,"data":{"pdfs":[{"pdf_id":5,"device_id":8,"pdf_lastModified":"t",
        "pdf_label":"","pdf_scoring":2}],"prevPage":false,"nextPage":true}}"#;
    let page: PdfStatesPage = decode_data(200, body).expect("page");
    let row = &page.rows()[0];
    assert_eq!(row.display_name(), "Device_8.pdf");
    assert_eq!(row.stage(), PdfStage::NotFullyEmbedded);
    assert_eq!(row.last_modified.as_deref(), Some("t"));
    assert!(page.has_next);
    assert!(!page.has_prev);
}

#[test]
fn chat_devices_page_reads_paging_flags() {
    let body = r#"{"devices":[{"device_id":1,"device_name":"Oven"}],"PrevPageExisted":true,"NextPageExisted":false}"#;
    let page: ChatDevicesPage = serde_json::from_str(body).expect("page");
    assert!(page.has_prev);
    assert_eq!(page.devices.unwrap_or_default()[0].device_name, "Oven");
}
