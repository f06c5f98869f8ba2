use super::*;

#[test]
fn join_normalizes_slashes() {
    assert_eq!(join("http://h:8080/", "/auth/login"), "http://h:8080/auth/login");
    assert_eq!(join("http://h:8080", "auth/login"), "http://h:8080/auth/login");
}

#[test]
fn query_encodes_values() {
    let path = Query::new().param("label", "Oven & Grill").to_path("/x");
    assert_eq!(path, "/x?label=Oven%20%26%20Grill");
}

#[test]
fn empty_query_keeps_bare_path() {
    assert_eq!(Query::new().to_path("/x"), "/x");
}

#[test]
fn wildcard_filter_maps_to_empty() {
    assert_eq!(filter_value("*"), "");
    assert_eq!(filter_value(" Bosch "), "Bosch");
}

#[test]
fn pdf_state_path_carries_page() {
    assert_eq!(pdf_state(5, 3), "/pdf_process/get_pdf_state?pdf_id=5&page_number=3");
}

#[test]
fn conversation_id_is_encoded() {
    assert_eq!(conversation("a b"), "/conversation/a%20b");
}

#[test]
fn pdf_list_default_query() {
    assert_eq!(
        PdfListQuery::default().to_path(),
        "/pdf_process/list_pdfs_states?offset=1&nameQuery=&brand=&category=&sort=scoring&min_scoring=1&max_scoring=3"
    );
}

#[test]
fn pdf_list_in_progress_filter_and_page_floor() {
    let query = PdfListQuery {
        page: 0,
        name: " manual ".to_owned(),
        brand: "Bosch".to_owned(),
        category: "*".to_owned(),
        status: StatusFilter::InProgress,
    };
    let path = query.to_path();
    assert!(path.contains("offset=1&"));
    assert!(path.contains("nameQuery=manual&brand=Bosch&category=&"));
    assert!(path.ends_with("min_scoring=1&max_scoring=2"));
}

#[test]
fn device_search_path() {
    let search = DeviceSearch { page: 2, name: "oven".to_owned(), ..DeviceSearch::default() };
    assert_eq!(search.to_path(), "/pdf_process/devices_for_chat?offset=2&name=oven&brand=&category=");
}
