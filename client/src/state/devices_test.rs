use super::*;
use wire::models::{Brand, DeviceType};

fn device(id: i64) -> ChatDevice {
    ChatDevice { device_id: id, device_name: format!("Device {id}"), brand: None, category: None }
}

#[test]
fn default_search_uses_wildcards() {
    let state = DevicePickerState::default();
    assert_eq!(state.search(), DeviceSearch::default());
}

#[test]
fn filters_flow_into_search_and_reset_page() {
    let mut state = DevicePickerState::default();
    state.apply_page(ChatDevicesPage { devices: Some(vec![device(1)]), has_prev: false, has_next: true });
    assert!(state.cursor.next());
    state.set_brand(Some("Acme".to_owned()));
    let search = state.search();
    assert_eq!(search.page, 1);
    assert_eq!(search.brand, "Acme");
    assert_eq!(search.category, "*");
}

#[test]
fn clear_filters_restores_wildcards() {
    let mut state = DevicePickerState::default();
    state.set_brand(Some("Acme".to_owned()));
    state.set_category(Some("Oven".to_owned()));
    state.clear_filters();
    assert_eq!(state.search(), DeviceSearch::default());
}

#[test]
fn catalog_keeps_labels_only() {
    let mut state = DevicePickerState::default();
    state.set_catalog(&BrandsAndTypes {
        brands: Some(vec![Brand { id: 1, label: "Acme".to_owned() }]),
        device_types: Some(vec![DeviceType { id: 2, label: "Oven".to_owned() }]),
    });
    assert_eq!(state.brands, ["Acme"]);
    assert_eq!(state.categories, ["Oven"]);
}

#[test]
fn failed_search_shows_empty_page() {
    let mut state = DevicePickerState::default();
    state.apply_page(ChatDevicesPage { devices: Some(vec![device(1)]), has_prev: true, has_next: true });
    state.fail_page();
    assert!(state.devices.is_empty());
    assert!(!state.cursor.has_next);
    assert!(!state.cursor.has_prev);
}
