//! Client-portal device picker: paginated search that starts a device chat.

#[cfg(test)]
#[path = "devices_test.rs"]
mod devices_test;

use wire::endpoints::DeviceSearch;
use wire::models::{BrandsAndTypes, ChatDevice, ChatDevicesPage};

use super::paging::PageCursor;

#[derive(Clone, Debug, Default)]
pub struct DevicePickerState {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub cursor: PageCursor,
    pub devices: Vec<ChatDevice>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub loading: bool,
}

impl DevicePickerState {
    pub fn search(&self) -> DeviceSearch {
        let defaults = DeviceSearch::default();
        DeviceSearch {
            page: self.cursor.page,
            name: self.name.clone(),
            brand: self.brand.clone().unwrap_or(defaults.brand),
            category: self.category.clone().unwrap_or(defaults.category),
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.cursor.reset();
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.brand = brand;
        self.cursor.reset();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
        self.cursor.reset();
    }

    pub fn clear_filters(&mut self) {
        self.brand = None;
        self.category = None;
        self.cursor.reset();
    }

    pub fn set_catalog(&mut self, catalog: &BrandsAndTypes) {
        self.brands = catalog.brands.iter().flatten().map(|b| b.label.clone()).collect();
        self.categories = catalog.device_types.iter().flatten().map(|t| t.label.clone()).collect();
    }

    pub fn apply_page(&mut self, page: ChatDevicesPage) {
        self.cursor.update(page.has_prev, page.has_next);
        self.devices = page.devices.unwrap_or_default();
        self.loading = false;
    }

    /// Failed searches show an empty page.
    pub fn fail_page(&mut self) {
        self.devices.clear();
        self.cursor.update(false, false);
        self.loading = false;
    }
}
