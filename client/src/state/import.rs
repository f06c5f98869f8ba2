//! Import wizard state: device registration, PDF upload, OCR trigger.
//!
//! SYSTEM CONTEXT
//! ==============
//! Step 1 registers a device (`new_device`) and stores its id in session
//! storage. Step 2 uploads a PDF through a signed URL and stores `pdf_id`;
//! the OCR button then appears and agent-status polling starts. A successful
//! OCR run hands off to the annotation workspace.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use wire::ApiError;
use wire::models::{Brand, BrandsAndTypes, DeviceType};

pub const PDF_MIME: &str = "application/pdf";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportStep {
    #[default]
    Device,
    Upload,
}

/// Validated step-1 input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceForm {
    pub label: String,
    pub brand_id: i64,
    pub device_type_id: i64,
}

#[derive(Clone, Debug, Default)]
pub struct ImportState {
    pub step: ImportStep,
    pub brands: Vec<Brand>,
    pub device_types: Vec<DeviceType>,
    pub label: String,
    pub brand_id: Option<i64>,
    pub device_type_id: Option<i64>,
    pub pdf_name: String,
    pub file_selected: bool,
    pub show_ocr: bool,
    pub agent_extracting: bool,
    pub busy: bool,
    pub notice: Option<String>,
}

impl ImportState {
    /// Initial state for the route. `?scoring=1` with a stored `pdf_id`
    /// resumes at the OCR button.
    pub fn resume(scoring: Option<&str>, stored_pdf_id: Option<i64>) -> Self {
        let mut state = Self::default();
        if scoring == Some("1") && stored_pdf_id.is_some() {
            state.step = ImportStep::Upload;
            state.show_ocr = true;
        }
        state
    }

    pub fn set_catalog(&mut self, catalog: BrandsAndTypes) {
        self.brands = catalog.brands.unwrap_or_default();
        self.device_types = catalog.device_types.unwrap_or_default();
    }

    /// # Errors
    ///
    /// Validation error when a required field is missing.
    pub fn device_form(&self) -> Result<DeviceForm, ApiError> {
        let label = self.label.trim();
        match (label.is_empty(), self.brand_id, self.device_type_id) {
            (false, Some(brand_id), Some(device_type_id)) => {
                Ok(DeviceForm { label: label.to_owned(), brand_id, device_type_id })
            }
            _ => Err(ApiError::validation("Please fill in all required device information")),
        }
    }

    /// Device registered: move to upload and forget any previous PDF.
    pub fn device_saved(&mut self) {
        self.step = ImportStep::Upload;
        self.show_ocr = false;
        self.file_selected = false;
        self.pdf_name.clear();
    }

    /// # Errors
    ///
    /// Validation error when the chosen file is not a PDF.
    pub fn select_file(&mut self, file_name: &str, mime: &str) -> Result<(), ApiError> {
        if mime != PDF_MIME {
            return Err(ApiError::validation("Please upload a PDF file"));
        }
        self.pdf_name = default_pdf_name(file_name);
        self.file_selected = true;
        Ok(())
    }

    /// # Errors
    ///
    /// Validation error when no file was chosen or the name is blank.
    pub fn upload_name(&self) -> Result<String, ApiError> {
        if !self.file_selected {
            return Err(ApiError::validation("No file selected for upload"));
        }
        let name = self.pdf_name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("PDF name cannot be empty"));
        }
        Ok(name.to_owned())
    }

    pub fn uploaded(&mut self) {
        self.show_ocr = true;
    }

    pub fn can_run_ocr(&self) -> bool {
        self.show_ocr && !self.agent_extracting && !self.busy
    }
}

/// File name without a trailing `.pdf`.
pub fn default_pdf_name(file_name: &str) -> String {
    file_name.strip_suffix(".pdf").unwrap_or(file_name).to_owned()
}
