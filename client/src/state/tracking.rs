//! PDF tracking list: filters, pagination, and routing a row to its next step.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rows come from `list_pdfs_states`. Selecting a row and pressing "Process"
//! routes by stage: OCR'd PDFs go to the finish view, uploaded-only PDFs
//! resume the import wizard at the OCR button.

#[cfg(test)]
#[path = "tracking_test.rs"]
mod tracking_test;

use wire::ApiError;
use wire::endpoints::PdfListQuery;
use wire::models::{PdfStateRow, PdfStatesPage, StatusFilter};

use super::paging::PageCursor;

/// Where processing a selected row leads. Both variants store `pdf_id` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowRoute {
    Finish { pdf_id: i64 },
    ResumeImport { pdf_id: i64 },
}

impl RowRoute {
    pub fn pdf_id(self) -> i64 {
        match self {
            Self::Finish { pdf_id } | Self::ResumeImport { pdf_id } => pdf_id,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TrackingState {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub status: StatusFilter,
    pub cursor: PageCursor,
    pub rows: Vec<PdfStateRow>,
    pub selected: Option<i64>,
    pub loading: bool,
    pub notice: Option<String>,
}

impl TrackingState {
    pub fn new() -> Self {
        let query = PdfListQuery::default();
        Self { brand: query.brand, category: query.category, ..Self::default() }
    }

    /// Query for the current filters and page.
    pub fn query(&self) -> PdfListQuery {
        PdfListQuery {
            page: self.cursor.page,
            name: self.name.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
            status: self.status,
        }
    }

    /// Any filter change starts over at page 1.
    pub fn filters_changed(&mut self) {
        self.cursor.reset();
        self.selected = None;
    }

    pub fn apply_page(&mut self, page: PdfStatesPage) {
        self.cursor.update(page.has_prev, page.has_next);
        self.rows = page.pdfs.unwrap_or_default();
        if self.selected.is_some_and(|id| !self.rows.iter().any(|r| r.pdf_id == id)) {
            self.selected = None;
        }
        self.loading = false;
    }

    pub fn fail_page(&mut self, err: &ApiError) {
        self.rows.clear();
        self.cursor.update(false, false);
        self.loading = false;
        self.notice = Some(format!("Failed to load PDFs: {err}"));
    }

    /// Toggle selection of a row.
    pub fn select(&mut self, pdf_id: i64) {
        self.selected = if self.selected == Some(pdf_id) { None } else { Some(pdf_id) };
    }

    pub fn selected_row(&self) -> Option<&PdfStateRow> {
        let id = self.selected?;
        self.rows.iter().find(|r| r.pdf_id == id)
    }

    /// # Errors
    ///
    /// Validation error when nothing is selected or the PDF has no stage yet.
    pub fn process_selected(&self) -> Result<RowRoute, ApiError> {
        let Some(row) = self.selected_row() else {
            return Err(ApiError::validation("Select a PDF first."));
        };
        route_for(row)
    }
}

/// # Errors
///
/// Validation error for rows whose scoring is below the first stage.
pub fn route_for(row: &PdfStateRow) -> Result<RowRoute, ApiError> {
    match row.pdf_scoring.unwrap_or(0) {
        s if s >= 2 => Ok(RowRoute::Finish { pdf_id: row.pdf_id }),
        1 => Ok(RowRoute::ResumeImport { pdf_id: row.pdf_id }),
        _ => Err(ApiError::validation(
            "PDF must be at least OCR processed before importing information.",
        )),
    }
}

/// Brand or category shown for a row.
pub fn or_unknown(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("Unknown")
}
