//! PDF annotation workspace state: paging, zoom, paragraph and image labels.
//!
//! SYSTEM CONTEXT
//! ==============
//! The workspace is entered after OCR. It loads the initial state for the
//! session's `pdf_id`, then one page at a time. Paragraph and image captions
//! are pushed back with the `save_and_embed_*` endpoints.
//!
//! DESIGN
//! ======
//! Snipped regions become local [`ImageData`] records with `origin: Snipped`.
//! Their ids are allocated above every id on the page so they never collide
//! with backend image ids, and they are never sent to the embed endpoint.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use std::collections::HashSet;

use wire::ApiError;
use wire::endpoints::Query;
use wire::models::{EmbedImageAltRequest, EmbedParagraphRequest, PdfImage, PdfInitialState, PdfPageState};

use crate::util::lazy_image::PLACEHOLDER_SRC;
use crate::util::snip::{SnipCapture, SnipRect};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOrigin {
    Extracted,
    Snipped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub id: i64,
    pub src: String,
    pub description: String,
    pub checked: bool,
    pub origin: ImageOrigin,
}

impl ImageData {
    fn extracted(image: &PdfImage) -> Self {
        Self {
            id: image.id,
            src: format!("{PLACEHOLDER_SRC}?id={}", image.id),
            description: image.alt.clone(),
            checked: image.modified,
            origin: ImageOrigin::Extracted,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorkspaceState {
    pub pdf_id: i64,
    pub pdf_name: String,
    pub pdf_url: Option<String>,
    pub total_pages: u32,
    pub current_page: u32,
    pub paragraph: String,
    pub paragraph_id: Option<i64>,
    pub paragraph_modified: bool,
    pub paragraph_busy: bool,
    pub images: Vec<ImageData>,
    pub zoom: f64,
    pub snip: SnipCapture,
    pub ready: bool,
    busy_images: HashSet<i64>,
}

impl WorkspaceState {
    pub fn new(pdf_id: i64) -> Self {
        Self {
            pdf_id,
            pdf_name: String::new(),
            pdf_url: None,
            total_pages: 0,
            current_page: 1,
            paragraph: String::new(),
            paragraph_id: None,
            paragraph_modified: false,
            paragraph_busy: false,
            images: Vec::new(),
            zoom: 1.0,
            snip: SnipCapture::default(),
            ready: false,
            busy_images: HashSet::new(),
        }
    }

    /// Apply `get_pdf_initial_state`. Returns `false` when OCR has not run;
    /// the caller sends the user back to import.
    pub fn load_initial(&mut self, initial: &PdfInitialState) -> bool {
        if !initial.pdf_ocr_flag {
            return false;
        }
        self.pdf_name = initial.pdf_name.clone().unwrap_or_default();
        self.pdf_url = initial.pdf_gcs_signed_read_url.clone().filter(|u| !u.is_empty());
        self.total_pages = initial.pdf_number_of_pages;
        self.current_page = 1;
        self.apply_page(&initial.first_page);
        self.ready = true;
        true
    }

    /// Replace paragraph and images with one page's state.
    pub fn apply_page(&mut self, page: &PdfPageState) {
        match &page.page_paragraph {
            Some(p) => {
                self.paragraph.clone_from(&p.context);
                self.paragraph_id = p.id;
                self.paragraph_modified = p.modified;
            }
            None => {
                self.paragraph.clear();
                self.paragraph_id = None;
                self.paragraph_modified = false;
            }
        }
        self.images = page.images().iter().map(ImageData::extracted).collect();
        self.busy_images.clear();
        self.snip.cancel();
    }

    /// Page number from a `page_number` query value, if it is in range.
    pub fn requested_page(&self, raw: Option<&str>) -> Option<u32> {
        let page = raw?.trim().parse::<u32>().ok()?;
        (1..=self.total_pages).contains(&page).then_some(page)
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Move to `page`. Returns `true` when the page changed and must be loaded.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page == self.current_page || !(1..=self.total_pages).contains(&page) {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn is_last_page(&self) -> bool {
        self.total_pages > 0 && self.current_page == self.total_pages
    }

    pub fn can_view_processes(&self) -> bool {
        self.is_last_page() && self.paragraph_modified
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn zoom_reset(&mut self) {
        self.zoom = 1.0;
    }

    pub fn zoom_percent(&self) -> u32 {
        // Zoom stays within [MIN_ZOOM, MAX_ZOOM], so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.zoom * 100.0).round() as u32;
        percent
    }

    /// # Errors
    ///
    /// Validation error when the page has no paragraph id or a request is in flight.
    pub fn begin_paragraph_embed(&mut self) -> Result<EmbedParagraphRequest, ApiError> {
        let Some(id) = self.paragraph_id else {
            return Err(ApiError::validation("Paragraph ID missing!"));
        };
        if self.paragraph_busy {
            return Err(ApiError::validation("Paragraph is already being embedded."));
        }
        self.paragraph_busy = true;
        Ok(EmbedParagraphRequest { pdf_paragraph_id: id, context: self.paragraph.clone() })
    }

    pub fn finish_paragraph_embed(&mut self, ok: bool) {
        self.paragraph_busy = false;
        if ok {
            self.paragraph_modified = true;
        }
    }

    pub fn set_description(&mut self, image_id: i64, description: String) {
        if let Some(image) = self.images.iter_mut().find(|i| i.id == image_id) {
            image.description = description;
        }
    }

    pub fn is_image_busy(&self, image_id: i64) -> bool {
        self.busy_images.contains(&image_id)
    }

    /// # Errors
    ///
    /// Validation error for unknown or snipped images, blank descriptions, and
    /// images that already have a request in flight.
    pub fn begin_image_embed(&mut self, image_id: i64) -> Result<EmbedImageAltRequest, ApiError> {
        let Some(image) = self.images.iter().find(|i| i.id == image_id) else {
            return Err(ApiError::validation("Image not found."));
        };
        if image.description.trim().is_empty() {
            return Err(ApiError::validation("Image description required"));
        }
        if image.origin == ImageOrigin::Snipped {
            return Err(ApiError::validation("Snipped areas cannot be embedded yet."));
        }
        if !self.busy_images.insert(image_id) {
            return Err(ApiError::validation("Image is already being embedded."));
        }
        Ok(EmbedImageAltRequest { pdf_image_id: image_id, img_alt: image.description.clone() })
    }

    pub fn finish_image_embed(&mut self, image_id: i64, ok: bool) {
        self.busy_images.remove(&image_id);
        if !ok {
            return;
        }
        if let Some(image) = self.images.iter_mut().find(|i| i.id == image_id) {
            image.checked = true;
        }
    }

    /// Turn a completed snip into a local placeholder image. Returns the new id.
    pub fn add_snip(&mut self, rect: SnipRect) -> Option<i64> {
        if !rect.is_large_enough() {
            return None;
        }
        let id = self.images.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let src = Query::new()
            .param("page", self.current_page)
            .param("snip", true)
            .param("device", &self.pdf_name)
            .to_path(PLACEHOLDER_SRC);
        self.images.push(ImageData {
            id,
            src,
            description: String::new(),
            checked: false,
            origin: ImageOrigin::Snipped,
        });
        Some(id)
    }
}
