//! Index and fetch bookkeeping for a message's image carousel.
//!
//! Each index change issues one signed-URL fetch tagged with a generation
//! number. A result is applied only if its generation is still current, so a
//! slow fetch for an image the user already clicked past can never replace
//! the image now on screen.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

/// Identifies one outstanding signed-URL fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub image_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    image_ids: Vec<i64>,
    index: usize,
    url: Option<String>,
    generation: u64,
    loading: bool,
}

impl Carousel {
    pub fn new(image_ids: Vec<i64>) -> Self {
        Self { image_ids, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.image_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.image_ids.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_id(&self) -> Option<i64> {
        self.image_ids.get(self.index).copied()
    }

    /// Resolved URL of the current image; `None` while loading or after a failure.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch for the current index (initial load).
    pub fn load_current(&mut self) -> Option<FetchTicket> {
        let image_id = self.current_id()?;
        self.generation += 1;
        self.url = None;
        self.loading = true;
        Some(FetchTicket { generation: self.generation, image_id })
    }

    pub fn next(&mut self) -> Option<FetchTicket> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.len();
        self.load_current()
    }

    pub fn prev(&mut self) -> Option<FetchTicket> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + self.len() - 1) % self.len();
        self.load_current()
    }

    pub fn select(&mut self, index: usize) -> Option<FetchTicket> {
        if index >= self.len() {
            return None;
        }
        self.index = index;
        self.load_current()
    }

    /// Apply a fetch result. Returns `false` when the ticket was superseded.
    pub fn resolve(&mut self, ticket: FetchTicket, url: Option<String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.url = url;
        self.loading = false;
        true
    }
}
