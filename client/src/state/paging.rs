//! 1-based page cursor for the backend's prev/next paginated lists.

/// Current page plus the backend's "has previous/next" flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { page: 1, has_prev: false, has_next: false }
    }
}

impl PageCursor {
    /// Record the flags returned with the current page.
    pub fn update(&mut self, has_prev: bool, has_next: bool) {
        self.has_prev = has_prev;
        self.has_next = has_next;
    }

    /// Returns `true` when the page moved and must be fetched.
    pub fn next(&mut self) -> bool {
        if !self.has_next {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.has_prev || self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
