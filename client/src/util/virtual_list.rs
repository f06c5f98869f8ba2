//! Variable-height list geometry for the chat transcript.
//!
//! SYSTEM CONTEXT
//! ==============
//! `components::chat_list` renders only the rows intersecting the viewport.
//! Row heights are unknown until a bubble has painted, so every row starts at
//! [`ESTIMATED_HEIGHT`] and is corrected when the bubble reports its measured
//! height. This module owns the height cache and the cumulative offsets the
//! component positions rows with.
//!
//! DESIGN
//! ======
//! `offsets[i]` is the top of row `i` and `offsets[len]` the total height.
//! Whenever a row's size changes, offsets from that row onward are rebuilt
//! before the caller reads them again, so later rows never drift.

#[cfg(test)]
#[path = "virtual_list_test.rs"]
mod virtual_list_test;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use wire::Message;

/// Height assumed for a row that has not reported a measurement yet.
pub const ESTIMATED_HEIGHT: f64 = 100.0;
/// Vertical space added below every row.
pub const GAP: f64 = 25.0;
/// Delay before auto-scrolling, so the new row gets one layout pass.
pub const AUTO_SCROLL_DELAY_MS: u32 = 10;
/// Rows rendered beyond each edge of the viewport.
pub const OVERSCAN: usize = 3;
/// Viewport height used until the container has been measured.
pub const FALLBACK_VIEWPORT_HEIGHT: f64 = 600.0;

/// Identity of a rendered row: message id plus a hash of its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowKey {
    pub id: String,
    pub content_hash: u64,
}

impl RowKey {
    pub fn of(message: &Message) -> Self {
        let mut hasher = DefaultHasher::new();
        message.content.hash(&mut hasher);
        message.images_ids.hash(&mut hasher);
        Self { id: message.id.clone(), content_hash: hasher.finish() }
    }
}

/// Result of loading a new message sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The new sequence is strictly longer than the previous one.
    pub grew: bool,
    /// First index whose identity or content changed, if any.
    pub first_changed: Option<usize>,
}

impl SyncOutcome {
    pub fn should_auto_scroll(self) -> bool {
        self.grew
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VirtualList {
    keys: Vec<RowKey>,
    heights: Vec<Option<f64>>,
    offsets: Vec<f64>,
    last_scroll_top: f64,
    viewport_height: Option<f64>,
}

impl Default for VirtualList {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            heights: Vec::new(),
            offsets: vec![0.0],
            last_scroll_top: 0.0,
            viewport_height: None,
        }
    }
}

impl VirtualList {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Load the current message sequence.
    ///
    /// Rows whose identity or content changed drop their measurement and
    /// fall back to the estimate; everything from the first changed row on is
    /// re-laid out.
    pub fn sync_messages(&mut self, messages: &[Message]) -> SyncOutcome {
        let previous_len = self.keys.len();
        let mut first_changed = None;

        for (index, message) in messages.iter().enumerate() {
            let key = RowKey::of(message);
            match self.keys.get(index) {
                Some(existing) if *existing == key => {}
                Some(_) => {
                    self.keys[index] = key;
                    self.heights[index] = None;
                    first_changed.get_or_insert(index);
                }
                None => {
                    self.keys.push(key);
                    self.heights.push(None);
                    first_changed.get_or_insert(index);
                }
            }
        }
        if messages.len() < previous_len {
            self.keys.truncate(messages.len());
            self.heights.truncate(messages.len());
            first_changed.get_or_insert(messages.len());
        }

        self.offsets.resize(self.keys.len() + 1, 0.0);
        self.reset_after_index(first_changed.unwrap_or(0));

        SyncOutcome { grew: messages.len() > previous_len, first_changed }
    }

    /// Size of row `index` including the trailing gap.
    pub fn item_size(&self, index: usize) -> f64 {
        self.heights.get(index).copied().flatten().unwrap_or(ESTIMATED_HEIGHT) + GAP
    }

    /// Measured height of row `index`, if reported.
    pub fn measured(&self, index: usize) -> Option<f64> {
        self.heights.get(index).copied().flatten()
    }

    /// Top of row `index`; indexes past the end clamp to the total height.
    pub fn offset_of(&self, index: usize) -> f64 {
        let last = self.offsets.len() - 1;
        self.offsets[index.min(last)]
    }

    pub fn total_height(&self) -> f64 {
        self.offset_of(self.len())
    }

    /// Record a bubble's measured height. Returns whether layout changed.
    pub fn report_height(&mut self, index: usize, height: f64) -> bool {
        if !height.is_finite() || height < 0.0 {
            return false;
        }
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        if slot.is_some_and(|h| (h - height).abs() < 0.5) {
            return false;
        }
        *slot = Some(height);
        self.reset_after_index(index);
        true
    }

    /// Rebuild offsets for every row from `index` onward.
    pub fn reset_after_index(&mut self, index: usize) {
        let len = self.len();
        let start = index.min(len);
        for i in start..len {
            self.offsets[i + 1] = self.offsets[i] + self.item_size(i);
        }
    }

    /// Record the container's measured client height. Returns whether it changed.
    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 {
            return false;
        }
        if self.viewport_height.is_some_and(|h| (h - height).abs() < 0.5) {
            return false;
        }
        self.viewport_height = Some(height);
        true
    }

    /// Measured viewport height, or [`FALLBACK_VIEWPORT_HEIGHT`] before the first measurement.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height.unwrap_or(FALLBACK_VIEWPORT_HEIGHT)
    }

    /// [`Self::visible_range`] for the recorded viewport.
    pub fn rendered_range(&self, scroll_top: f64) -> Range<usize> {
        self.visible_range(scroll_top, self.viewport_height())
    }

    /// Scroll-position feedback. When scrolling down, re-lays out from the
    /// estimated first visible row and returns that row.
    pub fn on_scroll(&mut self, scroll_top: f64) -> Option<usize> {
        let moved_down = scroll_top > self.last_scroll_top;
        self.last_scroll_top = scroll_top;
        if !moved_down {
            return None;
        }
        let estimated = estimated_first_visible(scroll_top).min(self.len());
        self.reset_after_index(estimated);
        Some(estimated)
    }

    /// Rows to render for a viewport, including [`OVERSCAN`] rows each side.
    pub fn visible_range(&self, scroll_top: f64, viewport_height: f64) -> Range<usize> {
        let len = self.len();
        if len == 0 {
            return 0..0;
        }
        let bottom = scroll_top + viewport_height.max(0.0);
        // First row whose bottom edge is below the viewport top.
        let first = self.offsets[1..].partition_point(|&row_bottom| row_bottom <= scroll_top);
        // Rows whose top edge is above the viewport bottom.
        let end = self.offsets[..len].partition_point(|&row_top| row_top < bottom);
        let start = first.min(len).saturating_sub(OVERSCAN);
        let end = (end.max(first + 1) + OVERSCAN).min(len);
        start..end
    }

    /// Scroll offset that aligns the end of the last row with the viewport end.
    pub fn scroll_to_end_offset(&self, viewport_height: f64) -> f64 {
        (self.total_height() - viewport_height).max(0.0)
    }
}

/// `floor(scroll_top / ESTIMATED_HEIGHT)`, saturating at zero.
pub fn estimated_first_visible(scroll_top: f64) -> usize {
    if !scroll_top.is_finite() || scroll_top <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (scroll_top / ESTIMATED_HEIGHT).floor() as usize;
    index
}
