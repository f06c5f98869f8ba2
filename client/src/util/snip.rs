//! Rectangular snip capture over the PDF viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The annotation workspace lets an admin drag a rectangle over the rendered
//! page to register an extra image region. Pointer events arrive in client
//! (window) coordinates; the rectangle is kept in the viewer's scrollable
//! content coordinates so it stays attached to the page while scrolling.
//!
//! DESIGN
//! ======
//! `SnipCapture` is a three-state machine: idle, armed (the user pressed
//! "Snip Area"), dragging. Releasing the pointer always returns to idle and
//! yields a rectangle only when it exceeds [`MIN_SNIP_SIZE`] on both axes.

#[cfg(test)]
#[path = "snip_test.rs"]
mod snip_test;

/// Rectangles must be strictly larger than this on both axes.
pub const MIN_SNIP_SIZE: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Normalized rectangle in viewer content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SnipRect {
    /// Rectangle spanning two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn is_large_enough(&self) -> bool {
        self.width > MIN_SNIP_SIZE && self.height > MIN_SNIP_SIZE
    }
}

/// Viewer measurements sampled at event time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerGeometry {
    /// Bounding rect of the viewer in client coordinates.
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
    /// Visible content area (excludes scrollbars).
    pub client_width: f64,
    pub client_height: f64,
}

impl ViewerGeometry {
    /// Whether a client-space point falls inside the viewer's bounding rect.
    pub fn contains_client(&self, client_x: f64, client_y: f64) -> bool {
        client_x >= self.left
            && client_x <= self.left + self.width
            && client_y >= self.top
            && client_y <= self.top + self.height
    }

    /// Convert a client-space point to content coordinates.
    pub fn to_content(&self, client_x: f64, client_y: f64) -> Point {
        Point {
            x: client_x - self.left + self.scroll_left,
            y: client_y - self.top + self.scroll_top,
        }
    }

    /// Clamp a content point to the currently visible part of the content.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.scroll_left, self.scroll_left + self.client_width.max(0.0)),
            y: point.y.clamp(self.scroll_top, self.scroll_top + self.client_height.max(0.0)),
        }
    }

    fn clamped_content(&self, client_x: f64, client_y: f64) -> Point {
        self.clamp(self.to_content(client_x, client_y))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SnipCapture {
    #[default]
    Idle,
    Armed,
    Dragging { start: Point, current: Point },
}

impl SnipCapture {
    /// Enter snip mode. A drag in progress is left alone.
    pub fn arm(&mut self) {
        if matches!(self, Self::Idle) {
            *self = Self::Armed;
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Pointer pressed. Starts a drag when armed and inside the viewer.
    pub fn press(&mut self, geometry: &ViewerGeometry, client_x: f64, client_y: f64) -> bool {
        if !matches!(self, Self::Armed) || !geometry.contains_client(client_x, client_y) {
            return false;
        }
        let start = geometry.clamped_content(client_x, client_y);
        *self = Self::Dragging { start, current: start };
        true
    }

    /// Pointer moved. Returns the live rectangle while dragging.
    pub fn drag(&mut self, geometry: &ViewerGeometry, client_x: f64, client_y: f64) -> Option<SnipRect> {
        let Self::Dragging { start, current } = self else {
            return None;
        };
        *current = geometry.clamped_content(client_x, client_y);
        Some(SnipRect::from_corners(*start, *current))
    }

    /// Pointer released. Always ends the gesture; yields the final rectangle
    /// only when it is large enough.
    pub fn release(&mut self, geometry: &ViewerGeometry, client_x: f64, client_y: f64) -> Option<SnipRect> {
        let Self::Dragging { start, .. } = *self else {
            return None;
        };
        *self = Self::Idle;
        let end = geometry.clamped_content(client_x, client_y);
        Some(SnipRect::from_corners(start, end)).filter(SnipRect::is_large_enough)
    }

    /// Rectangle to draw as an overlay while dragging.
    pub fn live_rect(&self) -> Option<SnipRect> {
        match self {
            Self::Dragging { start, current } => Some(SnipRect::from_corners(*start, *current)),
            _ => None,
        }
    }
}
