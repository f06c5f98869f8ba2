//! Load state of a signed-URL image that fetches on first visibility.
//!
//! Transitions: unloaded -> loading (visibility crosses the threshold) ->
//! loaded | failed. Both end states are final; a failure shows the
//! placeholder and is never retried.

#[cfg(test)]
#[path = "lazy_image_test.rs"]
mod lazy_image_test;

/// Fraction of the element that must be visible before fetching.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;
/// Shown until a URL resolves, and after a failed fetch.
pub const PLACEHOLDER_SRC: &str = "/placeholder.svg";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded(String),
    Failed,
}

impl LoadState {
    /// Feed an intersection ratio. Returns `true` exactly once: when the fetch
    /// should be issued.
    pub fn on_visibility(&mut self, ratio: f64) -> bool {
        if *self != Self::Unloaded || ratio < VISIBILITY_THRESHOLD {
            return false;
        }
        *self = Self::Loading;
        true
    }

    /// Apply the fetch result. Ignored unless a fetch is in flight.
    pub fn finish(&mut self, url: Option<String>) {
        if *self != Self::Loading {
            return;
        }
        *self = match url {
            Some(url) if !url.is_empty() => Self::Loaded(url),
            _ => Self::Failed,
        };
    }

    /// Whether the element still needs an intersection observer.
    pub fn should_observe(&self) -> bool {
        *self == Self::Unloaded
    }

    pub fn src(&self) -> &str {
        match self {
            Self::Loaded(url) => url,
            _ => PLACEHOLDER_SRC,
        }
    }
}
