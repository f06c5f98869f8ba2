//! Cancellation token tied to a component's lifetime.
//!
//! SYSTEM CONTEXT
//! ==============
//! Async work spawned from a component (fetches, poll loops, delayed scrolls)
//! can finish after the component unmounts. Every such task takes a
//! `CancelToken` from [`CancelToken::for_owner`] and checks it after each
//! suspension point before touching signals.

#[cfg(test)]
#[path = "lifetime_test.rs"]
mod lifetime_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled when the current reactive owner is cleaned up.
    pub fn for_owner() -> Self {
        let token = Self::new();
        let on_drop = token.clone();
        leptos::prelude::on_cleanup(move || on_drop.cancel());
        token
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn is_live(&self) -> bool {
        !self.is_cancelled()
    }

    /// Run `apply` only while the owner is still mounted.
    pub fn if_live<T>(&self, apply: impl FnOnce() -> T) -> Option<T> {
        self.is_live().then(apply)
    }
}
