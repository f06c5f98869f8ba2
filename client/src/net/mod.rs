//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls and decodes replies; `types` re-exports the shared
//! wire schema the UI works with.

pub mod api;
pub mod types;
