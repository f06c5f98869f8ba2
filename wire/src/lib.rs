//! Shared wire schema for the device-manual backend.
//!
//! This crate owns the representation used by both the `client` portal and the
//! `dmc` command-line binary: the `{success, message, data}` response envelope,
//! request/response DTOs, endpoint paths with their query strings, and the
//! status-polling schedule both front ends follow.
//!
//! | Module | Role |
//! |--------|------|
//! | [`envelope`] | Envelope decoding and the [`ApiError`] taxonomy |
//! | [`models`] | DTOs plus the `Message` / `Conversation` data model |
//! | [`endpoints`] | Endpoint paths and query builders |
//! | [`poll`] | Fixed-interval (optionally backed-off) status polling schedule |

pub mod endpoints;
pub mod envelope;
pub mod models;
pub mod poll;

pub use envelope::{ApiError, Envelope};
pub use models::{Conversation, Message, Sender};
