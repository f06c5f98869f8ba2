//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by page domain (`chat`, `workspace`, `import`, etc.). Each
//! module is a plain struct with transition methods; pages wrap it in one
//! `RwSignal` so the rules stay testable without a browser.

pub mod auth;
pub mod chat;
pub mod conversations;
pub mod devices;
pub mod import;
pub mod paging;
pub mod tracking;
pub mod workspace;
