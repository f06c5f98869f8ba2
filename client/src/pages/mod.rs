//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (guards, fetches, navigation)
//! and delegates state transitions to `state` and rendering details to
//! `components`.

pub mod chat;
pub mod devices;
pub mod finish;
pub mod forgot_password;
pub mod home;
pub mod import;
pub mod login;
pub mod sign_up;
pub mod tracking;
pub mod workspace;
