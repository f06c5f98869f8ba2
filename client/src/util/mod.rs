//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

pub mod agent_poll;
pub mod auth;
pub mod carousel;
pub mod lazy_image;
pub mod lifetime;
pub mod markdown;
pub mod snip;
pub mod storage;
pub mod time_format;
pub mod virtual_list;
