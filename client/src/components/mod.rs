//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat transcript, image loaders and the PDF viewer.
//! They receive state handles as props and never read browser storage.

pub mod chat_list;
pub mod conversation_sidebar;
pub mod image_carousel;
pub mod lazy_image;
pub mod loader;
pub mod message_bubble;
pub mod notes_panel;
pub mod pdf_viewer;
