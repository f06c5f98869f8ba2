//! Wire types used by pages and components.
//!
//! The schema itself lives in the shared `wire` crate so the native CLI and
//! the portal decode identical shapes; this module re-exports what the UI
//! touches.

pub use wire::ApiError;
pub use wire::models::{
    Brand, ChatDevice, Conversation, ConversationSummary, DeviceType, Message, Note, PageEmbeddingStatus,
    PageParagraph, PdfImage, PdfStage, PdfStateRow, RagQueryRequest, Sender, StatusFilter, scoring_percent,
};
