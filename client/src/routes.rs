//! Route paths and link builders for both portals.
//!
//! Pages never format paths by hand; everything that navigates goes through
//! here so the router table in `app.rs` and the links stay in step.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use wire::endpoints::{self, Query};

pub const HOME: &str = "/";

pub const ADMIN_LOGIN: &str = "/admin/login";
pub const ADMIN_IMPORT: &str = "/admin/import";
pub const ADMIN_WORKSPACE: &str = "/admin/import/pdf";
pub const ADMIN_TRACKING: &str = "/admin/tracking";
pub const ADMIN_FINISH: &str = "/admin/finish";

pub const CLIENT_LOGIN: &str = "/client/login";
pub const CLIENT_SIGN_UP: &str = "/client/sign-up";
pub const CLIENT_SIGN_UP_VERIFY: &str = "/client/sign-up/verify";
pub const CLIENT_FORGOT_PASSWORD: &str = "/client/forgot-password";
pub const CLIENT_FORGOT_VERIFY: &str = "/client/forgot-password/verify";
pub const CLIENT_FORGOT_RESET: &str = "/client/forgot-password/reset";
pub const CLIENT_DEVICES: &str = "/client/devices";

pub mod params {
    pub const FIRST_MSG: &str = "firstMsg";
    pub const TITLE: &str = "title";
    pub const PAGE_NUMBER: &str = "page_number";
    pub const SCORING: &str = "scoring";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Portal {
    Admin,
    Client,
}

impl Portal {
    pub fn login(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_LOGIN,
            Self::Client => CLIENT_LOGIN,
        }
    }

    /// Landing page after login.
    pub fn home(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_TRACKING,
            Self::Client => CLIENT_DEVICES,
        }
    }

    fn chat_base(self) -> &'static str {
        match self {
            Self::Admin => "/admin/chat",
            Self::Client => "/client/chat",
        }
    }

    pub fn chat(self, conversation_id: &str) -> String {
        format!("{}/{}", self.chat_base(), endpoints::segment(conversation_id))
    }

    pub fn new_chat(self) -> String {
        self.chat(crate::state::chat::NEW_CONVERSATION_ID)
    }

    /// Route of a just-created conversation carrying the question to auto-send.
    pub fn chat_with_first_message(self, conversation_id: &str, first_msg: &str, title: &str) -> String {
        Query::new()
            .param(params::FIRST_MSG, first_msg)
            .param(params::TITLE, title)
            .to_path(&self.chat(conversation_id))
    }
}

pub fn import_resume() -> String {
    Query::new().param(params::SCORING, 1).to_path(ADMIN_IMPORT)
}

pub fn workspace_page(page_number: u32) -> String {
    Query::new().param(params::PAGE_NUMBER, page_number).to_path(ADMIN_WORKSPACE)
}
