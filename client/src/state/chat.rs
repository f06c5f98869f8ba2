//! Chat page state: transcript, send flow, first-message hand-off, notes.
//!
//! SYSTEM CONTEXT
//! ==============
//! A conversation route is either `new` (no backend conversation yet) or an
//! existing id. Sending on `new` creates the conversation through
//! `/conversation/storing` and re-routes to it with the question carried in
//! the `firstMsg` query parameter; the existing-conversation page then submits
//! that question to RAG exactly once.
//!
//! DESIGN
//! ======
//! The page owns one `RwSignal<ChatState>`; every transition below is a plain
//! method so the ordering rules (user message appended before the request,
//! one in-flight send, single first-message consumption) are testable without
//! a browser.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use wire::models::{ConversationDetail, Note, RagAnswer, RagQueryRequest};
use wire::{ApiError, Message, Sender};

pub const NEW_CONVERSATION_ID: &str = "new";
pub const NEW_CONVERSATION_TITLE: &str = "New Conversation";
pub const WELCOME_ID: &str = "welcome";
pub const WELCOME_TEXT: &str = "Hello! I'm your device manual assistant. I can help you with any questions about how to use your devices. Just ask me anything about setup, troubleshooting, or features!";
pub const UNTITLED_NOTE: &str = "Untitled";

/// What the page must do after a message was accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendPlan {
    /// `POST /conversation/storing`, then navigate to the created conversation.
    CreateConversation { device_id: Option<i64>, query: String },
    /// `POST /conversation/rag_query` and append the answer.
    Ask(RagQueryRequest),
}

#[derive(Clone, Debug)]
pub struct ChatState {
    pub conversation_id: String,
    pub title: String,
    pub device_id: Option<i64>,
    pub messages: Vec<Message>,
    pub sending: bool,
    pub loading: bool,
    pub notice: Option<String>,
    pub notes: Vec<Note>,
    first_message_consumed: bool,
    next_local_id: u64,
}

impl ChatState {
    /// Fresh state for a route, seeded with the welcome message.
    pub fn new(conversation_id: &str, device_id: Option<i64>, now: &str) -> Self {
        let is_new = conversation_id == NEW_CONVERSATION_ID;
        Self {
            conversation_id: conversation_id.to_owned(),
            title: if is_new { NEW_CONVERSATION_TITLE.to_owned() } else { String::new() },
            device_id,
            messages: vec![welcome_message(now)],
            sending: false,
            loading: !is_new,
            notice: None,
            notes: Vec::new(),
            first_message_consumed: false,
            next_local_id: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.conversation_id == NEW_CONVERSATION_ID
    }

    /// Apply `GET /conversation/:id`. The welcome message stays first.
    pub fn load_detail(&mut self, detail: &ConversationDetail) {
        if let Some(title) = detail.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            self.title = title.to_owned();
        }
        if detail.device_id.is_some() {
            self.device_id = detail.device_id;
        }
        self.messages.truncate(1);
        self.messages.extend(detail.messages());
        self.loading = false;
    }

    pub fn fail_load(&mut self, err: &ApiError) {
        self.loading = false;
        self.notice = Some(format!("Failed to load conversation: {err}"));
    }

    /// Accept user input. Blank input, or input while a send is in flight, is
    /// ignored. Otherwise the user message is appended immediately and the
    /// request to issue is returned.
    pub fn begin_send(&mut self, input: &str, has_token: bool, now: &str) -> Option<SendPlan> {
        let query = input.trim();
        if query.is_empty() || self.sending {
            return None;
        }
        self.next_local_id += 1;
        let id = format!("local-{}", self.next_local_id);
        self.messages.push(Message::user(id, query, now));
        self.sending = true;
        self.notice = None;

        let query = query.to_owned();
        if self.is_new() {
            return Some(SendPlan::CreateConversation { device_id: self.device_id, query });
        }
        Some(SendPlan::Ask(RagQueryRequest {
            query,
            conversation_id: has_token.then(|| self.conversation_id.clone()),
            device_id: self.device_id,
        }))
    }

    pub fn finish_answer(&mut self, answer: RagAnswer, now: &str) {
        self.messages.push(answer.into_message(now));
        self.sending = false;
    }

    pub fn fail_send(&mut self, context: &str, err: &ApiError) {
        self.sending = false;
        self.notice = Some(format!("{context}: {err}"));
    }

    /// Notice for a finished clipboard write.
    pub fn copy_finished(&mut self, outcome: Result<(), String>) {
        self.notice = Some(match outcome {
            Ok(()) => "Copied to clipboard.".to_owned(),
            Err(reason) => format!("Copy failed: {reason}"),
        });
    }

    /// Hand out the `firstMsg` query value exactly once per page lifetime,
    /// and never on the `new` route.
    pub fn take_first_message(&mut self, first_msg: Option<&str>) -> Option<String> {
        if self.is_new() || self.first_message_consumed {
            return None;
        }
        let text = first_msg.map(str::trim).filter(|t| !t.is_empty())?;
        self.first_message_consumed = true;
        Some(text.to_owned())
    }

    /// Title for saving `message_id` as a note: the message itself when it is
    /// a user message, else the closest preceding user message.
    pub fn note_title_for(&self, message_id: &str) -> String {
        let Some(position) = self.messages.iter().position(|m| m.id == message_id) else {
            return UNTITLED_NOTE.to_owned();
        };
        self.messages[..=position]
            .iter()
            .rev()
            .find(|m| m.sender == Sender::User)
            .map_or_else(|| UNTITLED_NOTE.to_owned(), |m| m.content.clone())
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }
}

/// Stored pair id behind an AI message, if the exchange was persisted.
pub fn pair_id_of(message: &Message) -> Option<i64> {
    if !message.is_ai() {
        return None;
    }
    let raw = message.id.strip_prefix("res-").unwrap_or(&message.id);
    raw.parse::<i64>().ok().filter(|id| *id >= 0)
}

fn welcome_message(now: &str) -> Message {
    Message::ai(WELCOME_ID, WELCOME_TEXT, now, Vec::new())
}
