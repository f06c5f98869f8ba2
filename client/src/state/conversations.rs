//! Conversation sidebar list and its shared store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat layout loads the list once; the chat page prepends a conversation
//! when `/conversation/storing` creates one. Both receive the same
//! [`ConversationStore`] as a prop from the app root, so the single writer
//! path is visible at each call site.

#[cfg(test)]
#[path = "conversations_test.rs"]
mod conversations_test;

use leptos::prelude::*;
use wire::Conversation;

/// Newest-first list of conversations, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationList {
    items: Vec<Conversation>,
    pub loaded: bool,
}

impl ConversationList {
    pub fn items(&self) -> &[Conversation] {
        &self.items
    }

    /// Replace with a freshly loaded list (assumed newest-first).
    pub fn replace(&mut self, items: Vec<Conversation>) {
        self.items.clear();
        for item in items {
            if !self.contains(&item.id) {
                self.items.push(item);
            }
        }
        self.loaded = true;
    }

    /// Put a new or updated conversation at the top.
    pub fn prepend(&mut self, conversation: Conversation) {
        self.items.retain(|c| c.id != conversation.id);
        self.items.insert(0, conversation);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|c| c.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Conversation> {
        self.items.iter().find(|c| c.id == id)
    }
}

/// Reactive handle to the page-lifetime conversation list.
#[derive(Clone, Copy, Debug)]
pub struct ConversationStore {
    list: RwSignal<ConversationList>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self { list: RwSignal::new(ConversationList::default()) }
    }

    /// Tracked snapshot of the current list.
    pub fn items(&self) -> Vec<Conversation> {
        self.list.with(|l| l.items().to_vec())
    }

    pub fn is_loaded(&self) -> bool {
        self.list.with(|l| l.loaded)
    }

    pub fn title_of(&self, id: &str) -> Option<String> {
        self.list.with_untracked(|l| l.find(id).map(|c| c.title.clone()))
    }

    pub fn replace(&self, items: Vec<Conversation>) {
        self.list.update(|l| l.replace(items));
    }

    pub fn prepend(&self, conversation: Conversation) {
        self.list.update(|l| l.prepend(conversation));
    }

    pub fn remove(&self, id: &str) {
        self.list.update(|l| {
            l.remove(id);
        });
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
