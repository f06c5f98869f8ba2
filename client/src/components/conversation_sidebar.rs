//! Newest-first conversation list shown beside the chat.
//!
//! The list is loaded once per page lifetime into the shared
//! [`ConversationStore`]; the chat page prepends to the same store when it
//! creates a conversation.

use leptos::prelude::*;

use crate::routes::Portal;
use crate::state::conversations::ConversationStore;
use crate::util::time_format::format_relative;

#[component]
pub fn ConversationSidebar(store: ConversationStore, portal: Portal, active: Signal<String>) -> impl IntoView {
    let notice = RwSignal::new(None::<String>);

    if !store.is_loaded() {
        #[cfg(feature = "hydrate")]
        {
            let token = crate::util::lifetime::CancelToken::for_owner();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::list_conversations().await;
                if !token.is_live() {
                    return;
                }
                match result {
                    Ok(list) => store.replace(
                        list.conversations
                            .unwrap_or_default()
                            .into_iter()
                            .map(crate::net::types::ConversationSummary::into_conversation)
                            .collect(),
                    ),
                    Err(e) => {
                        log::warn!("conversation list failed: {e}");
                        store.replace(Vec::new());
                        if !matches!(e, crate::net::types::ApiError::Status { status: 401, .. }) {
                            notice.set(Some(format!("Could not load conversations: {e}")));
                        }
                    }
                }
            });
        }
    }

    view! {
        <nav class="sidebar">
            <a class="sidebar__new" href=portal.new_chat()>"+ New chat"</a>
            <Show when=move || notice.get().is_some()>
                <p class="sidebar__notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <ul class="sidebar__list">
                <For
                    each=move || store.items()
                    key=|c| c.id.clone()
                    children=move |conversation| {
                        let id = conversation.id.clone();
                        let is_active = move || active.get() == id;
                        let when = format_relative(&conversation.timestamp, chrono::Utc::now());
                        view! {
                            <li class="sidebar__item" class:sidebar__item--active=is_active>
                                <a href=portal.chat(&conversation.id)>
                                    <span class="sidebar__title">{conversation.title.clone()}</span>
                                    <span class="sidebar__meta">
                                        {conversation.device_name.clone()} " · " {when}
                                    </span>
                                </a>
                            </li>
                        }
                    }
                />
            </ul>
        </nav>
    }
}
