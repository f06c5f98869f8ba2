//! Conversation page shared by both portals (`/admin/chat/:id`, `/client/chat/:id`).
//!
//! SYSTEM CONTEXT
//! ==============
//! `id == "new"` collects the first question, creates the conversation and
//! re-routes to it with the question in `firstMsg`. On an existing id the
//! transcript and notes are loaded first; a `firstMsg` is then submitted
//! once and stripped from the URL.
//!
//! DESIGN
//! ======
//! All transitions go through [`ChatState`]. Async results are applied only
//! while the page is mounted and still showing the conversation that issued
//! them, so a late answer can never land in another conversation.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

use crate::components::chat_list::ChatList;
use crate::components::conversation_sidebar::ConversationSidebar;
use crate::components::loader::{Loader, Notice};
use crate::components::notes_panel::NotesPanel;
use crate::routes::{Portal, params};
use crate::state::auth::{Access, AuthState};
use crate::state::chat::{ChatState, NEW_CONVERSATION_ID, SendPlan, pair_id_of};
use crate::state::conversations::ConversationStore;
use crate::util::auth::{install_unauth_redirect, resolve_local_access, verify_client_access};
use crate::util::lifetime::CancelToken;
use crate::util::storage::{self, keys};
use crate::util::time_format::now_iso;

#[component]
pub fn ChatPage(portal: Portal, store: ConversationStore) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    match portal {
        Portal::Admin => {
            resolve_local_access(auth);
            install_unauth_redirect(auth, navigate.clone(), portal.login());
        }
        Portal::Client => verify_client_access(auth),
    }
    let route_params = use_params_map();
    let query = use_query_map();
    let conversation_id = Memo::new(move |_| {
        route_params.with(|p| p.get("id").unwrap_or_else(|| NEW_CONVERSATION_ID.to_owned()))
    });

    let chat = RwSignal::new(ChatState::new(
        &conversation_id.get_untracked(),
        storage::session_id(keys::SELECTED_DEVICE_ID),
        &now_iso(),
    ));
    let input = RwSignal::new(String::new());
    let token = CancelToken::for_owner();

    let is_current = move |id: &str| chat.with_untracked(|c| c.conversation_id == id);

    let send = {
        let navigate = navigate.clone();
        let token = token.clone();
        move |text: String| {
            let has_token = storage::auth_token().is_some();
            let plan = chat.try_update(|c| c.begin_send(&text, has_token, &now_iso())).flatten();
            let Some(plan) = plan else {
                return;
            };
            input.set(String::new());
            let issued_for = chat.with_untracked(|c| c.conversation_id.clone());
            let navigate = navigate.clone();
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match plan {
                    SendPlan::CreateConversation { device_id, query } => {
                        let result = crate::net::api::store_conversation(device_id, &query).await;
                        if !token.is_live() || !is_current(&issued_for) {
                            return;
                        }
                        match result {
                            Ok(stored) => {
                                let conversation = stored.to_conversation();
                                let path = portal.chat_with_first_message(
                                    &conversation.id,
                                    &query,
                                    &conversation.title,
                                );
                                store.prepend(conversation);
                                navigate(&path, NavigateOptions { replace: true, ..NavigateOptions::default() });
                            }
                            Err(e) => {
                                log::warn!("conversation create failed: {e}");
                                chat.update(|c| c.fail_send("Failed to create conversation", &e));
                            }
                        }
                    }
                    SendPlan::Ask(request) => {
                        let result = crate::net::api::rag_query(&request).await;
                        if !token.is_live() || !is_current(&issued_for) {
                            return;
                        }
                        match result {
                            Ok(answer) => chat.update(|c| c.finish_answer(answer, &now_iso())),
                            Err(e) => {
                                log::warn!("rag query failed: {e}");
                                chat.update(|c| c.fail_send("Failed to get response", &e));
                            }
                        }
                    }
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (plan, issued_for, navigate, token, is_current, portal, store);
        }
    };

    // Route entry: reset state, load transcript + notes, then hand off `firstMsg`.
    {
        let navigate = navigate.clone();
        let token = token.clone();
        let send = send.clone();
        Effect::new(move || {
            let id = conversation_id.get();
            let device_id = storage::session_id(keys::SELECTED_DEVICE_ID);
            let (first_msg, title) = query.with_untracked(|q| (q.get(params::FIRST_MSG), q.get(params::TITLE)));
            chat.set(ChatState::new(&id, device_id, &now_iso()));
            if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
                chat.update(|c| c.title = title);
            }
            if id == NEW_CONVERSATION_ID {
                return;
            }
            if first_msg.is_some() {
                navigate(&portal.chat(&id), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }

            let token = token.clone();
            let send = send.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let detail = crate::net::api::conversation_detail(&id).await;
                if !token.is_live() || !is_current(&id) {
                    return;
                }
                match detail {
                    Ok(detail) => chat.update(|c| c.load_detail(&detail)),
                    Err(e) if first_msg.is_some() => {
                        log::warn!("conversation {id} not loaded: {e}");
                        chat.update(|c| c.loading = false);
                    }
                    Err(e) => {
                        log::warn!("conversation {id} not loaded: {e}");
                        chat.update(|c| c.fail_load(&e));
                    }
                }
                if let Some(text) = chat.try_update(|c| c.take_first_message(first_msg.as_deref())).flatten() {
                    send(text);
                }
                if storage::auth_token().is_some() {
                    reload_notes(chat, id, token).await;
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (token, send, first_msg);
        });
    }

    let on_submit = {
        let send = send.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            send(input.get_untracked());
        }
    };
    let on_keydown = {
        let send = send.clone();
        move |ev: leptos::ev::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                send(input.get_untracked());
            }
        }
    };

    let on_copy = Callback::new({
        let token = token.clone();
        move |text: String| {
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let written = wasm_bindgen_futures::JsFuture::from(window.navigator().clipboard().write_text(&text)).await;
                if !token.is_live() {
                    return;
                }
                let outcome = written.map(|_| ()).map_err(|e| {
                    use wasm_bindgen::JsCast;
                    log::warn!("clipboard write rejected: {e:?}");
                    e.dyn_ref::<js_sys::Error>()
                        .map_or_else(|| "clipboard unavailable".to_owned(), |err| String::from(err.message()))
                });
                chat.update(|c| c.copy_finished(outcome));
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (text, token);
        }
    });

    let on_save_note = {
        let token = token.clone();
        Callback::new(move |message_id: String| {
            let (pair_id, title, id) = chat.with_untracked(|c| {
                (c.message(&message_id).and_then(pair_id_of), c.note_title_for(&message_id), c.conversation_id.clone())
            });
            let Some(pair_id) = pair_id else {
                chat.update(|c| c.notice = Some("Only saved answers can be kept as notes.".to_owned()));
                return;
            };
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::take_note(pair_id, &title).await;
                if !token.is_live() || !is_current(&id) {
                    return;
                }
                match result {
                    Ok(()) => {
                        chat.update(|c| c.notice = Some("Saved to notes.".to_owned()));
                        reload_notes(chat, id, token).await;
                    }
                    Err(e) => chat.update(|c| c.notice = Some(format!("Failed to save note: {e}"))),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (pair_id, title, id, token);
        })
    };

    let on_delete_note = {
        let token = token.clone();
        Callback::new(move |note_id: i64| {
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::delete_note(note_id).await;
                if !token.is_live() {
                    return;
                }
                match result {
                    Ok(()) => chat.update(|c| c.notes.retain(|n| n.id != note_id)),
                    Err(e) => chat.update(|c| c.notice = Some(format!("Failed to delete note: {e}"))),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (note_id, token);
        })
    };

    let messages = Signal::derive(move || chat.with(|c| c.messages.clone()));
    let notes = Signal::derive(move || chat.with(|c| c.notes.clone()));
    let notice = Signal::derive(move || chat.with(|c| c.notice.clone()));

    view! {
        <div class="chat-page">
            <ConversationSidebar store=store portal=portal active=conversation_id.into()/>
            <main class="chat-page__main">
                <header class="chat-page__header">
                    <h1>{move || chat.with(|c| c.title.clone())}</h1>
                    <Show when=move || portal == Portal::Client && auth.with(|a| a.access == Access::Denied)>
                        <a class="chat-page__sign-in" href=portal.login()>"Sign in to keep your conversations"</a>
                    </Show>
                </header>
                <Show when=move || chat.with(|c| c.loading) fallback=move || view! {
                    <ChatList messages=messages on_copy=on_copy on_save_note=on_save_note/>
                }>
                    <Loader label="Loading conversation..."/>
                </Show>
                <Notice notice=notice/>
                <form class="chat-input" on:submit=on_submit.clone()>
                    <textarea
                        class="chat-input__text"
                        placeholder="Ask about your device..."
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=on_keydown.clone()
                    ></textarea>
                    <button
                        class="chat-input__send"
                        type="submit"
                        disabled=move || chat.with(|c| c.sending) || input.with(|t| t.trim().is_empty())
                    >
                        {move || if chat.with(|c| c.sending) { "Thinking..." } else { "Send" }}
                    </button>
                </form>
            </main>
            <NotesPanel notes=notes on_delete=on_delete_note/>
        </div>
    }
}

#[cfg(feature = "hydrate")]
async fn reload_notes(chat: RwSignal<ChatState>, conversation_id: String, token: CancelToken) {
    let result = crate::net::api::list_notes(&conversation_id).await;
    if !token.is_live() || !chat.with_untracked(|c| c.conversation_id == conversation_id) {
        return;
    }
    match result {
        Ok(list) => chat.update(|c| c.notes = list.notes.unwrap_or_default()),
        Err(e) => log::warn!("notes for {conversation_id} not loaded: {e}"),
    }
}
