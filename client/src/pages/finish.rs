//! Admin embedding overview (`/admin/import/finish`).
//!
//! Lists each page of the session's PDF with its embedding status. Every
//! page links back into the workspace at that page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wire::models::EmbeddingStatuses;

use crate::components::loader::{Loader, Notice};
use crate::routes::{self, Portal};
use crate::state::auth::AuthState;
use crate::util::auth::{install_unauth_redirect, resolve_local_access};
use crate::util::lifetime::CancelToken;
use crate::util::storage::{self, keys};

#[component]
pub fn FinishPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    resolve_local_access(auth);
    install_unauth_redirect(auth, navigate.clone(), Portal::Admin.login());

    let statuses = RwSignal::new(None::<EmbeddingStatuses>);
    let notice = RwSignal::new(None::<String>);
    let token = CancelToken::for_owner();

    match storage::require_session_id(keys::PDF_ID) {
        Ok(pdf_id) => {
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::embedding_statuses(pdf_id).await;
                if !token.is_live() {
                    return;
                }
                match result {
                    Ok(loaded) => statuses.set(Some(loaded)),
                    Err(e) => {
                        notice.set(Some(format!("Failed to load embedding status: {e}")));
                        statuses.set(Some(EmbeddingStatuses::default()));
                    }
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (pdf_id, token);
        }
        Err(e) => {
            notice.set(Some(e.to_string()));
            statuses.set(Some(EmbeddingStatuses::default()));
        }
    }

    let back_to_tracking = move |_| navigate(routes::ADMIN_TRACKING, NavigateOptions::default());

    view! {
        <div class="finish-page">
            <header class="finish-page__header">
                <h1>"Embedding status"</h1>
                <Show when=move || statuses.with(|s| s.as_ref().is_some_and(EmbeddingStatuses::all_done))>
                    <span class="badge badge--done">"All pages embedded"</span>
                </Show>
                <button on:click=back_to_tracking>"Back to tracking"</button>
            </header>
            <Show when=move || statuses.with(Option::is_some) fallback=|| view! { <Loader label="Loading status..."/> }>
                <ul class="finish-page__pages">
                    {move || statuses.with(|s| {
                        s.iter()
                            .flat_map(EmbeddingStatuses::pages)
                            .map(|page| {
                                let (class, label) = if page.done {
                                    ("page-status page-status--done", "Embedded")
                                } else {
                                    ("page-status page-status--pending", "Missing embeddings")
                                };
                                view! {
                                    <li class=class>
                                        <a href=routes::workspace_page(page.page_number)>
                                            {format!("Page {}", page.page_number)}
                                        </a>
                                        <span>{label}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    })}
                </ul>
            </Show>
            <Notice notice=notice.into()/>
        </div>
    }
}
