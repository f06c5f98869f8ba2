//! Admin annotation workspace (`/admin/import/pdf`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Works on the session's `pdf_id`. Without one, or when OCR has not run for
//! it, the user is sent back to the import wizard. `?page_number=N` opens a
//! specific page (the finish view links here).
//!
//! DESIGN
//! ======
//! Page changes only move `current_page`; a single effect fetches the page
//! state for whatever page is current and discards replies for pages the
//! user already left.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::lazy_image::LazyImage;
use crate::components::loader::{Loader, Notice};
use crate::components::pdf_viewer::PdfViewer;
use crate::routes::{self, Portal, params};
use crate::state::auth::AuthState;
use crate::state::workspace::{ImageData, ImageOrigin, WorkspaceState};
use crate::util::auth::{install_unauth_redirect, resolve_local_access};
use crate::util::lifetime::CancelToken;
use crate::util::storage::{self, keys};

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    resolve_local_access(auth);
    install_unauth_redirect(auth, navigate.clone(), Portal::Admin.login());

    let query = use_query_map();
    let stored_pdf = storage::require_session_id(keys::PDF_ID);
    let workspace = RwSignal::new(WorkspaceState::new(stored_pdf.as_ref().copied().unwrap_or_default()));
    let notice = RwSignal::new(None::<String>);
    let loaded_page = StoredValue::new(None::<u32>);
    let token = CancelToken::for_owner();

    {
        let navigate = navigate.clone();
        let token = token.clone();
        Effect::new(move || {
            let pdf_id = match &stored_pdf {
                Ok(id) => *id,
                Err(_) => {
                    navigate(routes::ADMIN_IMPORT, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    return;
                }
            };
            let requested = query.with_untracked(|q| q.get(params::PAGE_NUMBER));
            let navigate = navigate.clone();
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::pdf_initial_state(pdf_id).await;
                if !token.is_live() {
                    return;
                }
                let initial = match result {
                    Ok(initial) => initial,
                    Err(e) => {
                        notice.set(Some(format!("Failed to load PDF: {e}")));
                        return;
                    }
                };
                let ocr_done = workspace.try_update(|w| w.load_initial(&initial)).unwrap_or(false);
                if !ocr_done {
                    navigate(routes::ADMIN_IMPORT, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    return;
                }
                loaded_page.set_value(Some(1));
                if let Some(page) = workspace.with_untracked(|w| w.requested_page(requested.as_deref())) {
                    workspace.update(|w| {
                        w.go_to(page);
                    });
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (pdf_id, requested, navigate, token);
        });
    }

    // Fetch whichever page is current once the initial state is in.
    let current = Memo::new(move |_| workspace.with(|w| w.ready.then_some(w.current_page)));
    {
        let token = token.clone();
        Effect::new(move || {
            let Some(page) = current.get() else {
                return;
            };
            if loaded_page.get_value() == Some(page) {
                return;
            }
            let pdf_id = workspace.with_untracked(|w| w.pdf_id);
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::pdf_state(pdf_id, page).await;
                if !token.is_live() || workspace.with_untracked(|w| w.current_page != page) {
                    return;
                }
                match result {
                    Ok(state) => {
                        workspace.update(|w| w.apply_page(&state));
                        loaded_page.set_value(Some(page));
                    }
                    Err(e) => notice.set(Some(format!("Failed to load page {page}: {e}"))),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (pdf_id, page, token);
        });
    }

    let save_paragraph = {
        let token = token.clone();
        move |_| {
            let request = match workspace.try_update(WorkspaceState::begin_paragraph_embed) {
                Some(Ok(request)) => request,
                Some(Err(e)) => {
                    notice.set(Some(e.to_string()));
                    return;
                }
                None => return,
            };
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::embed_paragraph(request.pdf_paragraph_id, &request.context).await;
                if !token.is_live() {
                    return;
                }
                workspace.update(|w| w.finish_paragraph_embed(result.is_ok()));
                notice.set(Some(match result {
                    Ok(_) => "Paragraph saved.".to_owned(),
                    Err(e) => format!("Failed to save paragraph: {e}"),
                }));
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (request, token);
        }
    };

    let save_image = Callback::new({
        let token = token.clone();
        move |image_id: i64| {
            let request = match workspace.try_update(|w| w.begin_image_embed(image_id)) {
                Some(Ok(request)) => request,
                Some(Err(e)) => {
                    notice.set(Some(e.to_string()));
                    return;
                }
                None => return,
            };
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::embed_image_alt(request.pdf_image_id, &request.img_alt).await;
                if !token.is_live() {
                    return;
                }
                workspace.update(|w| w.finish_image_embed(image_id, result.is_ok()));
                if let Err(e) = result {
                    notice.set(Some(format!("Failed to save image description: {e}")));
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (request, token);
        }
    });

    let on_snipped = Callback::new(move |added: Option<i64>| {
        if added.is_none() {
            notice.set(Some("Selection too small.".to_owned()));
        }
    });

    let view_processes = {
        let navigate = navigate.clone();
        move |_| navigate(routes::ADMIN_FINISH, NavigateOptions::default())
    };

    view! {
        <div class="workspace-page">
            <Show when=move || workspace.with(|w| w.ready) fallback=|| view! { <Loader label="Loading PDF..."/> }>
                <header class="workspace-page__header">
                    <h1>{move || workspace.with(|w| w.pdf_name.clone())}</h1>
                    <div class="workspace-page__paging">
                        <button
                            disabled=move || !workspace.with(WorkspaceState::can_prev)
                            on:click=move |_| workspace.update(|w| {
                                w.prev_page();
                            })
                        >
                            "Previous"
                        </button>
                        <span>
                            {move || workspace.with(|w| format!("Page {} / {}", w.current_page, w.total_pages))}
                        </span>
                        <button
                            disabled=move || !workspace.with(WorkspaceState::can_next)
                            on:click=move |_| workspace.update(|w| {
                                w.next_page();
                            })
                        >
                            "Next"
                        </button>
                    </div>
                    <div class="workspace-page__zoom">
                        <button on:click=move |_| workspace.update(WorkspaceState::zoom_out)>"-"</button>
                        <button on:click=move |_| workspace.update(WorkspaceState::zoom_reset)>
                            {move || format!("{}%", workspace.with(WorkspaceState::zoom_percent))}
                        </button>
                        <button on:click=move |_| workspace.update(WorkspaceState::zoom_in)>"+"</button>
                        <button
                            class:active=move || workspace.with(|w| w.snip.is_armed())
                            on:click=move |_| workspace.update(|w| {
                                if w.snip.is_armed() { w.snip.cancel() } else { w.snip.arm() }
                            })
                        >
                            "Snip"
                        </button>
                    </div>
                    {
                        let view_processes = view_processes.clone();
                        view! {
                    <Show when=move || workspace.with(WorkspaceState::can_view_processes)>
                        <button class="workspace-page__finish" on:click=view_processes.clone()>"View processes"</button>
                    </Show>
                        }
                    }
                </header>
                <div class="workspace-page__body">
                    <PdfViewer workspace=workspace on_snipped=on_snipped/>
                    <aside class="workspace-page__labels">
                        <section class="paragraph-editor">
                            <h2>
                                "Page text"
                                <Show when=move || workspace.with(|w| w.paragraph_modified)>
                                    <span class="badge">"saved"</span>
                                </Show>
                            </h2>
                            <textarea
                                prop:value=move || workspace.with(|w| w.paragraph.clone())
                                on:input=move |ev| workspace.update(|w| w.paragraph = event_target_value(&ev))
                            ></textarea>
                            <button
                                disabled=move || workspace.with(|w| w.paragraph_busy)
                                on:click=save_paragraph.clone()
                            >
                                "Save paragraph"
                            </button>
                        </section>
                        <section class="image-list">
                            <h2>"Images"</h2>
                            <For
                                each=move || workspace.with(|w| w.images.clone())
                                key=|image| (image.id, image.checked)
                                children=move |image| view! { <ImageRow image=image workspace=workspace on_save=save_image/> }
                            />
                        </section>
                    </aside>
                </div>
            </Show>
            <Notice notice=notice.into()/>
        </div>
    }
}

#[component]
fn ImageRow(image: ImageData, workspace: RwSignal<WorkspaceState>, on_save: Callback<i64>) -> impl IntoView {
    let id = image.id;
    let snipped = image.origin == ImageOrigin::Snipped;
    let preview = if snipped {
        view! { <img class="image-row__snip" src=image.src.clone() alt="Snipped area"/> }.into_any()
    } else {
        view! { <LazyImage image_id=id alt=image.description.clone()/> }.into_any()
    };
    let description = move || {
        workspace.with(|w| w.images.iter().find(|i| i.id == id).map(|i| i.description.clone()).unwrap_or_default())
    };

    view! {
        <div class="image-row" class:image-row--checked=image.checked>
            {preview}
            <textarea
                placeholder="Describe this image"
                prop:value=description
                on:input=move |ev| workspace.update(|w| w.set_description(id, event_target_value(&ev)))
            ></textarea>
            <Show when=move || !snipped>
                <button
                    disabled=move || workspace.with(|w| w.is_image_busy(id))
                    on:click=move |_| on_save.run(id)
                >
                    {move || if workspace.with(|w| w.is_image_busy(id)) { "Saving..." } else { "Save" }}
                </button>
            </Show>
        </div>
    }
}
