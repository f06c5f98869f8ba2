//! Admin import wizard (`/admin/import`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Step 1 registers a device, step 2 uploads its PDF to a signed storage URL.
//! Once a `pdf_id` exists the OCR button appears and the agent status is
//! polled; OCR is blocked while the agent reports it is extracting. After a
//! successful OCR run the workspace opens on the same `pdf_id`.
//!
//! `?scoring=1` (from the tracking list) resumes directly at the OCR button.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::loader::{Loader, Notice};
use crate::routes::{self, Portal, params};
use crate::state::auth::AuthState;
use crate::state::import::{ImportState, ImportStep};
use crate::util::agent_poll::watch_agent;
use crate::util::auth::{install_unauth_redirect, resolve_local_access};
use crate::util::lifetime::CancelToken;
use crate::util::storage::{self, Area, keys};

#[component]
pub fn ImportPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    resolve_local_access(auth);
    install_unauth_redirect(auth, navigate.clone(), Portal::Admin.login());

    let query = use_query_map();
    let scoring = query.with_untracked(|q| q.get(params::SCORING));
    let import = RwSignal::new(ImportState::resume(scoring.as_deref(), storage::session_id(keys::PDF_ID)));
    let extracting = RwSignal::new(false);
    let token = CancelToken::for_owner();
    #[cfg(feature = "hydrate")]
    let chosen_file = StoredValue::new_local(None::<web_sys::File>);

    {
        let token = token.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::brands_and_types().await;
            token.if_live(|| match result {
                Ok(catalog) => import.update(|s| s.set_catalog(catalog)),
                Err(e) => import.update(|s| s.notice = Some(format!("Failed to load brands: {e}"))),
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    }

    // Poll the OCR agent from the moment the OCR button is shown.
    let show_ocr = Memo::new(move |_| import.with(|s| s.show_ocr));
    {
        let token = token.clone();
        let watching = StoredValue::new(false);
        Effect::new(move || {
            if show_ocr.get() && !watching.get_value() {
                watching.set_value(true);
                watch_agent(extracting, token.clone());
            }
        });
    }
    Effect::new(move || {
        let active = extracting.get();
        import.update(|s| s.agent_extracting = active);
    });

    let save_device = {
        let token = token.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let form = match import.with_untracked(ImportState::device_form) {
                Ok(form) => form,
                Err(e) => {
                    import.update(|s| s.notice = Some(e.to_string()));
                    return;
                }
            };
            import.update(|s| {
                s.busy = true;
                s.notice = None;
            });
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::new_device(&form.label, form.brand_id, form.device_type_id).await;
                if !token.is_live() {
                    return;
                }
                match result {
                    Ok(device_id) => {
                        storage::set(Area::Session, keys::DEVICE_ID, &device_id.to_string());
                        storage::remove(Area::Session, keys::PDF_ID);
                        import.update(|s| {
                            s.busy = false;
                            s.device_saved();
                        });
                    }
                    Err(e) => import.update(|s| {
                        s.busy = false;
                        s.notice = Some(format!("Failed to save device: {e}"));
                    }),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (form, token);
        }
    };

    let pick_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let file = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                return;
            };
            let outcome = import.try_update(|s| s.select_file(&file.name(), &file.type_()));
            match outcome {
                Some(Ok(())) => {
                    chosen_file.set_value(Some(file));
                    import.update(|s| s.notice = None);
                }
                Some(Err(e)) => {
                    chosen_file.set_value(None);
                    import.update(|s| s.notice = Some(e.to_string()));
                }
                None => {}
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let upload = {
        let token = token.clone();
        move |_| {
            let name = match import.with_untracked(ImportState::upload_name) {
                Ok(name) => name,
                Err(e) => {
                    import.update(|s| s.notice = Some(e.to_string()));
                    return;
                }
            };
            let device_id = match storage::require_session_id(keys::DEVICE_ID) {
                Ok(id) => id,
                Err(e) => {
                    import.update(|s| s.notice = Some(e.to_string()));
                    return;
                }
            };
            import.update(|s| {
                s.busy = true;
                s.notice = None;
            });
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let Some(file) = chosen_file.get_value() else {
                    import.update(|s| {
                        s.busy = false;
                        s.notice = Some("No file selected for upload".to_owned());
                    });
                    return;
                };
                let result = match crate::net::api::pdf_upload_ticket(device_id, &name).await {
                    Ok(ticket) => crate::net::api::put_pdf(&ticket.signed_url, file).await.map(|()| ticket.pdf_id),
                    Err(e) => Err(e),
                };
                if !token.is_live() {
                    return;
                }
                match result {
                    Ok(pdf_id) => {
                        storage::set(Area::Session, keys::PDF_ID, &pdf_id.to_string());
                        import.update(|s| {
                            s.busy = false;
                            s.uploaded();
                            s.notice = Some("PDF uploaded.".to_owned());
                        });
                    }
                    Err(e) => {
                        log::warn!("pdf upload failed: {e}");
                        import.update(|s| {
                            s.busy = false;
                            s.notice = Some(format!("Upload failed: {e}"));
                        });
                    }
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (name, device_id, token);
        }
    };

    let run_ocr = {
        let navigate = navigate.clone();
        move |_| {
            if !import.with_untracked(ImportState::can_run_ocr) {
                return;
            }
            let pdf_id = match storage::require_session_id(keys::PDF_ID) {
                Ok(id) => id,
                Err(e) => {
                    import.update(|s| s.notice = Some(e.to_string()));
                    return;
                }
            };
            import.update(|s| {
                s.busy = true;
                s.notice = Some("Running OCR, this can take a while...".to_owned());
            });
            let navigate = navigate.clone();
            let token = token.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let result = crate::net::api::extract_pdf(pdf_id).await;
                if !token.is_live() {
                    return;
                }
                match result {
                    Ok(_) => navigate(routes::ADMIN_WORKSPACE, NavigateOptions::default()),
                    Err(e) => {
                        log::warn!("ocr for pdf {pdf_id} failed: {e}");
                        import.update(|s| {
                            s.busy = false;
                            s.notice = Some(format!("OCR failed: {e}"));
                        });
                    }
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (pdf_id, navigate, token);
        }
    };

    let notice = Signal::derive(move || import.with(|s| s.notice.clone()));
    let parse_choice = |raw: String| raw.parse::<i64>().ok();

    view! {
        <div class="import-page">
            <h1>"Import a device manual"</h1>
            <Show when=move || import.with(|s| s.step == ImportStep::Device)>
                <form class="import-step" on:submit=save_device.clone()>
                    <h2>"1. Device"</h2>
                    <input
                        type="text"
                        placeholder="Device name"
                        prop:value=move || import.with(|s| s.label.clone())
                        on:input=move |ev| import.update(|s| s.label = event_target_value(&ev))
                    />
                    <select on:change=move |ev| import.update(|s| s.brand_id = parse_choice(event_target_value(&ev)))>
                        <option value="">"Brand"</option>
                        {move || import.with(|s| {
                            s.brands
                                .iter()
                                .map(|b| view! { <option value=b.id.to_string()>{b.label.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <select on:change=move |ev| import.update(|s| s.device_type_id = parse_choice(event_target_value(&ev)))>
                        <option value="">"Category"</option>
                        {move || import.with(|s| {
                            s.device_types
                                .iter()
                                .map(|t| view! { <option value=t.id.to_string()>{t.label.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <button type="submit" disabled=move || import.with(|s| s.busy)>"Save device"</button>
                </form>
            </Show>
            <Show when=move || import.with(|s| s.step == ImportStep::Upload)>
                <section class="import-step">
                    <h2>"2. Manual"</h2>
                    {
                        let upload = upload.clone();
                        view! {
                    <Show when=move || !import.with(|s| s.show_ocr)>
                        <input type="file" accept="application/pdf" on:change=pick_file/>
                        <input
                            type="text"
                            placeholder="PDF name"
                            prop:value=move || import.with(|s| s.pdf_name.clone())
                            on:input=move |ev| import.update(|s| s.pdf_name = event_target_value(&ev))
                        />
                        <button
                            disabled=move || import.with(|s| s.busy || !s.file_selected)
                            on:click=upload.clone()
                        >
                            "Upload"
                        </button>
                    </Show>
                        }
                    }
                    {
                        let run_ocr = run_ocr.clone();
                        view! {
                    <Show when=move || import.with(|s| s.show_ocr)>
                        <button
                            class="import-step__ocr"
                            disabled=move || !import.with(ImportState::can_run_ocr)
                            on:click=run_ocr.clone()
                        >
                            "Run OCR"
                        </button>
                        <Show when=move || extracting.get()>
                            <p class="import-step__hint">"The extraction agent is busy with another PDF."</p>
                        </Show>
                    </Show>
                        }
                    }
                </section>
            </Show>
            <Show when=move || import.with(|s| s.busy)>
                <Loader/>
            </Show>
            <Notice notice=notice/>
        </div>
    }
}
