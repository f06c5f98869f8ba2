//! Admin PDF tracking list (`/admin/tracking`).

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wire::models::{BrandsAndTypes, PdfStateRow, StatusFilter, scoring_percent};

use crate::components::loader::{Loader, Notice};
use crate::routes::{self, Portal};
use crate::state::auth::AuthState;
use crate::state::tracking::{RowRoute, TrackingState, or_unknown};
use crate::util::auth::{install_unauth_redirect, resolve_local_access, sign_out};
use crate::util::lifetime::CancelToken;
use crate::util::storage::{self, Area, keys};
use crate::util::time_format::format_time;

const ALL: &str = "*";

#[component]
pub fn TrackingPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    resolve_local_access(auth);
    install_unauth_redirect(auth, navigate.clone(), Portal::Admin.login());

    let tracking = RwSignal::new(TrackingState::new());
    let catalog = RwSignal::new(BrandsAndTypes::default());
    let token = CancelToken::for_owner();

    {
        let token = token.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::brands_and_types().await;
            token.if_live(|| match result {
                Ok(loaded) => catalog.set(loaded),
                Err(e) => log::warn!("tracking filters not loaded: {e}"),
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    }

    let query = Memo::new(move |_| tracking.with(TrackingState::query));
    Effect::new(move || {
        let query = query.get();
        tracking.update(|t| t.loading = true);
        let token = token.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::pdf_states(&query).await;
            if !token.is_live() || tracking.with_untracked(|t| t.query() != query) {
                return;
            }
            match result {
                Ok(page) => tracking.update(|t| t.apply_page(page)),
                Err(e) => tracking.update(|t| t.fail_page(&e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (query, token);
    });

    let process = {
        let navigate = navigate.clone();
        move |_| match tracking.with_untracked(TrackingState::process_selected) {
            Ok(route) => {
                storage::set(Area::Session, keys::PDF_ID, &route.pdf_id().to_string());
                let target = match route {
                    RowRoute::Finish { .. } => routes::ADMIN_FINISH.to_owned(),
                    RowRoute::ResumeImport { .. } => routes::import_resume(),
                };
                navigate(&target, NavigateOptions::default());
            }
            Err(e) => tracking.update(|t| t.notice = Some(e.to_string())),
        }
    };
    let start_import = {
        let navigate = navigate.clone();
        move |_| navigate(routes::ADMIN_IMPORT, NavigateOptions::default())
    };
    let open_chat = {
        let navigate = navigate.clone();
        move |_| navigate(&Portal::Admin.new_chat(), NavigateOptions::default())
    };
    let log_out = move |_| sign_out(auth);

    let label_options = move |labels: Vec<String>| {
        labels.into_iter().map(|l| view! { <option value=l.clone()>{l.clone()}</option> }).collect_view()
    };
    let notice = Signal::derive(move || tracking.with(|t| t.notice.clone()));

    view! {
        <div class="tracking-page">
            <header class="tracking-page__header">
                <h1>"PDF tracking"</h1>
                <button on:click=start_import>"Import PDF"</button>
                <button on:click=open_chat>"Chat"</button>
                <button on:click=log_out>"Log out"</button>
            </header>
            <div class="tracking-page__filters">
                <input
                    type="search"
                    placeholder="Search by name"
                    prop:value=move || tracking.with(|t| t.name.clone())
                    on:input=move |ev| tracking.update(|t| {
                        t.name = event_target_value(&ev);
                        t.filters_changed();
                    })
                />
                <select
                    prop:value=move || tracking.with(|t| t.brand.clone())
                    on:change=move |ev| tracking.update(|t| {
                        t.brand = event_target_value(&ev);
                        t.filters_changed();
                    })
                >
                    <option value=ALL>"All brands"</option>
                    {move || label_options(catalog.with(|c| c.brands.iter().flatten().map(|b| b.label.clone()).collect()))}
                </select>
                <select
                    prop:value=move || tracking.with(|t| t.category.clone())
                    on:change=move |ev| tracking.update(|t| {
                        t.category = event_target_value(&ev);
                        t.filters_changed();
                    })
                >
                    <option value=ALL>"All categories"</option>
                    {move || label_options(catalog.with(|c| c.device_types.iter().flatten().map(|d| d.label.clone()).collect()))}
                </select>
                <select
                    prop:value=move || tracking.with(|t| t.status.as_str())
                    on:change=move |ev| tracking.update(|t| {
                        t.status = StatusFilter::parse(&event_target_value(&ev));
                        t.filters_changed();
                    })
                >
                    <option value=StatusFilter::All.as_str()>"All statuses"</option>
                    <option value=StatusFilter::InProgress.as_str()>"In progress"</option>
                    <option value=StatusFilter::Complete.as_str()>"Complete"</option>
                </select>
            </div>
            <Show when=move || !tracking.with(|t| t.loading) fallback=|| view! { <Loader label="Loading PDFs..."/> }>
                <table class="tracking-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Brand"</th>
                            <th>"Category"</th>
                            <th>"Status"</th>
                            <th>"Progress"</th>
                            <th>"Last modified"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || tracking.with(|t| t.rows.clone())
                            key=|row| row.pdf_id
                            children=move |row| view! { <TrackingRow row=row tracking=tracking/> }
                        />
                    </tbody>
                </table>
            </Show>
            <nav class="pager">
                <button
                    disabled=move || !tracking.with(|t| t.cursor.has_prev)
                    on:click=move |_| tracking.update(|t| {
                        t.cursor.prev();
                    })
                >
                    "Previous"
                </button>
                <span>{move || tracking.with(|t| t.cursor.page)}</span>
                <button
                    disabled=move || !tracking.with(|t| t.cursor.has_next)
                    on:click=move |_| tracking.update(|t| {
                        t.cursor.next();
                    })
                >
                    "Next"
                </button>
            </nav>
            <button
                class="tracking-page__process"
                disabled=move || tracking.with(|t| t.selected.is_none())
                on:click=process
            >
                "Process"
            </button>
            <Notice notice=notice/>
        </div>
    }
}

#[component]
fn TrackingRow(row: PdfStateRow, tracking: RwSignal<TrackingState>) -> impl IntoView {
    let pdf_id = row.pdf_id;
    let scoring = row.pdf_scoring.unwrap_or(0);
    let modified = row.last_modified.as_deref().map(format_time).unwrap_or_default();

    view! {
        <tr
            class="tracking-row"
            class:tracking-row--selected=move || tracking.with(|t| t.selected == Some(pdf_id))
            on:click=move |_| tracking.update(|t| t.select(pdf_id))
        >
            <td>{row.display_name()}</td>
            <td>{or_unknown(row.brand.as_deref()).to_owned()}</td>
            <td>{or_unknown(row.category.as_deref()).to_owned()}</td>
            <td>{row.stage().label()}</td>
            <td>
                <progress max="100" value=scoring_percent(scoring)></progress>
                {format!("{}%", scoring_percent(scoring))}
            </td>
            <td>{modified}</td>
        </tr>
    }
}
