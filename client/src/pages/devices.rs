//! Client-portal device picker (`/client/devices`).
//!
//! Picking a device stores its id for the chat page and opens a new
//! conversation; "Skip" opens one without a device.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loader::Loader;
use crate::routes::Portal;
use crate::state::auth::AuthState;
use crate::state::devices::DevicePickerState;
use crate::util::auth::verify_client_access;
use crate::util::lifetime::CancelToken;
use crate::util::storage::{self, Area, keys};

#[component]
pub fn DevicePickerPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    verify_client_access(auth);
    let navigate = use_navigate();
    let picker = RwSignal::new(DevicePickerState::default());
    let token = CancelToken::for_owner();

    {
        let token = token.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::brands_and_types().await;
            token.if_live(|| match result {
                Ok(catalog) => picker.update(|p| p.set_catalog(&catalog)),
                Err(e) => log::warn!("device filters not loaded: {e}"),
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    }

    // Re-query whenever filters or page change.
    let search = Memo::new(move |_| picker.with(DevicePickerState::search));
    Effect::new(move || {
        let search = search.get();
        picker.update(|p| p.loading = true);
        let token = token.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::devices_for_chat(&search).await;
            if !token.is_live() || picker.with_untracked(|p| p.search() != search) {
                return;
            }
            match result {
                Ok(page) => picker.update(|p| p.apply_page(page)),
                Err(e) => {
                    log::warn!("device search failed: {e}");
                    picker.update(DevicePickerState::fail_page);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (search, token);
    });

    let choose = {
        let navigate = navigate.clone();
        move |device_id: Option<i64>| {
            match device_id {
                Some(id) => storage::set(Area::Session, keys::SELECTED_DEVICE_ID, &id.to_string()),
                None => storage::remove(Area::Session, keys::SELECTED_DEVICE_ID),
            }
            navigate(&Portal::Client.new_chat(), NavigateOptions::default());
        }
    };
    let skip = {
        let choose = choose.clone();
        move |_| choose(None)
    };

    let option_list = move |values: Vec<String>| {
        values
            .into_iter()
            .map(|v| view! { <option value=v.clone()>{v.clone()}</option> })
            .collect_view()
    };
    let selected_value = |value: Option<String>| value.unwrap_or_default();
    let parse_filter = |raw: String| Some(raw).filter(|v| !v.is_empty());

    view! {
        <div class="devices-page">
            <header class="devices-page__header">
                <h1>"Choose a device"</h1>
                <button class="devices-page__skip" on:click=skip>"Skip"</button>
            </header>
            <div class="devices-page__filters">
                <input
                    type="search"
                    placeholder="Search devices"
                    prop:value=move || picker.with(|p| p.name.clone())
                    on:input=move |ev| picker.update(|p| p.set_name(event_target_value(&ev)))
                />
                <select
                    prop:value=move || picker.with(|p| selected_value(p.brand.clone()))
                    on:change=move |ev| picker.update(|p| p.set_brand(parse_filter(event_target_value(&ev))))
                >
                    <option value="">"All brands"</option>
                    {move || option_list(picker.with(|p| p.brands.clone()))}
                </select>
                <select
                    prop:value=move || picker.with(|p| selected_value(p.category.clone()))
                    on:change=move |ev| picker.update(|p| p.set_category(parse_filter(event_target_value(&ev))))
                >
                    <option value="">"All categories"</option>
                    {move || option_list(picker.with(|p| p.categories.clone()))}
                </select>
                <button on:click=move |_| picker.update(DevicePickerState::clear_filters)>"Clear filters"</button>
            </div>
            <Show when=move || !picker.with(|p| p.loading) fallback=|| view! { <Loader label="Loading devices..."/> }>
                {
                    let choose = choose.clone();
                    view! {
                <Show
                    when=move || picker.with(|p| !p.devices.is_empty())
                    fallback=|| view! { <p class="devices-page__empty">"No devices found."</p> }
                >
                    <ul class="devices-page__list">
                        <For
                            each=move || picker.with(|p| p.devices.clone())
                            key=|d| d.device_id
                            children={
                                let choose = choose.clone();
                                move |device| {
                                    let choose = choose.clone();
                                    let id = device.device_id;
                                    view! {
                                        <li class="device-card" on:click=move |_| choose(Some(id))>
                                            <span class="device-card__name">{device.device_name.clone()}</span>
                                            <span class="device-card__meta">
                                                {device.brand.clone().unwrap_or_default()}
                                                " "
                                                {device.category.clone().unwrap_or_default()}
                                            </span>
                                        </li>
                                    }
                                }
                            }
                        />
                    </ul>
                </Show>
                    }
                }
            </Show>
            <nav class="pager">
                <button
                    disabled=move || !picker.with(|p| p.cursor.has_prev)
                    on:click=move |_| picker.update(|p| {
                        p.cursor.prev();
                    })
                >
                    "Previous"
                </button>
                <span>{move || picker.with(|p| p.cursor.page)}</span>
                <button
                    disabled=move || !picker.with(|p| p.cursor.has_next)
                    on:click=move |_| picker.update(|p| {
                        p.cursor.next();
                    })
                >
                    "Next"
                </button>
            </nav>
        </div>
    }
}
