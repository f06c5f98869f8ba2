//! Spinner and one-line notice used by every page.

use leptos::prelude::*;

#[component]
pub fn Loader(#[prop(into, optional)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="loader" role="status">
            <span class="loader__spinner"></span>
            {label.map(|text| view! { <span class="loader__label">{text}</span> })}
        </div>
    }
}

/// Transient failure/success line. Renders nothing while the signal is empty.
#[component]
pub fn Notice(notice: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || notice.get().is_some()>
            <p class="notice">{move || notice.get().unwrap_or_default()}</p>
        </Show>
    }
}
