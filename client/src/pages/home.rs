//! Landing page (`/`): entry points for both portals.

use leptos::prelude::*;

use crate::routes::Portal;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"Device Manual Console"</h1>
            <p>"Ask questions about your device manuals, or prepare new manuals for search."</p>
            <nav class="home-page__portals">
                <a class="home-page__portal" href=Portal::Client.home()>"Chat with a device"</a>
                <a class="home-page__portal" href=Portal::Admin.home()>"Manage manuals"</a>
            </nav>
        </div>
    }
}
