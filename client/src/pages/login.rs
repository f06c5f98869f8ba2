//! Admin and client login pages.
//!
//! Both pages store the issued token under the shared token key and move on
//! to the portal's landing route. The admin endpoint answers with an envelope;
//! the client endpoint answers with a plain `{token}` object.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loader::Notice;
use crate::routes::{self, Portal};
use crate::state::auth::{AuthState, validate_email};

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let user = username.get().trim().to_owned();
        let pass = password.get();
        if user.is_empty() || pass.is_empty() {
            notice.set(Some("Enter username and password.".to_owned()));
            return;
        }
        busy.set(true);
        notice.set(None);

        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::admin_login(&user, &pass).await {
                Ok(token) => {
                    crate::util::auth::sign_in(auth, &token);
                    navigate(Portal::Admin.home(), NavigateOptions::default());
                }
                Err(e) => {
                    log::warn!("admin login failed: {e}");
                    notice.set(Some(format!("Login failed: {e}")));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, navigate, user, pass);
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Admin sign in"</h1>
                <input
                    class="login-input"
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <Notice notice=notice.into()/>
            </form>
        </div>
    }
}

#[component]
pub fn ClientLoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let address = email.get().trim().to_owned();
        let pass = password.get();
        if let Err(e) = validate_email(&address) {
            notice.set(Some(e.to_string()));
            return;
        }
        if pass.is_empty() {
            notice.set(Some("Enter your password.".to_owned()));
            return;
        }
        busy.set(true);
        notice.set(None);

        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::client_login(&address, &pass).await {
                Ok(token) => {
                    crate::util::auth::sign_in(auth, &token);
                    navigate(Portal::Client.home(), NavigateOptions::default());
                }
                Err(e) => {
                    notice.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, navigate, address, pass);
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <input
                    class="login-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <Notice notice=notice.into()/>
                <p class="login-links">
                    <a href=routes::CLIENT_SIGN_UP>"Create an account"</a>
                    " · "
                    <a href=routes::CLIENT_FORGOT_PASSWORD>"Forgot password?"</a>
                </p>
            </form>
        </div>
    }
}
