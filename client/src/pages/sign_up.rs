//! Client registration: credentials, then a 6-digit emailed code.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loader::Notice;
use crate::routes;
use crate::state::auth::{OTP_LEN, sanitize_otp_input, validate_email, validate_new_password, validate_otp};
use crate::util::storage::{self, Area, keys};

#[component]
pub fn SignUpPage() -> impl IntoView {
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let address = email.get().trim().to_owned();
        let pass = password.get();
        let checked = validate_email(&address).and_then(|()| validate_new_password(&pass, &confirm.get()));
        if let Err(e) = checked {
            notice.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        notice.set(None);

        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&address, &pass).await {
                Ok(_) => {
                    storage::set(Area::Local, keys::PENDING_EMAIL, &address);
                    navigate(routes::CLIENT_SIGN_UP_VERIFY, NavigateOptions::default());
                }
                Err(e) => {
                    notice.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (navigate, address, pass);
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Create an account"</h1>
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
                    placeholder="Password (8+ characters)"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    placeholder="Confirm password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Sign up"
                </button>
                <Notice notice=notice.into()/>
                <p class="login-links">
                    <a href=routes::CLIENT_LOGIN>"Already registered? Sign in"</a>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn SignUpVerifyPage() -> impl IntoView {
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        Effect::new(move || match storage::get(Area::Local, keys::PENDING_EMAIL) {
            Some(pending) if !pending.trim().is_empty() => email.set(pending),
            _ => navigate(routes::CLIENT_SIGN_UP, NavigateOptions::default()),
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let otp = code.get();
        if let Err(e) = validate_otp(&otp) {
            notice.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        notice.set(None);

        let address = email.get();
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::verify_registration(&address, &otp).await {
                Ok(_) => {
                    storage::remove(Area::Local, keys::PENDING_EMAIL);
                    navigate(routes::CLIENT_LOGIN, NavigateOptions::default());
                }
                Err(e) => {
                    notice.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (navigate, address, otp);
    };

    let on_resend = move |_| {
        if busy.get() {
            return;
        }
        let address = email.get();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let message = match crate::net::api::resend_registration_otp(&address).await {
                Ok(message) => message.unwrap_or_else(|| "A new code was sent.".to_owned()),
                Err(e) => e.to_string(),
            };
            notice.set(Some(message));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = address;
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Verify your email"</h1>
                <p class="login-card__subtitle">
                    "Enter the code sent to " <strong>{move || email.get()}</strong>
                </p>
                <input
                    class="login-input login-input--code"
                    type="text"
                    inputmode="numeric"
                    maxlength=OTP_LEN.to_string()
                    placeholder="123456"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(sanitize_otp_input(&event_target_value(&ev)))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Verify"
                </button>
                <button class="login-button login-button--secondary" type="button" on:click=on_resend>
                    "Resend code"
                </button>
                <Notice notice=notice.into()/>
            </form>
        </div>
    }
}
