//! Forgot-password flow: email, emailed code, new password.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each step leaves its result in session storage (`resetEmail`, then
//! `otpCode`) for the next one. A step opened without its predecessor's key
//! sends the user back to the first step.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loader::Notice;
use crate::routes;
use crate::state::auth::{OTP_LEN, sanitize_otp_input, validate_email, validate_new_password, validate_otp};
use crate::util::storage::{self, Area, keys};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let address = email.get().trim().to_owned();
        if let Err(e) = validate_email(&address) {
            notice.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        notice.set(None);

        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::can_reset_password(&address).await {
                Ok(_) => {
                    storage::set(Area::Session, keys::RESET_EMAIL, &address);
                    navigate(routes::CLIENT_FORGOT_VERIFY, NavigateOptions::default());
                }
                Err(e) => {
                    notice.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (navigate, address);
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Reset your password"</h1>
                <p class="login-card__subtitle">"We will email you a 6-digit code."</p>
                <input
                    class="login-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Send code"
                </button>
                <Notice notice=notice.into()/>
                <p class="login-links">
                    <a href=routes::CLIENT_LOGIN>"Back to sign in"</a>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn ForgotVerifyPage() -> impl IntoView {
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        Effect::new(move || match storage::require_session(keys::RESET_EMAIL) {
            Ok(address) => email.set(address),
            Err(_) => navigate(routes::CLIENT_FORGOT_PASSWORD, NavigateOptions::default()),
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
            match crate::net::api::verify_otp(&address, &otp).await {
                Ok(_) => {
                    storage::set(Area::Session, keys::OTP_CODE, &otp);
                    navigate(routes::CLIENT_FORGOT_RESET, NavigateOptions::default());
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
        let address = email.get();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let message = match crate::net::api::resend_reset_otp(&address).await {
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
                <h1>"Enter the code"</h1>
                <p class="login-card__subtitle">
                    "Sent to " <strong>{move || email.get()}</strong>
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
                    "Verify code"
                </button>
                <button class="login-button login-button--secondary" type="button" on:click=on_resend>
                    "Resend code"
                </button>
                <Notice notice=notice.into()/>
            </form>
        </div>
    }
}

#[component]
pub fn ForgotResetPage() -> impl IntoView {
    let navigate = use_navigate();
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let ready = storage::require_session(keys::RESET_EMAIL)
                .and_then(|_| storage::require_session(keys::OTP_CODE));
            if ready.is_err() {
                navigate(routes::CLIENT_FORGOT_PASSWORD, NavigateOptions::default());
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let pass = password.get();
        if let Err(e) = validate_new_password(&pass, &confirm.get()) {
            notice.set(Some(e.to_string()));
            return;
        }
        let session = storage::require_session(keys::RESET_EMAIL)
            .and_then(|address| storage::require_session(keys::OTP_CODE).map(|otp| (address, otp)));
        let (address, otp) = match session {
            Ok(values) => values,
            Err(e) => {
                notice.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        notice.set(None);

        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::reset_password(&address, &otp, &pass).await {
                Ok(_) => {
                    storage::remove(Area::Session, keys::RESET_EMAIL);
                    storage::remove(Area::Session, keys::OTP_CODE);
                    navigate(routes::CLIENT_LOGIN, NavigateOptions::default());
                }
                Err(e) => {
                    notice.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (navigate, address, otp, pass);
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Choose a new password"</h1>
                <input
                    class="login-input"
                    type="password"
                    placeholder="New password (8+ characters)"
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
                    "Reset password"
                </button>
                <Notice notice=notice.into()/>
            </form>
        </div>
    }
}
