//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both portals guard their pages the same way: an [`AuthState`] signal is
//! resolved to `Granted` or `Denied`, and a `Denied` result sends the user to
//! that portal's login route. The admin portal only requires a stored token;
//! the client portal also asks the backend through `client_authorize`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{Access, AuthState};
use crate::util::storage::{self, Area, keys};

pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.access == Access::Denied
}

/// Local-only access decision: a stored token is enough.
pub fn local_access(state: &AuthState) -> Access {
    if state.signed_in() { Access::Granted } else { Access::Denied }
}

/// Redirect to `login_path` whenever access has been denied.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F, login_path: &'static str)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(login_path, NavigateOptions::default());
        }
    });
}

/// Resolve access from the stored token alone (admin portal).
pub fn resolve_local_access(auth: RwSignal<AuthState>) {
    auth.update(|a| {
        a.token = storage::auth_token();
        a.access = local_access(a);
    });
}

/// Resolve access through `client_authorize` (client portal).
pub fn verify_client_access(auth: RwSignal<AuthState>) {
    auth.update(|a| {
        a.token = storage::auth_token();
        a.access = Access::Checking;
    });
    #[cfg(feature = "hydrate")]
    {
        let token = crate::util::lifetime::CancelToken::for_owner();
        leptos::task::spawn_local(async move {
            let granted = match crate::net::api::client_authorize().await {
                Ok(granted) => granted,
                Err(e) => {
                    log::warn!("client authorization failed: {e}");
                    false
                }
            };
            if token.is_live() {
                auth.update(|a| a.access = if granted { Access::Granted } else { Access::Denied });
            }
        });
    }
}

/// Persist a freshly issued token.
pub fn sign_in(auth: RwSignal<AuthState>, token: &str) {
    storage::set(Area::Local, keys::TOKEN, token);
    auth.set(AuthState { token: Some(token.to_owned()), access: Access::Granted });
}

pub fn sign_out(auth: RwSignal<AuthState>) {
    storage::remove(Area::Local, keys::TOKEN);
    auth.set(AuthState { token: None, access: Access::Denied });
}
