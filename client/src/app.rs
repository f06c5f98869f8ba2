//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::chat::ChatPage;
use crate::pages::devices::DevicePickerPage;
use crate::pages::finish::FinishPage;
use crate::pages::forgot_password::{ForgotPasswordPage, ForgotResetPage, ForgotVerifyPage};
use crate::pages::home::HomePage;
use crate::pages::import::ImportPage;
use crate::pages::login::{AdminLoginPage, ClientLoginPage};
use crate::pages::sign_up::{SignUpPage, SignUpVerifyPage};
use crate::pages::tracking::TrackingPage;
use crate::pages::workspace::WorkspacePage;
use crate::routes::Portal;
use crate::state::auth::AuthState;
use crate::state::conversations::ConversationStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context and owns the conversation list shared by the
/// chat routes of both portals.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    let conversations = ConversationStore::new();

    view! {
        <Stylesheet id="leptos" href="/pkg/dmc.css"/>
        <Title text="Device Manual Console"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>

                <Route path=(StaticSegment("admin"), StaticSegment("login")) view=AdminLoginPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("tracking")) view=TrackingPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("import")) view=ImportPage/>
                <Route
                    path=(StaticSegment("admin"), StaticSegment("import"), StaticSegment("pdf"))
                    view=WorkspacePage
                />
                <Route path=(StaticSegment("admin"), StaticSegment("finish")) view=FinishPage/>
                <Route
                    path=(StaticSegment("admin"), StaticSegment("chat"), ParamSegment("id"))
                    view=move || view! { <ChatPage portal=Portal::Admin store=conversations/> }
                />

                <Route path=(StaticSegment("client"), StaticSegment("login")) view=ClientLoginPage/>
                <Route path=(StaticSegment("client"), StaticSegment("sign-up")) view=SignUpPage/>
                <Route
                    path=(StaticSegment("client"), StaticSegment("sign-up"), StaticSegment("verify"))
                    view=SignUpVerifyPage
                />
                <Route path=(StaticSegment("client"), StaticSegment("forgot-password")) view=ForgotPasswordPage/>
                <Route
                    path=(StaticSegment("client"), StaticSegment("forgot-password"), StaticSegment("verify"))
                    view=ForgotVerifyPage
                />
                <Route
                    path=(StaticSegment("client"), StaticSegment("forgot-password"), StaticSegment("reset"))
                    view=ForgotResetPage
                />
                <Route path=(StaticSegment("client"), StaticSegment("devices")) view=DevicePickerPage/>
                <Route
                    path=(StaticSegment("client"), StaticSegment("chat"), ParamSegment("id"))
                    view=move || view! { <ChatPage portal=Portal::Client store=conversations/> }
                />
            </Routes>
        </Router>
    }
}
