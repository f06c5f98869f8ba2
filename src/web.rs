//! Portal hosting for `dmc serve`.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR routes of both portals, the hydrate
//! bundle under `/pkg`, and `/healthz`. The portal calls the REST backend
//! directly from the browser, so nothing is proxied here.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::CliError;

/// Routes that do not depend on the Leptos build.
pub fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Full portal router: SSR pages, static bundle, health check.
///
/// # Errors
///
/// Returns [`CliError::LeptosConfig`] when `[package.metadata.leptos]` cannot be read.
pub fn portal_app() -> Result<Router, CliError> {
    let conf = get_configuration(None).map_err(|e| CliError::LeptosConfig(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

/// Bind `0.0.0.0:port` and serve until the process is stopped.
pub async fn serve(port: u16) -> Result<(), CliError> {
    let app = portal_app()?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(CliError::Serve)?;
    tracing::info!(%port, "portal listening");
    axum::serve(listener, app).await.map_err(CliError::Serve)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
