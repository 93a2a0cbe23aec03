use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{api, pages, static_files};

/// The full site: health check, API, pages and the static mount.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .merge(api::router())
        .merge(pages::router())
        .merge(static_files::router(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
