use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let html = state
        .renderer
        .render("public/index.html", minijinja::context! { page => "index" })?;
    Ok(Html(html))
}
