use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VersionParams {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct AssetVersionResponse {
    pub path: String,
    pub url: String,
    pub version: u64,
    pub modified_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new().route("/api/assets/version", get(asset_version))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Report the version a template would currently embed for `path`.
/// Unlike template rendering, a missing asset is an error here (404).
#[tracing::instrument(skip_all, fields(path = %params.path))]
async fn asset_version(
    State(state): State<AppState>,
    Query(params): Query<VersionParams>,
) -> Result<Json<AssetVersionResponse>, ApiError> {
    let asset = state.versioner.stat(&params.path)?;
    let url = state.versioner.versioned_url(&asset).to_string();

    Ok(Json(AssetVersionResponse {
        version: asset.version(),
        modified_at: DateTime::<Utc>::from(asset.last_modified),
        path: asset.path,
        url,
    }))
}
