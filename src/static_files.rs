use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::assets::{AssetError, AssetVersioner, path};
use crate::state::AppState;

/// `Cache-Control` policy for files under the static mount.
#[derive(Debug, Clone, Copy)]
pub struct CacheHeaders {
    pub max_age: u64,
}

impl CacheHeaders {
    /// Versioned URLs change whenever the file does, so proxies may keep them
    /// for the full max-age. Unversioned URLs must be revalidated.
    pub fn cache_control(self, versioned: bool) -> String {
        if versioned {
            format!("public, max-age={}, immutable", self.max_age)
        } else {
            "no-cache".to_owned()
        }
    }
}

/// Whether the request carries a `v` query parameter.
pub fn has_version_param(uri: &Uri) -> bool {
    uri.query().is_some_and(|q| {
        url::form_urlencoded::parse(q.as_bytes()).any(|(k, v)| k == "v" && !v.is_empty())
    })
}

async fn cache_headers(State(policy): State<CacheHeaders>, req: Request, next: Next) -> Response {
    let versioned = has_version_param(req.uri());
    let mut resp = next.run(req).await;

    let status = resp.status();
    if (status.is_success() || status == StatusCode::NOT_MODIFIED)
        && let Ok(value) = HeaderValue::from_str(&policy.cache_control(versioned))
    {
        resp.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    resp
}

/// Whether a request path (relative to the mount) follows a symlink out of
/// the static root. Paths that do not normalize are left to `ServeDir`, which
/// rejects them itself.
pub fn escapes_root(versioner: &AssetVersioner, request_path: &str) -> bool {
    let Ok(decoded) = percent_decode_str(request_path).decode_utf8() else {
        return false;
    };
    path::normalize(&decoded).is_ok()
        && matches!(versioner.locate(&decoded), Err(AssetError::InvalidPath(_)))
}

async fn confine_to_root(
    State(versioner): State<Arc<AssetVersioner>>,
    req: Request,
    next: Next,
) -> Response {
    if escapes_root(&versioner, req.uri().path()) {
        tracing::warn!(path = req.uri().path(), "refusing static path outside the root");
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

/// Serve the static root under the configured mount path.
pub fn router(state: &AppState) -> Router<AppState> {
    let cfg = &state.config;
    let serve_dir = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.versioner),
            confine_to_root,
        ))
        .service(ServeDir::new(&cfg.static_root));
    let mount = cfg.static_mount_path();
    let policy = CacheHeaders {
        max_age: cfg.static_max_age,
    };

    let router = if mount.is_empty() {
        Router::new().fallback_service(serve_dir)
    } else {
        Router::new().nest_service(&mount, serve_dir)
    };

    let shown = if mount.is_empty() { "/" } else { mount.as_str() };
    tracing::info!(mount = shown, root = %cfg.static_root.display(), "serving static files");

    router.layer(middleware::from_fn_with_state(policy, cache_headers))
}
