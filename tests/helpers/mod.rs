#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use site_assets::config::Config;
use site_assets::state::AppState;

/// A throwaway site: static root and template directory under one temp dir.
pub struct TestSite {
    pub dir: tempfile::TempDir,
    pub static_root: PathBuf,
    pub template_dir: PathBuf,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let static_root = dir.path().join("static");
        let template_dir = dir.path().join("templates");
        std::fs::create_dir_all(&static_root).unwrap();
        std::fs::create_dir_all(template_dir.join("public")).unwrap();
        Self {
            dir,
            static_root,
            template_dir,
        }
    }

    /// Write a static file and pin its modification time.
    pub fn write_asset(&self, rel: &str, body: &str, mtime_secs: u64) {
        let full = self.static_root.join(rel);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, body).unwrap();
        set_mtime(&full, mtime_secs);
    }

    pub fn write_template(&self, name: &str, body: &str) {
        let full = self.template_dir.join(name);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, body).unwrap();
    }

    /// Config with test defaults pointing at this site.
    pub fn config(&self) -> Config {
        Config {
            listen: "127.0.0.1:0".into(),
            static_root: self.static_root.clone(),
            static_url: "/static".into(),
            static_max_age: 2_592_000,
            static_mtime_ttl: 0,
            template_dir: self.template_dir.clone(),
            site_name: "Doce Esperança".into(),
            dev_mode: false,
        }
    }
}

pub fn set_mtime(path: &Path, secs: u64) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Build the full router for the given config.
pub fn test_router(config: Config) -> Router {
    site_assets::app::build(AppState::new(config))
}

/// Send a GET request and return status, headers and raw body.
pub async fn get_raw(app: &Router, path: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let req = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

/// Send a GET request and parse the body as JSON.
pub async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let (status, _, bytes) = get_raw(app, path).await;
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Send a GET request and return the body as text.
pub async fn get_text(app: &Router, path: &str) -> (StatusCode, String) {
    let (status, _, bytes) = get_raw(app, path).await;
    (status, String::from_utf8(bytes).unwrap())
}

pub fn cache_control(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
}
