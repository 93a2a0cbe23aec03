use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::cache::{CachePolicy, MtimeCache};
use super::error::AssetError;
use super::path;
use super::{StaticAsset, VersionedUrl};
use crate::config::Config;

/// Builds cache-busting URLs for files under a static root.
///
/// Every lookup is a read-only stat (or a cache hit under a TTL policy); the
/// versioner holds no other state and is shared across requests by `Arc`.
#[derive(Debug)]
pub struct AssetVersioner {
    root: PathBuf,
    base_url: String,
    cache: MtimeCache,
}

impl AssetVersioner {
    pub fn new(root: impl Into<PathBuf>, base_url: &str, policy: CachePolicy) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            cache: MtimeCache::new(policy),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.static_root.clone(),
            &cfg.static_url,
            CachePolicy::from_secs(cfg.static_mtime_ttl),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &MtimeCache {
        &self.cache
    }

    /// Look up an asset's modification time.
    pub fn stat(&self, raw: &str) -> Result<StaticAsset, AssetError> {
        let rel = path::normalize(raw)?;

        let modified = match self.cache.get(&rel) {
            Some(hit) => hit,
            None => match self.read_mtime(&rel) {
                Ok(modified) => {
                    self.cache.insert(&rel, Some(modified));
                    Some(modified)
                }
                Err(AssetError::NotFound(_)) => {
                    self.cache.insert(&rel, None);
                    None
                }
                Err(err) => return Err(err),
            },
        };

        match modified {
            Some(last_modified) => Ok(StaticAsset {
                path: rel,
                last_modified,
            }),
            None => Err(AssetError::NotFound(rel)),
        }
    }

    /// Versioned URL for `raw`; degrades to an unversioned URL on any failure.
    pub fn resolve(&self, raw: &str) -> VersionedUrl {
        match self.stat(raw) {
            Ok(asset) => self.versioned_url(&asset),
            Err(err) => {
                match &err {
                    AssetError::NotFound(p) => {
                        tracing::debug!(path = %p, "static asset missing, serving unversioned url");
                    }
                    _ => {
                        tracing::warn!(path = %raw, error = %err, "static asset lookup failed");
                    }
                }
                VersionedUrl::new(
                    format!("{}{}", self.base_url, path::encode_segments(path::sanitize(raw))),
                    None,
                )
            }
        }
    }

    /// URL for an asset already looked up with [`Self::stat`].
    pub fn versioned_url(&self, asset: &StaticAsset) -> VersionedUrl {
        VersionedUrl::new(
            format!("{}{}", self.base_url, path::encode_segments(asset.path.split('/'))),
            Some(asset.version()),
        )
    }

    /// On-disk location of `raw`, refusing paths that resolve outside the
    /// static root once symlinks are followed.
    pub fn locate(&self, raw: &str) -> Result<PathBuf, AssetError> {
        let rel = path::normalize(raw)?;
        self.locate_normalized(&rel)
    }

    fn locate_normalized(&self, rel: &str) -> Result<PathBuf, AssetError> {
        // Canonicalized per lookup: the root may itself be a symlink swapped on deploy.
        let root = self.root.canonicalize().map_err(|e| lookup_error(rel, e))?;
        let full = self
            .root
            .join(rel)
            .canonicalize()
            .map_err(|e| lookup_error(rel, e))?;

        if !full.starts_with(&root) {
            return Err(AssetError::InvalidPath(format!(
                "{rel} resolves outside the static root"
            )));
        }
        Ok(full)
    }

    fn read_mtime(&self, rel: &str) -> Result<SystemTime, AssetError> {
        let full = self.locate_normalized(rel)?;
        let meta = std::fs::metadata(&full).map_err(|e| lookup_error(rel, e))?;

        // Directories are not servable assets.
        if !meta.is_file() {
            return Err(AssetError::NotFound(rel.to_owned()));
        }

        meta.modified().map_err(|e| lookup_error(rel, e))
    }
}

/// A missing file, or a path walking through a regular file, is a missing
/// asset; anything else is an I/O failure.
fn lookup_error(rel: &str, source: io::Error) -> AssetError {
    match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
            AssetError::NotFound(rel.to_owned())
        }
        _ => AssetError::Io {
            path: rel.to_owned(),
            source,
        },
    }
}
