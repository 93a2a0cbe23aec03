pub mod cache;
pub mod error;
pub mod path;
pub mod versioner;

use std::fmt;
use std::time::SystemTime;

pub use cache::{CachePolicy, MtimeCache};
pub use error::AssetError;
pub use versioner::AssetVersioner;

/// A file under the static root, as seen at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    /// Normalized path relative to the static root.
    pub path: String,
    pub last_modified: SystemTime,
}

impl StaticAsset {
    /// Whole seconds since the Unix epoch; pre-epoch times collapse to `0`.
    pub fn version(&self) -> u64 {
        self.last_modified
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// An asset URL with an optional `v` cache-busting parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedUrl {
    url: String,
    version: Option<u64>,
}

impl VersionedUrl {
    pub fn new(url: String, version: Option<u64>) -> Self {
        Self { url, version }
    }

    /// The URL without the `v` parameter.
    pub fn unversioned(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }
}

impl fmt::Display for VersionedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(v) => write!(f, "{}?v={v}", self.url),
            None => f.write_str(&self.url),
        }
    }
}
