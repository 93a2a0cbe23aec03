#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("invalid asset path: {0}")]
    InvalidPath(String),

    #[error("failed to stat {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
