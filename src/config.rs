use std::env;
use std::path::PathBuf;

/// Seconds a reverse proxy may keep a versioned asset (30 days).
pub const DEFAULT_STATIC_MAX_AGE: u64 = 2_592_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    pub static_root: PathBuf,
    /// Public prefix for generated asset URLs, without a trailing slash.
    /// May be a path (`/static`) or an absolute URL (`https://cdn.example.org/static`).
    pub static_url: String,
    pub static_max_age: u64,
    /// Seconds to remember a file's mtime; `0` stats on every lookup.
    pub static_mtime_ttl: u64,
    pub template_dir: PathBuf,
    pub site_name: String,
    pub dev_mode: bool,
}

fn normalize_static_url(s: &str) -> String {
    s.trim().trim_end_matches('/').to_owned()
}

/// Path component of a static URL prefix, used to mount the file server.
/// Returns an empty string when the prefix sits at the site root.
fn mount_path_of(static_url: &str) -> String {
    let path = if static_url.starts_with("http://") || static_url.starts_with("https://") {
        url::Url::parse(static_url).map_or_else(|_| String::new(), |u| u.path().to_owned())
    } else if let Some(rest) = static_url.strip_prefix("//") {
        url::Url::parse(&format!("http://{rest}"))
            .map_or_else(|_| String::new(), |u| u.path().to_owned())
    } else {
        static_url.to_owned()
    };

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

impl Config {
    pub fn load() -> Self {
        Self {
            listen: env::var("SITE_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            static_root: env::var("SITE_STATIC_ROOT")
                .map_or_else(|_| PathBuf::from("app/static"), PathBuf::from),
            static_url: env::var("SITE_STATIC_URL")
                .map_or_else(|_| "/static".into(), |v| normalize_static_url(&v)),
            static_max_age: env::var("SITE_STATIC_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_STATIC_MAX_AGE),
            static_mtime_ttl: env::var("SITE_STATIC_MTIME_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            template_dir: env::var("SITE_TEMPLATE_DIR")
                .map_or_else(|_| PathBuf::from("app/templates"), PathBuf::from),
            site_name: env::var("SITE_NAME").unwrap_or_else(|_| "Doce Esperança".into()),
            dev_mode: env::var("SITE_DEV").ok().is_some_and(|v| v == "true"),
        }
    }

    /// Where the static file server is mounted on this app's router.
    pub fn static_mount_path(&self) -> String {
        mount_path_of(&self.static_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_static_url_strips_trailing_slashes() {
        assert_eq!(normalize_static_url("/static/"), "/static");
        assert_eq!(normalize_static_url(" /assets// "), "/assets");
        assert_eq!(normalize_static_url("/"), "");
    }

    #[test]
    fn mount_path_for_relative_prefix() {
        assert_eq!(mount_path_of("/static"), "/static");
        assert_eq!(mount_path_of("static"), "/static");
    }

    #[test]
    fn mount_path_for_absolute_prefix() {
        assert_eq!(mount_path_of("https://cdn.example.org/static"), "/static");
        assert_eq!(mount_path_of("//cdn.example.org/assets/v1"), "/assets/v1");
    }

    #[test]
    fn mount_path_at_root_is_empty() {
        assert_eq!(mount_path_of(""), "");
        assert_eq!(mount_path_of("https://cdn.example.org"), "");
    }

    #[test]
    fn default_static_max_age() {
        // Only reliable when SITE_STATIC_MAX_AGE is unset (typical in test/CI)
        let config = Config::load();
        if env::var("SITE_STATIC_MAX_AGE").is_err() {
            assert_eq!(config.static_max_age, 2_592_000);
        }
    }

    #[test]
    fn default_static_url() {
        let config = Config::load();
        if env::var("SITE_STATIC_URL").is_err() {
            assert_eq!(config.static_url, "/static");
            assert_eq!(config.static_mount_path(), "/static");
        }
    }
}
