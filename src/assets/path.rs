use url::Url;

use super::error::AssetError;

/// Normalize a template-supplied asset path into a root-relative form.
///
/// Leading slashes, empty segments and `.` segments are dropped. Paths that
/// would leave the static root (`..`) or carry NUL bytes are rejected so the
/// filesystem is never consulted outside the root.
pub fn normalize(raw: &str) -> Result<String, AssetError> {
    if raw.contains('\0') {
        return Err(AssetError::InvalidPath(
            "path must not contain null bytes".into(),
        ));
    }

    let mut segments = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(AssetError::InvalidPath(
                    "path must not contain '..'".into(),
                ));
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(AssetError::InvalidPath("path is empty".into()));
    }
    Ok(segments.join("/"))
}

/// Lenient variant of [`normalize`] used to build fallback URLs: drops every
/// segment that `normalize` would reject instead of failing.
pub fn sanitize(raw: &str) -> Vec<&str> {
    raw.split(['/', '\\'])
        .filter(|s| !matches!(*s, "" | "." | "..") && !s.contains('\0'))
        .collect()
}

/// Percent-encode path segments into an absolute URL path (`/a/b.css`).
///
/// `'` and `&` are encoded as well so the result can be embedded in an HTML
/// attribute without further escaping.
pub fn encode_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut scratch = Url::parse("http://localhost/").expect("static base url is valid");
    if let Ok(mut path) = scratch.path_segments_mut() {
        path.clear().extend(segments);
    }
    scratch.path().replace('\'', "%27").replace('&', "%26")
}
