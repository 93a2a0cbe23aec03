use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::{Environment, ErrorKind, Value};

use crate::assets::AssetVersioner;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("render failed: {0}")]
    Failed(#[from] minijinja::Error),
}

/// Page renderer backed by a template directory.
///
/// Templates get `static_url(path)` (also usable as a filter) bound to the
/// versioner handed in here, plus a `site_name` global.
pub struct Renderer {
    env: Environment<'static>,
    template_dir: PathBuf,
    versioner: Arc<AssetVersioner>,
    site_name: String,
    reload: bool,
}

impl Renderer {
    pub fn new(
        template_dir: impl Into<PathBuf>,
        versioner: Arc<AssetVersioner>,
        site_name: &str,
    ) -> Self {
        let template_dir = template_dir.into();
        let env = build_env(&template_dir, &versioner, site_name);
        Self {
            env,
            template_dir,
            versioner,
            site_name: site_name.to_owned(),
            reload: false,
        }
    }

    /// Re-read templates from disk on every render.
    #[must_use]
    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String, RenderError> {
        if self.reload {
            let env = build_env(&self.template_dir, &self.versioner, &self.site_name);
            render_with(&env, name, ctx)
        } else {
            render_with(&self.env, name, ctx)
        }
    }
}

fn build_env(
    template_dir: &Path,
    versioner: &Arc<AssetVersioner>,
    site_name: &str,
) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(minijinja::path_loader(template_dir));
    env.add_global("site_name", site_name.to_owned());

    let v = Arc::clone(versioner);
    env.add_function("static_url", move |path: String| {
        Value::from_safe_string(v.resolve(&path).to_string())
    });
    let v = Arc::clone(versioner);
    env.add_filter("static_url", move |path: String| {
        Value::from_safe_string(v.resolve(&path).to_string())
    });

    env
}

fn render_with(env: &Environment<'_>, name: &str, ctx: Value) -> Result<String, RenderError> {
    let tmpl = env.get_template(name).map_err(|e| {
        if e.kind() == ErrorKind::TemplateNotFound {
            RenderError::NotFound(name.to_owned())
        } else {
            RenderError::Failed(e)
        }
    })?;
    Ok(tmpl.render(ctx)?)
}
