use std::sync::Arc;

use crate::assets::AssetVersioner;
use crate::config::Config;
use crate::render::Renderer;

#[derive(Clone)]
pub struct AppState {
    pub versioner: Arc<AssetVersioner>,
    pub renderer: Arc<Renderer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let versioner = Arc::new(AssetVersioner::from_config(&config));
        let renderer = Renderer::new(
            config.template_dir.clone(),
            Arc::clone(&versioner),
            &config.site_name,
        )
        .with_reload(config.dev_mode);

        Self {
            versioner,
            renderer: Arc::new(renderer),
            config: Arc::new(config),
        }
    }
}
