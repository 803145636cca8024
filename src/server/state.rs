use std::sync::Arc;

use crate::feed::MapData;
use crate::layers::MapConfig;

// Application state shared by all handlers; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<MapData>,
    pub config: Arc<MapConfig>,
    pub legend_html: Arc<str>,
}

impl AppState {
    pub fn new(data: MapData) -> Self {
        let config = MapConfig::for_variant(data.variant);
        let legend_html = config.legend.render_html();
        Self {
            data: Arc::new(data),
            config: Arc::new(config),
            legend_html: Arc::from(legend_html),
        }
    }
}
