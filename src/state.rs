use crate::config::settings::AppConfig;
use crate::modules::video::gateway::{MediaEventPublisher, MediaResourceGateway, VideoGateway};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub videos: Arc<dyn VideoGateway>,
    pub media: Arc<dyn MediaResourceGateway>,
    pub events: Arc<dyn MediaEventPublisher>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        videos: Arc<dyn VideoGateway>,
        media: Arc<dyn MediaResourceGateway>,
        events: Arc<dyn MediaEventPublisher>,
    ) -> Self {
        Self {
            config,
            videos,
            media,
            events,
        }
    }
}
