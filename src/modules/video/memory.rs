//! In-memory gateways used by the service and handler tests.

use super::events::VideoMediaCreated;
use super::gateway::{media_location, GatewayResult, MediaEventPublisher, MediaResourceGateway, VideoGateway};
use super::media::{AudioVideoMedia, ImageMedia, MediaKind, Resource};
use super::model::{Pagination, Video, VideoPreview, VideoSearchQuery};
use crate::config::settings::AppConfig;
use crate::state::AppState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryVideoGateway {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn find(&self, id: Uuid) -> Option<Video> {
        self.videos.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl VideoGateway for InMemoryVideoGateway {
    async fn create(&self, video: Video) -> GatewayResult<Video> {
        self.save(video).await
    }

    async fn save(&self, video: Video) -> GatewayResult<Video> {
        self.videos.write().await.insert(video.id(), video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> GatewayResult<Option<Video>> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> GatewayResult<()> {
        self.videos.write().await.remove(&id);
        Ok(())
    }

    async fn find_all(&self, query: &VideoSearchQuery) -> GatewayResult<Pagination<VideoPreview>> {
        let videos = self.videos.read().await;
        let terms = query.terms.as_ref().map(|t| t.to_lowercase());

        let mut matching: Vec<VideoPreview> = videos
            .values()
            .filter(|video| match &terms {
                Some(terms) => {
                    video.metadata().title.to_lowercase().contains(terms)
                        || video.metadata().description.to_lowercase().contains(terms)
                }
                None => true,
            })
            .map(VideoPreview::from)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let offset = u64::from(query.page) * u64::from(query.per_page);
        let items = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(query.per_page as usize)
            .collect();

        Ok(Pagination {
            current_page: query.page,
            per_page: query.per_page,
            total,
            items,
        })
    }
}

#[derive(Default)]
pub struct InMemoryMediaResourceGateway {
    objects: RwLock<HashMap<String, Resource>>,
}

impl InMemoryMediaResourceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.objects.read().await.len()
    }

    async fn put(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> String {
        let location = media_location(video_id, kind);
        self.objects.write().await.insert(location.clone(), resource);
        location
    }
}

#[async_trait]
impl MediaResourceGateway for InMemoryMediaResourceGateway {
    async fn store_audio_video(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> GatewayResult<AudioVideoMedia> {
        let (checksum, name) = (resource.checksum.clone(), resource.name.clone());
        let location = self.put(video_id, kind, resource).await;
        Ok(AudioVideoMedia::new(checksum, name, location))
    }

    async fn store_image(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> GatewayResult<ImageMedia> {
        let (checksum, name) = (resource.checksum.clone(), resource.name.clone());
        let location = self.put(video_id, kind, resource).await;
        Ok(ImageMedia::new(checksum, name, location))
    }

    async fn get_resource(&self, video_id: Uuid, kind: MediaKind) -> GatewayResult<Option<Resource>> {
        Ok(self.objects.read().await.get(&media_location(video_id, kind)).cloned())
    }

    async fn clear_resources(&self, video_id: Uuid) -> GatewayResult<()> {
        let prefix = super::gateway::video_prefix(video_id);
        self.objects.write().await.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    published: RwLock<Vec<VideoMediaCreated>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn take_published(&self) -> Vec<VideoMediaCreated> {
        std::mem::take(&mut *self.published.write().await)
    }
}

#[async_trait]
impl MediaEventPublisher for RecordingPublisher {
    async fn publish(&self, event: &VideoMediaCreated) -> GatewayResult<()> {
        self.published.write().await.push(event.clone());
        Ok(())
    }
}

/// Publisher whose broker is always unreachable.
pub struct FailingPublisher;

#[async_trait]
impl MediaEventPublisher for FailingPublisher {
    async fn publish(&self, _event: &VideoMediaCreated) -> GatewayResult<()> {
        Err(anyhow::anyhow!("broker unreachable").into())
    }
}

/// An [`AppState`] wired to in-memory gateways, with handles kept for assertions.
pub struct TestContext {
    pub state: AppState,
    pub videos: Arc<InMemoryVideoGateway>,
    pub media: Arc<InMemoryMediaResourceGateway>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestContext {
    pub fn new() -> Self {
        let videos = Arc::new(InMemoryVideoGateway::new());
        let media = Arc::new(InMemoryMediaResourceGateway::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let state = AppState::new(test_config(), videos.clone(), media.clone(), publisher.clone());

        Self {
            state,
            videos,
            media,
            publisher,
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "postgres://localhost/videos_test".to_string(),
        rabbitmq_url: "amqp://localhost:5672".to_string(),
        minio_url: "http://localhost:9000".to_string(),
        minio_bucket: "videos".to_string(),
        minio_access_key: "minio".to_string(),
        minio_secret_key: "minio123".to_string(),
        encoder_request_queue: "video.created.queue".to_string(),
        encoder_result_queue: "video.encoded.queue".to_string(),
        max_upload_bytes: 1024 * 1024,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::video::model::{Rating, VideoMetadata};
    use std::collections::HashSet;

    fn video(title: &str) -> Video {
        let metadata = VideoMetadata {
            title: title.to_string(),
            description: String::new(),
            launched_at: 2020,
            duration: 90.0,
            opened: false,
            published: false,
            rating: Rating::L,
        };
        Video::new(metadata, HashSet::new(), HashSet::new(), HashSet::new()).unwrap()
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let gateway = InMemoryVideoGateway::new();
        gateway.create(video("Tenet")).await.unwrap();

        let query = VideoSearchQuery { page: u32::MAX, per_page: 100, terms: None };
        let page = gateway.find_all(&query).await.unwrap();

        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }
}
