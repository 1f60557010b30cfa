use super::events::VideoMediaCreated;
use super::media::{AudioVideoMedia, ImageMedia, MediaKind, Resource};
use super::model::{Pagination, Video, VideoPreview, VideoSearchQuery};
use crate::common::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

pub type GatewayResult<T> = Result<T, AppError>;

/// Persistence of the whole video aggregate, media slots and relation sets included.
#[async_trait]
pub trait VideoGateway: Send + Sync {
    async fn create(&self, video: Video) -> GatewayResult<Video>;
    async fn save(&self, video: Video) -> GatewayResult<Video>;
    async fn find_by_id(&self, id: Uuid) -> GatewayResult<Option<Video>>;
    async fn delete_by_id(&self, id: Uuid) -> GatewayResult<()>;
    async fn find_all(&self, query: &VideoSearchQuery) -> GatewayResult<Pagination<VideoPreview>>;
}

/// Object storage for uploaded media bytes.
#[async_trait]
pub trait MediaResourceGateway: Send + Sync {
    async fn store_audio_video(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> GatewayResult<AudioVideoMedia>;
    async fn store_image(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> GatewayResult<ImageMedia>;
    async fn get_resource(&self, video_id: Uuid, kind: MediaKind) -> GatewayResult<Option<Resource>>;
    async fn clear_resources(&self, video_id: Uuid) -> GatewayResult<()>;
}

/// Hands encoding requests to the encoder.
#[async_trait]
pub trait MediaEventPublisher: Send + Sync {
    async fn publish(&self, event: &VideoMediaCreated) -> GatewayResult<()>;
}

/// Object key for a slot; one object per (video, kind).
pub fn media_location(video_id: Uuid, kind: MediaKind) -> String {
    format!("videoId-{}/type-{}", video_id, kind)
}

pub fn video_prefix(video_id: Uuid) -> String {
    format!("videoId-{}/", video_id)
}
