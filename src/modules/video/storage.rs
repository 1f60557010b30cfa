use super::gateway::{media_location, video_prefix, GatewayResult, MediaResourceGateway};
use super::media::{AudioVideoMedia, ImageMedia, MediaKind, Resource};
use crate::common::upload::upload_to_s3;
use crate::infrastructure::storage::s3::StorageService;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

/// Media bytes in the configured S3/MinIO bucket, one object per slot.
#[derive(Clone)]
pub struct S3MediaResourceGateway {
    storage: StorageService,
}

impl S3MediaResourceGateway {
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    async fn put(&self, video_id: Uuid, kind: MediaKind, resource: &Resource) -> GatewayResult<String> {
        let key = media_location(video_id, kind);
        upload_to_s3(&self.storage, &key, &resource.content_type, resource.content.clone()).await?;
        info!(%video_id, %kind, key = %key, size = resource.content.len(), "Stored media resource");
        Ok(key)
    }
}

#[async_trait]
impl MediaResourceGateway for S3MediaResourceGateway {
    async fn store_audio_video(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> GatewayResult<AudioVideoMedia> {
        let location = self.put(video_id, kind, &resource).await?;
        Ok(AudioVideoMedia::new(resource.checksum, resource.name, location))
    }

    async fn store_image(&self, video_id: Uuid, kind: MediaKind, resource: Resource) -> GatewayResult<ImageMedia> {
        let location = self.put(video_id, kind, &resource).await?;
        Ok(ImageMedia::new(resource.checksum, resource.name, location))
    }

    async fn get_resource(&self, video_id: Uuid, kind: MediaKind) -> GatewayResult<Option<Resource>> {
        let key = media_location(video_id, kind);
        let object = self.storage.get_object(&key).await?;

        Ok(object.map(|object| {
            let content_type = object
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string());
            Resource::with(object.body, content_type, key)
        }))
    }

    async fn clear_resources(&self, video_id: Uuid) -> GatewayResult<()> {
        let deleted = self.storage.delete_prefix(&video_prefix(video_id)).await?;
        info!(%video_id, deleted, "Cleared media resources");
        Ok(())
    }
}
