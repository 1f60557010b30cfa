use crate::infrastructure::storage::s3::StorageService;
use anyhow::{anyhow, Result};
use bytes::Bytes;
use tracing::{error, info};

// Minimum part size for S3 is 5MB. We use 6MB to be safe.
const MIN_PART_SIZE: usize = 6 * 1024 * 1024;

pub struct MultipartUploader<'a> {
    storage: &'a StorageService,
    key: String,
    upload_id: String,
    parts: Vec<aws_sdk_s3::types::CompletedPart>,
    part_number: i32,
}

impl<'a> MultipartUploader<'a> {
    pub async fn new(storage: &'a StorageService, key: String, content_type: &str) -> Result<Self> {
        let upload_id = storage
            .create_multipart_upload(&key, content_type)
            .await
            .map_err(|e| anyhow!("Failed to initiate upload: {}", e))?;

        Ok(Self {
            storage,
            key,
            upload_id,
            parts: Vec::new(),
            part_number: 1,
        })
    }

    pub async fn write_part(&mut self, body: Bytes) -> Result<()> {
        let part = self
            .storage
            .upload_part(&self.key, &self.upload_id, self.part_number, body)
            .await
            .map_err(|e| anyhow!("Failed to upload part {}: {}", self.part_number, e))?;

        self.parts.push(part);
        self.part_number += 1;

        Ok(())
    }

    pub async fn finish(self) -> Result<()> {
        self.storage
            .complete_multipart_upload(&self.key, &self.upload_id, self.parts)
            .await
            .map_err(|e| anyhow!("Failed to complete upload: {}", e))
    }

    pub async fn abort(&self) -> Result<()> {
        self.storage
            .abort_multipart_upload(&self.key, &self.upload_id)
            .await
            .map_err(|e| anyhow!("Failed to abort upload: {}", e))
    }
}

/// Splits content into S3-sized parts. The last part may be smaller.
pub fn split_parts(content: &Bytes) -> Vec<Bytes> {
    let mut parts = Vec::with_capacity(content.len() / MIN_PART_SIZE + 1);
    let mut offset = 0;
    while offset < content.len() {
        let end = (offset + MIN_PART_SIZE).min(content.len());
        // Bytes::slice is a cheap ref-counted view
        parts.push(content.slice(offset..end));
        offset = end;
    }
    parts
}

/// Stores `content` under `key`, switching to a multipart upload above one part size.
pub async fn upload_to_s3(storage: &StorageService, key: &str, content_type: &str, content: Bytes) -> Result<()> {
    if content.len() <= MIN_PART_SIZE {
        return storage
            .put_object(key, content_type, content)
            .await
            .map_err(|e| anyhow!("Failed to upload {}: {}", key, e));
    }

    info!(key, size = content.len(), "Starting multipart upload");
    let mut uploader = MultipartUploader::new(storage, key.to_string(), content_type).await?;

    for part in split_parts(&content) {
        if let Err(e) = uploader.write_part(part).await {
            error!("Upload error: {}", e);
            uploader.abort().await?;
            return Err(e);
        }
    }

    uploader.finish().await
}
