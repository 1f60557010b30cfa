use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl MediaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::Pending => "PENDING",
            MediaStatus::Processing => "PROCESSING",
            MediaStatus::Completed => "COMPLETED",
            MediaStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(MediaStatus::Pending),
            "PROCESSING" => Ok(MediaStatus::Processing),
            "COMPLETED" => Ok(MediaStatus::Completed),
            "ERROR" => Ok(MediaStatus::Error),
            other => Err(format!("unknown media status '{}'", other)),
        }
    }
}

/// The five attachment points of a video.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Video,
    Trailer,
    Banner,
    Thumbnail,
    ThumbnailHalf,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Video,
        MediaKind::Trailer,
        MediaKind::Banner,
        MediaKind::Thumbnail,
        MediaKind::ThumbnailHalf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "VIDEO",
            MediaKind::Trailer => "TRAILER",
            MediaKind::Banner => "BANNER",
            MediaKind::Thumbnail => "THUMBNAIL",
            MediaKind::ThumbnailHalf => "THUMBNAIL_HALF",
        }
    }

    /// Video and trailer go through the encoder; the image kinds are stored once.
    pub fn is_audio_video(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Trailer)
    }

    /// Accepted mime prefix for uploads into this slot.
    pub fn content_type_prefix(&self) -> &'static str {
        if self.is_audio_video() { "video/" } else { "image/" }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        MediaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown media kind '{}'", s))
    }
}

/// Raw uploaded content together with its SHA-256 checksum.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub content: Bytes,
    pub checksum: String,
    pub content_type: String,
    pub name: String,
}

impl Resource {
    pub fn with(content: Bytes, content_type: impl Into<String>, name: impl Into<String>) -> Self {
        let checksum = hex::encode(Sha256::digest(&content));
        Self {
            content,
            checksum,
            content_type: content_type.into(),
            name: name.into(),
        }
    }
}

fn generate_media_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct AudioVideoMedia {
    pub id: String,
    pub checksum: String,
    pub name: String,
    pub raw_location: String,
    pub encoded_location: Option<String>,
    pub status: MediaStatus,
}

impl AudioVideoMedia {
    /// Fresh upload, not yet handed to the encoder.
    pub fn new(checksum: impl Into<String>, name: impl Into<String>, raw_location: impl Into<String>) -> Self {
        Self {
            id: generate_media_id(),
            checksum: checksum.into(),
            name: name.into(),
            raw_location: raw_location.into(),
            encoded_location: None,
            status: MediaStatus::Pending,
        }
    }

    pub fn processing(&self) -> Self {
        Self {
            encoded_location: None,
            status: MediaStatus::Processing,
            ..self.clone()
        }
    }

    pub fn completed(&self, encoded_location: impl Into<String>) -> Self {
        Self {
            encoded_location: Some(encoded_location.into()),
            status: MediaStatus::Completed,
            ..self.clone()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MediaStatus::Pending
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ImageMedia {
    pub id: String,
    pub checksum: String,
    pub name: String,
    pub location: String,
}

impl ImageMedia {
    pub fn new(checksum: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: generate_media_id(),
            checksum: checksum.into(),
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Either shape of stored media, keyed by the slot it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    AudioVideo(AudioVideoMedia),
    Image(ImageMedia),
}
