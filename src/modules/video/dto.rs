use super::media::{AudioVideoMedia, ImageMedia, Media, MediaKind, MediaStatus};
use super::model::{Rating, Video};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

// --- REQUESTS ---

/// Full video state; used for both create and update since updates replace everything.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VideoRequest {
    #[validate(length(min = 1, max = 255, message = "'title' must be between 1 and 255 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 4000, message = "'description' must be at most 4000 characters"))]
    pub description: String,
    pub launched_at: i32,
    #[validate(range(min = 0.0, message = "'duration' must not be negative"))]
    pub duration: f64,
    #[serde(default)]
    pub opened: bool,
    #[serde(default)]
    pub published: bool,
    /// One of ER, L, AGE_10, AGE_12, AGE_14, AGE_16, AGE_18
    pub rating: String,
    #[serde(default)]
    pub categories: Vec<Uuid>,
    #[serde(default)]
    pub genres: Vec<Uuid>,
    #[serde(default)]
    pub cast_members: Vec<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVideosQuery {
    /// Zero-based page index
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Matched against title and description
    pub search: Option<String>,
}

/// Status update for one audio/video slot, as reported by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMediaStatusCommand {
    pub status: MediaStatus,
    pub video_id: Uuid,
    pub resource_id: String,
    pub folder: String,
    pub filename: String,
}

impl UpdateMediaStatusCommand {
    pub fn encoded_location(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }
}

// --- RESPONSES ---

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub launched_at: i32,
    pub duration: f64,
    pub opened: bool,
    pub published: bool,
    pub rating: Rating,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
    pub categories: Vec<Uuid>,
    pub genres: Vec<Uuid>,
    pub cast_members: Vec<Uuid>,
    pub video: Option<AudioVideoMedia>,
    pub trailer: Option<AudioVideoMedia>,
    pub banner: Option<ImageMedia>,
    pub thumbnail: Option<ImageMedia>,
    pub thumbnail_half: Option<ImageMedia>,
}

fn sorted(ids: &HashSet<Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.iter().copied().collect();
    ids.sort();
    ids
}

impl From<&Video> for VideoResponse {
    fn from(video: &Video) -> Self {
        let metadata = video.metadata();
        Self {
            id: video.id(),
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            launched_at: metadata.launched_at,
            duration: metadata.duration,
            opened: metadata.opened,
            published: metadata.published,
            rating: metadata.rating,
            created_at: video.created_at(),
            updated_at: video.updated_at(),
            categories: sorted(video.categories()),
            genres: sorted(video.genres()),
            cast_members: sorted(video.cast_members()),
            video: video.video().cloned(),
            trailer: video.trailer().cloned(),
            banner: video.banner().cloned(),
            thumbnail: video.thumbnail().cloned(),
            thumbnail_half: video.thumbnail_half().cloned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadMediaResponse {
    pub video_id: Uuid,
    pub kind: MediaKind,
    pub media_id: String,
    pub checksum: String,
    pub location: String,
}

impl UploadMediaResponse {
    pub fn new(video_id: Uuid, kind: MediaKind, media: &Media) -> Self {
        let (media_id, checksum, location) = match media {
            Media::AudioVideo(m) => (m.id.clone(), m.checksum.clone(), m.raw_location.clone()),
            Media::Image(m) => (m.id.clone(), m.checksum.clone(), m.location.clone()),
        };
        Self {
            video_id,
            kind,
            media_id,
            checksum,
            location,
        }
    }
}
