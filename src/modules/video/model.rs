use super::events::VideoMediaCreated;
use super::media::{AudioVideoMedia, ImageMedia, Media, MediaKind};
use crate::common::error::AppError;
use crate::common::validation::{FieldError, Notification};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

const TITLE_MAX_LENGTH: usize = 255;
const DESCRIPTION_MAX_LENGTH: usize = 4000;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Rating {
    #[serde(rename = "ER")]
    Er,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "AGE_10")]
    Age10,
    #[serde(rename = "AGE_12")]
    Age12,
    #[serde(rename = "AGE_14")]
    Age14,
    #[serde(rename = "AGE_16")]
    Age16,
    #[serde(rename = "AGE_18")]
    Age18,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Er => "ER",
            Rating::L => "L",
            Rating::Age10 => "AGE_10",
            Rating::Age12 => "AGE_12",
            Rating::Age14 => "AGE_14",
            Rating::Age16 => "AGE_16",
            Rating::Age18 => "AGE_18",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ER" => Ok(Rating::Er),
            "L" => Ok(Rating::L),
            "AGE_10" | "10" => Ok(Rating::Age10),
            "AGE_12" | "12" => Ok(Rating::Age12),
            "AGE_14" | "14" => Ok(Rating::Age14),
            "AGE_16" | "16" => Ok(Rating::Age16),
            "AGE_18" | "18" => Ok(Rating::Age18),
            _ => Err(format!("'{}' is not a valid rating", s)),
        }
    }
}

/// Descriptive fields of a video, replaced as a whole on update.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub launched_at: i32,
    pub duration: f64,
    pub opened: bool,
    pub published: bool,
    pub rating: Rating,
}

impl VideoMetadata {
    pub fn validate(&self, notification: &mut Notification) {
        let title = self.title.trim();
        if title.is_empty() {
            notification.append(FieldError::new("title", "'title' should not be empty"));
        } else if self.title.chars().count() > TITLE_MAX_LENGTH {
            notification.append(FieldError::new(
                "title",
                format!("'title' must be at most {} characters", TITLE_MAX_LENGTH),
            ));
        }

        if self.description.chars().count() > DESCRIPTION_MAX_LENGTH {
            notification.append(FieldError::new(
                "description",
                format!("'description' must be at most {} characters", DESCRIPTION_MAX_LENGTH),
            ));
        }

        if !self.duration.is_finite() || self.duration < 0.0 {
            notification.append(FieldError::new("duration", "'duration' must be a non-negative number"));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    id: Uuid,
    metadata: VideoMetadata,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    categories: HashSet<Uuid>,
    genres: HashSet<Uuid>,
    cast_members: HashSet<Uuid>,
    video: Option<AudioVideoMedia>,
    trailer: Option<AudioVideoMedia>,
    banner: Option<ImageMedia>,
    thumbnail: Option<ImageMedia>,
    thumbnail_half: Option<ImageMedia>,
    events: Vec<VideoMediaCreated>,
}

impl Video {
    /// New aggregate with no media attached. Fails with every field error found.
    pub fn new(
        metadata: VideoMetadata,
        categories: HashSet<Uuid>,
        genres: HashSet<Uuid>,
        cast_members: HashSet<Uuid>,
    ) -> Result<Self, AppError> {
        let mut notification = Notification::new();
        metadata.validate(&mut notification);
        notification.into_result()?;

        let now = OffsetDateTime::now_utc();
        Ok(Self {
            id: Uuid::new_v4(),
            metadata,
            created_at: now,
            updated_at: now,
            categories,
            genres,
            cast_members,
            video: None,
            trailer: None,
            banner: None,
            thumbnail: None,
            thumbnail_half: None,
            events: Vec::new(),
        })
    }

    /// Rebuilds an aggregate from stored state without re-validating it.
    #[allow(clippy::too_many_arguments)]
    pub fn with(
        id: Uuid,
        metadata: VideoMetadata,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
        categories: HashSet<Uuid>,
        genres: HashSet<Uuid>,
        cast_members: HashSet<Uuid>,
        video: Option<AudioVideoMedia>,
        trailer: Option<AudioVideoMedia>,
        banner: Option<ImageMedia>,
        thumbnail: Option<ImageMedia>,
        thumbnail_half: Option<ImageMedia>,
    ) -> Self {
        Self {
            id,
            metadata,
            created_at,
            updated_at: updated_at.max(created_at),
            categories,
            genres,
            cast_members,
            video,
            trailer,
            banner,
            thumbnail,
            thumbnail_half,
            events: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        metadata: VideoMetadata,
        categories: HashSet<Uuid>,
        genres: HashSet<Uuid>,
        cast_members: HashSet<Uuid>,
    ) -> Result<(), AppError> {
        let mut notification = Notification::new();
        metadata.validate(&mut notification);
        notification.into_result()?;

        self.metadata = metadata;
        self.categories = categories;
        self.genres = genres;
        self.cast_members = cast_members;
        self.touch();
        Ok(())
    }

    pub fn attach_video(&mut self, media: AudioVideoMedia) {
        self.register_media_created(&media);
        self.video = Some(media);
        self.touch();
    }

    pub fn attach_trailer(&mut self, media: AudioVideoMedia) {
        self.register_media_created(&media);
        self.trailer = Some(media);
        self.touch();
    }

    pub fn attach_banner(&mut self, media: ImageMedia) {
        self.banner = Some(media);
        self.touch();
    }

    pub fn attach_thumbnail(&mut self, media: ImageMedia) {
        self.thumbnail = Some(media);
        self.touch();
    }

    pub fn attach_thumbnail_half(&mut self, media: ImageMedia) {
        self.thumbnail_half = Some(media);
        self.touch();
    }

    /// Dispatches to the attach operation of `kind`; the media shape must fit the slot.
    pub fn attach(&mut self, kind: MediaKind, media: Media) -> Result<(), AppError> {
        match (kind, media) {
            (MediaKind::Video, Media::AudioVideo(media)) => self.attach_video(media),
            (MediaKind::Trailer, Media::AudioVideo(media)) => self.attach_trailer(media),
            (MediaKind::Banner, Media::Image(media)) => self.attach_banner(media),
            (MediaKind::Thumbnail, Media::Image(media)) => self.attach_thumbnail(media),
            (MediaKind::ThumbnailHalf, Media::Image(media)) => self.attach_thumbnail_half(media),
            (kind, _) => return Err(AppError::MediaKindMismatch(kind)),
        }
        Ok(())
    }

    pub fn mark_processing(&mut self, kind: MediaKind) -> Result<(), AppError> {
        let slot = self.audio_video_slot(kind)?;
        let media = slot.as_ref().ok_or(AppError::MediaNotAttached(kind))?;
        *slot = Some(media.processing());
        self.touch();
        Ok(())
    }

    pub fn mark_completed(&mut self, kind: MediaKind, encoded_location: impl Into<String>) -> Result<(), AppError> {
        let slot = self.audio_video_slot(kind)?;
        let media = slot.as_ref().ok_or(AppError::MediaNotAttached(kind))?;
        *slot = Some(media.completed(encoded_location));
        self.touch();
        Ok(())
    }

    /// Which audio/video slot holds the media with this id. The video slot wins over the trailer.
    pub fn audio_video_kind_of(&self, resource_id: &str) -> Option<MediaKind> {
        let matches = |media: &Option<AudioVideoMedia>| media.as_ref().is_some_and(|m| m.id == resource_id);

        if matches(&self.video) {
            Some(MediaKind::Video)
        } else if matches(&self.trailer) {
            Some(MediaKind::Trailer)
        } else {
            None
        }
    }

    /// Original file name of whatever sits in the slot.
    pub fn media_name(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Video => self.video.as_ref().map(|m| m.name.as_str()),
            MediaKind::Trailer => self.trailer.as_ref().map(|m| m.name.as_str()),
            MediaKind::Banner => self.banner.as_ref().map(|m| m.name.as_str()),
            MediaKind::Thumbnail => self.thumbnail.as_ref().map(|m| m.name.as_str()),
            MediaKind::ThumbnailHalf => self.thumbnail_half.as_ref().map(|m| m.name.as_str()),
        }
    }

    pub fn take_events(&mut self) -> Vec<VideoMediaCreated> {
        std::mem::take(&mut self.events)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    pub fn categories(&self) -> &HashSet<Uuid> {
        &self.categories
    }

    pub fn genres(&self) -> &HashSet<Uuid> {
        &self.genres
    }

    pub fn cast_members(&self) -> &HashSet<Uuid> {
        &self.cast_members
    }

    pub fn video(&self) -> Option<&AudioVideoMedia> {
        self.video.as_ref()
    }

    pub fn trailer(&self) -> Option<&AudioVideoMedia> {
        self.trailer.as_ref()
    }

    pub fn banner(&self) -> Option<&ImageMedia> {
        self.banner.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&ImageMedia> {
        self.thumbnail.as_ref()
    }

    pub fn thumbnail_half(&self) -> Option<&ImageMedia> {
        self.thumbnail_half.as_ref()
    }

    fn audio_video_slot(&mut self, kind: MediaKind) -> Result<&mut Option<AudioVideoMedia>, AppError> {
        match kind {
            MediaKind::Video => Ok(&mut self.video),
            MediaKind::Trailer => Ok(&mut self.trailer),
            _ => Err(AppError::NotEncodable(kind)),
        }
    }

    fn register_media_created(&mut self, media: &AudioVideoMedia) {
        if media.is_pending() {
            self.events.push(VideoMediaCreated {
                video_id: self.id,
                resource_id: media.id.clone(),
                file_path: media.raw_location.clone(),
            });
        }
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc().max(self.created_at);
    }
}

/// Listing row, without relations or media.
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct VideoPreview {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<&Video> for VideoPreview {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.metadata.title.clone(),
            description: video.metadata.description.clone(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSearchQuery {
    pub page: u32,
    pub per_page: u32,
    pub terms: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct Pagination<T> {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub items: Vec<T>,
}
