use super::dto::{
    ListVideosQuery, UpdateMediaStatusCommand, UploadMediaResponse, VideoRequest, VideoResponse,
    DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
use super::media::{Media, MediaKind, MediaStatus, Resource};
use super::model::{Pagination, Rating, Video, VideoMetadata, VideoPreview, VideoSearchQuery};
use crate::common::error::AppError;
use crate::common::validation::{FieldError, Notification};
use crate::state::AppState;
use std::collections::HashSet;
use tracing::{debug, error, info};
use uuid::Uuid;
use validator::Validate;

type VideoParts = (VideoMetadata, HashSet<Uuid>, HashSet<Uuid>, HashSet<Uuid>);

pub struct VideoService;

impl VideoService {
    /// Checks the request shape and rating together so every problem is reported at once.
    fn parse_request(req: VideoRequest) -> Result<VideoParts, AppError> {
        let mut notification = Notification::new();
        if let Err(errors) = req.validate() {
            notification.append_validator(errors);
        }

        let rating = req.rating.parse::<Rating>();
        if let Err(message) = &rating {
            notification.append(FieldError::new("rating", message.clone()));
        }
        notification.into_result()?;
        let rating = rating.map_err(|message| AppError::ValidationFailed(vec![FieldError::new("rating", message)]))?;

        let metadata = VideoMetadata {
            title: req.title,
            description: req.description,
            launched_at: req.launched_at,
            duration: req.duration,
            opened: req.opened,
            published: req.published,
            rating,
        };

        Ok((
            metadata,
            req.categories.into_iter().collect(),
            req.genres.into_iter().collect(),
            req.cast_members.into_iter().collect(),
        ))
    }

    async fn load(state: &AppState, id: Uuid) -> Result<Video, AppError> {
        state
            .videos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Video", id))
    }

    /// Saves the aggregate, then hands any pending media events to the encoder.
    /// The save is committed by then, so a failed publish is logged with its payload, not returned.
    async fn persist(state: &AppState, mut video: Video) -> Result<Video, AppError> {
        let events = video.take_events();
        let video = state.videos.save(video).await?;

        for event in &events {
            if let Err(e) = state.events.publish(event).await {
                error!(
                    video_id = %event.video_id,
                    resource_id = %event.resource_id,
                    file_path = %event.file_path,
                    "❌ Failed to request encoding: {}",
                    e
                );
            }
        }
        Ok(video)
    }

    // --- VIDEO ---

    pub async fn create_video(state: &AppState, req: VideoRequest) -> Result<VideoResponse, AppError> {
        let (metadata, categories, genres, cast_members) = Self::parse_request(req)?;
        let video = Video::new(metadata, categories, genres, cast_members)?;

        let video = state.videos.create(video).await?;
        info!(video_id = %video.id(), "Video created");

        Ok(VideoResponse::from(&video))
    }

    pub async fn get_video(state: &AppState, id: Uuid) -> Result<VideoResponse, AppError> {
        let video = Self::load(state, id).await?;
        Ok(VideoResponse::from(&video))
    }

    pub async fn list_videos(state: &AppState, query: ListVideosQuery) -> Result<Pagination<VideoPreview>, AppError> {
        let search = VideoSearchQuery {
            page: query.page.unwrap_or(0),
            per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
            terms: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        state.videos.find_all(&search).await
    }

    pub async fn update_video(state: &AppState, id: Uuid, req: VideoRequest) -> Result<VideoResponse, AppError> {
        let mut video = Self::load(state, id).await?;
        let (metadata, categories, genres, cast_members) = Self::parse_request(req)?;

        video.update(metadata, categories, genres, cast_members)?;
        let video = Self::persist(state, video).await?;
        info!(video_id = %id, "Video updated");

        Ok(VideoResponse::from(&video))
    }

    /// Purges stored media, then removes the aggregate. Unknown ids are a no-op.
    pub async fn delete_video(state: &AppState, id: Uuid) -> Result<(), AppError> {
        state.media.clear_resources(id).await?;
        state.videos.delete_by_id(id).await?;
        info!(video_id = %id, "Video deleted");
        Ok(())
    }

    // --- MEDIA ---

    pub async fn upload_media(
        state: &AppState,
        id: Uuid,
        kind: MediaKind,
        resource: Resource,
    ) -> Result<UploadMediaResponse, AppError> {
        let mut video = Self::load(state, id).await?;

        let expected = kind.content_type_prefix();
        if !resource.content_type.starts_with(expected) {
            return Err(AppError::ValidationFailed(vec![FieldError::new(
                "media_file",
                format!(
                    "content type '{}' is not accepted for {} (expected {}*)",
                    resource.content_type, kind, expected
                ),
            )]));
        }

        let media = if kind.is_audio_video() {
            Media::AudioVideo(state.media.store_audio_video(id, kind, resource).await?)
        } else {
            Media::Image(state.media.store_image(id, kind, resource).await?)
        };
        let response = UploadMediaResponse::new(id, kind, &media);

        video.attach(kind, media)?;
        Self::persist(state, video).await?;
        info!(video_id = %id, %kind, media_id = %response.media_id, "Media attached");

        Ok(response)
    }

    pub async fn get_media(state: &AppState, id: Uuid, kind: MediaKind) -> Result<Resource, AppError> {
        let video = Self::load(state, id).await?;
        let media_name = video
            .media_name(kind)
            .map(str::to_string)
            .ok_or_else(|| AppError::not_found("Media", format!("{}/{}", id, kind)))?;

        let mut resource = state
            .media
            .get_resource(id, kind)
            .await?
            .ok_or_else(|| AppError::not_found("Media", format!("{}/{}", id, kind)))?;
        resource.name = media_name;

        Ok(resource)
    }

    /// Applies an encoder status to whichever audio/video slot holds `resource_id`.
    /// Unmatched resources and statuses other than PROCESSING/COMPLETED leave the video untouched.
    pub async fn update_media_status(state: &AppState, cmd: UpdateMediaStatusCommand) -> Result<(), AppError> {
        let mut video = Self::load(state, cmd.video_id).await?;

        let Some(kind) = video.audio_video_kind_of(&cmd.resource_id) else {
            debug!(video_id = %cmd.video_id, resource_id = %cmd.resource_id, "No media slot matches resource, ignoring");
            return Ok(());
        };

        match cmd.status {
            MediaStatus::Processing => video.mark_processing(kind)?,
            MediaStatus::Completed => video.mark_completed(kind, cmd.encoded_location())?,
            status => {
                debug!(video_id = %cmd.video_id, %kind, %status, "Status is not applied to media, ignoring");
                return Ok(());
            }
        }

        Self::persist(state, video).await?;
        info!(video_id = %cmd.video_id, %kind, status = %cmd.status, "Media status updated");
        Ok(())
    }
}
