use utoipa::OpenApi;
use crate::common::validation::FieldError;
use crate::modules::video::dto::{UploadMediaResponse, VideoRequest, VideoResponse};
use crate::modules::video::media::{AudioVideoMedia, ImageMedia, MediaKind, MediaStatus};
use crate::modules::video::model::{Rating, VideoPreview};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::video::handler::create_video,
        crate::modules::video::handler::list_videos,
        crate::modules::video::handler::get_video,
        crate::modules::video::handler::update_video,
        crate::modules::video::handler::delete_video,
        crate::modules::video::handler::upload_media,
        crate::modules::video::handler::get_media,
    ),
    components(
        schemas(
            VideoRequest, VideoResponse, VideoPreview, UploadMediaResponse,
            AudioVideoMedia, ImageMedia, MediaKind, MediaStatus, Rating, FieldError,
        )
    ),
    tags(
        (name = "Videos", description = "Video catalog and media slots")
    )
)]
pub struct ApiDoc;
