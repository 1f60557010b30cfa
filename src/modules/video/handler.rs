use super::dto::{ListVideosQuery, UploadMediaResponse, VideoRequest, VideoResponse};
use super::media::{MediaKind, Resource};
use super::model::{Pagination, VideoPreview};
use super::service::VideoService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;

const MEDIA_FIELD: &str = "media_file";

// --- VIDEO HANDLERS ---

/// Create a new video
#[utoipa::path(
    post,
    path = "/api/v1/videos",
    request_body = VideoRequest,
    responses(
        (status = 201, description = "Video created", body = ApiResponse<VideoResponse>),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Videos"
)]
pub async fn create_video(
    State(state): State<AppState>,
    Json(req): Json<VideoRequest>,
) -> impl IntoResponse {
    match VideoService::create_video(&state, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Video created successfully"), StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List videos, newest first
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    params(ListVideosQuery),
    responses(
        (status = 200, description = "Page of videos", body = ApiResponse<Pagination<VideoPreview>>),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Videos"
)]
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<ListVideosQuery>,
) -> impl IntoResponse {
    match VideoService::list_videos(&state, query).await {
        Ok(page) => ApiSuccess(ApiResponse::success(page, "Videos retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video details", body = ApiResponse<VideoResponse>),
        (status = 404, description = "Video not found")
    ),
    tag = "Videos"
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match VideoService::get_video(&state, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Video retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace a video's metadata and relations
#[utoipa::path(
    put,
    path = "/api/v1/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = VideoRequest,
    responses(
        (status = 200, description = "Video updated", body = ApiResponse<VideoResponse>),
        (status = 404, description = "Video not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Videos"
)]
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<VideoRequest>,
) -> impl IntoResponse {
    match VideoService::update_video(&state, id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Video updated successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted", body = ApiResponse<String>)
    ),
    tag = "Videos"
)]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match VideoService::delete_video(&state, id).await {
        Ok(_) => ApiSuccess(ApiResponse::success((), "Video deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

// --- MEDIA HANDLERS ---

/// Upload a media file into one of the video's slots
#[utoipa::path(
    post,
    path = "/api/v1/videos/{id}/medias/{kind}",
    params(
        ("id" = Uuid, Path, description = "Video ID"),
        ("kind" = MediaKind, Path, description = "Media slot")
    ),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media uploaded", body = ApiResponse<UploadMediaResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Video not found"),
        (status = 422, description = "Wrong content type for slot")
    ),
    tag = "Videos"
)]
pub async fn upload_media(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let kind = match kind.parse::<MediaKind>() {
        Ok(kind) => kind,
        Err(e) => return ApiError(e, StatusCode::BAD_REQUEST).into_response(),
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return ApiError(e.body_text(), e.status()).into_response(),
        };
        if field.name() != Some(MEDIA_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or("media").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let content = match field.bytes().await {
            Ok(content) => content,
            Err(e) => return ApiError(e.body_text(), e.status()).into_response(),
        };
        info!(video_id = %id, %kind, size = content.len(), "📤 Receiving media upload");

        return match VideoService::upload_media(&state, id, kind, Resource::with(content, content_type, name)).await {
            Ok(res) => ApiSuccess(ApiResponse::success(res, "Media uploaded successfully"), StatusCode::CREATED).into_response(),
            Err(e) => e.into_response(),
        };
    }

    ApiError(format!("No '{}' field found in multipart request", MEDIA_FIELD), StatusCode::BAD_REQUEST).into_response()
}

/// Download the raw bytes stored in a media slot
#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}/medias/{kind}",
    params(
        ("id" = Uuid, Path, description = "Video ID"),
        ("kind" = MediaKind, Path, description = "Media slot")
    ),
    responses(
        (status = 200, description = "Media content", content_type = "application/octet-stream"),
        (status = 404, description = "Video or media not found")
    ),
    tag = "Videos"
)]
pub async fn get_media(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    let kind = match kind.parse::<MediaKind>() {
        Ok(kind) => kind,
        Err(e) => return ApiError(e, StatusCode::BAD_REQUEST).into_response(),
    };

    match VideoService::get_media(&state, id, kind).await {
        Ok(resource) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, resource.content_type),
                (header::CONTENT_DISPOSITION, format!("inline; filename=\"{}\"", resource.name)),
            ],
            resource.content,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
