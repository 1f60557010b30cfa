use axum::routing::get;
use axum::Router;
use crate::state::AppState;

pub mod dto;
pub mod events;
pub mod gateway;
pub mod handler;
pub mod media;
pub mod model;
pub mod publisher;
pub mod repository;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod memory;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_videos).post(handler::create_video))
        .route(
            "/{id}",
            get(handler::get_video)
                .put(handler::update_video)
                .delete(handler::delete_video),
        )
        .route(
            "/{id}/medias/{kind}",
            get(handler::get_media).post(handler::upload_media),
        )
}
