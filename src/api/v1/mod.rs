//! v1 API endpoints

pub mod subtitles;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/subtitles",
            post(subtitles::upload_subtitle).get(subtitles::list_subtitles),
        )
        .route("/subtitles/convert", post(subtitles::convert_subtitle))
        .route(
            "/subtitles/post-convert",
            post(subtitles::post_convert_subtitle),
        )
        .route(
            "/subtitles/{id}",
            get(subtitles::get_subtitle)
                .patch(subtitles::rename_subtitle)
                .delete(subtitles::delete_subtitle),
        )
        .route("/subtitles/{id}/content", get(subtitles::download_subtitle))
}
