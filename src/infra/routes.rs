use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::controllers::{
    achievement::{create_achievement, delete_achievement, list_achievements},
    post::{create_post, delete_post, find_post, list_posts},
    stats::post_stats,
    upload::upload_image,
};

pub fn create_router(upload_dir: &str) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/:id", get(find_post).delete(delete_post))
        .route(
            "/api/achievements",
            get(list_achievements).post(create_achievement),
        )
        .route("/api/achievements/:id", delete(delete_achievement))
        .route("/api/stats", get(post_stats))
        .route("/api/upload", post(upload_image))
        .nest_service("/uploads", ServeDir::new(upload_dir))
}
