use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Database};
use serde_json::json;

use crate::infra::{
    db,
    error::{is_duplicate_key, parse_object_id, ApiError},
};
use crate::schemas::post::{to_post_response, BlogPost, CreatePostSchema, ListPostsQuery};

/// Lists write-ups newest first. The optional category/difficulty filters
/// are applied in-process, mirroring the exact-match filtering the pages
/// do on their local list state.
pub async fn list_posts(
    Extension(database): Extension<Database>,
    Query(filter): Query<ListPostsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts: Vec<BlogPost> = db::posts(&database)
        .find(doc! {})
        .sort(doc! { "createdAt": -1 })
        .await?
        .try_collect()
        .await?;

    let posts: Vec<_> = posts
        .iter()
        .filter(|post| filter.matches(post))
        .map(|post| to_post_response(post))
        .collect();

    Ok(Json(posts))
}

pub async fn create_post(
    Extension(database): Extension<Database>,
    Json(body): Json<CreatePostSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let post = body.into_post(Utc::now())?;

    if let Err(err) = db::posts(&database).insert_one(&post).await {
        if is_duplicate_key(&err) {
            return Err(ApiError::Conflict(
                "A post with this title already exists".to_string(),
            ));
        }
        return Err(err.into());
    }

    Ok(Json(to_post_response(&post)))
}

pub async fn find_post(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id, "post")?;

    let post = db::posts(&database)
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    Ok(Json(to_post_response(&post)))
}

pub async fn delete_post(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id, "post")?;

    let result = db::posts(&database).delete_one(doc! { "_id": oid }).await?;
    if result.deleted_count == 0 {
        return Err(ApiError::NotFound("Post"));
    }

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
