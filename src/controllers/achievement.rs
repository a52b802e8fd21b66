use axum::{extract::Path, response::IntoResponse, Extension, Json};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Database};
use serde_json::json;

use crate::infra::{
    db,
    error::{parse_object_id, ApiError},
};
use crate::modules::aggregate;
use crate::schemas::achievement::{
    to_achievement_response, Achievement, CreateAchievementSchema,
};
use crate::schemas::stats::AchievementStatsResponse;

/// Aggregates the whole collection on every call and embeds the ten most
/// recently solved challenges alongside the breakdowns.
pub async fn list_achievements(
    Extension(database): Extension<Database>,
) -> Result<impl IntoResponse, ApiError> {
    let collection = db::achievements(&database);

    let total_challenges = collection.count_documents(doc! {}).await?;
    let total_points = aggregate::points_total(&collection).await?;
    let category_stats = aggregate::points_by(&collection, "category").await?;
    let difficulty_stats = aggregate::points_by(&collection, "difficulty").await?;
    let platform_stats = aggregate::points_by(&collection, "platform").await?;

    let recent: Vec<Achievement> = collection
        .find(doc! {})
        .sort(doc! { "solvedDate": -1 })
        .limit(10)
        .await?
        .try_collect()
        .await?;

    Ok(Json(AchievementStatsResponse {
        total_challenges,
        total_points,
        category_stats,
        difficulty_stats,
        platform_stats,
        achievements: recent.iter().map(to_achievement_response).collect(),
    }))
}

pub async fn create_achievement(
    Extension(database): Extension<Database>,
    Json(body): Json<CreateAchievementSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let achievement = body.into_achievement(Utc::now())?;

    db::achievements(&database).insert_one(&achievement).await?;

    Ok(Json(to_achievement_response(&achievement)))
}

pub async fn delete_achievement(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<impl IntoResponse, ApiError> {
    let oid = parse_object_id(&id, "achievement")?;

    let result = db::achievements(&database)
        .delete_one(doc! { "_id": oid })
        .await?;
    if result.deleted_count == 0 {
        return Err(ApiError::NotFound("Achievement"));
    }

    Ok(Json(json!({ "message": "Achievement deleted successfully" })))
}
