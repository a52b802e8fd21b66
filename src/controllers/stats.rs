use axum::{response::IntoResponse, Extension, Json};
use mongodb::{bson::doc, Database};

use crate::infra::{db, error::ApiError};
use crate::modules::aggregate;
use crate::schemas::stats::PostStatsResponse;

/// Write-up statistics, recomputed on every request. The CTF total is the
/// sum of the per-category counts.
pub async fn post_stats(
    Extension(database): Extension<Database>,
) -> Result<impl IntoResponse, ApiError> {
    let collection = db::posts(&database);

    let total_posts = collection.count_documents(doc! {}).await?;
    let category_breakdown = aggregate::count_by(&collection, "category").await?;
    let difficulty_breakdown = aggregate::count_by(&collection, "difficulty").await?;
    let total_ctfs = aggregate::sum_counts(&category_breakdown);

    Ok(Json(PostStatsResponse {
        total_posts,
        total_ctfs,
        category_breakdown,
        difficulty_breakdown,
    }))
}
