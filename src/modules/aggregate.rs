use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::schemas::stats::{CountGroup, PointsGroup, PointsTotal};

/// Document count grouped by a field.
pub async fn count_by<T: Send + Sync>(
    collection: &Collection<T>,
    field: &str,
) -> Result<Vec<CountGroup>, mongodb::error::Error> {
    collection
        .aggregate(vec![doc! {
            "$group": { "_id": format!("${field}"), "count": { "$sum": 1 } }
        }])
        .with_type::<CountGroup>()
        .await?
        .try_collect()
        .await
}

/// Document count and point sum grouped by a field.
pub async fn points_by<T: Send + Sync>(
    collection: &Collection<T>,
    field: &str,
) -> Result<Vec<PointsGroup>, mongodb::error::Error> {
    collection
        .aggregate(vec![doc! {
            "$group": {
                "_id": format!("${field}"),
                "count": { "$sum": 1 },
                "points": { "$sum": "$points" }
            }
        }])
        .with_type::<PointsGroup>()
        .await?
        .try_collect()
        .await
}

/// Collection-wide point sum; 0 when the collection is empty.
pub async fn points_total<T: Send + Sync>(
    collection: &Collection<T>,
) -> Result<i64, mongodb::error::Error> {
    let rows: Vec<PointsTotal> = collection
        .aggregate(vec![doc! {
            "$group": { "_id": null, "total": { "$sum": "$points" } }
        }])
        .with_type::<PointsTotal>()
        .await?
        .try_collect()
        .await?;

    Ok(rows.into_iter().next().map(|row| row.total).unwrap_or(0))
}

pub fn sum_counts(groups: &[CountGroup]) -> i64 {
    groups.iter().map(|group| group.count).sum()
}
