use serde::{Deserialize, Serialize};

use crate::schemas::achievement::AchievementResponse;

/// One `$group` row: count of documents sharing a field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountGroup {
    #[serde(rename = "_id")]
    pub group: Option<String>,
    pub count: i64,
}

/// One `$group` row carrying a point sum alongside the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsGroup {
    #[serde(rename = "_id")]
    pub group: Option<String>,
    pub count: i64,
    pub points: i64,
}

/// Result row of the collection-wide point sum (`_id: null` group).
#[derive(Debug, Deserialize)]
pub struct PointsTotal {
    #[serde(rename = "_id")]
    pub group: Option<String>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStatsResponse {
    pub total_posts: u64,
    #[serde(rename = "totalCTFs")]
    pub total_ctfs: i64,
    pub category_breakdown: Vec<CountGroup>,
    pub difficulty_breakdown: Vec<CountGroup>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatsResponse {
    pub total_challenges: u64,
    pub total_points: i64,
    pub category_stats: Vec<PointsGroup>,
    pub difficulty_stats: Vec<PointsGroup>,
    pub platform_stats: Vec<PointsGroup>,
    pub achievements: Vec<AchievementResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_stats_serialize_with_expected_wire_names() {
        let stats = PostStatsResponse {
            total_posts: 3,
            total_ctfs: 3,
            category_breakdown: vec![CountGroup {
                group: Some("Web".to_string()),
                count: 3,
            }],
            difficulty_breakdown: vec![],
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalPosts"], 3);
        assert_eq!(value["totalCTFs"], 3);
        assert_eq!(value["categoryBreakdown"][0]["_id"], "Web");
        assert_eq!(value["categoryBreakdown"][0]["count"], 3);
        assert!(value["difficultyBreakdown"].as_array().unwrap().is_empty());
    }

    #[test]
    fn points_group_roundtrips_group_rows() {
        let row: PointsGroup = serde_json::from_value(serde_json::json!({
            "_id": "HackTheBox",
            "count": 4,
            "points": 1200
        }))
        .unwrap();
        assert_eq!(row.group.as_deref(), Some("HackTheBox"));
        assert_eq!(row.count, 4);
        assert_eq!(row.points, 1200);
    }

    #[test]
    fn points_total_accepts_null_group() {
        let row: PointsTotal = serde_json::from_value(serde_json::json!({
            "_id": null,
            "total": 875
        }))
        .unwrap();
        assert!(row.group.is_none());
        assert_eq!(row.total, 875);
    }
}
