use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::error::ApiError;
use crate::schemas::{
    require_enum, require_text, Category, Difficulty, ALLOWED_CATEGORIES, ALLOWED_DIFFICULTIES,
};

/// A solved challenge as stored in the `achievements` collection.
/// `writeup_id` back-references the matching write-up when one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub ctf_name: String,
    pub platform: String,
    pub challenge_name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub points: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub solved_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writeup_id: Option<ObjectId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAchievementSchema {
    pub ctf_name: Option<String>,
    pub platform: Option<String>,
    pub challenge_name: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub points: Option<i64>,
    pub solved_date: Option<DateTime<Utc>>,
    pub writeup_id: Option<String>,
}

impl CreateAchievementSchema {
    pub fn into_achievement(self, now: DateTime<Utc>) -> Result<Achievement, ApiError> {
        let mut missing = Vec::new();

        let ctf_name = require_text(self.ctf_name, "ctfName", &mut missing);
        let platform = require_text(self.platform, "platform", &mut missing);
        let challenge_name = require_text(self.challenge_name, "challengeName", &mut missing);
        let category: Option<Category> =
            require_enum(self.category.as_deref(), "category", ALLOWED_CATEGORIES, &mut missing);
        let difficulty: Option<Difficulty> = require_enum(
            self.difficulty.as_deref(),
            "difficulty",
            ALLOWED_DIFFICULTIES,
            &mut missing,
        );
        let points = match self.points {
            Some(p) if p >= 0 => Some(p),
            Some(_) => {
                missing.push("points must be a non-negative integer".to_string());
                None
            }
            None => {
                missing.push("points".to_string());
                None
            }
        };
        let writeup_id = match self.writeup_id.as_deref() {
            None | Some("") => None,
            Some(raw) => match ObjectId::parse_str(raw) {
                Ok(oid) => Some(oid),
                Err(_) => {
                    missing.push("writeupId must be a valid post ID".to_string());
                    None
                }
            },
        };

        match (ctf_name, platform, challenge_name, category, difficulty, points) {
            (
                Some(ctf_name),
                Some(platform),
                Some(challenge_name),
                Some(category),
                Some(difficulty),
                Some(points),
            ) if missing.is_empty() => Ok(Achievement {
                id: Some(ObjectId::new()),
                ctf_name,
                platform,
                challenge_name,
                category,
                difficulty,
                points,
                solved_date: self.solved_date.unwrap_or(now),
                writeup_id,
            }),
            _ => Err(ApiError::Validation(missing)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub ctf_name: String,
    pub platform: String,
    pub challenge_name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub points: i64,
    pub solved_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writeup_id: Option<String>,
}

pub fn to_achievement_response(achievement: &Achievement) -> AchievementResponse {
    AchievementResponse {
        id: achievement.id.map(|oid| oid.to_hex()).unwrap_or_default(),
        ctf_name: achievement.ctf_name.clone(),
        platform: achievement.platform.clone(),
        challenge_name: achievement.challenge_name.clone(),
        category: achievement.category,
        difficulty: achievement.difficulty,
        points: achievement.points,
        solved_date: achievement.solved_date,
        writeup_id: achievement.writeup_id.map(|oid| oid.to_hex()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn valid_payload() -> CreateAchievementSchema {
        CreateAchievementSchema {
            ctf_name: Some("HTB Cyber Apocalypse".to_string()),
            platform: Some("HackTheBox".to_string()),
            challenge_name: Some("Flag Casino".to_string()),
            category: Some("Reverse".to_string()),
            difficulty: Some("Medium".to_string()),
            points: Some(325),
            ..Default::default()
        }
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = CreateAchievementSchema::default()
            .into_achievement(now())
            .unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(
                    fields,
                    vec![
                        "ctfName",
                        "platform",
                        "challengeName",
                        "category",
                        "difficulty",
                        "points"
                    ]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_points_are_rejected() {
        let payload = CreateAchievementSchema {
            points: Some(-50),
            ..valid_payload()
        };
        let err = payload.into_achievement(now()).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields, vec!["points must be a non-negative integer"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_points_are_allowed() {
        let payload = CreateAchievementSchema {
            points: Some(0),
            ..valid_payload()
        };
        assert_eq!(payload.into_achievement(now()).unwrap().points, 0);
    }

    #[test]
    fn solved_date_defaults_to_now() {
        let achievement = valid_payload().into_achievement(now()).unwrap();
        assert_eq!(achievement.solved_date, now());
        assert!(achievement.writeup_id.is_none());
    }

    #[test]
    fn malformed_writeup_reference_is_rejected() {
        let payload = CreateAchievementSchema {
            writeup_id: Some("not-an-object-id".to_string()),
            ..valid_payload()
        };
        let err = payload.into_achievement(now()).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields, vec!["writeupId must be a valid post ID"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_writeup_reference_is_parsed() {
        let oid = ObjectId::new();
        let payload = CreateAchievementSchema {
            writeup_id: Some(oid.to_hex()),
            ..valid_payload()
        };
        let achievement = payload.into_achievement(now()).unwrap();
        assert_eq!(achievement.writeup_id, Some(oid));
    }
}
