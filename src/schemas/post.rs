use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::error::ApiError;
use crate::schemas::{
    require_enum, require_text, Category, Difficulty, ALLOWED_CATEGORIES, ALLOWED_DIFFICULTIES,
};

pub const DEFAULT_AUTHOR_NAME: &str = "Anonymous";
pub const DEFAULT_AUTHOR_IMAGE: &str = "/default-avatar.jpg";

/// Excerpts default to the head of the content; counted in characters so
/// multi-byte content never splits a code point.
const EXCERPT_LENGTH: usize = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub image: String,
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            image: DEFAULT_AUTHOR_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostImage {
    pub url: String,
    pub caption: String,
}

/// A write-up document as stored in the `blogposts` collection. Datetime
/// fields are persisted as BSON dates so collection-side sorting stays
/// chronological.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub author: Author,
    pub tags: Vec<Tag>,
    pub category: Category,
    pub difficulty: Difficulty,
    pub images: Vec<PostImage>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthorSchema {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Incoming POST /api/posts payload. Category and difficulty arrive as
/// plain strings so violations can be reported as validation errors
/// instead of body rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostSchema {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub author: Option<AuthorSchema>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub images: Vec<PostImage>,
}

impl CreatePostSchema {
    /// Validates the payload and applies defaults, producing the document
    /// to persist. All offending fields are reported together.
    pub fn into_post(self, now: DateTime<Utc>) -> Result<BlogPost, ApiError> {
        let mut missing = Vec::new();

        let title = require_text(self.title, "title", &mut missing);
        let content = require_text(self.content, "content", &mut missing);
        let category: Option<Category> =
            require_enum(self.category.as_deref(), "category", ALLOWED_CATEGORIES, &mut missing);
        let difficulty: Option<Difficulty> = require_enum(
            self.difficulty.as_deref(),
            "difficulty",
            ALLOWED_DIFFICULTIES,
            &mut missing,
        );

        match (title, content, category, difficulty) {
            (Some(title), Some(content), Some(category), Some(difficulty))
                if missing.is_empty() =>
            {
                let excerpt = self
                    .excerpt
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| default_excerpt(&content));
                let author = self
                    .author
                    .map(|a| Author {
                        name: a
                            .name
                            .filter(|n| !n.trim().is_empty())
                            .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
                        image: a
                            .image
                            .filter(|i| !i.trim().is_empty())
                            .unwrap_or_else(|| DEFAULT_AUTHOR_IMAGE.to_string()),
                    })
                    .unwrap_or_default();

                Ok(BlogPost {
                    id: Some(ObjectId::new()),
                    title,
                    content,
                    excerpt,
                    cover_image: self.cover_image,
                    date: self.date.unwrap_or(now),
                    author,
                    tags: self.tags,
                    category,
                    difficulty,
                    images: self.images,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(ApiError::Validation(missing)),
        }
    }
}

/// Optional filters on GET /api/posts. Both predicates must match when
/// both are present.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

impl ListPostsQuery {
    pub fn matches(&self, post: &BlogPost) -> bool {
        self.category.map_or(true, |c| post.category == c)
            && self.difficulty.map_or(true, |d| post.difficulty == d)
    }
}

/// Wire representation: ObjectId as hex string, datetimes as RFC 3339.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub date: DateTime<Utc>,
    pub author: Author,
    pub tags: Vec<Tag>,
    pub category: Category,
    pub difficulty: Difficulty,
    pub images: Vec<PostImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn to_post_response(post: &BlogPost) -> BlogPostResponse {
    BlogPostResponse {
        id: post.id.map(|oid| oid.to_hex()).unwrap_or_default(),
        title: post.title.clone(),
        content: post.content.clone(),
        excerpt: post.excerpt.clone(),
        cover_image: post.cover_image.clone(),
        date: post.date,
        author: post.author.clone(),
        tags: post.tags.clone(),
        category: post.category,
        difficulty: post.difficulty,
        images: post.images.clone(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn default_excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_LENGTH).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn valid_payload() -> CreatePostSchema {
        CreatePostSchema {
            title: Some("Baby RSA".to_string()),
            content: Some("We are given n, e and c...".to_string()),
            category: Some("Crypto".to_string()),
            difficulty: Some("Easy".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = CreatePostSchema::default().into_post(now()).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields, vec!["title", "content", "category", "difficulty"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_category_is_reported_with_allowed_values() {
        let payload = CreatePostSchema {
            category: Some("Stego".to_string()),
            ..valid_payload()
        };
        let err = payload.into_post(now()).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(
                    fields,
                    vec![format!("category must be one of {ALLOWED_CATEGORIES}")]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_applied_on_create() {
        let post = valid_payload().into_post(now()).unwrap();
        assert!(post.id.is_some());
        assert_eq!(post.excerpt, "We are given n, e and c......");
        assert_eq!(post.author.name, DEFAULT_AUTHOR_NAME);
        assert_eq!(post.author.image, DEFAULT_AUTHOR_IMAGE);
        assert_eq!(post.date, now());
        assert_eq!(post.created_at, now());
        assert_eq!(post.updated_at, now());
        assert!(post.tags.is_empty());
        assert!(post.images.is_empty());
    }

    #[test]
    fn provided_excerpt_is_kept() {
        let payload = CreatePostSchema {
            excerpt: Some("Short summary".to_string()),
            ..valid_payload()
        };
        let post = payload.into_post(now()).unwrap();
        assert_eq!(post.excerpt, "Short summary");
    }

    #[test]
    fn long_content_is_truncated_to_150_characters() {
        let payload = CreatePostSchema {
            content: Some("x".repeat(400)),
            ..valid_payload()
        };
        let post = payload.into_post(now()).unwrap();
        assert_eq!(post.excerpt, format!("{}...", "x".repeat(150)));
    }

    #[test]
    fn excerpt_truncation_respects_char_boundaries() {
        let payload = CreatePostSchema {
            content: Some("é".repeat(200)),
            ..valid_payload()
        };
        let post = payload.into_post(now()).unwrap();
        assert_eq!(post.excerpt.chars().count(), 153);
    }

    #[test]
    fn filter_matches_both_predicates_exactly() {
        let mut posts = Vec::new();
        for (category, difficulty) in [
            ("Web", "Easy"),
            ("Web", "Hard"),
            ("Pwn", "Easy"),
            ("Pwn", "Hard"),
        ] {
            let payload = CreatePostSchema {
                title: Some(format!("{category}-{difficulty}")),
                category: Some(category.to_string()),
                difficulty: Some(difficulty.to_string()),
                ..valid_payload()
            };
            posts.push(payload.into_post(now()).unwrap());
        }

        let filter = ListPostsQuery {
            category: Some(Category::Web),
            difficulty: Some(Difficulty::Hard),
        };
        let matched: Vec<_> = posts.iter().filter(|p| filter.matches(p)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Web-Hard");

        let unfiltered = ListPostsQuery::default();
        assert_eq!(posts.iter().filter(|p| unfiltered.matches(p)).count(), 4);
    }
}
