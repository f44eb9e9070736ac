/// Data models for post-service
///
/// Row types map 1:1 onto the relational schema; the view types at the
/// bottom are what feed assembly produces for clients.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of an uploaded asset, derived from its content type.
/// Stored as TEXT (`"image"` / `"video"`) in the posts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classify a MIME content type by its top-level prefix.
    /// Anything that is not `image/*` or `video/*` is rejected upstream.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.starts_with("image/") {
            Some(MediaType::Image)
        } else if content_type.starts_with("video/") {
            Some(MediaType::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caption: Option<String>,
    pub url: String,
    pub file_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A post row joined with its author's username, as the feed query
/// returns it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub caption: Option<String>,
    pub url: String,
    pub file_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

/// A comment row joined with its author's username.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub post_id: Uuid,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One feed entry: a post with its engagement data from the viewpoint of
/// the requesting user.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub caption: Option<String>,
    pub url: String,
    pub file_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub liked: bool,
    pub comments: Vec<FeedComment>,
    pub is_owner: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedComment {
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_classification_follows_content_type_prefix() {
        assert_eq!(
            MediaType::from_content_type("image/png"),
            Some(MediaType::Image)
        );
        assert_eq!(
            MediaType::from_content_type("image/jpeg"),
            Some(MediaType::Image)
        );
        assert_eq!(
            MediaType::from_content_type("video/mp4"),
            Some(MediaType::Video)
        );
        assert_eq!(MediaType::from_content_type("application/pdf"), None);
        assert_eq!(MediaType::from_content_type("text/plain"), None);
        // No prefix match without the slash
        assert_eq!(MediaType::from_content_type("image"), None);
    }

    #[test]
    fn media_type_renders_exact_storage_strings() {
        assert_eq!(MediaType::Image.as_str(), "image");
        assert_eq!(MediaType::Video.as_str(), "video");
    }
}
