/// Comment service - comment creation
///
/// Comments are immutable once created; there is no edit or delete path.
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a comment to an existing post
    pub async fn add(&self, user_id: Uuid, post_id: Uuid, text: &str) -> Result<Comment> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput(
                "comment text must not be empty".to_string(),
            ));
        }

        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        let comment = comment_repo::create_comment(&self.pool, user_id, post_id, trimmed).await?;
        Ok(comment)
    }
}
