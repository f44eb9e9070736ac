/// Like service - atomic like toggling
use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle the like state for (user, post). Returns the new state:
    /// true when the like now exists, false when it was removed.
    ///
    /// The insert is conditional on the (user_id, post_id) unique
    /// constraint, so two concurrent toggles resolve to exactly one
    /// create or one delete rather than duplicates.
    pub async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        if like_repo::insert_like_if_absent(&self.pool, user_id, post_id).await? {
            return Ok(true);
        }

        like_repo::delete_like(&self.pool, user_id, post_id).await?;
        Ok(false)
    }
}
