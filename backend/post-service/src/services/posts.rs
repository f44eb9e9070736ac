/// Post service - upload orchestration and owner-gated deletion
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::media::MediaStore;
use crate::models::{MediaType, Post};
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
    media: Option<Arc<MediaStore>>,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, media: None }
    }

    pub fn with_media(pool: PgPool, media: Arc<MediaStore>) -> Self {
        Self {
            pool,
            media: Some(media),
        }
    }

    /// Create a post from a spooled upload
    ///
    /// Order of operations: classify the content type, push the asset to
    /// the media store, then insert the post row. A failed insert triggers
    /// a best-effort compensating delete of the stored asset so the
    /// provider does not accumulate orphans; failure of that delete is
    /// logged, not propagated.
    pub async fn create_from_upload(
        &self,
        user_id: Uuid,
        caption: Option<&str>,
        local_path: &Path,
        content_type: &str,
        original_name: &str,
    ) -> Result<Post> {
        let media_type = MediaType::from_content_type(content_type).ok_or_else(|| {
            AppError::InvalidInput("only image or video uploads are accepted".to_string())
        })?;

        let media = self
            .media
            .as_ref()
            .ok_or_else(|| AppError::Internal("media store not configured".to_string()))?;

        let key = unique_key(original_name);
        let stored = media.store(local_path, &key, content_type).await?;

        match post_repo::create_post(
            &self.pool,
            user_id,
            caption,
            &stored.url,
            media_type.as_str(),
            &stored.file_name,
        )
        .await
        {
            Ok(post) => Ok(post),
            Err(e) => {
                tracing::error!(%user_id, "post insert failed after media store: {}", e);
                if let Err(cleanup_err) = media.delete(&stored.file_name).await {
                    tracing::warn!(
                        file_name = %stored.file_name,
                        "compensating media delete failed: {}",
                        cleanup_err
                    );
                }
                Err(AppError::UploadFailed(e.to_string()))
            }
        }
    }

    /// Delete a post on behalf of its owner
    ///
    /// Likes and comments go with the row via FK cascade. The stored media
    /// asset is removed best-effort afterwards; a failed remote delete is
    /// logged and the operation still succeeds.
    pub async fn delete(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if post.user_id != user_id {
            return Err(AppError::Forbidden(
                "you do not have permission to delete this post".to_string(),
            ));
        }

        post_repo::delete_post(&self.pool, post_id).await?;

        if let Some(media) = &self.media {
            if let Err(e) = media.delete(&post.file_name).await {
                tracing::warn!(
                    %post_id,
                    file_name = %post.file_name,
                    "media cleanup after post delete failed: {}",
                    e
                );
            }
        }

        Ok(())
    }
}

/// Provider-unique storage key, keeping the original extension so served
/// URLs stay recognizable.
fn unique_key(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("uploads/{}{}", Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_key_keeps_lowercased_extension() {
        let key = unique_key("Holiday.JPG");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn unique_key_tolerates_missing_extension() {
        let key = unique_key("clip");
        assert!(key.starts_with("uploads/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn unique_keys_do_not_collide() {
        assert_ne!(unique_key("a.png"), unique_key("a.png"));
    }
}
