/// Post handlers - multipart upload and deletion
use crate::error::{AppError, Result};
use crate::media::MediaStore;
use crate::middleware::UserId;
use crate::models::{MediaType, Post};
use crate::services::PostService;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use serde::Serialize;
use sqlx::PgPool;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Upload size guardrail
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Public fields of a created post, echoed to the uploader
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub caption: Option<String>,
    pub url: String,
    pub file_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            caption: post.caption,
            url: post.url,
            file_type: post.file_type,
            file_name: post.file_name,
            created_at: post.created_at,
        }
    }
}

/// The `file` field of an upload, spooled to a scoped temp file.
/// Dropping the `NamedTempFile` removes it on every exit path.
struct SpooledUpload {
    file: NamedTempFile,
    content_type: String,
    original_name: String,
}

/// Create a new post from a multipart upload
/// POST /upload (multipart fields: `file`, `caption`)
pub async fn upload_post(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<MediaStore>>,
    user_id: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let mut caption: Option<String> = None;
    let mut upload: Option<SpooledUpload> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|_| AppError::InvalidInput("malformed multipart payload".to_string()))?;

        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "caption" => {
                let mut buf = Vec::new();
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|_| {
                        AppError::InvalidInput("malformed multipart payload".to_string())
                    })?;
                    buf.extend_from_slice(&bytes);
                }
                let text = String::from_utf8_lossy(&buf).trim().to_string();
                if !text.is_empty() {
                    caption = Some(text);
                }
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .ok_or_else(|| {
                        AppError::InvalidInput("file content type required".to_string())
                    })?;

                // Reject before spooling a single byte
                if MediaType::from_content_type(&content_type).is_none() {
                    return Err(AppError::InvalidInput(
                        "only image or video uploads are accepted".to_string(),
                    ));
                }

                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("upload")
                    .to_string();

                let mut file = NamedTempFile::new()
                    .map_err(|e| AppError::Internal(format!("temp file creation failed: {e}")))?;

                let mut written: usize = 0;
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|_| {
                        AppError::InvalidInput("malformed multipart payload".to_string())
                    })?;
                    written += bytes.len();
                    if written > MAX_UPLOAD_BYTES {
                        return Err(AppError::InvalidInput(
                            "upload exceeds the 50MB limit".to_string(),
                        ));
                    }
                    file.write_all(&bytes)
                        .map_err(|e| AppError::Internal(format!("temp file write failed: {e}")))?;
                }
                file.flush()
                    .map_err(|e| AppError::Internal(format!("temp file flush failed: {e}")))?;

                upload = Some(SpooledUpload {
                    file,
                    content_type,
                    original_name,
                });
            }
            _ => {
                // Drain unknown fields so the stream stays consumable
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|_| {
                        AppError::InvalidInput("malformed multipart payload".to_string())
                    })?;
                }
            }
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::InvalidInput("file field is required".to_string()))?;

    let service = PostService::with_media((**pool).clone(), media.get_ref().clone());
    let post = service
        .create_from_upload(
            user_id.0,
            caption.as_deref(),
            upload.file.path(),
            &upload.content_type,
            &upload.original_name,
        )
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Delete a post (owner only)
/// DELETE /posts/{post_id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    media: web::Data<Arc<MediaStore>>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::with_media((**pool).clone(), media.get_ref().clone());
    service.delete(*post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "post deleted successfully",
    })))
}
