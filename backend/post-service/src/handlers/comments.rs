/// Comment handler - comment creation endpoint
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Form body for creating a comment
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

/// Append a comment to a post
/// POST /posts/{post_id}/comment (form field: `text`)
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.add(user_id.0, *post_id, &form.text).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
