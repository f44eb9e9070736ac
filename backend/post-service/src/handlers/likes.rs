/// Like handler - toggle endpoint
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::LikeService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Toggle the requesting user's like on a post
/// POST /posts/{post_id}/like
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let liked = service.toggle(user_id.0, *post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}
