/// Feed handler - the authenticated home feed
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FeedService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Get the full feed, newest post first
/// GET /home
pub async fn get_home(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let posts = service.assemble(user_id.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": posts })))
}
