use crate::models::{Comment, CommentWithAuthor};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, post_id, text)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, post_id, text, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get all comments for the given posts joined with author usernames,
/// oldest first within each post.
pub async fn comments_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.post_id, u.username, c.text, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = ANY($1)
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
