use crate::models::{Post, PostWithAuthor};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new post row for an uploaded asset
/// Returns the created post
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    caption: Option<&str>,
    url: &str,
    file_type: &str,
    file_name: &str,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, caption, url, file_type, file_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, caption, url, file_type, file_name, created_at
        "#,
    )
    .bind(user_id)
    .bind(caption)
    .bind(url)
    .bind(file_type)
    .bind(file_name)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, url, file_type, file_name, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Check whether a post exists
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1) AS found")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("found"))
}

/// Delete a post row. Dependent likes and comments are removed by the
/// schema's ON DELETE CASCADE constraints.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Fetch every post joined with its author's username, newest first.
/// The feed has no pagination by design.
pub async fn list_posts_with_authors(pool: &PgPool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.user_id, u.username, p.caption, p.url, p.file_type, p.file_name, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
