use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Insert a like for (user, post) unless one already exists.
/// Returns true when a row was inserted. The UNIQUE (user_id, post_id)
/// constraint resolves concurrent toggles; no read-then-write involved.
pub async fn insert_like_if_absent(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (user_id, post_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, post_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Delete the like for (user, post). Returns the number of rows removed.
pub async fn delete_like(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE user_id = $1 AND post_id = $2
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Get like counts for multiple posts in one round trip.
/// Posts with zero likes are absent from the result.
pub async fn count_likes_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT post_id, COUNT(*) AS count
        FROM likes
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    let counts = rows
        .into_iter()
        .map(|row| {
            let post_id: Uuid = row.get("post_id");
            let count: i64 = row.get("count");
            (post_id, count)
        })
        .collect();

    Ok(counts)
}

/// Of the given posts, return the ids the user has liked.
pub async fn liked_post_ids(
    pool: &PgPool,
    user_id: Uuid,
    post_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid,)>(
        r#"
        SELECT post_id
        FROM likes
        WHERE user_id = $1 AND post_id = ANY($2)
        "#,
    )
    .bind(user_id)
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
