/// Feed service - assembles the reverse-chronological feed with
/// engagement data for the requesting user
///
/// Usernames come from the post query's join; like counts, liked flags,
/// and comments are fetched in one batched query each over the page of
/// post ids, so assembly cost stays at four round trips regardless of
/// feed length.
use crate::db::{comment_repo, like_repo, post_repo};
use crate::error::Result;
use crate::models::{FeedComment, FeedPost};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the full feed as seen by `viewer`: newest post first,
    /// comments oldest first within each post.
    pub async fn assemble(&self, viewer: Uuid) -> Result<Vec<FeedPost>> {
        let posts = post_repo::list_posts_with_authors(&self.pool).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let like_counts: HashMap<Uuid, i64> = like_repo::count_likes_batch(&self.pool, &post_ids)
            .await?
            .into_iter()
            .collect();

        let liked: HashSet<Uuid> = like_repo::liked_post_ids(&self.pool, viewer, &post_ids)
            .await?
            .into_iter()
            .collect();

        // Globally ordered by created_at ASC, so pushing in query order
        // keeps each post's comments oldest-first.
        let mut comments: HashMap<Uuid, Vec<FeedComment>> = HashMap::new();
        for comment in comment_repo::comments_for_posts(&self.pool, &post_ids).await? {
            comments
                .entry(comment.post_id)
                .or_default()
                .push(FeedComment {
                    username: comment.username,
                    text: comment.text,
                    created_at: comment.created_at,
                });
        }

        let feed = posts
            .into_iter()
            .map(|post| FeedPost {
                likes: like_counts.get(&post.id).copied().unwrap_or(0),
                liked: liked.contains(&post.id),
                comments: comments.remove(&post.id).unwrap_or_default(),
                is_owner: post.user_id == viewer,
                id: post.id,
                user_id: post.user_id,
                username: post.username,
                caption: post.caption,
                url: post.url,
                file_type: post.file_type,
                file_name: post.file_name,
                created_at: post.created_at,
            })
            .collect();

        Ok(feed)
    }
}
