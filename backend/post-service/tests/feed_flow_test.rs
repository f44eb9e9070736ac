//! Feed assembly integration tests against a real PostgreSQL.

mod common;

use chrono::{Duration, Utc};
use post_service::db::{like_repo, post_repo};
use post_service::services::{CommentService, FeedService, LikeService};

#[tokio::test]
async fn home_feed_orders_posts_newest_first_and_comments_oldest_first() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;

    let base = Utc::now() - Duration::minutes(30);
    let oldest = common::create_post_at(&pool, alice, Some("first"), "image", base).await;
    let middle =
        common::create_post_at(&pool, bob, None, "video", base + Duration::minutes(5)).await;
    let newest =
        common::create_post_at(&pool, alice, Some("third"), "image", base + Duration::minutes(10))
            .await;

    common::create_comment_at(&pool, bob, oldest, "came first", base + Duration::minutes(1)).await;
    common::create_comment_at(&pool, alice, oldest, "came second", base + Duration::minutes(2))
        .await;

    let feed = FeedService::new(pool.clone())
        .assemble(bob)
        .await
        .expect("feed");

    let ids: Vec<_> = feed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newest, middle, oldest]);

    let oldest_entry = feed.iter().find(|p| p.id == oldest).unwrap();
    let comment_texts: Vec<_> = oldest_entry
        .comments
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(comment_texts, vec!["came first", "came second"]);
    assert_eq!(oldest_entry.comments[0].username, "bob");
    assert_eq!(oldest_entry.comments[1].username, "alice");

    let middle_entry = feed.iter().find(|p| p.id == middle).unwrap();
    assert!(middle_entry.comments.is_empty());
    assert_eq!(middle_entry.caption, None);
    assert_eq!(middle_entry.file_type, "video");
}

#[tokio::test]
async fn like_counts_and_viewer_flags_reflect_stored_rows() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let carol = common::create_user(&pool, "carol").await;

    let popular = common::create_post_at(&pool, alice, Some("popular"), "image", Utc::now()).await;
    let quiet =
        common::create_post_at(&pool, bob, Some("quiet"), "image", Utc::now() - Duration::minutes(1))
            .await;

    like_repo::insert_like_if_absent(&pool, bob, popular)
        .await
        .expect("like");
    like_repo::insert_like_if_absent(&pool, carol, popular)
        .await
        .expect("like");

    let feed_for_bob = FeedService::new(pool.clone())
        .assemble(bob)
        .await
        .expect("feed");

    let popular_entry = feed_for_bob.iter().find(|p| p.id == popular).unwrap();
    assert_eq!(popular_entry.likes, 2);
    assert!(popular_entry.liked);
    assert!(!popular_entry.is_owner);
    assert_eq!(popular_entry.username, "alice");

    let quiet_entry = feed_for_bob.iter().find(|p| p.id == quiet).unwrap();
    assert_eq!(quiet_entry.likes, 0);
    assert!(!quiet_entry.liked);
    assert!(quiet_entry.is_owner);

    // carol liked the same post but never commented or posted
    let feed_for_carol = FeedService::new(pool.clone())
        .assemble(carol)
        .await
        .expect("feed");
    let popular_entry = feed_for_carol.iter().find(|p| p.id == popular).unwrap();
    assert!(popular_entry.liked);
    assert!(!popular_entry.is_owner);
}

#[tokio::test]
async fn empty_feed_returns_no_posts() {
    let pool = common::setup_test_db().await.expect("test db");
    let viewer = common::create_user(&pool, "lurker").await;

    let feed = FeedService::new(pool.clone())
        .assemble(viewer)
        .await
        .expect("feed");
    assert!(feed.is_empty());
}

#[tokio::test]
async fn upload_like_comment_round_trip_shows_up_in_feed() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;

    let post = post_repo::create_post(
        &pool,
        alice,
        Some("sunset"),
        "https://media.test/uploads/sunset.jpg",
        "image",
        "uploads/sunset.jpg",
    )
    .await
    .expect("create post");

    let likes = LikeService::new(pool.clone());
    assert!(likes.toggle(bob, post.id).await.expect("like"));
    assert!(!likes.toggle(bob, post.id).await.expect("unlike"));

    CommentService::new(pool.clone())
        .add(bob, post.id, "nice!")
        .await
        .expect("comment");

    let feed = FeedService::new(pool.clone())
        .assemble(bob)
        .await
        .expect("feed");
    assert_eq!(feed.len(), 1);

    let entry = &feed[0];
    assert_eq!(entry.id, post.id);
    assert_eq!(entry.caption.as_deref(), Some("sunset"));
    assert_eq!(entry.file_type, "image");
    assert_eq!(entry.likes, 0);
    assert!(!entry.liked);
    assert_eq!(entry.comments.len(), 1);
    assert_eq!(entry.comments[0].text, "nice!");
    assert_eq!(entry.comments[0].username, "bob");
}
