//! Like, comment, and deletion integration tests against a real PostgreSQL.

mod common;

use chrono::Utc;
use post_service::db::{like_repo, post_repo};
use post_service::error::AppError;
use post_service::services::{CommentService, LikeService, PostService};
use uuid::Uuid;

#[tokio::test]
async fn like_toggle_flips_state_and_leaves_no_residual_rows() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let post = common::create_post_at(&pool, alice, Some("hello"), "image", Utc::now()).await;

    let service = LikeService::new(pool.clone());

    assert!(service.toggle(bob, post).await.expect("first toggle"));
    assert_eq!(common::count_rows(&pool, "likes", post).await, 1);

    assert!(!service.toggle(bob, post).await.expect("second toggle"));
    assert_eq!(common::count_rows(&pool, "likes", post).await, 0);

    // a second round toggles cleanly again
    assert!(service.toggle(bob, post).await.expect("third toggle"));
    assert_eq!(common::count_rows(&pool, "likes", post).await, 1);
}

#[tokio::test]
async fn engagement_on_missing_post_is_not_found() {
    let pool = common::setup_test_db().await.expect("test db");
    let bob = common::create_user(&pool, "bob").await;
    let ghost = Uuid::new_v4();

    let err = LikeService::new(pool.clone())
        .toggle(bob, ghost)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = CommentService::new(pool.clone())
        .add(bob, ghost, "anyone home?")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = PostService::new(pool.clone())
        .delete(ghost, bob)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn comment_text_is_trimmed_and_blank_text_rejected() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let post = common::create_post_at(&pool, alice, None, "image", Utc::now()).await;

    let service = CommentService::new(pool.clone());

    let err = service.add(alice, post, "   \t ").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert_eq!(common::count_rows(&pool, "comments", post).await, 0);

    let comment = service
        .add(alice, post, "  spaced out  ")
        .await
        .expect("comment");
    assert_eq!(comment.text, "spaced out");
    assert_eq!(common::count_rows(&pool, "comments", post).await, 1);
}

#[tokio::test]
async fn unsupported_content_type_is_rejected_before_anything_is_stored() {
    let pool = common::setup_test_db().await.expect("test db");
    let alice = common::create_user(&pool, "alice").await;

    // Classification runs first, so a service without a media store never
    // reaches it for a rejected upload.
    let err = PostService::new(pool.clone())
        .create_from_upload(
            alice,
            Some("my resume"),
            std::path::Path::new("resume.pdf"),
            "application/pdf",
            "resume.pdf",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let posts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(&pool)
        .await
        .expect("count posts");
    assert_eq!(posts, 0);
}

#[tokio::test]
async fn only_the_owner_may_delete_a_post() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let post = common::create_post_at(&pool, alice, Some("mine"), "image", Utc::now()).await;

    let err = PostService::new(pool.clone())
        .delete(post, bob)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // the row is untouched
    assert!(post_repo::find_post_by_id(&pool, post)
        .await
        .expect("lookup")
        .is_some());
}

#[tokio::test]
async fn deleting_a_post_cascades_its_likes_and_comments() {
    let pool = common::setup_test_db().await.expect("test db");

    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let post = common::create_post_at(&pool, alice, Some("short lived"), "video", Utc::now()).await;

    like_repo::insert_like_if_absent(&pool, bob, post)
        .await
        .expect("like");
    CommentService::new(pool.clone())
        .add(bob, post, "gone soon")
        .await
        .expect("comment");

    PostService::new(pool.clone())
        .delete(post, alice)
        .await
        .expect("delete");

    assert!(post_repo::find_post_by_id(&pool, post)
        .await
        .expect("lookup")
        .is_none());
    assert_eq!(common::count_rows(&pool, "likes", post).await, 0);
    assert_eq!(common::count_rows(&pool, "comments", post).await, 0);
}
