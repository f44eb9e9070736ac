/// Business logic layer for post-service
///
/// This module provides high-level operations:
/// - Post service: upload orchestration and owner-gated deletion
/// - Feed service: feed assembly with engagement data
/// - Like service: atomic like toggling
/// - Comment service: comment creation
pub mod comments;
pub mod feed;
pub mod likes;
pub mod posts;

// Re-export commonly used services
pub use comments::CommentService;
pub use feed::FeedService;
pub use likes::LikeService;
pub use posts::PostService;
