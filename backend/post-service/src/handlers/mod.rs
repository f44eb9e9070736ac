/// HTTP handlers for the post-service endpoints
///
/// - Posts: multipart upload and owner-gated deletion
/// - Feed: the authenticated home feed
/// - Likes: like toggling
/// - Comments: comment creation
pub mod comments;
pub mod feed;
pub mod likes;
pub mod posts;

// Re-export handler functions at module level
pub use comments::add_comment;
pub use feed::get_home;
pub use likes::toggle_like;
pub use posts::{delete_post, upload_post};
