/// Database access layer
///
/// Repository functions over the relational schema. Each function takes
/// the pool by reference; callers own transaction boundaries where they
/// need them.
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
