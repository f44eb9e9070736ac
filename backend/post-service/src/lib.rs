/// Post Service Library
///
/// Handles uploads, the home feed, likes, and comments for the Lumina
/// social application. Authentication token issuance and user management
/// live with the identity provider; this service only validates bearer
/// tokens and resolves the requesting user.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for users, posts, likes, comments
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `media`: Object-store client for uploaded assets
/// - `middleware`: HTTP middleware for authentication and request timing
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
