/// Configuration management for Post Service
///
/// This module handles loading and managing configuration from
/// environment variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Media store (S3-compatible) configuration
    pub media: MediaConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Media store configuration
///
/// The store is addressed like S3: access/secret key pair, an endpoint
/// URL for S3-compatible providers, a bucket, and the public base URL
/// that serves uploaded assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint_url: Option<String>,
    pub region: String,
    pub bucket: String,
    /// Base URL prepended to object keys to form public asset URLs
    pub public_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("POST_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("POST_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: CorsConfig {
                allowed_origins: resolve_cors_origins(
                    &app_env,
                    std::env::var("CORS_ALLOWED_ORIGINS").ok(),
                )?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/lumina".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            media: {
                let bucket = resolve_media_bucket(&app_env, std::env::var("MEDIA_BUCKET").ok())?;

                let public_base_url = std::env::var("MEDIA_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com"));

                MediaConfig {
                    access_key: std::env::var("MEDIA_ACCESS_KEY").ok(),
                    secret_key: std::env::var("MEDIA_SECRET_KEY").ok(),
                    endpoint_url: std::env::var("MEDIA_ENDPOINT_URL").ok(),
                    region: std::env::var("MEDIA_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                    bucket,
                    public_base_url: public_base_url.trim_end_matches('/').to_string(),
                }
            },
        })
    }
}

/// CORS origins with environment-conditional validation. Production must
/// name its origins explicitly and may not use the wildcard.
fn resolve_cors_origins(app_env: &str, configured: Option<String>) -> Result<String, String> {
    let origins = match configured {
        Some(value) => value,
        None if app_env.eq_ignore_ascii_case("production") => {
            return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
        }
        None => "http://localhost:3000".to_string(),
    };

    if app_env.eq_ignore_ascii_case("production") && origins.trim() == "*" {
        return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
    }

    Ok(origins)
}

/// Media bucket name, required in production.
fn resolve_media_bucket(app_env: &str, configured: Option<String>) -> Result<String, String> {
    match configured {
        Some(value) => Ok(value),
        None if app_env.eq_ignore_ascii_case("production") => {
            Err("MEDIA_BUCKET must be set in production".to_string())
        }
        None => Ok("lumina-media".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_requires_explicit_cors_origins() {
        assert!(resolve_cors_origins("production", None).is_err());
        assert!(resolve_cors_origins("production", Some("*".to_string())).is_err());
        assert!(resolve_cors_origins("production", Some(" * ".to_string())).is_err());
        assert_eq!(
            resolve_cors_origins("production", Some("https://lumina.dev".to_string())).unwrap(),
            "https://lumina.dev"
        );
    }

    #[test]
    fn development_falls_back_to_localhost_origins() {
        assert_eq!(
            resolve_cors_origins("development", None).unwrap(),
            "http://localhost:3000"
        );
        // wildcard is tolerated outside production
        assert_eq!(
            resolve_cors_origins("development", Some("*".to_string())).unwrap(),
            "*"
        );
    }

    #[test]
    fn production_requires_a_media_bucket() {
        assert!(resolve_media_bucket("production", None).is_err());
        assert!(resolve_media_bucket("Production", None).is_err());
        assert_eq!(
            resolve_media_bucket("production", Some("cdn-prod".to_string())).unwrap(),
            "cdn-prod"
        );
        assert_eq!(
            resolve_media_bucket("development", None).unwrap(),
            "lumina-media"
        );
    }
}
