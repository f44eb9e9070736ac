/// Object-store client for uploaded media
///
/// Wraps an S3-compatible store (AWS S3, MinIO, any provider exposing an
/// S3 endpoint). Assets are written under provider-unique keys and served
/// publicly from `public_base_url`; the service keeps only the key and
/// the resulting URL.
use crate::config::MediaConfig;
use crate::error::{AppError, Result};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;

/// Outcome of a successful store: where the asset is served from and the
/// canonical stored name used for later cleanup.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub url: String,
    pub file_name: String,
}

#[derive(Clone)]
pub struct MediaStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl MediaStore {
    /// Initialize the S3 client from configuration
    ///
    /// Explicit credentials are used when provided; otherwise the default
    /// credential chain applies. A custom endpoint enables S3-compatible
    /// providers.
    pub async fn connect(config: &MediaConfig) -> Result<Self> {
        use aws_sdk_s3::config::Region;

        let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            use aws_sdk_s3::config::Credentials;

            let credentials = Credentials::new(access_key, secret_key, None, None, "post_service");
            builder = builder.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        let aws_config = builder.load().await;

        Ok(Self {
            client: Client::new(&aws_config),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        })
    }

    /// Upload a local file under the given key
    ///
    /// Failures collapse to `UploadFailed`; the provider-side detail is
    /// carried for logging but never reaches clients.
    pub async fn store(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> Result<StoredMedia> {
        let body = ByteStream::from_path(local_path).await.map_err(|e| {
            AppError::UploadFailed(format!("failed to read {}: {e}", local_path.display()))
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            // Uploaded assets are immutable; the key is unique per upload
            .cache_control("max-age=31536000")
            .send()
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("403") || msg.contains("Forbidden") {
                    AppError::UploadFailed("store auth failed (403): check credentials".to_string())
                } else if msg.contains("NoSuchBucket") {
                    AppError::UploadFailed(format!("bucket not found: {}", self.bucket))
                } else {
                    AppError::UploadFailed(format!("store upload failed: {e}"))
                }
            })?;

        Ok(StoredMedia {
            url: format!("{}/{}", self.public_base_url, key),
            file_name: key.to_string(),
        })
    }

    /// Delete an object by its stored name
    ///
    /// Used for compensating cleanup after a failed post insert and when
    /// a post is deleted.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("store delete failed: {e}")))?;

        Ok(())
    }

    /// Verify credentials and bucket access at startup
    pub async fn health_check(&self) -> Result<()> {
        match self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(1)
            .send()
            .await
        {
            Ok(_) => {
                tracing::info!("media store connection validated (bucket: {})", self.bucket);
                Ok(())
            }
            Err(e) => {
                let msg = e.to_string();
                let guidance = if msg.contains("InvalidAccessKeyId") {
                    "Invalid access key. Check MEDIA_ACCESS_KEY."
                } else if msg.contains("SignatureDoesNotMatch") {
                    "Invalid secret key. Check MEDIA_SECRET_KEY."
                } else if msg.contains("NoSuchBucket") {
                    "Bucket does not exist. Check MEDIA_BUCKET."
                } else if msg.contains("AccessDenied") {
                    "Access denied. Ensure the credentials carry bucket permissions."
                } else {
                    "Ensure the media store endpoint is reachable and credentials are valid."
                };

                tracing::error!("media store health check failed: {} ({})", msg, guidance);

                Err(AppError::Internal(format!(
                    "media store health check failed: {msg}. {guidance}"
                )))
            }
        }
    }
}
