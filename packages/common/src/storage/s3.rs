use std::sync::Arc;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use serde::Deserialize;

use super::error::StorageError;
use super::traits::ObjectStore;

/// Connection settings for an S3-compatible bucket (AWS, MinIO, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct S3Options {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Base URL under which uploaded objects are publicly served.
    pub public_base_url: String,
    /// Lifetime of pre-signed PUT URLs, in seconds.
    pub presign_expiry_secs: u32,
}

/// S3-backed [`ObjectStore`].
pub struct S3ObjectStore {
    bucket: Arc<Bucket>,
    public_base_url: String,
    presign_expiry_secs: u32,
}

impl S3ObjectStore {
    pub fn new(options: &S3Options) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: options.region.clone(),
            endpoint: options.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(&options.access_key),
            Some(&options.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(e.to_string()))?;

        let mut bucket = Bucket::new(&options.bucket, region, credentials)
            .map_err(|e| StorageError::Config(e.to_string()))?;
        // MinIO and most self-hosted gateways only speak path-style addressing.
        bucket.set_path_style();

        Ok(Self {
            bucket: bucket.into(),
            public_base_url: options.public_base_url.trim_end_matches('/').to_string(),
            presign_expiry_secs: options.presign_expiry_secs,
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn presign_put(&self, key: &str) -> Result<String, StorageError> {
        self.bucket
            .presign_put(key, self.presign_expiry_secs, None, None)
            .await
            .map_err(|e| StorageError::Sign(e.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}
