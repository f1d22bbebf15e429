use thiserror::Error;

/// Errors that can occur while talking to object storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend rejected the credentials or configuration.
    #[error("storage configuration error: {0}")]
    Config(String),
    /// The backend failed to produce a signed URL.
    #[error("failed to sign storage URL: {0}")]
    Sign(String),
}
