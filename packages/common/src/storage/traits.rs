use async_trait::async_trait;

use super::error::StorageError;

/// Object storage seen from the admin API's side.
///
/// The server never moves bytes itself: clients upload directly to the
/// bucket through a pre-signed PUT URL and read assets back through the
/// bucket's public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Produce a pre-signed PUT URL allowing a client to upload `key`.
    async fn presign_put(&self, key: &str) -> Result<String, StorageError>;

    /// Public URL at which `key` is served once uploaded.
    fn public_url(&self, key: &str) -> String;
}
