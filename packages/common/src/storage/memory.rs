use std::sync::Mutex;

use async_trait::async_trait;

use super::error::StorageError;
use super::traits::ObjectStore;

/// In-memory [`ObjectStore`] for tests.
///
/// Produces deterministic fake URLs and records which keys were signed, so
/// tests can assert on the upload flow without a real bucket.
#[derive(Default)]
pub struct MemoryObjectStore {
    signed_keys: Mutex<Vec<String>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys a pre-signed URL was issued for, in order.
    pub fn signed_keys(&self) -> Vec<String> {
        self.signed_keys.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn presign_put(&self, key: &str) -> Result<String, StorageError> {
        self.signed_keys
            .lock()
            .expect("lock poisoned")
            .push(key.to_string());
        Ok(format!("memory://uploads/{key}?signature=test"))
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://public/{key}")
    }
}
