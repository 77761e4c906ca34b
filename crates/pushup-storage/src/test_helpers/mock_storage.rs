//! Mock Storage implementation for testing

use crate::{Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock storage implementation that stores files in memory
///
/// Clones share the same contents, so a test can keep a handle while the
/// router owns another.
#[derive(Clone)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    failing_uploads: Arc<Mutex<HashSet<String>>>,
    bucket: String,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::with_bucket("mock-bucket")
    }

    pub fn with_bucket(bucket: &str) -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            failing_uploads: Arc::new(Mutex::new(HashSet::new())),
            bucket: bucket.to_string(),
        }
    }

    /// Set a file in the mock storage
    pub fn set_file(&self, key: &str, data: Vec<u8>) {
        self.files.lock().unwrap().insert(key.to_string(), data);
    }

    /// Check if a file exists in the mock storage
    pub fn has_file(&self, key: &str) -> bool {
        self.files.lock().unwrap().contains_key(key)
    }

    /// Get file data (for test assertions)
    pub fn get_file(&self, key: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(key).cloned()
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Make every later upload to `key` fail with `UploadFailed`
    pub fn fail_uploads_to(&self, key: &str) {
        self.failing_uploads.lock().unwrap().insert(key.to_string());
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        if self.failing_uploads.lock().unwrap().contains(storage_key) {
            return Err(StorageError::UploadFailed(format!(
                "injected failure for {}",
                storage_key
            )));
        }
        self.files
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), data);
        Ok(self.public_url(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.files.lock().unwrap().remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.has_file(storage_key))
    }

    async fn content_length(&self, storage_key: &str) -> StorageResult<u64> {
        self.files
            .lock()
            .unwrap()
            .get(storage_key)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, storage_key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
