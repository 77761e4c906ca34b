use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::sync::Arc;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// Credentials come from the standard AWS environment variables.
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(Arc::new(store), bucket, endpoint_url))
    }

    /// Wrap an already-built object store, e.g. an in-memory one in tests.
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        endpoint_url: Option<String>,
    ) -> Self {
        S3Storage {
            store,
            bucket,
            endpoint_url,
        }
    }

    /// Public URL for an object.
    ///
    /// AWS: `https://{bucket}.s3.amazonaws.com/{key}`.
    /// S3-compatible providers use path style: `{endpoint}/{bucket}/{key}`.
    fn generate_url(&self, key: &str) -> String {
        match self.endpoint_url {
            Some(ref endpoint) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            None => format!("https://{}.s3.amazonaws.com/{}", self.bucket, key),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        let size = data.len() as u64;
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let result: ObjectResult<_> = self
            .store
            .put_opts(
                &location,
                PutPayload::from(Bytes::from(data)),
                PutOptions::from(attributes),
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn content_length(&self, storage_key: &str) -> StorageResult<u64> {
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(meta) => Ok(meta.size),
            Err(ObjectStoreError::NotFound { .. }) => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn in_memory() -> (Arc<InMemory>, S3Storage) {
        let store = Arc::new(InMemory::new());
        let storage = S3Storage::with_store(store.clone(), "pixels".to_string(), None);
        (store, storage)
    }

    #[tokio::test]
    async fn test_upload_stores_content_type() {
        let (store, storage) = in_memory();
        let key = "assets/img/demo/photo/t.webp";

        let url = storage
            .upload_with_key(key, b"RIFFxxxxWEBP".to_vec(), "image/webp")
            .await
            .unwrap();
        assert_eq!(url, format!("https://pixels.s3.amazonaws.com/{}", key));

        let object = store.get(&Path::from(key)).await.unwrap();
        assert_eq!(
            object.attributes.get(&Attribute::ContentType),
            Some(&"image/webp".into())
        );
    }

    #[tokio::test]
    async fn test_head_based_probes() {
        let (_store, storage) = in_memory();
        let key = "assets/img/demo/photo/s.webp";

        assert!(!storage.exists(key).await.unwrap());
        assert!(matches!(
            storage.content_length(key).await,
            Err(StorageError::NotFound(_))
        ));

        storage.upload_with_key(key, vec![7; 42], "image/webp").await.unwrap();
        assert!(storage.exists(key).await.unwrap());
        assert!(!storage.exists("assets/img/demo/photo/s").await.unwrap());
        assert_eq!(storage.content_length(key).await.unwrap(), 42);

        storage.delete(key).await.unwrap();
        storage.delete(key).await.unwrap();
        assert!(!storage.exists(key).await.unwrap());
    }

    #[test]
    fn test_aws_url_format() {
        let storage = S3Storage::new("pixels".to_string(), "us-east-1".to_string(), None).unwrap();
        assert_eq!(
            storage.public_url("assets/img/demo/photo/t.webp"),
            "https://pixels.s3.amazonaws.com/assets/img/demo/photo/t.webp"
        );
        assert_eq!(storage.bucket(), "pixels");
        assert_eq!(storage.backend_type(), StorageBackend::S3);
    }

    #[test]
    fn test_custom_endpoint_url_format() {
        let storage = S3Storage::new(
            "pixels".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        )
        .unwrap();
        assert_eq!(
            storage.public_url("assets/img/demo/photo/s.webp"),
            "http://localhost:9000/pixels/assets/img/demo/photo/s.webp"
        );
    }
}
