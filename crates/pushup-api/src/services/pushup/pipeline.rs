use pushup_core::AppError;
use pushup_processing::{
    encode_lossless_webp, format_file_size, DecodedImage, ImageResize, ProcessingError, SizeSpec,
    SIZES, WEBP_CONTENT_TYPE,
};
use pushup_storage::keys::UploadFolder;
use pushup_storage::Storage;
use std::sync::Arc;
use std::time::Instant;

use super::types::{OriginalRecord, PushupRequest, PushupResponse, VariantRecord};
use crate::constants::SUCCESS_MESSAGE;
use crate::error::{app_error_from_join, app_error_from_processing, app_error_from_storage};

/// Drives one upload through resize, encode and storage.
///
/// Steps run strictly in order and the first failure aborts the request.
/// Objects written before the failure stay in storage unless
/// `cleanup_on_failure` is set, in which case they are deleted best-effort.
pub struct PushupService {
    storage: Arc<dyn Storage>,
    cleanup_on_failure: bool,
}

struct Rendered {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PushupService {
    pub fn new(storage: Arc<dyn Storage>, cleanup_on_failure: bool) -> Self {
        Self {
            storage,
            cleanup_on_failure,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            bucket = %self.storage.bucket(),
            bucket_dir = %request.bucket_dir,
            filename = %request.filename.name,
        )
    )]
    pub async fn run(&self, request: PushupRequest) -> Result<PushupResponse, AppError> {
        let mut written = Vec::new();
        let result = self.process(request, &mut written).await;

        if result.is_err() && !written.is_empty() {
            if self.cleanup_on_failure {
                self.cleanup(&written).await;
            } else {
                tracing::warn!(
                    orphaned = written.len(),
                    keys = ?written,
                    "Pushup aborted; objects written so far remain in storage"
                );
            }
        }

        result
    }

    async fn process(
        &self,
        request: PushupRequest,
        written: &mut Vec<String>,
    ) -> Result<PushupResponse, AppError> {
        let start = Instant::now();
        let PushupRequest {
            image,
            filename,
            content_type,
            original_size,
            bucket_dir,
        } = request;

        let folder = UploadFolder::new(&bucket_dir, &filename.stem).map_err(app_error_from_storage)?;
        let image = Arc::new(image);

        let original = OriginalRecord {
            filename: filename.stem.clone(),
            size: [image.width, image.height],
            file_size: format_file_size(original_size),
            file_type: content_type,
        };

        // No conflict check for the original; a re-upload replaces it.
        let original_key = folder.original_key(&filename.extension);
        let rendered = render(image.clone(), None).await?;
        self.put(&original_key, rendered.data, written).await?;

        let mut images = Vec::with_capacity(SIZES.len());
        for spec in SIZES.iter() {
            let key = folder.variant_key(spec.name);

            if self.storage.exists(&key).await.map_err(app_error_from_storage)? {
                return Err(AppError::Conflict(format!(
                    "File {} already exists in the bucket.",
                    key
                )));
            }

            let rendered = render(image.clone(), Some(*spec)).await?;
            let url = self.put(&key, rendered.data, written).await?;

            let stored_bytes = self
                .storage
                .content_length(&key)
                .await
                .map_err(app_error_from_storage)?;

            tracing::debug!(
                key = %key,
                width = rendered.width,
                height = rendered.height,
                size_bytes = stored_bytes,
                "Variant stored"
            );

            images.push(VariantRecord {
                filename: filename.stem.clone(),
                size_name: spec.name.to_string(),
                size: [rendered.width, rendered.height],
                file_size: format_file_size(stored_bytes),
                url,
            });
        }

        tracing::info!(
            folder = %folder.as_str(),
            variants = images.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Pushup completed"
        );

        Ok(PushupResponse {
            message: SUCCESS_MESSAGE.to_string(),
            original,
            images,
        })
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        written: &mut Vec<String>,
    ) -> Result<String, AppError> {
        let url = self
            .storage
            .upload_with_key(key, data, WEBP_CONTENT_TYPE)
            .await
            .map_err(app_error_from_storage)?;
        written.push(key.to_string());
        Ok(url)
    }

    async fn cleanup(&self, keys: &[String]) {
        for key in keys.iter().rev() {
            match self.storage.delete(key).await {
                Ok(()) => tracing::debug!(key = %key, "Removed object from aborted pushup"),
                Err(e) => tracing::warn!(
                    error = %e,
                    key = %key,
                    "Failed to remove object from aborted pushup"
                ),
            }
        }
    }
}

/// Resize (when a size is given) and encode off the async pool.
async fn render(image: Arc<DecodedImage>, spec: Option<SizeSpec>) -> Result<Rendered, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let rendered = match spec {
            None => Rendered {
                width: image.width,
                height: image.height,
                data: Vec::from(encode_lossless_webp(&image.image)?),
            },
            Some(spec) => {
                let thumb = ImageResize::thumbnail(&image.image, spec.max_width, spec.max_height);
                Rendered {
                    width: thumb.width(),
                    height: thumb.height(),
                    data: Vec::from(encode_lossless_webp(&thumb)?),
                }
            }
        };
        Ok::<_, ProcessingError>(rendered)
    })
    .await
    .map_err(|e| app_error_from_join(e, "Render"))?;

    result.map_err(app_error_from_processing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use pushup_core::ErrorMetadata;
    use pushup_processing::FileName;
    use pushup_storage::test_helpers::MockStorage;

    const FOLDER: &str = "assets/img/demo/photo";

    fn request(width: u32, height: u32) -> PushupRequest {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
        PushupRequest {
            image: DecodedImage {
                image: DynamicImage::ImageRgb8(img),
                width,
                height,
                format: Some("Jpeg".to_string()),
            },
            filename: FileName::parse("photo.jpg").unwrap(),
            content_type: "image/jpeg".to_string(),
            original_size: 2048,
            bucket_dir: "demo".to_string(),
        }
    }

    fn service(storage: &MockStorage, cleanup: bool) -> PushupService {
        PushupService::new(Arc::new(storage.clone()), cleanup)
    }

    #[tokio::test]
    async fn test_all_variants_in_order() {
        let storage = MockStorage::with_bucket("pixels");
        let response = service(&storage, false).run(request(400, 200)).await.unwrap();

        assert_eq!(response.message, "Image processed and uploaded successfully.");
        assert_eq!(response.original.filename, "photo");
        assert_eq!(response.original.size, [400, 200]);
        assert_eq!(response.original.file_size, "2.00 KB");
        assert_eq!(response.original.file_type, "image/jpeg");

        let names: Vec<&str> = response.images.iter().map(|r| r.size_name.as_str()).collect();
        assert_eq!(names, vec!["t", "s", "m", "l", "xl", "xxl"]);

        let sizes: Vec<[u32; 2]> = response.images.iter().map(|r| r.size).collect();
        assert_eq!(
            sizes,
            vec![[100, 50], [300, 150], [400, 200], [400, 200], [400, 200], [400, 200]]
        );

        let t = &response.images[0];
        assert_eq!(t.filename, "photo");
        assert_eq!(
            t.url,
            format!("https://pixels.s3.amazonaws.com/{}/t.webp", FOLDER)
        );
        let stored = storage.get_file(&format!("{}/t.webp", FOLDER)).unwrap();
        assert_eq!(t.file_size, format_file_size(stored.len() as u64));
        assert_eq!(&stored[8..12], b"WEBP");

        assert_eq!(storage.keys().len(), 7);
        assert!(storage.has_file(&format!("{}/original.jpg", FOLDER)));
    }

    #[tokio::test]
    async fn test_existing_variant_is_conflict() {
        let storage = MockStorage::new();
        storage.set_file(&format!("{}/s.webp", FOLDER), vec![1, 2, 3]);

        let err = service(&storage, false).run(request(400, 200)).await.unwrap_err();

        assert_eq!(err.http_status_code(), 400);
        assert_eq!(
            err.client_message(),
            format!("File {}/s.webp already exists in the bucket.", FOLDER)
        );
        // Earlier writes are not rolled back.
        assert!(storage.has_file(&format!("{}/original.jpg", FOLDER)));
        assert!(storage.has_file(&format!("{}/t.webp", FOLDER)));
        assert_eq!(storage.get_file(&format!("{}/s.webp", FOLDER)), Some(vec![1, 2, 3]));
        for name in ["m", "l", "xl", "xxl"] {
            assert!(!storage.has_file(&format!("{}/{}.webp", FOLDER, name)));
        }
    }

    #[tokio::test]
    async fn test_cleanup_removes_partial_writes() {
        let storage = MockStorage::new();
        storage.set_file(&format!("{}/s.webp", FOLDER), vec![1, 2, 3]);

        let err = service(&storage, true).run(request(400, 200)).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(storage.keys(), vec![format!("{}/s.webp", FOLDER)]);
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let storage = MockStorage::new();
        storage.fail_uploads_to(&format!("{}/m.webp", FOLDER));

        let err = service(&storage, false).run(request(400, 200)).await.unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.http_status_code(), 500);
        assert!(storage.has_file(&format!("{}/s.webp", FOLDER)));
    }

    #[tokio::test]
    async fn test_invalid_bucket_dir_is_rejected_before_any_write() {
        let storage = MockStorage::new();
        let mut req = request(40, 20);
        req.bucket_dir = "../escape".to_string();

        let err = service(&storage, false).run(req).await.unwrap_err();

        assert_eq!(err.http_status_code(), 400);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_extensionless_upload() {
        let storage = MockStorage::new();
        let mut req = request(40, 20);
        req.filename = FileName::parse("scan").unwrap();

        service(&storage, false).run(req).await.unwrap();

        assert!(storage.has_file("assets/img/demo/scan/original"));
        assert!(storage.has_file("assets/img/demo/scan/xxl.webp"));
    }
}
