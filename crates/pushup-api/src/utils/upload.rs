//! Request parsing for the pushup upload

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use pushup_core::AppError;

use crate::constants::{BUCKET_DIR_HEADER, IMAGE_FIELD, MISSING_IMAGE_MESSAGE};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The `image` part of a multipart upload.
#[derive(Debug)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: String,
}

/// Pull the `image` field out of the multipart body. Other fields are ignored;
/// when `image` appears more than once the first one wins.
pub async fn extract_image_field(mut multipart: Multipart) -> Result<UploadedImage, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(|s: &str| s.to_string());
        let content_type = field
            .content_type()
            .map(|s: &str| s.to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(UploadedImage {
            data: data.to_vec(),
            filename,
            content_type,
        });
    }

    Err(AppError::InvalidInput(MISSING_IMAGE_MESSAGE.to_string()))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read the `BucketDir` header.
pub fn bucket_dir_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(BUCKET_DIR_HEADER)
        .ok_or_else(|| AppError::InvalidInput(format!("Missing {} header.", BUCKET_DIR_HEADER)))?
        .to_str()
        .map_err(|_| {
            AppError::InvalidInput(format!("{} header must be valid ASCII.", BUCKET_DIR_HEADER))
        })?;

    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{} header must not be empty.",
            BUCKET_DIR_HEADER
        )));
    }
    if trimmed.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(AppError::InvalidInput(format!(
            "{} header contains an invalid path segment.",
            BUCKET_DIR_HEADER
        )));
    }

    Ok(trimmed.to_string())
}
