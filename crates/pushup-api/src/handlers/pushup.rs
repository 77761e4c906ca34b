use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use pushup_core::AppError;
use pushup_processing::{FileName, ImageProcessor};

use crate::constants::MISSING_IMAGE_MESSAGE;
use crate::error::{app_error_from_join, app_error_from_processing, ErrorResponse, HttpAppError};
use crate::services::pushup::{PushupRequest, PushupResponse};
use crate::state::AppState;
use crate::utils::upload::{bucket_dir_from_headers, extract_image_field};

/// Upload an image and store it with its resized variants
///
/// Checks run cheapest first: the `image` field, the bucket configuration,
/// the `BucketDir` header, the filename, then decoding. Only then does the
/// pipeline write anything.
///
/// # Errors
/// - `AppError::InvalidInput` - missing `image` field, `BucketDir` header or filename
/// - `AppError::ImageProcessing` - the upload is not a decodable image
/// - `AppError::Config` - no bucket configured
/// - `AppError::Conflict` - a variant already exists at its destination key
/// - `AppError::Storage` - the storage backend failed
#[utoipa::path(
    post,
    path = "/pushup",
    tag = "pushup",
    params(
        ("BucketDir" = String, Header, description = "Destination folder inside the bucket")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image processed and uploaded", body = PushupResponse),
        (status = 400, description = "Missing image, bad header, undecodable image or existing variant", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Bucket not configured or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, multipart), fields(operation = "pushup"))]
pub async fn pushup_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PushupResponse>, HttpAppError> {
    accept_pushup(&state, &headers, multipart)
        .await
        .map(Json)
        .map_err(|e| HttpAppError::new(e, &state.config))
}

async fn accept_pushup(
    state: &AppState,
    headers: &HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PushupResponse, AppError> {
    // A body that is not multipart at all cannot carry the image either.
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Request is not multipart");
        AppError::InvalidInput(MISSING_IMAGE_MESSAGE.to_string())
    })?;
    let upload = extract_image_field(multipart).await?;

    let service = state.pushup_service()?;
    let bucket_dir = bucket_dir_from_headers(headers)?;

    let filename = upload
        .filename
        .as_deref()
        .and_then(FileName::parse)
        .ok_or_else(|| AppError::InvalidInput("Uploaded image has no filename.".to_string()))?;

    let original_size = upload.data.len() as u64;
    let data = upload.data;
    let image = tokio::task::spawn_blocking(move || ImageProcessor::decode(&data))
        .await
        .map_err(|e| app_error_from_join(e, "Decode"))?
        .map_err(app_error_from_processing)?;

    tracing::info!(
        bucket_dir = %bucket_dir,
        filename = %filename.name,
        content_type = %upload.content_type,
        detected_format = image.format.as_deref().unwrap_or("unknown"),
        size_bytes = original_size,
        width = image.width,
        height = image.height,
        "Pushup request accepted"
    );

    service
        .run(PushupRequest {
            image,
            filename,
            content_type: upload.content_type,
            original_size,
            bucket_dir,
        })
        .await
}
