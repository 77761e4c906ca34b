use pushup_processing::{DecodedImage, FileName};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Everything the pipeline needs from one validated request.
pub struct PushupRequest {
    pub image: DecodedImage,
    pub filename: FileName,
    /// Content type declared by the client
    pub content_type: String,
    /// Size of the uploaded bytes
    pub original_size: u64,
    pub bucket_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OriginalRecord {
    /// Upload filename without extension
    pub filename: String,
    /// `[width, height]`
    #[schema(value_type = Vec<u32>)]
    pub size: [u32; 2],
    /// Human-readable size of the upload, e.g. `"245.12 KB"`
    pub file_size: String,
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariantRecord {
    pub filename: String,
    /// One of `t`, `s`, `m`, `l`, `xl`, `xxl`
    pub size_name: String,
    #[schema(value_type = Vec<u32>)]
    pub size: [u32; 2],
    /// Human-readable size of the stored object
    pub file_size: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PushupResponse {
    pub message: String,
    pub original: OriginalRecord,
    /// Variants in size-table order
    pub images: Vec<VariantRecord>,
}
