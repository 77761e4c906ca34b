//! Fixed strings of the public HTTP contract.

/// Body of `GET /`
pub const LIVENESS_MESSAGE: &str = "PixelPushupAPI is up and running!";

/// `message` of a successful pushup response
pub const SUCCESS_MESSAGE: &str = "Image processed and uploaded successfully.";

/// Multipart field carrying the upload
pub const IMAGE_FIELD: &str = "image";

/// Request header naming the destination folder inside the bucket
pub const BUCKET_DIR_HEADER: &str = "BucketDir";

pub const MISSING_IMAGE_MESSAGE: &str = "Image not found in the request.";
pub const MISSING_BUCKET_MESSAGE: &str = "S3 bucket name not found in environment variables.";
