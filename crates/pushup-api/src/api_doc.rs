//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::services::pushup;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixel Pushup API",
        version = "0.1.0",
        description = "Upload an image once; get the original plus six resized lossless WebP variants stored under assets/img/<BucketDir>/<filename>/."
    ),
    paths(
        handlers::health::index,
        handlers::health::health_check,
        handlers::pushup::pushup_image,
    ),
    components(schemas(
        pushup::PushupResponse,
        pushup::OriginalRecord,
        pushup::VariantRecord,
        handlers::health::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "pushup", description = "Image upload and variant generation"),
        (name = "health", description = "Liveness and configuration health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/pushup"));
        assert!(spec.paths.paths.contains_key("/"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
