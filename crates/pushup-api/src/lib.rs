//! Pixel Pushup API Library
//!
//! HTTP surface of the pushup service: routes, handlers, the pushup pipeline
//! service, middleware and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::pushup::{OriginalRecord, PushupResponse, PushupService, VariantRecord};
pub use state::AppState;
