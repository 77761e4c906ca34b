//! The pushup pipeline: original + six resized variants into storage.

mod pipeline;
mod types;

pub use pipeline::PushupService;
pub use types::{OriginalRecord, PushupRequest, PushupResponse, VariantRecord};
