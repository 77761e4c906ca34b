use thiserror::Error;

/// Image processing errors
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Uploaded file is empty")]
    EmptyInput,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
