/// Domain-level failures raised by the pure helpers in this crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid Google Drive URL")]
    InvalidDriveUrl,

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}
