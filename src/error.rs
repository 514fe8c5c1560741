use thiserror::Error;

/// Errors surfaced by OCR operations.
///
/// Engine-level failures carry the raw message reported by the underlying
/// engine so callers can see which step failed and why.
#[derive(Debug, Error)]
pub enum OcrError {
    /// Engine could not be configured with the requested languages.
    #[error("failed to set language: {0}")]
    Init(String),

    /// File extension is not in the allowed image set.
    #[error("invalid image file: {0}")]
    InvalidImage(String),

    /// Engine rejected or failed to load the provided image data.
    #[error("failed to set image: {0}")]
    SetImage(String),

    /// Engine failed during text extraction.
    #[error("OCR failed: {0}")]
    Recognition(String),

    /// Engine failed to free resources on session teardown.
    #[error("failed to release OCR session: {0}")]
    Release(String),

    /// Operation attempted after the client was closed.
    #[error("OCR session already released")]
    SessionReleased,

    /// The tesseract binary is not discoverable on the search path.
    #[error("tesseract is not installed: {0}")]
    NotInstalled(String),
}
