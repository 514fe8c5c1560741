use std::path::Path;

/// OCR engine session - abstraction over one configured engine instance.
///
/// Mirrors the lifecycle of an engine session: an image is loaded into the
/// session (from a path or from raw bytes), recognition runs on the loaded
/// image, and `release` frees the session's resources. Methods return the
/// engine's raw error message; callers wrap it with context.
pub trait OcrEngine: Send + Sync {
    /// Load an image into the session from a file
    fn set_image_path(&mut self, path: &Path) -> Result<(), String>;

    /// Load an image into the session from an in-memory buffer
    fn set_image_bytes(&mut self, data: &[u8]) -> Result<(), String>;

    /// Run text recognition on the loaded image
    fn get_text(&mut self) -> Result<String, String>;

    /// Free the session's resources
    fn release(&mut self) -> Result<(), String>;
}
