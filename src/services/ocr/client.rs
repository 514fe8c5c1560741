use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use parking_lot::Mutex;

use super::engine::OcrEngine;
use super::tesseract::TesseractEngine;
use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::models::ocr_result::OcrResult;

/// Extensions accepted by the path-based API (case-sensitive)
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

/// Check if the path carries an allowed image extension
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Lifecycle of the engine session held by the client.
///
/// The transition to `Released` is one-way; every call checks the state
/// and fails fast after release instead of touching a freed session.
enum SessionState {
    Active(Box<dyn OcrEngine>),
    Released,
}

/// Thread-safe OCR client.
///
/// Owns one engine session and serializes every recognition and close call
/// through a single mutex, engine interaction included. Safe to share
/// across threads; concurrent callers queue rather than overlap inside the
/// engine. Calls block until recognition completes; there is no timeout,
/// cancellation, or retry.
pub struct OcrClient {
    session: Mutex<SessionState>,
}

impl OcrClient {
    /// Create a client over a Tesseract session with the default language
    /// pair (eng + ara)
    pub fn new() -> Result<Self, OcrError> {
        Self::with_config(&OcrConfig::default())
    }

    /// Create a client over a Tesseract session with explicit languages
    pub fn with_config(config: &OcrConfig) -> Result<Self, OcrError> {
        let engine = TesseractEngine::new(config)?;
        Ok(Self::from_engine(Box::new(engine)))
    }

    /// Wrap an already-constructed engine session
    pub fn from_engine(engine: Box<dyn OcrEngine>) -> Self {
        Self {
            session: Mutex::new(SessionState::Active(engine)),
        }
    }

    /// Perform OCR on the image file at `path`.
    ///
    /// The extension must be one of jpg, jpeg, png, bmp, tiff (matched
    /// case-sensitively); anything else is rejected before the engine is
    /// touched. Blocks while any other call on this client is in flight.
    pub fn process_image<P: AsRef<Path>>(&self, path: P) -> Result<OcrResult, OcrError> {
        let path = path.as_ref();
        let start = Instant::now();

        let mut session = self.session.lock();
        let engine = match &mut *session {
            SessionState::Active(engine) => engine,
            SessionState::Released => return Err(OcrError::SessionReleased),
        };

        if !is_image_file(path) {
            return Err(OcrError::InvalidImage(path.display().to_string()));
        }

        engine
            .set_image_path(path)
            .map_err(OcrError::SetImage)?;
        let text = engine.get_text().map_err(OcrError::Recognition)?;

        let processing_time = start.elapsed().as_secs_f64();
        tracing::debug!(
            path = %path.display(),
            seconds = processing_time,
            "recognized image file"
        );

        Ok(OcrResult {
            text,
            processing_time,
            timestamp: Utc::now(),
            error: None,
        })
    }

    /// Perform OCR on in-memory image data.
    ///
    /// No format validation happens here: the caller already holds raw
    /// bytes and knows their format, so the buffer goes straight to the
    /// engine. Same locking discipline as [`process_image`].
    ///
    /// [`process_image`]: OcrClient::process_image
    pub fn process_image_bytes(&self, data: &[u8]) -> Result<OcrResult, OcrError> {
        let start = Instant::now();

        let mut session = self.session.lock();
        let engine = match &mut *session {
            SessionState::Active(engine) => engine,
            SessionState::Released => return Err(OcrError::SessionReleased),
        };

        engine.set_image_bytes(data).map_err(OcrError::SetImage)?;
        let text = engine.get_text().map_err(OcrError::Recognition)?;

        let processing_time = start.elapsed().as_secs_f64();
        tracing::debug!(
            bytes = data.len(),
            seconds = processing_time,
            "recognized image bytes"
        );

        Ok(OcrResult {
            text,
            processing_time,
            timestamp: Utc::now(),
            error: None,
        })
    }

    /// Release the engine session.
    ///
    /// One-way: recognition calls and further `close` calls fail with
    /// [`OcrError::SessionReleased`] afterwards. The session is marked
    /// released even if the engine reports a failure while freeing
    /// resources.
    pub fn close(&self) -> Result<(), OcrError> {
        let mut session = self.session.lock();
        match std::mem::replace(&mut *session, SessionState::Released) {
            SessionState::Active(mut engine) => {
                engine.release().map_err(OcrError::Release)
            }
            SessionState::Released => Err(OcrError::SessionReleased),
        }
    }
}
