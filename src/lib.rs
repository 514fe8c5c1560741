//! Thread-safe client for the Tesseract OCR engine.
//!
//! [`OcrClient`] owns one engine session and serializes all recognition
//! calls through it, so a single client can be shared freely across
//! threads. Images are accepted by file path (with extension validation)
//! or as raw bytes (no validation; the caller knows the format).
//!
//! ```no_run
//! use ocr_client::{check_tesseract_installation, OcrClient};
//!
//! # fn main() -> Result<(), ocr_client::OcrError> {
//! check_tesseract_installation()?;
//!
//! let client = OcrClient::new()?;
//! let result = client.process_image("scan.png")?;
//! println!("{} ({}s)", result.text, result.processing_time);
//!
//! client.close()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod services;

pub use error::OcrError;
pub use models::config::OcrConfig;
pub use models::ocr_result::OcrResult;
pub use services::ocr::{check_tesseract_installation, OcrClient, OcrEngine, TesseractEngine};
