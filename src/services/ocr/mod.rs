pub mod client;
pub mod engine;
pub mod tesseract;

// Re-export main types
pub use client::OcrClient;
pub use engine::OcrEngine;
pub use tesseract::{check_tesseract_installation, TesseractEngine};
