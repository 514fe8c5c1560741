use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured output of a single recognition call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrResult {
    /// Recognized text
    pub text: String,
    /// Elapsed wall-clock seconds for the call
    pub processing_time: f64,
    /// Completion time
    pub timestamp: DateTime<Utc>,
    /// Kept for wire compatibility; recognition failures are returned as
    /// errors, never inside a result
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub error: Option<String>,
}
