use serde::{Deserialize, Serialize};

/// Recognition language configuration for the OCR engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrConfig {
    /// Ordered Tesseract language codes (e.g. "eng", "ara")
    pub languages: Vec<String>,
}

impl OcrConfig {
    /// Create a configuration from a list of language codes
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    /// Language list in Tesseract's `-l` argument form ("eng+ara")
    pub fn lang_arg(&self) -> String {
        self.languages.join("+")
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: vec!["eng".to_string(), "ara".to_string()],
        }
    }
}
