use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use uuid::Uuid;

use super::engine::OcrEngine;
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Name of the Tesseract binary on the search path
const TESSERACT_BIN: &str = "tesseract";

/// Verify that the tesseract binary is discoverable on the search path.
///
/// Stateless; independent of any client instance.
pub fn check_tesseract_installation() -> Result<(), OcrError> {
    Command::new(TESSERACT_BIN)
        .arg("--version")
        .output()
        .map(|_| ())
        .map_err(|e| OcrError::NotInstalled(e.to_string()))
}

/// Image staged for the next recognition call
struct StagedImage {
    path: PathBuf,
    /// Temp file owned by the engine, removed when unstaged
    temporary: bool,
}

/// Tesseract engine session driving the command-line binary.
///
/// Images set from bytes are staged as uniquely named temp files; every
/// recognition call runs one `tesseract` invocation and reads its text
/// output. Not thread-safe on its own; `OcrClient` serializes access.
pub struct TesseractEngine {
    lang_arg: String,
    staged: Option<StagedImage>,
}

impl TesseractEngine {
    /// Create an engine session configured for the given languages.
    ///
    /// Fails if the binary cannot be invoked or any requested language
    /// data is not installed.
    pub fn new(config: &OcrConfig) -> Result<Self, OcrError> {
        if config.languages.is_empty() {
            return Err(OcrError::Init("no languages configured".to_string()));
        }

        let installed = installed_languages().map_err(OcrError::Init)?;
        for lang in &config.languages {
            if !installed.iter().any(|l| l == lang) {
                return Err(OcrError::Init(format!(
                    "language data for '{}' not installed (available: {})",
                    lang,
                    installed.join(", ")
                )));
            }
        }

        Ok(Self {
            lang_arg: config.lang_arg(),
            staged: None,
        })
    }

    /// Unstage the current image, removing it if it was a temp file
    fn clear_staged(&mut self) -> Result<(), String> {
        if let Some(staged) = self.staged.take() {
            if staged.temporary {
                fs::remove_file(&staged.path).map_err(|e| {
                    format!("failed to remove {}: {}", staged.path.display(), e)
                })?;
            }
        }
        Ok(())
    }
}

/// Query the binary for installed language packs
fn installed_languages() -> Result<Vec<String>, String> {
    let output = Command::new(TESSERACT_BIN)
        .arg("--list-langs")
        .output()
        .map_err(|e| format!("failed to run {}: {}", TESSERACT_BIN, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("--list-langs failed: {}", stderr.trim()));
    }

    // Older tesseract builds print the list to stderr; the header line
    // contains spaces, language codes do not.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let langs: Vec<String> = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(' '))
        .map(str::to_string)
        .collect();

    if langs.is_empty() {
        return Err("no language data reported by --list-langs".to_string());
    }

    Ok(langs)
}

impl OcrEngine for TesseractEngine {
    fn set_image_path(&mut self, path: &Path) -> Result<(), String> {
        fs::metadata(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;

        if let Err(e) = self.clear_staged() {
            tracing::warn!("failed to unstage previous image: {}", e);
        }
        self.staged = Some(StagedImage {
            path: path.to_path_buf(),
            temporary: false,
        });
        Ok(())
    }

    fn set_image_bytes(&mut self, data: &[u8]) -> Result<(), String> {
        let path = env::temp_dir().join(format!("ocr_input_{}", Uuid::new_v4()));
        fs::write(&path, data).map_err(|e| format!("failed to write temp image: {}", e))?;

        if let Err(e) = self.clear_staged() {
            tracing::warn!("failed to unstage previous image: {}", e);
        }
        self.staged = Some(StagedImage {
            path,
            temporary: true,
        });
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, String> {
        let staged = self
            .staged
            .as_ref()
            .ok_or_else(|| "no image loaded into session".to_string())?;

        let output_base = env::temp_dir().join(format!("ocr_output_{}", Uuid::new_v4()));

        let output = Command::new(TESSERACT_BIN)
            .arg(&staged.path)
            .arg(&output_base)
            .arg("-l")
            .arg(&self.lang_arg)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .output()
            .map_err(|e| format!("failed to run {}: {}", TESSERACT_BIN, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("tesseract failed: {}", stderr.trim()));
        }

        let output_file = output_base.with_extension("txt");
        let text = fs::read_to_string(&output_file)
            .map_err(|e| format!("failed to read output: {}", e))?;

        if let Err(e) = fs::remove_file(&output_file) {
            tracing::warn!("failed to remove {}: {}", output_file.display(), e);
        }

        Ok(text.trim().to_string())
    }

    fn release(&mut self) -> Result<(), String> {
        self.clear_staged()
    }
}

impl Drop for TesseractEngine {
    fn drop(&mut self) {
        if let Err(e) = self.clear_staged() {
            tracing::warn!("failed to clean up staged image: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Build an engine directly, bypassing the language check
    fn bare_engine() -> TesseractEngine {
        TesseractEngine {
            lang_arg: "eng".to_string(),
            staged: None,
        }
    }

    /// Encode a simple black-on-white test bitmap as PNG bytes
    fn test_png_bytes() -> Vec<u8> {
        let img = RgbImage::from_fn(200, 50, |x, _y| {
            if x % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_set_image_path_missing_file_fails() {
        let mut engine = bare_engine();
        let result = engine.set_image_path(Path::new("/nonexistent/image.png"));

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("cannot read"));
    }

    #[test]
    fn test_get_text_without_image_fails() {
        let mut engine = bare_engine();
        let result = engine.get_text();

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no image loaded"));
    }

    #[test]
    fn test_set_image_bytes_stages_temp_file() {
        let mut engine = bare_engine();
        engine.set_image_bytes(&test_png_bytes()).unwrap();

        let staged_path = engine.staged.as_ref().unwrap().path.clone();
        assert!(staged_path.exists());

        engine.release().unwrap();
        assert!(engine.staged.is_none());
        assert!(!staged_path.exists());
    }

    #[test]
    fn test_restaging_replaces_temp_file() {
        let mut engine = bare_engine();
        engine.set_image_bytes(&test_png_bytes()).unwrap();
        let first = engine.staged.as_ref().unwrap().path.clone();

        engine.set_image_bytes(&test_png_bytes()).unwrap();
        let second = engine.staged.as_ref().unwrap().path.clone();

        assert_ne!(first, second);
        assert!(!first.exists(), "previous temp file should be removed");

        engine.release().unwrap();
    }

    #[test]
    fn test_release_without_staged_image_is_ok() {
        let mut engine = bare_engine();
        assert!(engine.release().is_ok());
    }

    #[test]
    fn test_engine_creation_with_installed_language() {
        if check_tesseract_installation().is_err() {
            println!("Skipping: tesseract not installed");
            return;
        }

        let installed = installed_languages().unwrap();
        let config = OcrConfig::new([installed[0].as_str()]);
        assert!(TesseractEngine::new(&config).is_ok());
    }

    #[test]
    fn test_engine_creation_rejects_unknown_language() {
        if check_tesseract_installation().is_err() {
            println!("Skipping: tesseract not installed");
            return;
        }

        let config = OcrConfig::new(["zzz_not_a_language"]);
        let result = TesseractEngine::new(&config);

        assert!(matches!(result, Err(OcrError::Init(_))));
    }

    #[test]
    fn test_engine_creation_rejects_empty_languages() {
        let config = OcrConfig::new(Vec::<String>::new());
        let result = TesseractEngine::new(&config);

        assert!(matches!(result, Err(OcrError::Init(_))));
    }

    #[test]
    #[ignore] // Requires tesseract with eng language data
    fn test_recognize_generated_image() {
        let config = OcrConfig::new(["eng"]);
        let mut engine = TesseractEngine::new(&config).unwrap();

        engine.set_image_bytes(&test_png_bytes()).unwrap();
        let result = engine.get_text();

        // Pattern image carries no real text; recognition should still succeed
        assert!(result.is_ok(), "recognition failed: {:?}", result);
        engine.release().unwrap();
    }
}
