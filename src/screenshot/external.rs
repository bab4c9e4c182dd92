//! Interactive capture through an external tool that writes a PNG file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use super::encode::{screenshot_filename, to_data_uri};
use super::ScreenshotCapture;
use crate::error::ScreenshotError;

/// Runs `program <args> <file>`, then reads and deletes `<file>`.
///
/// A missing or empty file after a clean exit means the user cancelled.
#[derive(Clone, Debug)]
pub struct ExternalToolCapture {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
}

impl ExternalToolCapture {
    pub fn new(program: impl Into<String>, args: &[&str], dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            dir: dir.into(),
        }
    }

    /// macOS interactive region capture.
    pub fn screencapture() -> Self {
        Self::new("screencapture", &["-i"], std::env::temp_dir())
    }

    /// GNOME interactive area capture.
    pub fn gnome_screenshot() -> Self {
        Self::new("gnome-screenshot", &["-a", "-f"], std::env::temp_dir())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn read_and_remove(path: &Path) -> Result<Vec<u8>, ScreenshotError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ScreenshotError::Cancelled),
            Err(e) => return Err(e.into()),
        };
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "Failed to remove screenshot file");
        }
        Ok(bytes)
    }
}

impl ScreenshotCapture for ExternalToolCapture {
    fn capture(&self) -> Result<String, ScreenshotError> {
        let path = self.dir.join(screenshot_filename(chrono::Local::now()));
        info!(tool = %self.program, path = %path.display(), "Starting screenshot tool");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .status()
            .map_err(|e| ScreenshotError::Tool {
                tool: self.program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            // Leave nothing behind if the tool wrote a partial file
            let _ = std::fs::remove_file(&path);
            return Err(ScreenshotError::Tool {
                tool: self.program.clone(),
                message: format!("exited with {}", status),
            });
        }

        let png = Self::read_and_remove(&path)?;
        debug!(bytes = png.len(), "Screenshot file read");
        to_data_uri(&png)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_tool_is_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let capture = ExternalToolCapture::new("popask-no-such-tool", &[], dir.path());
        let err = capture.capture().unwrap_err();
        assert!(matches!(err, ScreenshotError::Tool { ref tool, .. } if tool == "popask-no-such-tool"));
    }

    #[test]
    fn test_clean_exit_without_file_is_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        // `true` ignores its argument and writes nothing
        let capture = ExternalToolCapture::new("true", &[], dir.path());
        assert!(matches!(capture.capture(), Err(ScreenshotError::Cancelled)));
    }

    #[test]
    fn test_failed_exit_is_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let capture = ExternalToolCapture::new("false", &[], dir.path());
        assert!(matches!(capture.capture(), Err(ScreenshotError::Tool { .. })));
    }

    #[test]
    fn test_file_is_read_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"png-bytes")
            .unwrap();

        let bytes = ExternalToolCapture::read_and_remove(&path).unwrap();

        assert_eq!(bytes, b"png-bytes");
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_file_is_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        // `touch <file>` creates an empty capture
        let capture = ExternalToolCapture::new("touch", &[], dir.path());
        assert!(matches!(capture.capture(), Err(ScreenshotError::Cancelled)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
