// Optical character recognition
// Bridges a local Tesseract install; the engine runs as a child process per frame.

use async_trait::async_trait;
use std::io;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::capture::Frame;
use crate::command::first_line;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine '{0}' not found")]
    EngineMissing(String),

    #[error("recognition failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Turns an image into text.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, frame: &Frame, language: &str) -> Result<String, OcrError>;
}

/// Runs the `tesseract` command line tool.
pub struct TesseractCli {
    program: String,
}

impl TesseractCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(frame: &Frame, language: &str) -> Vec<String> {
        vec![
            frame.path.to_string_lossy().into_owned(),
            "stdout".to_string(),
            "-l".to_string(),
            language.to_string(),
        ]
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

#[async_trait]
impl Recognizer for TesseractCli {
    async fn recognize(&self, frame: &Frame, language: &str) -> Result<String, OcrError> {
        debug!("Running OCR ({}) on {}", language, frame.path.display());

        let output = Command::new(&self.program)
            .args(Self::args(frame, language))
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => OcrError::EngineMissing(self.program.clone()),
                _ => OcrError::Io(e),
            })?;

        if !output.status.success() {
            return Err(OcrError::Failed(first_line(&output.stderr)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
