// One pass of the reading pipeline:
// capture -> recognize -> normalize -> transliterate -> speak

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::braille::transliterate;
use crate::capture::{CaptureError, FrameSource};
use crate::ocr::{OcrError, Recognizer};
use crate::speech::{Speaker, SpeechError};
use crate::text::{is_worth_reading, normalize_whitespace};

/// Normalized text and its Braille rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub text: String,
    pub braille: String,
}

impl Reading {
    pub fn from_text(text: String) -> Self {
        let braille = transliterate(&text);
        Self { text, braille }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Recognition(#[from] OcrError),
}

impl ScanError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ScanError::Capture(CaptureError::PermissionDenied(_)))
    }
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// OCR language code
    pub language: String,
    /// Minimum characters for a reading to count
    pub min_chars: usize,
    /// Speak each new reading
    pub speak_readings: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            min_chars: 2,
            speak_readings: true,
        }
    }
}

/// Owns the collaborators and runs scans.
pub struct Scanner {
    camera: Box<dyn FrameSource>,
    recognizer: Box<dyn Recognizer>,
    speaker: Box<dyn Speaker>,
    settings: ScanSettings,
}

impl Scanner {
    pub fn new(
        camera: Box<dyn FrameSource>,
        recognizer: Box<dyn Recognizer>,
        speaker: Box<dyn Speaker>,
        settings: ScanSettings,
    ) -> Self {
        Self {
            camera,
            recognizer,
            speaker,
            settings,
        }
    }

    /// Run one scan. `Ok(None)` means the frame had nothing legible.
    ///
    /// Speech problems are logged but never fail the scan; the reading is
    /// still worth showing.
    pub async fn scan_once(&mut self) -> Result<Option<Reading>, ScanError> {
        let frame = self.camera.capture().await?;
        let raw = self
            .recognizer
            .recognize(&frame, &self.settings.language)
            .await?;

        let clean = normalize_whitespace(&raw);
        if !is_worth_reading(&clean, self.settings.min_chars) {
            debug!("Discarding short OCR result ({} chars)", clean.chars().count());
            return Ok(None);
        }

        let reading = Reading::from_text(clean);
        info!("Read {} chars", reading.text.chars().count());

        if self.settings.speak_readings {
            if let Err(e) = self.speaker.speak(&reading.text).await {
                warn!("Speech failed: {}", e);
            }
        }

        Ok(Some(reading))
    }

    /// Speak arbitrary text, replacing any current utterance.
    pub async fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        self.speaker.speak(text).await
    }

    pub async fn stop_speech(&mut self) {
        self.speaker.cancel().await;
    }
}
