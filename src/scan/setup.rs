// Wiring collaborators from configuration

use std::path::Path;

use crate::capture::{CommandCamera, FrameSource, StillImage};
use crate::config::Config;
use crate::ocr::TesseractCli;
use crate::speech::{CommandSpeaker, Muted, Speaker};

use super::pipeline::{ScanSettings, Scanner};

/// Build a scanner from configuration.
///
/// `image` replaces the camera with a still image. `speak` is ANDed with
/// `speech.enabled`.
pub fn build_scanner(config: &Config, image: Option<&Path>, speak: bool) -> Scanner {
    let camera: Box<dyn FrameSource> = match image {
        Some(path) => Box::new(StillImage::new(path)),
        None => Box::new(CommandCamera::new(config.camera.command.clone())),
    };

    let speak = speak && config.speech.enabled;
    let speaker: Box<dyn Speaker> = if speak {
        Box::new(CommandSpeaker::new(
            config.speech.command.clone(),
            config.speech.args.clone(),
            &config.speech.locale,
        ))
    } else {
        Box::new(Muted)
    };

    let settings = ScanSettings {
        language: config.ocr.language.clone(),
        min_chars: config.scan.min_chars,
        speak_readings: speak,
    };

    Scanner::new(
        camera,
        Box::new(TesseractCli::new(config.ocr.command.clone())),
        speaker,
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanError;
    use crate::capture::CaptureError;

    #[tokio::test]
    async fn test_still_image_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.ocr.command = "braillecam-no-such-ocr".to_string();

        // Missing image: the still source reports it, not the camera command
        let missing = dir.path().join("missing.png");
        let mut scanner = build_scanner(&config, Some(missing.as_path()), false);
        assert!(matches!(
            scanner.scan_once().await,
            Err(ScanError::Capture(CaptureError::Unavailable(_)))
        ));

        // Present image: capture succeeds and the configured OCR program is tried
        let present = dir.path().join("page.png");
        std::fs::write(&present, b"png").unwrap();
        let mut scanner = build_scanner(&config, Some(present.as_path()), false);
        assert!(matches!(
            scanner.scan_once().await,
            Err(ScanError::Recognition(_))
        ));
    }
}
