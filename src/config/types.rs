// braillecam configuration types
// Every section has defaults, so a partial file only overrides what it names

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    // Time between automatic scans in milliseconds
    pub interval_ms: u64,

    // Start scanning automatically (otherwise only on key press)
    pub auto_scan: bool,

    // Readings shorter than this many characters are ignored
    pub min_chars: usize,
}

impl ScanConfig {
    pub fn interval(&self) -> Duration {
        // Zero would make the ticker spin
        Duration::from_millis(self.interval_ms.max(100))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            auto_scan: true,
            min_chars: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    // Capture program and arguments; "{output}" is replaced by the frame path
    pub command: Vec<String>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: [
                "ffmpeg",
                "-loglevel",
                "error",
                "-y",
                "-f",
                "v4l2",
                "-i",
                "/dev/video0",
                "-frames:v",
                "1",
                "{output}",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OcrConfig {
    // Tesseract executable
    pub command: String,

    // Tesseract language code
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechConfig {
    // Speak every new reading
    pub enabled: bool,

    // Synthesizer executable
    pub command: String,

    // Arguments; "{voice}" and "{text}" are substituted
    pub args: Vec<String>,

    // Locale tag used to pick the voice
    pub locale: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "espeak-ng".to_string(),
            // "--" keeps readings like "-v foo" from being parsed as options
            args: vec![
                "-v".to_string(),
                "{voice}".to_string(),
                "--".to_string(),
                "{text}".to_string(),
            ],
            locale: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    pub scan_now: String,
    pub toggle_auto_scan: String,
    pub copy_braille: String,
    pub copy_text: String,
    pub speak_again: String,
    pub stop_speech: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            scan_now: "S".to_string(),
            toggle_auto_scan: "A".to_string(),
            copy_braille: "C".to_string(),
            copy_text: "T".to_string(),
            speak_again: "R".to_string(),
            stop_speech: "X".to_string(),
            quit: "Q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // UI refresh rate
    pub target_fps: u64,

    // Recognized text color (RGB values 0-255)
    pub text_color: [u8; 3],

    // Braille panel color
    pub braille_color: [u8; 3],

    // Borders and titles
    pub accent_color: [u8; 3],
}

impl DisplayConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.target_fps.clamp(1, 120))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            text_color: [255, 255, 255],    // White
            braille_color: [255, 215, 0],   // Gold
            accent_color: [0, 200, 200],    // Cyan
        }
    }
}
