// Application state for the reading screen

use crate::scan::{Reading, ScanEvent};
use crate::ui::{OverlayMessage, OverlayStyle};

/// A one-line message under the panels
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub style: OverlayStyle,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, style: OverlayStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub struct AppState {
    /// Most recent successful reading
    pub reading: Option<Reading>,
    /// Status line under the panels
    pub status: Option<StatusLine>,
    /// Blocking message drawn over everything
    pub overlay: Option<OverlayMessage>,
    /// Whether periodic scanning is on
    pub auto_scan: bool,
    /// Whether a scan is in flight
    pub scanning: bool,
    /// Number of readings so far
    pub readings: u64,
    /// False once the scan thread has exited
    pub scanner_running: bool,
    /// Frame counter, drives the spinner
    pub tick: usize,
}

impl AppState {
    pub fn new(auto_scan: bool) -> Self {
        Self {
            reading: None,
            status: None,
            overlay: None,
            auto_scan,
            scanning: false,
            readings: 0,
            scanner_running: true,
            tick: 0,
        }
    }

    /// Recognized text, empty before the first reading
    pub fn text(&self) -> &str {
        self.reading.as_ref().map(|r| r.text.as_str()).unwrap_or("")
    }

    /// Braille for the current reading, empty before the first reading
    pub fn braille(&self) -> &str {
        self.reading.as_ref().map(|r| r.braille.as_str()).unwrap_or("")
    }

    pub fn set_status(&mut self, text: impl Into<String>, style: OverlayStyle) {
        self.status = Some(StatusLine::new(text, style));
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay = None;
    }

    /// Fold a scanner event into the state
    pub fn apply(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::ScanStarted => {
                self.scanning = true;
            }
            ScanEvent::Reading(reading) => {
                self.scanning = false;
                self.readings += 1;
                self.set_status(
                    format!("Read {} characters", reading.text.chars().count()),
                    OverlayStyle::Success,
                );
                self.reading = Some(reading);
            }
            ScanEvent::NothingLegible => {
                self.scanning = false;
                self.set_status("No text found", OverlayStyle::Info);
            }
            ScanEvent::CameraDenied(detail) => {
                self.scanning = false;
                self.set_status("Camera access denied", OverlayStyle::Error);
                self.overlay = Some(
                    OverlayMessage::error(vec![
                        "Could not access the camera.".to_string(),
                        "Please check permissions or device support.".to_string(),
                        String::new(),
                        detail,
                    ])
                    .with_title("Camera"),
                );
            }
            ScanEvent::CaptureFailed(message) => {
                self.scanning = false;
                self.set_status(message, OverlayStyle::Warning);
            }
            ScanEvent::RecognitionFailed(message) => {
                self.scanning = false;
                self.set_status(message, OverlayStyle::Warning);
            }
            ScanEvent::SpeechFailed(message) => {
                self.set_status(message, OverlayStyle::Warning);
            }
            ScanEvent::AutoScanChanged(enabled) => {
                self.auto_scan = enabled;
            }
            ScanEvent::Stopped => {
                self.scanning = false;
                self.scanner_running = false;
                self.overlay = Some(
                    OverlayMessage::error(vec![
                        "The scanner has stopped.".to_string(),
                        "Restart braillecam to keep reading.".to_string(),
                    ])
                    .with_title("Scanner"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_updates_panels() {
        let mut state = AppState::new(true);
        assert_eq!(state.text(), "");
        assert_eq!(state.braille(), "");

        state.apply(ScanEvent::ScanStarted);
        assert!(state.scanning);

        state.apply(ScanEvent::Reading(Reading::from_text("Hi there".to_string())));
        assert!(!state.scanning);
        assert_eq!(state.readings, 1);
        assert_eq!(state.text(), "Hi there");
        assert_eq!(state.braille(), "⠓⠊ ⠞⠓⠑⠗⠑");
        assert_eq!(state.status.as_ref().unwrap().style, OverlayStyle::Success);
    }

    #[test]
    fn test_nothing_legible_keeps_last_reading() {
        let mut state = AppState::new(true);
        state.apply(ScanEvent::Reading(Reading::from_text("EXIT".to_string())));
        state.apply(ScanEvent::ScanStarted);
        state.apply(ScanEvent::NothingLegible);

        assert_eq!(state.text(), "EXIT");
        assert_eq!(state.status.as_ref().unwrap().text, "No text found");
    }

    #[test]
    fn test_camera_denied_shows_overlay() {
        let mut state = AppState::new(true);
        state.apply(ScanEvent::ScanStarted);
        state.apply(ScanEvent::CameraDenied("camera access denied: nope".to_string()));
        state.apply(ScanEvent::AutoScanChanged(false));

        assert!(!state.scanning);
        assert!(!state.auto_scan);
        let overlay = state.overlay.as_ref().unwrap();
        assert_eq!(overlay.style, OverlayStyle::Error);
        assert_eq!(overlay.lines[0], "Could not access the camera.");

        state.dismiss_overlay();
        assert!(state.overlay.is_none());
    }

    #[test]
    fn test_failures_go_to_status_line() {
        let mut state = AppState::new(false);
        state.apply(ScanEvent::RecognitionFailed("recognition failed: blur".to_string()));
        assert_eq!(
            state.status,
            Some(StatusLine::new("recognition failed: blur", OverlayStyle::Warning))
        );
        assert!(state.overlay.is_none());
    }

    #[test]
    fn test_stopped() {
        let mut state = AppState::new(true);
        state.apply(ScanEvent::Stopped);
        assert!(!state.scanner_running);
        assert!(state.overlay.is_some());
    }
}
