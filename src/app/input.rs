// Keyboard handling for the reading screen

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;
use tracing::warn;

use crate::config::KeyBindings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    ScanNow,
    ToggleAutoScan,
    CopyBraille,
    CopyText,
    SpeakAgain,
    StopSpeech,
    DismissOverlay,
}

/// Parse a key binding such as "Q", "Up" or "Esc".
/// Letters are case-insensitive.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match name.to_ascii_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        _ => None,
    }
}

/// Resolved key bindings
pub struct KeyMap {
    bindings: Vec<(KeyCode, AppAction)>,
}

impl KeyMap {
    pub fn from_bindings(keys: &KeyBindings) -> Self {
        let wanted = [
            (&keys.scan_now, AppAction::ScanNow),
            (&keys.toggle_auto_scan, AppAction::ToggleAutoScan),
            (&keys.copy_braille, AppAction::CopyBraille),
            (&keys.copy_text, AppAction::CopyText),
            (&keys.speak_again, AppAction::SpeakAgain),
            (&keys.stop_speech, AppAction::StopSpeech),
            (&keys.quit, AppAction::Quit),
        ];

        let mut bindings = Vec::new();
        for (name, action) in wanted {
            match parse_key(name) {
                Some(code) => bindings.push((code, action)),
                None => warn!("Ignoring unknown key binding {:?} for {:?}", name, action),
            }
        }

        Self { bindings }
    }

    /// Action for a key press, if any
    pub fn action_for(&self, key: KeyEvent) -> Option<AppAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppAction::Quit);
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };

        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, action)| *action)
            .or(match code {
                KeyCode::Esc => Some(AppAction::DismissOverlay),
                _ => None,
            })
    }

    /// Key label for the controls hint
    pub fn label(&self, action: AppAction) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == action)
            .map(|(code, _)| match code {
                KeyCode::Char(' ') => "Space".to_string(),
                KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
                KeyCode::Up => "↑".to_string(),
                KeyCode::Down => "↓".to_string(),
                KeyCode::Left => "←".to_string(),
                KeyCode::Right => "→".to_string(),
                other => format!("{:?}", other),
            })
    }
}

/// Poll for input events and return actions (non-blocking).
pub fn poll_input(keymap: &KeyMap) -> Result<Vec<AppAction>, io::Error> {
    let mut actions = Vec::new();

    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(action) = keymap.action_for(key) {
                    actions.push(action);
                }
            }
        }
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("s"), Some(KeyCode::Char('s')));
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("ESC"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_default_bindings() {
        let keymap = KeyMap::from_bindings(&KeyBindings::default());
        assert_eq!(keymap.action_for(press(KeyCode::Char('s'))), Some(AppAction::ScanNow));
        assert_eq!(keymap.action_for(press(KeyCode::Char('S'))), Some(AppAction::ScanNow));
        assert_eq!(keymap.action_for(press(KeyCode::Char('c'))), Some(AppAction::CopyBraille));
        assert_eq!(keymap.action_for(press(KeyCode::Char('q'))), Some(AppAction::Quit));
        assert_eq!(keymap.action_for(press(KeyCode::Esc)), Some(AppAction::DismissOverlay));
        assert_eq!(keymap.action_for(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keymap = KeyMap::from_bindings(&KeyBindings::default());
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keymap.action_for(key), Some(AppAction::Quit));
    }

    #[test]
    fn test_custom_binding_and_label() {
        let keys = KeyBindings {
            scan_now: "Space".to_string(),
            quit: "Esc".to_string(),
            copy_text: "nonsense".to_string(),
            ..KeyBindings::default()
        };
        let keymap = KeyMap::from_bindings(&keys);

        assert_eq!(keymap.action_for(press(KeyCode::Char(' '))), Some(AppAction::ScanNow));
        // An explicit binding wins over the built-in Esc
        assert_eq!(keymap.action_for(press(KeyCode::Esc)), Some(AppAction::Quit));
        assert_eq!(keymap.label(AppAction::ScanNow), Some("Space".to_string()));
        assert_eq!(keymap.label(AppAction::CopyBraille), Some("C".to_string()));
        assert_eq!(keymap.label(AppAction::CopyText), None);
    }
}
