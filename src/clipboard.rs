// System clipboard access

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("nothing to copy yet")]
    Empty,

    #[error("clipboard unavailable: {0}")]
    Unavailable(arboard::Error),

    #[error("copy failed: {0}")]
    Rejected(arboard::Error),
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    if text.is_empty() {
        return Err(ClipboardError::Empty);
    }

    let mut clipboard = arboard::Clipboard::new().map_err(|e| {
        warn!("Clipboard error: {}", e);
        ClipboardError::Unavailable(e)
    })?;

    clipboard.set_text(text).map_err(|e| {
        warn!("Failed to copy: {}", e);
        ClipboardError::Rejected(e)
    })?;

    debug!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}

/// User-facing feedback line for a copy attempt.
pub fn copy_feedback(what: &str, result: &Result<(), ClipboardError>) -> String {
    match result {
        Ok(()) => format!("Copied {} to clipboard!", what),
        Err(e) => format!("Could not copy {}: {}", what, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(copy_to_clipboard(""), Err(ClipboardError::Empty)));
    }

    #[test]
    fn test_feedback() {
        assert_eq!(copy_feedback("Braille", &Ok(())), "Copied Braille to clipboard!");
        assert_eq!(
            copy_feedback("text", &Err(ClipboardError::Empty)),
            "Could not copy text: nothing to copy yet"
        );
    }
}
