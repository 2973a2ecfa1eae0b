// Text-to-speech output
// One utterance at a time: starting a new one silences the previous.

use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::command::expand_args;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine '{0}' not found")]
    EngineMissing(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[async_trait]
pub trait Speaker: Send {
    /// Start speaking `text`, cancelling any utterance still in progress.
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Stop the current utterance, if any.
    async fn cancel(&mut self);
}

/// Speaks through an external synthesizer such as `espeak-ng`.
///
/// The argument template may use `{voice}` (derived from the locale tag) and
/// `{text}`.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    voice: String,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>, locale: &str) -> Self {
        Self {
            program: program.into(),
            args,
            voice: voice_for_locale(locale),
            current: None,
        }
    }

    /// Whether an utterance is still playing.
    pub fn is_speaking(&mut self) -> bool {
        match self.current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        self.cancel().await;

        let args = expand_args(&self.args, &[("voice", self.voice.as_str()), ("text", text)]);
        debug!("Speaking {} chars with {}", text.chars().count(), self.program);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SpeechError::EngineMissing(self.program.clone()),
                _ => SpeechError::Io(e),
            })?;

        self.current = Some(child);
        Ok(())
    }

    async fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // Already-finished children just report an error here
            let _ = child.kill().await;
        }
    }
}

/// Speaker used when speech is disabled.
#[derive(Debug, Default)]
pub struct Muted;

#[async_trait]
impl Speaker for Muted {
    async fn speak(&mut self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn cancel(&mut self) {}
}

/// Map a BCP 47 locale tag to an espeak-style voice name (`en-US` -> `en-us`).
pub fn voice_for_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_for_locale() {
        assert_eq!(voice_for_locale("en-US"), "en-us");
        assert_eq!(voice_for_locale("pt_BR"), "pt-br");
        assert_eq!(voice_for_locale(" fr "), "fr");
    }

    #[tokio::test]
    async fn test_missing_engine() {
        let mut speaker = CommandSpeaker::new("braillecam-no-such-tts", vec!["{text}".into()], "en-US");
        assert!(matches!(
            speaker.speak("hello").await,
            Err(SpeechError::EngineMissing(_))
        ));
        assert!(!speaker.is_speaking());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_new_utterance_replaces_old() {
        // `sleep` stands in for a long utterance
        let mut speaker = CommandSpeaker::new("sleep", vec!["30".into()], "en-US");
        speaker.speak("first").await.unwrap();
        assert!(speaker.is_speaking());

        speaker.speak("second").await.unwrap();
        assert!(speaker.is_speaking());

        speaker.cancel().await;
        assert!(!speaker.is_speaking());
    }

    #[tokio::test]
    async fn test_muted() {
        let mut speaker = Muted;
        speaker.speak("anything").await.unwrap();
        speaker.cancel().await;
    }
}
