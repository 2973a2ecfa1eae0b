// Camera capture
// Frames are image files on disk so any OCR engine can read them.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::command::{expand_args, first_line};

/// A captured image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The OS or the capture program refused access to the camera
    #[error("camera access denied: {0}")]
    PermissionDenied(String),

    /// No usable camera, capture program or image
    #[error("camera unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Supplies frames on demand.
#[async_trait]
pub trait FrameSource: Send {
    async fn capture(&mut self) -> Result<Frame, CaptureError>;
}

/// Grabs frames by running an external capture program.
///
/// The argument template must contain `{output}`, which is replaced by the
/// path the program should write the image to.
pub struct CommandCamera {
    command: Vec<String>,
    output: PathBuf,
}

impl CommandCamera {
    pub fn new(command: Vec<String>) -> Self {
        let output =
            std::env::temp_dir().join(format!("braillecam-frame-{}.png", std::process::id()));
        Self::with_output(command, output)
    }

    pub fn with_output(command: Vec<String>, output: PathBuf) -> Self {
        Self { command, output }
    }
}

#[async_trait]
impl FrameSource for CommandCamera {
    async fn capture(&mut self) -> Result<Frame, CaptureError> {
        let output = self.output.to_string_lossy().into_owned();
        let args = expand_args(&self.command, &[("output", output.as_str())]);
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| CaptureError::Unavailable("no capture command configured".into()))?;

        // A stale frame must not be mistaken for a fresh one
        match tokio::fs::remove_file(&self.output).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        debug!("Capturing frame: {} {:?}", program, rest);
        let result = Command::new(program).args(rest).output().await;
        let out = match result {
            Ok(out) => out,
            Err(e) => return Err(spawn_error(program, e)),
        };

        if !out.status.success() {
            let message = first_line(&out.stderr);
            return Err(classify_failure(message));
        }

        if !tokio::fs::try_exists(&self.output).await? {
            return Err(CaptureError::Unavailable(format!(
                "{} exited without writing {}",
                program, output
            )));
        }

        Ok(Frame {
            path: self.output.clone(),
        })
    }
}

/// Uses a single image file as every frame.
pub struct StillImage {
    path: PathBuf,
}

impl StillImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FrameSource for StillImage {
    async fn capture(&mut self) -> Result<Frame, CaptureError> {
        check_readable(&self.path).await?;
        Ok(Frame {
            path: self.path.clone(),
        })
    }
}

async fn check_readable(path: &Path) -> Result<(), CaptureError> {
    match tokio::fs::File::open(path).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(
            CaptureError::PermissionDenied(format!("cannot read {}", path.display())),
        ),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CaptureError::Unavailable(
            format!("{} does not exist", path.display()),
        )),
        Err(e) => Err(e.into()),
    }
}

fn spawn_error(program: &str, e: io::Error) -> CaptureError {
    match e.kind() {
        io::ErrorKind::NotFound => {
            CaptureError::Unavailable(format!("capture program '{}' not found", program))
        }
        io::ErrorKind::PermissionDenied => {
            CaptureError::PermissionDenied(format!("not allowed to run '{}'", program))
        }
        _ => CaptureError::Io(e),
    }
}

fn classify_failure(message: String) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("permission denied") || lower.contains("not authorized") {
        CaptureError::PermissionDenied(message)
    } else {
        CaptureError::Unavailable(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            classify_failure("/dev/video0: Permission denied".into()),
            CaptureError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_failure("Camera not authorized for this app".into()),
            CaptureError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_failure("/dev/video0: No such file or directory".into()),
            CaptureError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_still_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let mut source = StillImage::new(&path);
        let frame = source.capture().await.unwrap();
        assert_eq!(frame.path, path);
    }

    #[tokio::test]
    async fn test_still_image_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = StillImage::new(dir.path().join("gone.png"));
        assert!(matches!(
            source.capture().await,
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_capture_program() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = CommandCamera::with_output(
            vec!["braillecam-no-such-program".into(), "{output}".into()],
            dir.path().join("frame.png"),
        );
        assert!(matches!(
            camera.capture().await,
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_command() {
        let mut camera = CommandCamera::new(Vec::new());
        assert!(matches!(
            camera.capture().await,
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_program_that_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = CommandCamera::with_output(
            vec!["true".into(), "{output}".into()],
            dir.path().join("frame.png"),
        );
        assert!(matches!(
            camera.capture().await,
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_program_that_writes_frame() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.png");
        let mut camera =
            CommandCamera::with_output(vec!["touch".into(), "{output}".into()], output.clone());
        let frame = camera.capture().await.unwrap();
        assert_eq!(frame.path, output);
    }
}
