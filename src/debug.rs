// Debug logging for braillecam
// File-based tracing output, enabled with --debug. Nothing is written to the
// terminal, which belongs to the TUI.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use tracing::Level;

/// Where debug output goes
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("braillecam-debug.log")
}

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: Returns immediately, no file created and no subscriber
///   installed (tracing macros become no-ops)
/// - If enabled=true: Creates/truncates the log file, writes a header and
///   installs a global `tracing` subscriber writing to it
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let path = log_file_path();
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    writeln!(file, "=== braillecam Debug Log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", path.display())?;
    writeln!(file, "========================================\n")?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_creates_nothing() {
        init(false).unwrap();
    }

    #[test]
    fn test_log_file_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        drop(open_log_file(&path).unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("=== braillecam Debug Log ==="));
        assert!(contents.contains("tail -f"));
    }
}
