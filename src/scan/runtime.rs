// Scan runtime - runs the reading pipeline in a background thread
// Bridges async child-process work with the sync UI loop via channels

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::client::{ScanClient, ScanCommand, ScanEvent};
use super::pipeline::{ScanError, Scanner};

/// Start the scanner thread and return a handle for the UI loop.
///
/// The first automatic scan happens one `interval` after start.
pub fn start_scanner(
    scanner: Scanner,
    interval: Duration,
    auto_scan: bool,
) -> io::Result<ScanClient> {
    let (event_tx, event_rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = unbounded_channel();

    let thread = spawn_scan_thread(scanner, interval, auto_scan, event_tx, cmd_rx)?;

    Ok(ScanClient::new(cmd_tx, event_rx, thread))
}

fn spawn_scan_thread(
    scanner: Scanner,
    interval: Duration,
    auto_scan: bool,
    event_tx: mpsc::Sender<ScanEvent>,
    cmd_rx: UnboundedReceiver<ScanCommand>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("scanner".to_string())
        .spawn(move || {
            match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => {
                    rt.block_on(run_scanner(scanner, interval, auto_scan, &event_tx, cmd_rx));
                }
                Err(e) => error!("Failed to create tokio runtime: {}", e),
            }
            let _ = event_tx.send(ScanEvent::Stopped);
        })
}

/// Main scan loop. Returns on `Shutdown` or when every command sender is gone.
///
/// Scans run inline, so timer ticks that fall due during a slow OCR pass are
/// dropped rather than queued.
pub async fn run_scanner(
    mut scanner: Scanner,
    interval: Duration,
    mut auto_scan: bool,
    events: &mpsc::Sender<ScanEvent>,
    mut commands: UnboundedReceiver<ScanCommand>,
) {
    info!("Scanner started (interval {:?}, auto {})", interval, auto_scan);

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick(), if auto_scan => {
                debug!("Timed scan");
                auto_scan = scan(&mut scanner, events).await;
            }
            command = commands.recv() => match command {
                Some(ScanCommand::ScanNow) => {
                    debug!("Manual scan");
                    let camera_ok = scan(&mut scanner, events).await;
                    auto_scan &= camera_ok;
                    ticker.reset();
                }
                Some(ScanCommand::SetAutoScan(enabled)) => {
                    auto_scan = enabled;
                    if enabled {
                        ticker.reset();
                    }
                    let _ = events.send(ScanEvent::AutoScanChanged(enabled));
                }
                Some(ScanCommand::Speak(text)) => {
                    if let Err(e) = scanner.speak(&text).await {
                        warn!("Speech failed: {}", e);
                        let _ = events.send(ScanEvent::SpeechFailed(e.to_string()));
                    }
                }
                Some(ScanCommand::StopSpeech) => scanner.stop_speech().await,
                Some(ScanCommand::Shutdown) | None => break,
            }
        }
    }

    scanner.stop_speech().await;
    info!("Scanner stopped");
}

/// Run one scan and report it. Returns false when the camera refused access,
/// which pauses periodic scanning.
async fn scan(scanner: &mut Scanner, events: &mpsc::Sender<ScanEvent>) -> bool {
    let _ = events.send(ScanEvent::ScanStarted);

    let event = match scanner.scan_once().await {
        Ok(Some(reading)) => ScanEvent::Reading(reading),
        Ok(None) => ScanEvent::NothingLegible,
        Err(e) if e.is_permission_denied() => {
            error!("Camera access denied: {}", e);
            let _ = events.send(ScanEvent::CameraDenied(e.to_string()));
            let _ = events.send(ScanEvent::AutoScanChanged(false));
            return false;
        }
        Err(ScanError::Capture(e)) => {
            warn!("Capture failed: {}", e);
            ScanEvent::CaptureFailed(e.to_string())
        }
        Err(ScanError::Recognition(e)) => {
            warn!("Recognition failed: {}", e);
            ScanEvent::RecognitionFailed(e.to_string())
        }
    };

    let _ = events.send(event);
    true
}
