// Scanner client interface for the UI loop
// Provides channels to communicate with the background scan thread

use std::sync::mpsc;
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use super::pipeline::Reading;

/// Commands the UI loop sends to the scan thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCommand {
    /// Scan immediately, regardless of the timer
    ScanNow,

    /// Enable or disable periodic scanning
    SetAutoScan(bool),

    /// Speak the given text (replaces any current utterance)
    Speak(String),

    /// Silence the current utterance
    StopSpeech,

    /// Stop the scan thread
    Shutdown,
}

/// Events the scan thread sends to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A scan has begun
    ScanStarted,

    /// A scan produced a new reading
    Reading(Reading),

    /// A scan finished but found no usable text
    NothingLegible,

    /// The camera refused access; auto-scan has been paused
    CameraDenied(String),

    /// The frame could not be captured for another reason
    CaptureFailed(String),

    /// OCR failed on the captured frame
    RecognitionFailed(String),

    /// The speech engine could not be started
    SpeechFailed(String),

    /// Periodic scanning was switched on or off
    AutoScanChanged(bool),

    /// The scan thread has exited
    Stopped,
}

/// Handle for the UI loop to talk to the scanner
pub struct ScanClient {
    /// Send commands TO the scan thread
    tx: UnboundedSender<ScanCommand>,

    /// Receive events FROM the scan thread
    rx: mpsc::Receiver<ScanEvent>,

    /// Scan thread, joined on shutdown
    thread: Option<JoinHandle<()>>,
}

impl ScanClient {
    pub fn new(
        tx: UnboundedSender<ScanCommand>,
        rx: mpsc::Receiver<ScanEvent>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            tx,
            rx,
            thread: Some(thread),
        }
    }

    /// Queue a command. Returns false if the scan thread is gone.
    pub fn send(&self, command: ScanCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    /// Try to receive a scan event (non-blocking)
    pub fn try_recv_event(&self) -> Option<ScanEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event (blocking); None once the thread has exited
    pub fn recv_event(&self) -> Option<ScanEvent> {
        self.rx.recv().ok()
    }

    /// Stop the scan thread and wait for it to exit.
    ///
    /// Any running scan finishes first, and speech is silenced before this
    /// returns, so no speech process outlives the client.
    pub fn shutdown(&mut self) {
        let _ = self.tx.send(ScanCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Scanner thread panicked");
            }
        }
    }
}

impl Drop for ScanClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}
