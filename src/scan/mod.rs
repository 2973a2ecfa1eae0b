// Scan module for braillecam
// Periodic and on-demand reading of camera frames on a background thread

pub mod client;
pub mod pipeline;
pub mod runtime;
pub mod setup;

pub use client::{ScanClient, ScanCommand, ScanEvent};
pub use pipeline::{Reading, ScanError, ScanSettings, Scanner};
pub use runtime::{run_scanner, start_scanner};
pub use setup::build_scanner;
