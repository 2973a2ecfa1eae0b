//! braillecam: reads text from camera frames, shows it in Braille and speaks it.
//!
//! The transliteration core lives in [`braille`]; everything else wires
//! external capture, OCR and speech programs into a terminal UI.

pub mod app;
pub mod braille;
pub mod capture;
pub mod cli;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod debug;
pub mod ocr;
pub mod scan;
pub mod speech;
pub mod text;
pub mod ui;

pub use braille::transliterate;
