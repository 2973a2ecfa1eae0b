use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::clipboard::{copy_feedback, copy_to_clipboard, ClipboardError};
use crate::config::Config;
use crate::scan::{ScanClient, ScanCommand};
use crate::ui::{self, OverlayStyle};

use super::input::{poll_input, AppAction, KeyMap};
use super::state::AppState;

/// Run the reading screen until the user quits
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    client: &ScanClient,
) -> Result<()> {
    info!("UI loop started");

    let keymap = KeyMap::from_bindings(&config.keybindings);
    let mut state = AppState::new(config.scan.auto_scan);
    let frame_duration = config.display.frame_duration();

    loop {
        let now = Instant::now();

        for action in poll_input(&keymap)? {
            if action == AppAction::Quit {
                info!("Quit requested");
                return Ok(());
            }
            handle_action(&mut state, action, client);
        }

        while let Some(event) = client.try_recv_event() {
            debug!("Scan event: {:?}", event);
            state.apply(event);
        }

        state.tick = state.tick.wrapping_add(1);
        terminal.draw(|f| ui::render(f, &state, &config.display, &keymap))?;

        limit_frame_rate(now, frame_duration);
    }
}

fn handle_action(state: &mut AppState, action: AppAction, client: &ScanClient) {
    match action {
        AppAction::Quit => {}
        AppAction::ScanNow => {
            if !state.scanning {
                client.send(ScanCommand::ScanNow);
            }
        }
        AppAction::ToggleAutoScan => {
            let enabled = !state.auto_scan;
            if enabled {
                state.dismiss_overlay();
            }
            client.send(ScanCommand::SetAutoScan(enabled));
        }
        AppAction::CopyBraille => {
            let result = copy_to_clipboard(state.braille());
            report_copy(state, "Braille", result);
        }
        AppAction::CopyText => {
            let result = copy_to_clipboard(state.text());
            report_copy(state, "text", result);
        }
        AppAction::SpeakAgain => match state.reading.as_ref().map(|r| r.text.clone()) {
            Some(text) => {
                client.send(ScanCommand::Speak(text));
            }
            None => state.set_status("Nothing to repeat yet", OverlayStyle::Info),
        },
        AppAction::StopSpeech => {
            client.send(ScanCommand::StopSpeech);
        }
        AppAction::DismissOverlay => state.dismiss_overlay(),
    }
}

fn report_copy(state: &mut AppState, what: &str, result: Result<(), ClipboardError>) {
    let style = if result.is_ok() {
        OverlayStyle::Success
    } else {
        OverlayStyle::Warning
    };
    state.set_status(copy_feedback(what, &result), style);
}

/// Sleep for whatever is left of the frame
fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}
