use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppAction, AppState, KeyMap};
use crate::config::DisplayConfig;

use super::overlay::render_overlay;

// Braille spinner frames
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(color[0], color[1], color[2])
}

// Layout: header row, text panel, Braille panel, status row, controls row
pub fn render(frame: &mut Frame, state: &AppState, display: &DisplayConfig, keymap: &KeyMap) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Header
            Constraint::Percentage(50), // Recognized text
            Constraint::Min(3),         // Braille
            Constraint::Length(1),      // Status
            Constraint::Length(1),      // Controls hint
        ])
        .split(area);

    draw_header(frame, state, display, chunks[0]);
    draw_panel(
        frame,
        " Text ",
        state.text(),
        rgb(display.text_color),
        rgb(display.accent_color),
        chunks[1],
    );
    draw_panel(
        frame,
        " Braille ",
        state.braille(),
        rgb(display.braille_color),
        rgb(display.accent_color),
        chunks[2],
    );
    draw_status(frame, state, chunks[3]);
    draw_controls(frame, keymap, chunks[4]);

    if let Some(ref overlay) = state.overlay {
        render_overlay(frame, overlay, area);
    }
}

fn draw_header(frame: &mut Frame, state: &AppState, display: &DisplayConfig, area: Rect) {
    let activity = if state.scanning {
        format!("{} scanning", SPINNER[state.tick % SPINNER.len()])
    } else if state.auto_scan {
        "auto-scan on".to_string()
    } else {
        "auto-scan paused".to_string()
    };

    let line = Line::from(vec![
        Span::styled(
            " braillecam ",
            Style::default()
                .fg(rgb(display.accent_color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}  |  readings: {}", activity, state.readings),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_panel(frame: &mut Frame, title: &str, body: &str, fg: Color, accent: Color, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title);

    let paragraph = Paragraph::new(body.to_string())
        .style(Style::default().fg(fg))
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(ref status) = state.status else {
        return;
    };

    let paragraph =
        Paragraph::new(status.text.as_str()).style(Style::default().fg(status.style.text_color()));

    frame.render_widget(paragraph, area);
}

fn draw_controls(frame: &mut Frame, keymap: &KeyMap, area: Rect) {
    let hints = [
        (AppAction::ScanNow, "Scan"),
        (AppAction::ToggleAutoScan, "Auto"),
        (AppAction::CopyBraille, "Copy Braille"),
        (AppAction::CopyText, "Copy Text"),
        (AppAction::SpeakAgain, "Repeat"),
        (AppAction::StopSpeech, "Stop"),
        (AppAction::Quit, "Quit"),
    ];

    let text = hints
        .iter()
        .filter_map(|(action, label)| keymap.label(*action).map(|key| format!("{}: {}", key, label)))
        .collect::<Vec<_>>()
        .join("  ");

    let controls = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(controls, area);
}
