use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Read, Write};
use tracing::info;

use braillecam::cli::{parse_args, print_usage, Mode, Options};
use braillecam::config::{self, Config};
use braillecam::scan::{self, Reading};
use braillecam::{app, debug, transliterate};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("braillecam");

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(program);
            std::process::exit(1);
        }
    };

    debug::init(options.debug).context("failed to set up debug log")?;
    info!("Starting with {:?}", options);

    match options.mode {
        Mode::Help => {
            print_usage(program);
            Ok(())
        }
        Mode::Translate(ref text) => run_translate(text, options.json),
        Mode::Once => run_once(&load_config(&options)?, &options),
        Mode::Interactive => run_interactive(&load_config(&options)?, &options),
    }
}

fn load_config(options: &Options) -> Result<Config> {
    match options.config {
        Some(ref path) => config::load_config_from(path)
            .with_context(|| format!("failed to read config {}", path.display())),
        None => config::load_config().context("failed to load config"),
    }
}

/// Print the Braille for text given on the command line, or stdin with "-"
fn run_translate(text: &str, json: bool) -> Result<()> {
    let input = if text == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        text.to_string()
    };

    let braille = transliterate(&input);
    if json {
        print_json(&Reading {
            text: input,
            braille,
        })?;
    } else {
        // Newlines pass through, so stdin output keeps its own line breaks
        let mut stdout = io::stdout().lock();
        stdout.write_all(braille.as_bytes())?;
        if !braille.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Scan a single frame and print what was read
fn run_once(config: &Config, options: &Options) -> Result<()> {
    // No speech: the process exits before an utterance could finish
    let mut scanner = scan::build_scanner(config, options.image.as_deref(), false);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let reading = rt.block_on(scanner.scan_once())?;

    match reading {
        Some(reading) if options.json => print_json(&reading),
        Some(reading) => {
            println!("{}", reading.text);
            println!("{}", reading.braille);
            Ok(())
        }
        None if options.json => {
            println!("null");
            Ok(())
        }
        None => bail!("no legible text found"),
    }
}

fn print_json(reading: &Reading) -> Result<()> {
    let out = serde_json::json!({
        "text": reading.text,
        "braille": reading.braille,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_interactive(config: &Config, options: &Options) -> Result<()> {
    let scanner = scan::build_scanner(config, options.image.as_deref(), true);
    let mut client = scan::start_scanner(scanner, config.scan.interval(), config.scan.auto_scan)
        .context("failed to start scanner thread")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run_app(&mut terminal, config, &client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Waits for the scanner to silence any speech before the process exits
    client.shutdown();
    result
}
