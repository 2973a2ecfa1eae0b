// Command line arguments

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Full-screen reader (default)
    #[default]
    Interactive,
    /// Scan a single frame and print the result
    Once,
    /// Transliterate text ("-" reads stdin)
    Translate(String),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    pub mode: Mode,
    pub debug: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => options.mode = Mode::Help,
            "--debug" | "-d" => options.debug = true,
            "--json" => options.json = true,
            "--once" | "-1" => options.mode = Mode::Once,
            "--config" | "-c" => {
                let path = iter.next().ok_or("--config requires a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--image" | "-i" => {
                let path = iter.next().ok_or("--image requires a path")?;
                options.image = Some(PathBuf::from(path));
            }
            "--translate" | "-t" => {
                let text = iter.next().ok_or("--translate requires text or '-'")?;
                options.mode = Mode::Translate(text.clone());
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    if options.json && options.mode == Mode::Interactive {
        return Err("--json only applies to --once and --translate".to_string());
    }

    Ok(options)
}

pub fn print_usage(program: &str) {
    println!("braillecam - read text from a camera aloud and in Braille");
    println!();
    println!("Usage:");
    println!("  {}                         # Scan the camera continuously", program);
    println!("  {} --image <path>          # Read a still image instead of the camera", program);
    println!("  {} --once [--json]         # Scan one frame and print the result", program);
    println!("  {} --translate <text|->    # Print text (or stdin) in Braille", program);
    println!();
    println!("Options:");
    println!("  -c, --config <path>   Use this config file instead of the default");
    println!("  -d, --debug           Write a debug log to {}", crate::debug::log_file_path().display());
    println!("  -h, --help            Show this help");
    println!();
    println!("Needs tesseract for OCR and espeak-ng for speech (see the config file).");
}
