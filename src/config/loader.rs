// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("braillecam");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from the default location, creating it if missing
pub fn load_config() -> Result<Config, io::Error> {
    // stdout may carry JSON output, so the notice goes to stderr
    load_or_create(&get_config_path(), &mut io::stderr())
}

fn load_or_create(path: &Path, notice: &mut dyn Write) -> Result<Config, io::Error> {
    if path.exists() {
        load_config_from(path)
    } else {
        create_default_config(path, notice)?;
        Ok(Config::default())
    }
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<Config, io::Error> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_or_default(&contents, path))
}

fn parse_or_default(contents: &str, path: &Path) -> Config {
    match toml::from_str(contents) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            eprintln!("Warning: Failed to parse config file: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments, and tell the
/// user where it went through `notice`
pub fn create_default_config(path: &Path, notice: &mut dyn Write) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).map_err(io::Error::other)?;

    let commented_toml = format!(
        "# braillecam configuration file\n\
         # Restart braillecam after editing for changes to take effect\n\
         #\n\
         # camera.command: capture program and arguments, \"{{output}}\" is the frame path\n\
         # speech.args:    \"{{voice}}\" comes from speech.locale, \"{{text}}\" is the reading\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"S\", \"C\", \"Q\", etc.\n\
         #\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    info!("Created default config at {}", path.display());
    writeln!(notice, "Created default config file at: {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.scan.interval_ms, config.scan.interval_ms);
        assert_eq!(parsed.camera.command, config.camera.command);
        assert_eq!(parsed.ocr.language, config.ocr.language);
        assert_eq!(parsed.speech.args, config.speech.args);
        assert_eq!(parsed.keybindings.quit, config.keybindings.quit);
        assert_eq!(parsed.display.braille_color, config.display.braille_color);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let partial_toml = r#"
            [scan]
            interval_ms = 2000

            [speech]
            locale = "fr-FR"
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom values
        assert_eq!(config.scan.interval_ms, 2000);
        assert_eq!(config.speech.locale, "fr-FR");

        // Defaults within the same sections
        assert_eq!(config.scan.min_chars, 2);
        assert!(config.speech.enabled);

        // Untouched sections
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.keybindings.scan_now, "S");
    }

    #[test]
    fn test_created_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut notice = Vec::new();
        create_default_config(&path, &mut notice).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# braillecam configuration file"));

        let notice = String::from_utf8(notice).unwrap();
        assert_eq!(
            notice,
            format!("Created default config file at: {}\n", path.display())
        );

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.scan.interval_ms, 5000);
    }

    #[test]
    fn test_first_run_notice_goes_to_given_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut notice = Vec::new();
        let config = load_or_create(&path, &mut notice).unwrap();
        assert_eq!(config.scan.interval_ms, 5000);
        assert!(path.exists());
        assert!(String::from_utf8(notice).unwrap().starts_with("Created default config"));

        // Second run reads the file and says nothing
        let mut notice = Vec::new();
        load_or_create(&path, &mut notice).unwrap();
        assert!(notice.is_empty());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scan\ninterval_ms = ").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.scan.interval_ms, 5000);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
