// LogFeed - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::{ConfigError, LogFeedError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogFeed data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logfeed/ or %APPDATA%\LogFeed\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();

            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");

            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[feed]` section.
    pub feed: FeedSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[feed]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FeedSection {
    /// WebSocket endpoint URL.
    pub endpoint: Option<String>,
    /// Fixed reconnect delay in milliseconds.
    pub reconnect_delay_ms: Option<u64>,
    /// Retention cap on table rows (0 = unbounded).
    pub max_rows: Option<usize>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path; when set, output goes to this file as well as stderr.
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Feed --
    /// WebSocket endpoint URL.
    pub endpoint: String,
    /// Fixed reconnect delay in milliseconds.
    pub reconnect_delay_ms: u64,
    /// Retention cap on table rows. None = unbounded (the default).
    pub max_rows: Option<usize>,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path; None logs to stderr only.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            reconnect_delay_ms: constants::RECONNECT_DELAY_MS,
            max_rows: constants::DEFAULT_MAX_ROWS,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with an error
/// warning -- the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            push_warning(
                &mut warnings,
                ConfigError::Io {
                    path: config_path.clone(),
                    source: e,
                },
            );
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            push_warning(
                &mut warnings,
                ConfigError::TomlParse {
                    path: config_path.clone(),
                    source: e,
                },
            );
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- Feed: endpoint --
    if let Some(ref endpoint) = raw.feed.endpoint {
        if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
            config.endpoint = endpoint.clone();
        } else {
            push_warning(
                &mut warnings,
                ConfigError::ValueOutOfRange {
                    field: "[feed] endpoint".to_string(),
                    value: endpoint.clone(),
                    expected: "a ws:// or wss:// URL".to_string(),
                },
            );
        }
    }

    // -- Feed: reconnect_delay_ms --
    if let Some(delay) = raw.feed.reconnect_delay_ms {
        if (constants::MIN_RECONNECT_DELAY_MS..=constants::MAX_RECONNECT_DELAY_MS).contains(&delay)
        {
            config.reconnect_delay_ms = delay;
        } else {
            push_warning(
                &mut warnings,
                ConfigError::ValueOutOfRange {
                    field: "[feed] reconnect_delay_ms".to_string(),
                    value: delay.to_string(),
                    expected: format!(
                        "{}-{}",
                        constants::MIN_RECONNECT_DELAY_MS,
                        constants::MAX_RECONNECT_DELAY_MS
                    ),
                },
            );
        }
    }

    // -- Feed: max_rows (0 = unbounded, the default) --
    if let Some(rows) = raw.feed.max_rows {
        if rows == 0 {
            config.max_rows = None;
        } else if (constants::MIN_MAX_ROWS..=constants::ABSOLUTE_MAX_ROWS).contains(&rows) {
            config.max_rows = Some(rows);
        } else {
            push_warning(
                &mut warnings,
                ConfigError::ValueOutOfRange {
                    field: "[feed] max_rows".to_string(),
                    value: rows.to_string(),
                    expected: format!(
                        "{}-{}, or 0 for unbounded",
                        constants::MIN_MAX_ROWS,
                        constants::ABSOLUTE_MAX_ROWS
                    ),
                },
            );
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                push_warning(
                    &mut warnings,
                    ConfigError::ValueOutOfRange {
                        field: "[ui] theme".to_string(),
                        value: other.to_string(),
                        expected: "\"dark\" or \"light\"".to_string(),
                    },
                );
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            push_warning(
                &mut warnings,
                ConfigError::ValueOutOfRange {
                    field: "[ui] font_size".to_string(),
                    value: size.to_string(),
                    expected: format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
                },
            );
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            push_warning(
                &mut warnings,
                ConfigError::ValueOutOfRange {
                    field: "[logging] level".to_string(),
                    value: level.clone(),
                    expected: "error, warn, info, debug, or trace".to_string(),
                },
            );
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if file.trim().is_empty() {
            push_warning(
                &mut warnings,
                ConfigError::ValueOutOfRange {
                    field: "[logging] file".to_string(),
                    value: file.clone(),
                    expected: "a non-empty file path".to_string(),
                },
            );
        } else {
            config.log_file = Some(PathBuf::from(file));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

/// Log a validation failure and record it for the warnings surface.
/// All config failures are non-fatal: the default value is kept.
fn push_warning(warnings: &mut Vec<String>, error: ConfigError) {
    let error = LogFeedError::from(error);
    tracing::warn!("{}", error);
    warnings.push(format!("{error}. Using default."));
}
