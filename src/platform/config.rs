// LabelDesk - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for LabelDesk configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/labeldesk/ or %APPDATA%\LabelDesk\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
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
/// Unknown keys are ignored so a newer config file still loads.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub server: ServerSection,
    pub console: ConsoleSection,
    pub ui: UiSection,
    pub logging: LoggingSection,
}

/// `[server]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Base URL of the classifier API, e.g. "http://127.0.0.1:5000/api".
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

/// `[console]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Log console refresh interval in ms.
    pub poll_interval_ms: Option<u64>,
    pub auto_scroll: Option<bool>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Normalised API base URL (no trailing slash).
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub log_poll_interval: Duration,
    pub auto_scroll: bool,
    pub dark_mode: bool,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: constants::DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
            log_poll_interval: Duration::from_millis(constants::DEFAULT_LOG_POLL_INTERVAL_MS),
            auto_scroll: true,
            dark_mode: true,
            log_level: None,
        }
    }
}

/// Normalise an API base URL: trimmed, no trailing slash, http(s) only.
pub fn normalise_api_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty())
        .unwrap_or(false);
    if has_scheme && has_host {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Path of config.toml inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Read and parse config.toml. `Ok(None)` when the file does not exist.
pub fn read_raw_config(path: &Path) -> Result<Option<RawConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(raw))
}

/// Load and validate config.toml from `config_dir`.
///
/// Returns the validated config and a list of non-fatal warnings. A missing
/// file yields defaults with no warnings; an unreadable or unparseable file
/// yields defaults with one warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);
    match read_raw_config(&path) {
        Ok(Some(raw)) => {
            tracing::info!(path = %path.display(), "Loaded config.toml");
            validate(raw)
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
            (AppConfig::default(), Vec::new())
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Validate each field against named constants, accumulating warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Server: base_url --
    if let Some(ref url) = raw.server.base_url {
        match normalise_api_base(url) {
            Some(base) => config.api_base = base,
            None => warnings.push(format!(
                "[server] base_url = \"{url}\" is not an http(s) URL. Using default ({}).",
                constants::DEFAULT_API_BASE
            )),
        }
    }

    // -- Server: timeouts --
    let timeout_range = constants::MIN_TIMEOUT_SECS..=constants::MAX_TIMEOUT_SECS;
    if let Some(secs) = raw.server.connect_timeout_secs {
        if timeout_range.contains(&secs) {
            config.connect_timeout = Duration::from_secs(secs);
        } else {
            warnings.push(format!(
                "[server] connect_timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_TIMEOUT_SECS,
                constants::MAX_TIMEOUT_SECS,
                constants::DEFAULT_CONNECT_TIMEOUT_SECS,
            ));
        }
    }
    if let Some(secs) = raw.server.request_timeout_secs {
        if timeout_range.contains(&secs) {
            config.request_timeout = Duration::from_secs(secs);
        } else {
            warnings.push(format!(
                "[server] request_timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_TIMEOUT_SECS,
                constants::MAX_TIMEOUT_SECS,
                constants::DEFAULT_REQUEST_TIMEOUT_SECS,
            ));
        }
    }

    // -- Console --
    if let Some(ms) = raw.console.poll_interval_ms {
        if (constants::MIN_LOG_POLL_INTERVAL_MS..=constants::MAX_LOG_POLL_INTERVAL_MS).contains(&ms)
        {
            config.log_poll_interval = Duration::from_millis(ms);
        } else {
            warnings.push(format!(
                "[console] poll_interval_ms = {ms} is out of range ({}-{}). Using default ({}).",
                constants::MIN_LOG_POLL_INTERVAL_MS,
                constants::MAX_LOG_POLL_INTERVAL_MS,
                constants::DEFAULT_LOG_POLL_INTERVAL_MS,
            ));
        }
    }
    if let Some(auto_scroll) = raw.console.auto_scroll {
        config.auto_scroll = auto_scroll;
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(format!(
                "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
