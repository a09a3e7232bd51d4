// LabelDesk - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LabelDesk";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LabelDesk";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Backend API
// =============================================================================

/// Default base URL of the classifier API. Every endpoint path is appended
/// to this value.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

/// Path suffix stripped from the API base to find the server root that
/// relative image URLs are resolved against.
pub const API_PATH_SUFFIX: &str = "/api";

/// Default TCP connect timeout for API requests (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default whole-request timeout for API requests (seconds).
/// Uploads of many large images are the slowest calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Bounds for the user-configurable timeouts (seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Multipart field name for each uploaded image.
pub const UPLOAD_FIELD_NAME: &str = "files[]";

/// File extensions offered by the upload picker.
pub const UPLOAD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// Largest image body accepted for a thumbnail fetch.
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024; // 32 MiB

// =============================================================================
// Log console
// =============================================================================

/// How often the log console re-fetches `/logs` while visible (ms).
pub const DEFAULT_LOG_POLL_INTERVAL_MS: u64 = 2_000;

/// How often the poller's cancel flag is checked within each sleep (ms).
pub const LOG_POLL_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

/// Minimum user-configurable log poll interval (ms).
pub const MIN_LOG_POLL_INTERVAL_MS: u64 = 250;

/// Maximum user-configurable log poll interval (ms).
pub const MAX_LOG_POLL_INTERVAL_MS: u64 = 60_000;

/// Severity tags matched (by substring) in backend log lines.
pub const LOG_TAG_ERROR: &str = "[ERROR]";
pub const LOG_TAG_WARNING: &str = "[WARNING]";

// =============================================================================
// UI
// =============================================================================

/// How long a transient notice stays on screen (ms).
pub const NOTICE_DURATION_MS: u64 = 3_000;

/// Thumbnails are downscaled to fit inside this square (pixels).
pub const THUMBNAIL_MAX_EDGE: u32 = 160;

/// Maximum number of API completions processed by the UI loop per frame.
pub const MAX_COMPLETIONS_PER_FRAME: usize = 64;

/// Text shown instead of a percentage when the backend could not classify
/// an image.
pub const CONFIDENCE_ERROR_TOKEN: &str = "Err";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
