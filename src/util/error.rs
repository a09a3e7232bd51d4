// LabelDesk - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Errors are categorised by the subsystem that produced them. Startup
// failures surface as `LabelDeskError`; config errors are downgraded to
// warnings by the loader and never reach the top level.

use std::io;
use std::path::PathBuf;

/// Top-level error type for all LabelDesk operations.
#[derive(Debug, thiserror::Error)]
pub enum LabelDeskError {
    /// A backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Convenience result alias for startup-level operations.
pub type Result<T> = std::result::Result<T, LabelDeskError>;

// ---------------------------------------------------------------------------
// API errors
// ---------------------------------------------------------------------------

/// Errors produced while talking to the classifier backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused,
    /// timeout, DNS failure...).
    #[error("connection failed for {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// The server answered with a non-2xx status.
    ///
    /// `message` carries the server-supplied `error` field when the body
    /// had one.
    #[error("{endpoint} returned HTTP {code}{}", message_suffix(.message))]
    Status {
        endpoint: String,
        code: u16,
        message: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// A local file selected for upload could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    File { path: PathBuf, source: io::Error },

    /// Downloaded image bytes could not be decoded.
    #[error("cannot decode image {url}: {message}")]
    Image { url: String, message: String },
}

impl ApiError {
    /// True when the failure happened before any HTTP response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The server-supplied error message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors related to `config.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The file is not valid TOML or has the wrong shape.
    #[error("cannot parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
