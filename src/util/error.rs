// LogFeed - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogFeed operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogFeedError {
    /// Transport connect/read failed.
    Transport(TransportError),

    /// An incoming frame could not be decoded.
    Decode(DecodeError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LogFeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e}"),
            Self::Decode(e) => write!(f, "Decode error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LogFeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Errors produced by the WebSocket transport.
///
/// The reconnect policy does not distinguish causes (every variant is
/// handled uniformly by the fixed-delay retry), but the cause is preserved
/// for logging.
#[derive(Debug)]
pub enum TransportError {
    /// The endpoint URL could not be parsed or is not a ws/wss URL.
    InvalidEndpoint { url: String, reason: String },

    /// Establishing the connection failed.
    Connect {
        url: String,
        source: Box<tungstenite::Error>,
    },

    /// The connection ended: server close frame, network loss, or a
    /// protocol error on read.
    Closed { reason: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { url, reason } => {
                write!(f, "Invalid endpoint '{url}': {reason}")
            }
            Self::Connect { url, source } => {
                write!(f, "Failed to connect to '{url}': {source}")
            }
            Self::Closed { reason } => write!(f, "Connection closed: {reason}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connect { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<TransportError> for LogFeedError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// Errors decoding an incoming text frame.
///
/// Policy: the frame is dropped and the connection continues; one bad
/// message never terminates the stream.
#[derive(Debug)]
pub enum DecodeError {
    /// The frame is not valid JSON or lacks the envelope shape.
    InvalidJson { source: serde_json::Error },

    /// A "logs" envelope whose data is not an array of log records.
    InvalidLogsPayload { source: serde_json::Error },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { source } => write!(f, "Frame is not a valid envelope: {source}"),
            Self::InvalidLogsPayload { source } => {
                write!(f, "Logs envelope has a malformed payload: {source}")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidJson { source } | Self::InvalidLogsPayload { source } => Some(source),
        }
    }
}

impl From<DecodeError> for LogFeedError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogFeedError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
