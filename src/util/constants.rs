// LogFeed - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogFeed";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogFeed";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Feed endpoint and reconnect policy
// =============================================================================

/// Default WebSocket endpoint for the monitoring backend's log stream.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000/ws";

/// Fixed delay between a connection closing and the next connect attempt.
/// The reconnect policy is deliberately "retry forever, fixed interval":
/// no backoff, no jitter, no maximum retry count.
pub const RECONNECT_DELAY_MS: u64 = 1_000;

/// How often the cancel flag is checked within each worker sleep/read (ms).
/// The background thread wakes every this many ms to check for cancellation.
pub const FEED_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

/// Socket read timeout applied to the live connection so a blocking read
/// returns periodically and the worker can observe the cancel flag.
pub const FEED_READ_TIMEOUT_MS: u64 = FEED_CANCEL_CHECK_INTERVAL_MS;

/// Minimum user-configurable reconnect delay (ms).
pub const MIN_RECONNECT_DELAY_MS: u64 = 100;

/// Maximum user-configurable reconnect delay (ms).
pub const MAX_RECONNECT_DELAY_MS: u64 = 60_000; // 60 s

// =============================================================================
// Table retention
// =============================================================================

/// Default retention cap on table rows. `None` means the table grows
/// unboundedly for the life of the session.
pub const DEFAULT_MAX_ROWS: Option<usize> = None;

/// Minimum configurable retention cap (when one is set at all).
pub const MIN_MAX_ROWS: usize = 100;

/// Maximum configurable retention cap.
pub const ABSOLUTE_MAX_ROWS: usize = 1_000_000;

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of feed progress messages processed by the UI update
/// loop per frame. Any remaining messages are left in the channel and
/// processed on subsequent frames, preventing a burst from stalling the
/// render loop.
pub const MAX_FEED_MESSAGES_PER_FRAME: usize = 200;

/// Maximum number of non-fatal warnings retained for display. Prevents
/// the warnings Vec from growing without bound on a flaky link.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

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
