// LogFeed - app/state.rs
//
// Application state management. Holds the feed table, connection status,
// endpoint configuration, and selection.
// Owned by the eframe::App implementation.

use crate::core::table::FeedTable;
use crate::util::constants;

/// Connection status as last reported by the feed worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No live connection; a reconnect is pending (or the feed is paused).
    #[default]
    Disconnected,

    /// A connection to the endpoint is live.
    Connected,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Endpoint URL the feed connects to.
    pub endpoint: String,

    /// Fixed reconnect delay in milliseconds.
    pub reconnect_delay_ms: u64,

    /// Retention cap carried from configuration (None = unbounded).
    pub max_rows: Option<usize>,

    /// The visible table model (rows newest-first).
    pub table: FeedTable,

    /// Connection status from the most recent worker message.
    pub connection: ConnectionStatus,

    /// Whether the user has paused the feed (worker stopped, no retries).
    pub paused: bool,

    /// Count of undecodable frames dropped this session.
    pub dropped_frames: u64,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings accumulated this session (bounded).
    pub warnings: Vec<String>,

    /// Id of the currently selected row, if any.
    pub selected_row: Option<u64>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state for the given endpoint and retention settings.
    pub fn new(
        endpoint: String,
        reconnect_delay_ms: u64,
        max_rows: Option<usize>,
        debug_mode: bool,
    ) -> Self {
        Self {
            endpoint,
            reconnect_delay_ms,
            max_rows,
            table: FeedTable::new(max_rows),
            connection: ConnectionStatus::Disconnected,
            paused: false,
            dropped_frames: 0,
            status_message: "Connecting...".to_string(),
            warnings: Vec::new(),
            selected_row: None,
            debug_mode,
        }
    }

    /// Retention cap as shown on the status surface.
    pub fn retention_display(&self) -> String {
        match self.max_rows {
            Some(cap) => format!("{cap} rows"),
            None => "unbounded".to_string(),
        }
    }

    /// Record a non-fatal warning, bounded by MAX_WARNINGS.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() < constants::MAX_WARNINGS {
            self.warnings.push(message);
        }
    }

    /// Drop the current selection if the selected row no longer exists
    /// (e.g. trimmed by the retention cap).
    pub fn validate_selection(&mut self) {
        if let Some(id) = self.selected_row {
            if self.table.row_by_id(id).is_none() {
                self.selected_row = None;
            }
        }
    }

    /// Discard all received rows and session counters.
    pub fn clear(&mut self) {
        self.table.clear();
        self.dropped_frames = 0;
        self.warnings.clear();
        self.selected_row = None;
        self.status_message = "Cleared.".to_string();
    }
}
