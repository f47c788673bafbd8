// LogFeed - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no transport dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::Deserialize;

// =============================================================================
// Log Record (wire shape of one log entry)
// =============================================================================

/// One structured log entry as the monitoring backend sends it.
///
/// All fields arrive as free-form strings; the server is the authority on
/// their content and this client performs no validation beyond JSON shape.
/// `level` in particular is NOT restricted to a known severity set: any
/// string is accepted and used verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogRecord {
    /// Timestamp string exactly as produced by the server.
    pub timestamp: String,

    /// Severity level string (e.g. "Error", "INFO", or anything else).
    pub level: String,

    /// Free-text message body.
    pub message: String,

    /// Originating actor name. Optional on the wire; displays as "system"
    /// when absent or empty.
    #[serde(default)]
    pub crew_name: Option<String>,
}

impl LogRecord {
    /// Display name of the originating crew.
    ///
    /// The wire contract treats a missing *or empty* crew_name as "no crew";
    /// both display as the literal `system`.
    pub fn crew_display(&self) -> &str {
        match self.crew_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "system",
        }
    }

    /// Lowercased level string used to select the badge style.
    ///
    /// No validation: an unrecognised level simply maps to the neutral
    /// badge style at the theme layer.
    pub fn badge_key(&self) -> String {
        self.level.to_lowercase()
    }
}

// =============================================================================
// Envelope (top-level wire message)
// =============================================================================

/// The discriminated wrapper received per WebSocket text frame.
///
/// `data` is kept as a raw JSON value until the `type` discriminator has
/// been inspected, so envelopes of unrecognised types are ignored without
/// ever attempting (and failing) to deserialise their payload.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Discriminator. Only "logs" is recognised by this client.
    #[serde(rename = "type")]
    pub kind: String,

    /// Type-dependent payload, deserialised lazily by `core::envelope`.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Envelope type recognised by this client. All others are no-ops.
pub const ENVELOPE_TYPE_LOGS: &str = "logs";

// =============================================================================
// Feed Row (a record as held by the table)
// =============================================================================

/// A received log record plus client-side receive metadata.
///
/// The table stores these newest-first. The id is assigned by the table on
/// arrival and is unique for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct FeedRow {
    /// Monotonically increasing unique ID within the session.
    pub id: u64,

    /// The record as received from the server.
    pub record: LogRecord,

    /// When this client received the record (not the server timestamp).
    pub received_at: DateTime<Utc>,
}

// =============================================================================
// Feed Progress (worker thread -> UI thread)
// =============================================================================

/// Progress messages sent from the feed worker thread to the UI thread.
#[derive(Debug, Clone)]
pub enum FeedProgress {
    /// A connection to the endpoint was established.
    Connected,

    /// A batch of log records arrived, in server delivery order.
    Batch { records: Vec<LogRecord> },

    /// A text frame was dropped because it could not be decoded.
    /// The connection itself continues.
    FrameDropped { reason: String },

    /// The connection ended (establish failure, network loss, server close).
    /// The worker will retry after the fixed reconnect delay.
    Disconnected { reason: String },

    /// The worker observed the cancel flag and exited.
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(crew: Option<&str>) -> String {
        match crew {
            Some(c) => format!(
                r#"{{"timestamp":"T1","level":"Error","message":"boom","crew_name":"{c}"}}"#
            ),
            None => r#"{"timestamp":"T1","level":"Error","message":"boom"}"#.to_string(),
        }
    }

    #[test]
    fn record_deserialises_all_fields() {
        let rec: LogRecord = serde_json::from_str(&record_json(Some("Alpha"))).unwrap();
        assert_eq!(rec.timestamp, "T1");
        assert_eq!(rec.level, "Error");
        assert_eq!(rec.message, "boom");
        assert_eq!(rec.crew_name.as_deref(), Some("Alpha"));
    }

    #[test]
    fn missing_crew_name_displays_as_system() {
        let rec: LogRecord = serde_json::from_str(&record_json(None)).unwrap();
        assert_eq!(rec.crew_name, None);
        assert_eq!(rec.crew_display(), "system");
    }

    #[test]
    fn empty_crew_name_displays_as_system() {
        // An empty string counts as absent, same as a missing field.
        let rec: LogRecord = serde_json::from_str(
            r#"{"timestamp":"T","level":"Info","message":"m","crew_name":""}"#,
        )
        .unwrap();
        assert_eq!(rec.crew_display(), "system");
    }

    #[test]
    fn badge_key_is_lowercased_level() {
        let rec: LogRecord = serde_json::from_str(&record_json(Some("Alpha"))).unwrap();
        assert_eq!(rec.badge_key(), "error");
    }

    #[test]
    fn badge_key_accepts_arbitrary_level_strings() {
        let rec: LogRecord =
            serde_json::from_str(r#"{"timestamp":"T","level":"WiBbLe","message":"m"}"#).unwrap();
        assert_eq!(rec.badge_key(), "wibble");
    }
}
