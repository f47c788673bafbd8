// LogFeed - core/table.rs
//
// The feed table: the in-memory model behind the visible log table.
//
// Rows are stored newest-first. Each incoming batch is prepended to the
// existing content, so prior rows are preserved and the table grows for
// the life of the session. Unbounded is the default; the retention cap
// is an opt-in configuration value.

use crate::core::model::{FeedRow, LogRecord};
use chrono::Utc;
use std::collections::HashMap;

/// In-memory model of the visible log table. Owned by the UI thread;
/// mutated only when the frame loop applies feed progress messages.
#[derive(Debug, Default)]
pub struct FeedTable {
    /// Rows in display order: index 0 is the newest visible row.
    rows: Vec<FeedRow>,

    /// Optional retention cap. `None` = unbounded (the default).
    max_rows: Option<usize>,

    /// Next row id to assign.
    next_id: u64,

    /// Count of rows received per lowercased level string, across the
    /// whole session (not reduced when the retention cap trims rows).
    level_counts: HashMap<String, usize>,

    /// Total rows received this session, including trimmed ones.
    total_received: u64,
}

impl FeedTable {
    /// Create an empty table with the given retention cap.
    pub fn new(max_rows: Option<usize>) -> Self {
        Self {
            max_rows,
            ..Default::default()
        }
    }

    /// Prepend a batch of records to the table.
    ///
    /// Within the batch the server's delivery order is preserved: the
    /// first record of the batch becomes the topmost of the batch's rows.
    /// Batches therefore stack most-recent-first.
    pub fn prepend_batch(&mut self, records: Vec<LogRecord>) {
        if records.is_empty() {
            return;
        }

        let received_at = Utc::now();
        let batch: Vec<FeedRow> = records
            .into_iter()
            .map(|record| {
                let id = self.next_id;
                self.next_id += 1;
                *self.level_counts.entry(record.badge_key()).or_insert(0) += 1;
                self.total_received += 1;
                FeedRow {
                    id,
                    record,
                    received_at,
                }
            })
            .collect();

        // splice at the front: batch rows first, existing rows after.
        self.rows.splice(0..0, batch);

        if let Some(cap) = self.max_rows {
            if self.rows.len() > cap {
                self.rows.truncate(cap);
            }
        }
    }

    /// Rows in display order (newest first).
    pub fn rows(&self) -> &[FeedRow] {
        &self.rows
    }

    /// Number of rows currently held.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows have been received yet (or all were trimmed).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total records received this session, including any trimmed by the
    /// retention cap.
    pub fn total_received(&self) -> u64 {
        self.total_received
    }

    /// Session receive count for a lowercased level string.
    pub fn level_count(&self, badge_key: &str) -> usize {
        self.level_counts.get(badge_key).copied().unwrap_or(0)
    }

    /// Level counts in descending order, for the status surface.
    pub fn level_counts_sorted(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .level_counts
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Row lookup by id, for selection.
    pub fn row_by_id(&self, id: u64) -> Option<&FeedRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Discard all rows and counters.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.level_counts.clear();
        self.total_received = 0;
        // next_id keeps counting so ids stay unique across a clear.
    }
}
