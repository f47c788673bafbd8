// LogFeed - core/mod.rs
//
// Core layer: data model, envelope decoding, and the feed table.
// No I/O, no UI, no transport dependencies (serde/chrono only).

pub mod envelope;
pub mod model;
pub mod table;
