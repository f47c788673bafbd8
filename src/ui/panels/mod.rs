// LogFeed - ui/panels/mod.rs

pub mod detail;
pub mod feed;
pub mod status;
