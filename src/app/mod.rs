// LogFeed - app/mod.rs
//
// Application layer: feed lifecycle, transport, state management.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod feed;
pub mod state;
pub mod transport;
