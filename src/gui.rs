// LogFeed - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the UI panels and manages the feed lifecycle.
//
// This is the activation gate in the desktop rendition: the connection
// worker is started here, by the shell that owns the table surface.
// Constructing application state alone never opens a socket.

use crate::app::feed::FeedManager;
use crate::app::state::{AppState, ConnectionStatus};
use crate::app::transport::WsTransport;
use crate::core::model::FeedProgress;
use crate::ui;
use crate::util::constants;
use std::time::Duration;

/// The LogFeed application.
pub struct LogFeedApp {
    pub state: AppState,
    pub feed_manager: FeedManager,
}

impl LogFeedApp {
    /// Create the application and start the feed.
    pub fn new(state: AppState) -> Self {
        let mut app = Self {
            state,
            feed_manager: FeedManager::new(),
        };
        app.start_feed();
        app
    }

    /// Start (or restart) the feed worker against the configured endpoint.
    fn start_feed(&mut self) {
        match WsTransport::new(&self.state.endpoint) {
            Ok(transport) => {
                self.feed_manager.start_feed(
                    Box::new(transport),
                    Duration::from_millis(self.state.reconnect_delay_ms),
                );
                self.state.paused = false;
                self.state.status_message = format!("Connecting to {}...", self.state.endpoint);
            }
            Err(e) => {
                // A bad endpoint is a configuration defect, not a network
                // blip; retrying it forever would never succeed.
                tracing::error!(error = %e, "Cannot start feed");
                self.state.status_message = format!("Feed not started: {e}");
                self.state.push_warning(e.to_string());
            }
        }
    }
}

impl eframe::App for LogFeedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for feed progress (bounded per frame).
        let messages = self
            .feed_manager
            .poll_progress(constants::MAX_FEED_MESSAGES_PER_FRAME);
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                FeedProgress::Connected => {
                    self.state.connection = ConnectionStatus::Connected;
                    self.state.status_message = format!("Connected to {}.", self.state.endpoint);
                }
                FeedProgress::Batch { records } => {
                    self.state.table.prepend_batch(records);
                    self.state.validate_selection();
                }
                FeedProgress::FrameDropped { reason } => {
                    self.state.dropped_frames += 1;
                    self.state.push_warning(format!("Dropped frame: {reason}"));
                }
                FeedProgress::Disconnected { reason } => {
                    self.state.connection = ConnectionStatus::Disconnected;
                    self.state.status_message = format!(
                        "Disconnected ({reason}). Retrying every {} ms...",
                        self.state.reconnect_delay_ms
                    );
                }
                FeedProgress::Stopped => {
                    self.state.connection = ConnectionStatus::Disconnected;
                    self.state.status_message = "Feed stopped.".to_string();
                }
            }
        }

        // Keep repainting while the feed is active so new rows and status
        // changes appear promptly without user input.
        if had_messages {
            ctx.request_repaint();
        } else if self.feed_manager.is_active() {
            ctx.request_repaint_after(Duration::from_millis(
                constants::FEED_CANCEL_CHECK_INTERVAL_MS,
            ));
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let shown = self.state.table.len();
                    let total = self.state.table.total_received();
                    if total > 0 {
                        ui.label(format!("{shown} shown / {total} received"));
                    }
                });
            });
        });

        // Detail pane (bottom)
        egui::TopBottomPanel::bottom("detail_pane")
            .resizable(true)
            .default_height(ui::theme::DETAIL_PANE_HEIGHT)
            .show(ctx, |ui| {
                ui::panels::detail::render(ui, &self.state);
            });

        // Left sidebar: connection status and session counters.
        let actions = egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| ui::panels::status::render(ui, &self.state))
                    .inner
            })
            .inner;

        // Central panel: the live feed table.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::feed::render(ui, &mut self.state);
        });

        // Apply sidebar actions after all panels have released state.
        if actions.toggle_pause {
            if self.state.paused {
                self.start_feed();
            } else {
                self.feed_manager.stop_feed();
                self.state.paused = true;
                self.state.connection = ConnectionStatus::Disconnected;
                self.state.status_message = "Feed paused.".to_string();
            }
        }
        if actions.clear {
            self.state.clear();
        }
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Stops the worker so a pending reconnect does not outlive the window.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.feed_manager.stop_feed();
    }
}
