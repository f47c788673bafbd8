// LogFeed - ui/panels/status.rs
//
// Sidebar: connection status, per-level session counts, and warnings.
// Pause/Resume and Clear actions are surfaced here via state flags that
// the gui frame loop acts on (panels never touch the feed manager).

use crate::app::state::{AppState, ConnectionStatus};
use crate::ui::theme;

/// Flags a panel interaction sets for the frame loop to act on.
#[derive(Debug, Default)]
pub struct StatusActions {
    pub toggle_pause: bool,
    pub clear: bool,
}

/// Render the status sidebar. Returns the requested actions.
pub fn render(ui: &mut egui::Ui, state: &AppState) -> StatusActions {
    let mut actions = StatusActions::default();

    ui.heading("Feed");
    ui.separator();

    ui.horizontal(|ui| {
        match state.connection {
            ConnectionStatus::Connected => {
                ui.label(
                    egui::RichText::new(" \u{25cf} LIVE ")
                        .strong()
                        .color(theme::LIVE_GREEN),
                );
            }
            ConnectionStatus::Disconnected => {
                let label = if state.paused {
                    " \u{25cf} PAUSED "
                } else {
                    " \u{25cf} OFFLINE "
                };
                ui.label(
                    egui::RichText::new(label)
                        .strong()
                        .color(theme::OFFLINE_RED),
                );
            }
        }
    });

    ui.label(egui::RichText::new(&state.endpoint).monospace().small());

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let pause_label = if state.paused { "Resume" } else { "Pause" };
        if ui.button(pause_label).clicked() {
            actions.toggle_pause = true;
        }
        if ui.button("Clear").clicked() {
            actions.clear = true;
        }
    });

    ui.separator();
    ui.heading("Session");
    egui::Grid::new("session_grid")
        .num_columns(2)
        .spacing([8.0, 2.0])
        .show(ui, |ui| {
            ui.label("Received:");
            ui.label(state.table.total_received().to_string());
            ui.end_row();

            ui.label("Shown:");
            ui.label(state.table.len().to_string());
            ui.end_row();

            ui.label("Dropped frames:");
            ui.label(state.dropped_frames.to_string());
            ui.end_row();

            ui.label("Retention:");
            ui.label(state.retention_display());
            ui.end_row();
        });

    let counts = state.table.level_counts_sorted();
    if !counts.is_empty() {
        ui.separator();
        ui.heading("Levels");
        egui::Grid::new("levels_grid")
            .num_columns(2)
            .spacing([8.0, 2.0])
            .show(ui, |ui| {
                for (badge_key, count) in counts {
                    ui.label(
                        egui::RichText::new(&badge_key)
                            .color(theme::level_colour(&badge_key))
                            .monospace(),
                    );
                    ui.label(count.to_string());
                    ui.end_row();
                }
            });
    }

    if !state.warnings.is_empty() {
        ui.separator();
        ui.heading("Warnings");
        egui::ScrollArea::vertical()
            .max_height(120.0)
            .show(ui, |ui| {
                for warning in &state.warnings {
                    ui.label(egui::RichText::new(warning).small());
                }
            });
    }

    actions
}
