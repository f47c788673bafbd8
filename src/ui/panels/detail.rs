// LogFeed - ui/panels/detail.rs
//
// Row detail pane showing the full message and receive metadata.

use crate::app::state::AppState;

/// Render the detail pane (bottom panel).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let selected = state
        .selected_row
        .and_then(|id| state.table.row_by_id(id));

    if let Some(row) = selected {
        egui::Grid::new("detail_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Level:");
                ui.label(&row.record.level);
                ui.end_row();

                ui.label("Timestamp:");
                ui.label(&row.record.timestamp);
                ui.end_row();

                ui.label("Crew:");
                ui.label(row.record.crew_display());
                ui.end_row();

                ui.label("Received:");
                ui.label(row.received_at.to_rfc3339());
                ui.end_row();
            });

        ui.separator();
        ui.label("Message:");
        egui::ScrollArea::vertical()
            .max_height(90.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&row.record.message).monospace());
            });
    } else {
        ui.centered_and_justified(|ui| {
            ui.label("Select an entry to view details.");
        });
    }
}
