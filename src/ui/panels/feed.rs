// LogFeed - ui/panels/feed.rs
//
// Virtual-scrolling live feed table (central area), newest row on top.
//
// Uses egui's `ScrollArea::show_rows` which renders only the rows currently
// visible in the viewport, giving O(1) rendering cost regardless of row
// count; the table is unbounded by default, so this matters.
//
// Text contrast: each row is rendered with a LayoutJob that colours only
// the level badge with the level-specific hue while the timestamp /
// message / crew body uses the default foreground, so rows stay readable
// when an error background tint is applied.

use crate::app::state::AppState;
use crate::ui::theme;
use egui::text::{LayoutJob, TextFormat};

/// Render the feed table panel (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let total = state.table.len();

    if total == 0 {
        ui.centered_and_justified(|ui| {
            ui.label(format!(
                "No log entries received yet.\nWaiting for {}...",
                state.endpoint
            ));
        });
        return;
    }

    let row_height = theme::ROW_HEIGHT;
    let mut clicked_row: Option<u64> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, total, |ui, row_range| {
            for display_idx in row_range {
                let Some(row) = state.table.rows().get(display_idx) else {
                    continue;
                };

                let badge_key = row.record.badge_key();
                let badge_colour = theme::level_colour(&badge_key);
                let is_selected = state.selected_row == Some(row.id);

                // Subtle background tint for high-severity rows.
                if let Some(bg) = theme::level_bg_colour(&badge_key) {
                    let tint_rect = egui::Rect::from_min_size(
                        ui.cursor().min,
                        egui::vec2(ui.available_width(), row_height),
                    );
                    ui.painter().rect_filled(tint_rect, 0.0, bg);
                }

                let first_line = row
                    .record
                    .message
                    .lines()
                    .next()
                    .unwrap_or(&row.record.message);

                let font = egui::FontId::monospace(12.0);
                let body_colour = ui.style().visuals.text_color();

                // Badge keeps the level hue; the rest of the row uses the
                // default high-contrast foreground. The level string is
                // shown verbatim; the server owns its vocabulary.
                let mut row_job = LayoutJob::default();
                row_job.append(
                    &format!("[{:<8}] ", truncate(&row.record.level, 8)),
                    0.0,
                    TextFormat {
                        font_id: font.clone(),
                        color: badge_colour,
                        ..Default::default()
                    },
                );
                row_job.append(
                    &format!(
                        "{} | {:>12} | {}",
                        row.record.timestamp,
                        truncate(row.record.crew_display(), 12),
                        first_line
                    ),
                    0.0,
                    TextFormat {
                        font_id: font,
                        color: body_colour,
                        ..Default::default()
                    },
                );

                let response = ui.selectable_label(is_selected, row_job);
                if response.clicked() {
                    clicked_row = Some(row.id);
                }

                response.on_hover_ui(|ui| {
                    ui.label(format!("Received {}", row.received_at.format("%H:%M:%S UTC")));
                    ui.label(
                        egui::RichText::new(&row.record.message)
                            .monospace()
                            .small(),
                    );
                });
            }
        });

    if let Some(id) = clicked_row {
        state.selected_row = Some(id);
    }
}

/// First `max` characters of `s`, padded right for column alignment.
fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max {
        format!("{s:<max$}")
    } else {
        chars[..max].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_pads_short_strings() {
        assert_eq!(truncate("abc", 5), "abc  ");
    }

    #[test]
    fn truncate_cuts_long_strings() {
        assert_eq!(truncate("abcdefgh", 5), "abcde");
    }
}
