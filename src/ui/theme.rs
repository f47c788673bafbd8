// LogFeed - ui/theme.rs
//
// Colour scheme, level badge colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Badge colour for a lowercased level string.
///
/// The level is untrusted free text from the server; it is used purely as
/// a lookup key here. Unknown strings fall through to a neutral colour,
/// never an error.
pub fn level_colour(badge_key: &str) -> Color32 {
    match badge_key {
        "critical" | "fatal" => Color32::from_rgb(220, 38, 38), // Red 600
        "error" | "err" => Color32::from_rgb(185, 28, 28),      // Red 800
        "warning" | "warn" => Color32::from_rgb(217, 119, 6),   // Amber 600
        "info" => Color32::from_rgb(209, 213, 219),             // Gray 300
        "debug" | "trace" => Color32::from_rgb(107, 114, 128),  // Gray 500
        _ => Color32::from_rgb(75, 85, 99),                     // Gray 600
    }
}

/// Background highlight colour for a badge key (subtle, for row backgrounds).
pub fn level_bg_colour(badge_key: &str) -> Option<Color32> {
    match badge_key {
        "critical" | "fatal" => Some(Color32::from_rgba_premultiplied(220, 38, 38, 25)),
        "error" | "err" => Some(Color32::from_rgba_premultiplied(185, 28, 28, 20)),
        "warning" | "warn" => Some(Color32::from_rgba_premultiplied(217, 119, 6, 15)),
        _ => None,
    }
}

/// Connection indicator colours.
pub const LIVE_GREEN: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const OFFLINE_RED: Color32 = Color32::from_rgb(239, 68, 68); // Red 500

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 230.0;
pub const DETAIL_PANE_HEIGHT: f32 = 160.0;
pub const ROW_HEIGHT: f32 = 20.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_map_to_distinct_colours() {
        assert_ne!(level_colour("error"), level_colour("info"));
        assert_ne!(level_colour("warning"), level_colour("debug"));
    }

    #[test]
    fn unknown_level_gets_the_neutral_colour() {
        assert_eq!(level_colour("wibble"), level_colour("no-such-level"));
    }
}
