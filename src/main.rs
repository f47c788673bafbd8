// LogFeed - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading and validation
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use logfeed::app;

pub use logfeed::core;
pub use logfeed::platform;
pub use logfeed::ui;
pub use logfeed::util;

use clap::Parser;

/// LogFeed - Live log feed viewer for monitoring backends.
///
/// Connects to a monitoring backend's WebSocket log stream and displays
/// incoming entries in a live table, reconnecting automatically on loss.
#[derive(Parser, Debug)]
#[command(name = "LogFeed", version, about)]
struct Cli {
    /// WebSocket endpoint to connect to (overrides config.toml).
    endpoint: Option<String>,

    /// Retention cap on table rows, 0 for unbounded (overrides config.toml).
    #[arg(short = 'r', long = "max-rows")]
    max_rows: Option<usize>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config first so the configured log
    // level can participate in logging init.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    // Initialise logging subsystem
    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogFeed starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    // Precedence: CLI > config file > built-in defaults.
    let endpoint = cli.endpoint.unwrap_or_else(|| config.endpoint.clone());
    let max_rows = match cli.max_rows {
        Some(0) => None,
        Some(n) => Some(n),
        None => config.max_rows,
    };

    tracing::info!(
        endpoint = %endpoint,
        reconnect_delay_ms = config.reconnect_delay_ms,
        max_rows = ?max_rows,
        "Feed configuration resolved"
    );

    // Create application state
    let mut state = app::state::AppState::new(
        endpoint,
        config.reconnect_delay_ms,
        max_rows,
        cli.debug,
    );
    for warning in config_warnings {
        state.push_warning(warning);
    }

    // Launch the GUI
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_theme(if dark_mode {
                egui::Theme::Dark
            } else {
                egui::Theme::Light
            });
            cc.egui_ctx.style_mut(|style| {
                for (text_style, font_id) in style.text_styles.iter_mut() {
                    if matches!(
                        text_style,
                        egui::TextStyle::Body | egui::TextStyle::Monospace
                    ) {
                        font_id.size = font_size;
                    }
                }
            });
            Ok(Box::new(gui::LogFeedApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogFeed GUI: {e}");
        std::process::exit(1);
    }
}
