// LabelDesk - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Backend client construction
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use labeldesk::app;
pub use labeldesk::core;
pub use labeldesk::platform;
pub use labeldesk::ui;
pub use labeldesk::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// LabelDesk - review client for an AI-vs-real image classifier.
///
/// Lists the images waiting for review with the model's prediction, lets
/// you drag them between the "AI-generated" and "Real" columns, and commits
/// the reviewed labels to the backend in one batch.
#[derive(Parser, Debug)]
#[command(name = "LabelDesk", version, about)]
struct Cli {
    /// Base URL of the classifier API (overrides config.toml).
    #[arg(short = 'a', long = "api-base")]
    api_base: Option<String>,

    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Build the shared backend client from the validated config.
fn build_api(
    config: &platform::config::AppConfig,
) -> util::error::Result<Arc<dyn platform::api::ReviewApi>> {
    let api = platform::api::HttpApi::new(
        &config.api_base,
        config.connect_timeout,
        config.request_timeout,
    )?;
    tracing::info!(api_base = %api.base(), "Backend client ready");
    Ok(Arc::new(api))
}

fn main() {
    let cli = Cli::parse();

    // Config first: it may carry the log level.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_dir);
    let (mut config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "LabelDesk starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // CLI override > config.toml > default
    if let Some(ref raw) = cli.api_base {
        match platform::config::normalise_api_base(raw) {
            Some(base) => config.api_base = base,
            None => tracing::warn!(
                api_base = %raw,
                fallback = %config.api_base,
                "Ignoring --api-base: not an http(s) URL"
            ),
        }
    }

    let api = match build_api(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create HTTP client");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Ready to launch GUI");

    let state = app::state::AppState::new(
        config.api_base.clone(),
        config.auto_scroll,
        config.dark_mode,
        cli.debug,
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let poll_interval = config.log_poll_interval;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::LabelDeskApp::new(state, api, poll_interval)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LabelDesk GUI: {e}");
        std::process::exit(1);
    }
}
