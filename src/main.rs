mod ai;
mod game;
mod i18n;
mod storage;
mod ui;

use std::path::PathBuf;

use gtk4::prelude::*;
use gtk4::Application;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let app = Application::builder()
        .application_id("io.github.tictactoe.TicTacToe")
        .build();

    app.connect_activate(|app| {
        let res_dir = find_resources_dir();
        let data_dir = storage::data_dir().unwrap_or_else(|e| {
            warn!(error = %e, "no data directory, using working directory");
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });
        info!(data_dir = %data_dir.display(), "starting");
        ui::app::build_ui(app, &res_dir, &data_dir);
    });

    app.run();
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Locate the `resources/` directory holding the translations.
fn find_resources_dir() -> PathBuf {
    let candidates = [
        // cargo run from project root
        std::env::current_dir().ok().map(|d| d.join("resources")),
        // next to executable
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("resources"))),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|c| c.is_dir())
        .unwrap_or_else(|| PathBuf::from("resources"))
}
