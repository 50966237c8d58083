mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::NewsViewerApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from_env();
    log::info!("Starting with load cache capacity {}", config.cache_capacity);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "News Digest Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(NewsViewerApp::new(config)))),
    )
}
