mod app;
mod color;
mod config;
mod data;
mod state;
mod store;
mod ui;

use anyhow::{Context, Result};
use app::BirdGalleryApp;
use config::Config;
use data::loader::HttpImageSource;
use eframe::egui;
use store::ViewStore;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::default();

    // Fetches run here; the UI stays on the main thread.
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let source = HttpImageSource::new(&config).context("building HTTP client")?;
    let store = ViewStore::new(source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.window_title)
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.window_min_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let handle = runtime.handle().clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can fetch and decode remote jpg/png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(BirdGalleryApp::new(cc, store, handle, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running window: {e}"))?;

    Ok(())
}
