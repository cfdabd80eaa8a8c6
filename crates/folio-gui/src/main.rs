#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod store;
mod views;
mod worker;

fn main() -> anyhow::Result<()> {
    let logger = logger::StatusLogger::new(200);
    logger.clone().install()?;

    // The worker task lives on this runtime; the GUI thread only ever
    // exchanges messages with it
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Folio Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Folio Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(app::FolioApp::new(cc, tokio_handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
