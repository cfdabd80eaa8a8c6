use std::time::{Duration, Instant};

use eframe::egui;
use folio_async_runtime::{DocumentLocation, ViewerCommand, ViewerUpdate};
use folio_session::ViewerOptions;
use tokio::sync::mpsc;

use crate::logger::StatusLogger;
use crate::views::ViewerPanel;

pub struct FolioApp {
    panel: ViewerPanel,
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<ViewerCommand>,
    update_rx: mpsc::UnboundedReceiver<ViewerUpdate>,

    // Layout tracking for the debounced refit
    last_width: f32,
    refit_deadline: Option<Instant>,
    was_fullscreen: bool,

    logger: StatusLogger,

    // Runtime handle keeps the worker's runtime reachable
    _tokio_handle: tokio::runtime::Handle,
}

impl FolioApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: StatusLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let options = ViewerOptions::default();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(
            command_rx,
            update_tx,
            options.clone(),
        ));

        Self {
            panel: ViewerPanel::new(options),
            status: String::new(),
            command_tx,
            update_rx,
            last_width: 0.0,
            refit_deadline: None,
            was_fullscreen: false,
            logger,
            _tokio_handle: tokio_handle,
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        let pixels_per_point = ctx.pixels_per_point();

        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                ViewerUpdate::Loaded {
                    doc_id,
                    page_count,
                    first_page,
                    location,
                } => {
                    self.panel.on_loaded(
                        doc_id,
                        page_count,
                        first_page,
                        pixels_per_point,
                        &self.command_tx,
                    );
                    self.status = format!("Loaded {} ({} pages)", location, page_count);
                    ctx.request_repaint();
                }
                ViewerUpdate::PageRendered {
                    page,
                    width_px,
                    height_px,
                    rgba_data,
                    natural,
                    pivot,
                    ..
                } => {
                    self.panel.on_page_rendered(
                        ctx,
                        page,
                        width_px,
                        height_px,
                        &rgba_data,
                        natural,
                        pivot,
                        pixels_per_point,
                        &self.command_tx,
                    );
                }
                ViewerUpdate::LoadFailed { location, message } => {
                    log::error!("Failed to load {}: {}", location, message);
                    self.panel.on_load_failed();
                    self.status = format!("Error: {message}");
                }
                ViewerUpdate::RenderFailed { page, message, .. } => {
                    log::error!("Failed to render page {}: {}", page, message);
                    self.panel
                        .on_render_failed(pixels_per_point, &self.command_tx);
                    self.status = format!("Error: {message}");
                }
                ViewerUpdate::Closed { .. } => {
                    self.status = "Closed document".to_string();
                }
            }
        }
    }

    /// Fullscreen transitions refit immediately; window resizes wait for a
    /// quiet period so the page is not re-rasterized on every drag tick.
    fn watch_layout(&mut self, ctx: &egui::Context) {
        let pixels_per_point = ctx.pixels_per_point();

        let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
        if fullscreen != self.was_fullscreen {
            self.was_fullscreen = fullscreen;
            self.refit_deadline = None;
            self.panel.refit(pixels_per_point, &self.command_tx);
            return;
        }

        let width = self.panel.measured_width();
        if width > 0.0 {
            if self.last_width > 0.0 && (width - self.last_width).abs() > 0.5 {
                let debounce = Duration::from_millis(self.panel.options().resize_debounce_ms);
                self.refit_deadline = Some(Instant::now() + debounce);
            }
            self.last_width = width;
        }

        if let Some(deadline) = self.refit_deadline {
            let now = Instant::now();
            if now >= deadline {
                self.refit_deadline = None;
                self.panel.refit(pixels_per_point, &self.command_tx);
            } else {
                ctx.request_repaint_after(deadline - now);
            }
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop for PDF files
        let mut dropped = None;
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    if path.extension().and_then(|s| s.to_str()) == Some("pdf") {
                        dropped = Some(path.clone());
                    }
                }
            }
        });
        if let Some(path) = dropped {
            self.panel
                .open(DocumentLocation::Path(path), &self.command_tx);
            self.status = "Loading PDF...".to_string();
        }

        self.process_updates(ctx);
        self.watch_layout(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if !self.status.is_empty() {
                    ui.label(&self.status);
                }
                if let Some(message) = self.logger.latest_message() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(message).on_hover_ui(|ui| {
                            for entry in self.logger.entries().iter().rev().take(8) {
                                ui.label(format!(
                                    "{} [{}] {}",
                                    entry.timestamp.format("%H:%M:%S"),
                                    entry.level,
                                    entry.message
                                ));
                            }
                        });
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.ui(ui, &self.command_tx, &mut self.status);
        });

        // Worker updates arrive over a plain channel; keep polling while
        // something is in flight
        if self.panel.busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
