use eframe::egui;
use folio_async_runtime::{DocumentId, DocumentLocation, ViewerCommand};
use folio_session::{
    DocumentState, PageMetrics, PivotAnchor, RenderRequest, ViewerOptions, ViewerSession,
    ZoomDirection,
};
use tokio::sync::mpsc;

/// The mounted viewer: owns its session, the page texture and all input
/// wiring inside the central panel. The app shell feeds it worker updates
/// and asks it to refit on layout changes.
pub struct ViewerPanel {
    session: ViewerSession,
    doc_id: Option<DocumentId>,
    source: Option<DocumentLocation>,
    texture: Option<egui::TextureHandle>,
    scroll_offset: egui::Vec2,
    /// Scroll target to force on the next frame (pivot correction or pan)
    pending_scroll: Option<egui::Vec2>,
    /// Zoom button press, resolved against the viewport rect during layout
    zoom_clicked: Option<ZoomDirection>,
    location_input: String,
    measured_width: f32,
}

impl ViewerPanel {
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            session: ViewerSession::new(options),
            doc_id: None,
            source: None,
            texture: None,
            scroll_offset: egui::Vec2::ZERO,
            pending_scroll: None,
            zoom_clicked: None,
            location_input: String::new(),
            measured_width: 0.0,
        }
    }

    pub fn options(&self) -> &ViewerOptions {
        self.session.options()
    }

    /// Host region width observed during the last frame
    pub fn measured_width(&self) -> f32 {
        self.measured_width
    }

    pub fn busy(&self) -> bool {
        self.session.state() == DocumentState::Loading || self.session.render_in_flight()
    }

    // --- Worker plumbing ---

    pub fn open(
        &mut self,
        location: DocumentLocation,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        // Let the worker drop the previous document's bytes and cache
        if let Some(doc_id) = self.doc_id.take() {
            let _ = command_tx.send(ViewerCommand::Close { doc_id });
        }

        self.reset();
        self.source = Some(location.clone());
        self.session.begin_load();
        log::info!("Opening {}", location);
        let _ = command_tx.send(ViewerCommand::Load { location });
    }

    pub fn on_loaded(
        &mut self,
        doc_id: DocumentId,
        page_count: u32,
        first_page: PageMetrics,
        pixels_per_point: f32,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        self.doc_id = Some(doc_id);
        let request = self
            .session
            .document_ready(page_count, first_page, self.measured_width);
        self.forward_render(request, pixels_per_point, command_tx);
    }

    pub fn on_load_failed(&mut self) {
        self.session.load_failed();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn on_page_rendered(
        &mut self,
        ctx: &egui::Context,
        page: u32,
        width_px: u32,
        height_px: u32,
        rgba_data: &[u8],
        natural: PageMetrics,
        pivot: Option<PivotAnchor>,
        pixels_per_point: f32,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width_px as usize, height_px as usize],
            rgba_data,
        );

        if let Some(texture) = &mut self.texture {
            texture.set(color_image, egui::TextureOptions::default());
        } else {
            self.texture =
                Some(ctx.load_texture("pdf_page", color_image, egui::TextureOptions::default()));
        }

        let follow_up = self.session.render_complete(page, natural);

        // Re-anchor the viewport before the new frame is shown
        if let Some(pivot) = pivot {
            let scroll = pivot.scroll_after_resize(self.session.content_size());
            self.pending_scroll = Some(egui::vec2(scroll[0], scroll[1]));
        }

        if follow_up.is_some() {
            self.forward_render(follow_up, pixels_per_point, command_tx);
        } else if self.session.options().prefetch_adjacent {
            self.prefetch_neighbors(pixels_per_point, command_tx);
        }
    }

    pub fn on_render_failed(
        &mut self,
        pixels_per_point: f32,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        let follow_up = self.session.render_failed();
        self.forward_render(follow_up, pixels_per_point, command_tx);
    }

    /// Container width changed: refit the current page
    pub fn refit(
        &mut self,
        pixels_per_point: f32,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        let request = self.session.refit(self.measured_width);
        self.forward_render(request, pixels_per_point, command_tx);
    }

    fn forward_render(
        &mut self,
        request: Option<RenderRequest>,
        pixels_per_point: f32,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        let Some(request) = request else { return };
        let Some(doc_id) = self.doc_id else { return };

        let _ = command_tx.send(ViewerCommand::RenderPage {
            doc_id,
            page: request.page,
            scale: request.scale,
            pixels_per_point,
            pivot: request.pivot,
        });
    }

    fn prefetch_neighbors(
        &self,
        pixels_per_point: f32,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
    ) {
        let Some(doc_id) = self.doc_id else { return };

        let page = self.session.current_page();
        let pages: Vec<u32> = [page.checked_sub(1), Some(page + 1)]
            .into_iter()
            .flatten()
            .filter(|p| *p >= 1 && *p <= self.session.page_count())
            .collect();

        if pages.is_empty() {
            return;
        }

        let _ = command_tx.send(ViewerCommand::PrefetchPages {
            doc_id,
            pages,
            scale: self.session.current_scale(),
            pixels_per_point,
        });
    }

    fn reset(&mut self) {
        let options = self.session.options().clone();
        self.session = ViewerSession::new(options);
        self.doc_id = None;
        self.source = None;
        self.texture = None;
        self.scroll_offset = egui::Vec2::ZERO;
        self.pending_scroll = None;
        self.zoom_clicked = None;
    }

    // --- UI ---

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
        status: &mut String,
    ) {
        self.measured_width = ui.available_width();

        match self.session.state() {
            DocumentState::Idle => self.open_ui(ui, command_tx, status),
            DocumentState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(50.0);
                    ui.spinner();
                    ui.label("Loading document…");
                });
            }
            DocumentState::Failed => self.error_ui(ui),
            DocumentState::Ready => {
                self.controls_ui(ui, command_tx);
                ui.separator();
                self.canvas_ui(ui, command_tx);
            }
        }
    }

    fn open_ui(
        &mut self,
        ui: &mut egui::Ui,
        command_tx: &mpsc::UnboundedSender<ViewerCommand>,
        status: &mut String,
    ) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.heading("Folio Viewer");
            ui.add_space(20.0);
            ui.label("Drop a PDF file here or click to open");
            ui.add_space(10.0);

            if ui.button("Open PDF…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    self.open(DocumentLocation::Path(path), command_tx);
                    *status = "Loading PDF...".to_string();
                }
            }

            ui.add_space(20.0);
            ui.label("Or open from a URL:");
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 4.0);
                ui.text_edit_singleline(&mut self.location_input);
                let has_input = !self.location_input.trim().is_empty();
                if ui.add_enabled(has_input, egui::Button::new("Open URL")).clicked() {
                    let location = DocumentLocation::parse(&self.location_input);
                    self.open(location, command_tx);
                    *status = "Loading PDF...".to_string();
                }
            });
        });
    }

    fn error_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("Error loading drawings.");

            if let Some(source) = self.source.clone() {
                if ui.link(format!("Download from {}", source)).clicked() {
                    if let Err(e) = open::that(source.to_string()) {
                        log::warn!("Failed to open {}: {}", source, e);
                    }
                }
            }

            ui.add_space(10.0);
            if ui.button("Open another document").clicked() {
                self.reset();
            }
        });
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui, command_tx: &mpsc::UnboundedSender<ViewerCommand>) {
        let pixels_per_point = ui.ctx().pixels_per_point();

        ui.horizontal(|ui| {
            let can_go_back = self.session.current_page() > 1;
            let can_go_forward = self.session.current_page() < self.session.page_count();

            if ui
                .add_enabled(can_go_back, egui::Button::new("◀ Prev"))
                .clicked()
            {
                let request = self.session.prev_page();
                self.forward_render(request, pixels_per_point, command_tx);
            }

            ui.label(format!(
                "Page {} of {}",
                self.session.current_page(),
                self.session.page_count()
            ));

            if ui
                .add_enabled(can_go_forward, egui::Button::new("Next ▶"))
                .clicked()
            {
                let request = self.session.next_page();
                self.forward_render(request, pixels_per_point, command_tx);
            }

            ui.separator();

            // The actual zoom happens in canvas_ui where the viewport rect
            // for the center pivot is known
            if ui.button("−").clicked() {
                self.zoom_clicked = Some(ZoomDirection::Out);
            }
            ui.label(format!("{}%", self.session.zoom_percent()));
            if ui.button("+").clicked() {
                self.zoom_clicked = Some(ZoomDirection::In);
            }

            ui.separator();

            let fullscreen = ui.input(|i| i.viewport().fullscreen.unwrap_or(false));
            let label = if fullscreen {
                "Exit fullscreen"
            } else {
                "Fullscreen"
            };
            if ui.button(label).clicked() {
                ui.ctx()
                    .send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
            }

            if self.session.render_in_flight() {
                ui.separator();
                ui.spinner();
            }
        });
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui, command_tx: &mpsc::UnboundedSender<ViewerCommand>) {
        let pixels_per_point = ui.ctx().pixels_per_point();
        let zoom_modifier = ui.input(|i| i.modifiers.command || i.modifiers.ctrl);

        let content = self.session.content_size();
        let content_size = egui::vec2(content[0], content[1]);

        let mut area = egui::ScrollArea::both()
            .id_salt("pdf_canvas")
            .auto_shrink([false, false])
            // Modifier-wheel is ours; during a pan the drag drives the offset
            .enable_scrolling(!zoom_modifier && !self.session.is_dragging());
        if let Some(target) = self.pending_scroll.take() {
            area = area.scroll_offset(target);
        }

        let output = area.show(ui, |ui| {
            if let Some(texture) = &self.texture {
                // The texture holds physical pixels; the widget box is the
                // logical content size, which keeps high-DPI frames sharp
                // without changing layout
                let image = egui::Image::new((texture.id(), content_size))
                    .sense(egui::Sense::click_and_drag());
                Some(ui.add(image))
            } else {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                None
            }
        });

        self.scroll_offset = output.state.offset;
        let viewport = output.inner_rect;

        // Drag-to-pan
        if let Some(response) = output.inner {
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.session.begin_drag(
                        [pos.x, pos.y],
                        [self.scroll_offset.x, self.scroll_offset.y],
                    );
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some(scroll) = self.session.drag_to([pos.x, pos.y]) {
                        self.pending_scroll =
                            Some(egui::vec2(scroll[0].max(0.0), scroll[1].max(0.0)));
                    }
                }
            }
            if response.drag_stopped() {
                self.session.end_drag();
            }
        }

        // Pointer leaving the viewport ends the gesture like a release
        let pointer_pos = ui.input(|i| i.pointer.hover_pos());
        if self.session.is_dragging() && !pointer_pos.is_some_and(|pos| viewport.contains(pos)) {
            self.session.end_drag();
        }

        // Modifier-wheel zoom, anchored at the pointer
        let raw_scroll = ui.input(|i| i.raw_scroll_delta);
        if zoom_modifier && raw_scroll.y != 0.0 {
            if let Some(pos) = pointer_pos.filter(|pos| viewport.contains(*pos)) {
                let pivot = PivotAnchor::from_pointer(
                    [pos.x - viewport.min.x, pos.y - viewport.min.y],
                    [self.scroll_offset.x, self.scroll_offset.y],
                    content,
                );
                // Wheel-toward-user is a positive delta, i.e. zoom out
                let request = self.session.wheel(-raw_scroll.y, true, pivot);
                self.forward_render(request, pixels_per_point, command_tx);
            }
        }

        // Button zoom, anchored at the viewport center
        if let Some(direction) = self.zoom_clicked.take() {
            let pivot = PivotAnchor::from_viewport_center(
                [viewport.width(), viewport.height()],
                [self.scroll_offset.x, self.scroll_offset.y],
                content,
            );
            let request = match direction {
                ZoomDirection::In => self.session.zoom_in(Some(pivot)),
                ZoomDirection::Out => self.session.zoom_out(Some(pivot)),
            };
            self.forward_render(request, pixels_per_point, command_tx);
        }
    }
}
