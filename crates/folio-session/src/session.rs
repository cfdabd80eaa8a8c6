use crate::drag::PanTracker;
use crate::options::ViewerOptions;
use crate::pivot::PivotAnchor;
use crate::wheel::{WheelAccumulator, ZoomDirection};
use crate::zoom;

/// Scales are quantized in percent space; anything closer than this is the
/// same zoom level and must not trigger a render.
const SCALE_EPSILON: f32 = 1e-4;

/// Natural (scale 1) page size in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// No load attempted yet
    Idle,
    /// Open request sent to the document source
    Loading,
    /// Document open, pages renderable
    Ready,
    /// Open failed; the error affordance replaces the canvas
    Failed,
}

/// One unit of work for the rasterizer. Produced only by the session, which
/// guarantees at most one is outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub page: u32,
    pub scale: f32,
    /// Point to hold stationary when this render replaces the canvas
    pub pivot: Option<PivotAnchor>,
}

#[derive(Debug, Clone, Copy)]
struct PendingRender {
    page: u32,
    pivot: Option<PivotAnchor>,
}

/// State machine for one mounted viewer: current page, scale model, render
/// serialization and the pan/wheel gesture trackers.
///
/// The session never touches the canvas or the document itself; every
/// mutating call returns the `RenderRequest` the host must forward to the
/// rasterizer (or `None` when the call coalesced into a pending render or was
/// a no-op). The host reports completion back through `render_complete` /
/// `render_failed`, which hand out the follow-up request if navigation
/// arrived in the meantime.
pub struct ViewerSession {
    options: ViewerOptions,
    state: DocumentState,
    page_count: u32,
    current_page: u32,
    natural_size: PageMetrics,
    base_scale: f32,
    current_scale: f32,
    render_in_flight: bool,
    pending: Option<PendingRender>,
    pan: PanTracker,
    wheel: WheelAccumulator,
}

impl ViewerSession {
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            options,
            state: DocumentState::Idle,
            page_count: 0,
            current_page: 1,
            natural_size: PageMetrics {
                width: 0.0,
                height: 0.0,
            },
            base_scale: 1.0,
            current_scale: 1.0,
            render_in_flight: false,
            pending: None,
            pan: PanTracker::new(),
            wheel: WheelAccumulator::new(),
        }
    }

    // --- Lifecycle ---

    pub fn begin_load(&mut self) {
        self.state = DocumentState::Loading;
    }

    /// Document opened: fit page 1 to the container width and request the
    /// first render.
    pub fn document_ready(
        &mut self,
        page_count: u32,
        first_page: PageMetrics,
        container_width: f32,
    ) -> Option<RenderRequest> {
        self.state = DocumentState::Ready;
        self.page_count = page_count.max(1);
        self.current_page = 1;
        self.natural_size = first_page;
        self.base_scale = zoom::fit_width_scale(
            container_width,
            first_page.width,
            self.options.fallback_container_width,
        );
        self.current_scale = self.base_scale;

        self.request_render(1, None)
    }

    pub fn load_failed(&mut self) {
        self.state = DocumentState::Failed;
    }

    // --- Render pipeline ---

    fn request_render(&mut self, page: u32, pivot: Option<PivotAnchor>) -> Option<RenderRequest> {
        if self.render_in_flight {
            self.pending = Some(PendingRender { page, pivot });
            return None;
        }

        self.render_in_flight = true;
        Some(RenderRequest {
            page,
            scale: self.current_scale,
            pivot,
        })
    }

    /// A render resolved. `natural` is the rendered page's scale-1 size,
    /// which keeps the fit computation current as pages change.
    pub fn render_complete(&mut self, page: u32, natural: PageMetrics) -> Option<RenderRequest> {
        self.render_in_flight = false;
        if page == self.current_page {
            self.natural_size = natural;
        }
        self.issue_pending()
    }

    /// A render rejected. The pipeline recovers: the in-flight slot is freed
    /// and any deferred render is issued so navigation is never wedged on one
    /// bad page.
    pub fn render_failed(&mut self) -> Option<RenderRequest> {
        self.render_in_flight = false;
        self.issue_pending()
    }

    fn issue_pending(&mut self) -> Option<RenderRequest> {
        let pending = self.pending.take()?;
        self.request_render(pending.page, pending.pivot)
    }

    // --- Navigation ---

    pub fn prev_page(&mut self) -> Option<RenderRequest> {
        if self.state != DocumentState::Ready || self.current_page <= 1 {
            return None;
        }
        self.current_page -= 1;
        self.request_render(self.current_page, None)
    }

    pub fn next_page(&mut self) -> Option<RenderRequest> {
        if self.state != DocumentState::Ready || self.current_page >= self.page_count {
            return None;
        }
        self.current_page += 1;
        self.request_render(self.current_page, None)
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self, pivot: Option<PivotAnchor>) -> Option<RenderRequest> {
        self.step_zoom(ZoomDirection::In, pivot)
    }

    pub fn zoom_out(&mut self, pivot: Option<PivotAnchor>) -> Option<RenderRequest> {
        self.step_zoom(ZoomDirection::Out, pivot)
    }

    fn step_zoom(
        &mut self,
        direction: ZoomDirection,
        pivot: Option<PivotAnchor>,
    ) -> Option<RenderRequest> {
        if self.state != DocumentState::Ready {
            return None;
        }

        let percent = self.current_scale / self.base_scale * 100.0;
        let stepped = match direction {
            ZoomDirection::In => zoom::step_up(
                percent,
                self.options.zoom_step_percent,
                self.options.max_zoom_percent,
            ),
            ZoomDirection::Out => zoom::step_down(
                percent,
                self.options.zoom_step_percent,
                self.options.min_zoom_percent,
            ),
        };

        let target = self.base_scale * stepped / 100.0;
        if (target - self.current_scale).abs() < SCALE_EPSILON {
            return None;
        }

        self.current_scale = target;
        self.request_render(self.current_page, pivot)
    }

    /// Wheel input. Only zooms while the ctrl/cmd modifier is held; other
    /// wheel events stay with the host's native scrolling. Positive delta is
    /// scroll-down, i.e. zoom out.
    pub fn wheel(
        &mut self,
        delta: f32,
        zoom_modifier: bool,
        pivot: PivotAnchor,
    ) -> Option<RenderRequest> {
        if !zoom_modifier {
            return None;
        }

        match self
            .wheel
            .accumulate(delta, self.options.wheel_step_threshold)?
        {
            ZoomDirection::In => self.zoom_in(Some(pivot)),
            ZoomDirection::Out => self.zoom_out(Some(pivot)),
        }
    }

    // --- Pan ---

    pub fn begin_drag(&mut self, pointer: [f32; 2], scroll: [f32; 2]) {
        self.pan.begin(pointer, scroll);
    }

    pub fn drag_to(&mut self, pointer: [f32; 2]) -> Option<[f32; 2]> {
        self.pan.update(pointer)
    }

    pub fn end_drag(&mut self) {
        self.pan.end();
    }

    pub fn is_dragging(&self) -> bool {
        self.pan.is_dragging()
    }

    // --- Layout ---

    /// Container width changed (window resize or fullscreen transition):
    /// refit the current page and drop back to 100%. Goes through the same
    /// queue discipline as navigation, so a refit during an in-flight render
    /// is deferred, not overlapped.
    pub fn refit(&mut self, container_width: f32) -> Option<RenderRequest> {
        if self.state != DocumentState::Ready {
            return None;
        }

        self.base_scale = zoom::fit_width_scale(
            container_width,
            self.natural_size.width,
            self.options.fallback_container_width,
        );
        self.current_scale = self.base_scale;

        self.request_render(self.current_page, None)
    }

    // --- Accessors ---

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    /// Zoom level as shown in the controls, rounded percent of base scale
    pub fn zoom_percent(&self) -> i32 {
        (self.current_scale / self.base_scale * 100.0).round() as i32
    }

    pub fn natural_size(&self) -> PageMetrics {
        self.natural_size
    }

    /// Logical on-screen size of the page at the current scale
    pub fn content_size(&self) -> [f32; 2] {
        [
            self.natural_size.width * self.current_scale,
            self.natural_size.height * self.current_scale,
        ]
    }

    pub fn render_in_flight(&self) -> bool {
        self.render_in_flight
    }

    pub fn pending_page(&self) -> Option<u32> {
        self.pending.map(|p| p.page)
    }

    pub fn wheel_accumulated(&self) -> f32 {
        self.wheel.value()
    }
}
