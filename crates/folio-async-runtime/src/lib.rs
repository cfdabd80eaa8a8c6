// Re-export types from library crates
pub use folio_render::{DocumentData, DocumentLocation, RenderedPage};
pub use folio_session::{
    PageMetrics, PivotAnchor, RenderRequest, ViewerOptions, ViewerSession,
};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum ViewerCommand {
    Load {
        location: DocumentLocation,
    },
    RenderPage {
        doc_id: DocumentId,
        /// 1-based page number
        page: u32,
        /// Logical scale; the worker folds in `pixels_per_point`
        scale: f32,
        pixels_per_point: f32,
        /// Echoed back so the UI can re-anchor the viewport when the frame lands
        pivot: Option<PivotAnchor>,
    },
    /// Prefetch pages for faster navigation (lower priority than direct renders)
    PrefetchPages {
        doc_id: DocumentId,
        pages: Vec<u32>,
        scale: f32,
        pixels_per_point: f32,
    },
    Close {
        doc_id: DocumentId,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum ViewerUpdate {
    Loaded {
        doc_id: DocumentId,
        page_count: u32,
        first_page: PageMetrics,
        location: DocumentLocation,
    },
    PageRendered {
        doc_id: DocumentId,
        page: u32,
        width_px: u32,
        height_px: u32,
        rgba_data: Vec<u8>,
        natural: PageMetrics,
        pivot: Option<PivotAnchor>,
    },
    LoadFailed {
        location: DocumentLocation,
        message: String,
    },
    RenderFailed {
        doc_id: DocumentId,
        page: u32,
        message: String,
    },
    Closed {
        doc_id: DocumentId,
    },
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);
