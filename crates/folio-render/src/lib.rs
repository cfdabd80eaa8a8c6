mod error;
mod location;
mod render;

pub use error::{RenderError, Result};
pub use location::{DocumentData, DocumentLocation};
pub use render::{
    DocumentSummary, RenderedPage, fetch_document, init_pdfium, open_summary, page_metrics,
    rasterize, save_png,
};
