use pdfium_render::prelude::PdfiumError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Fetch error: {0}")]
    Fetch(String),
    #[error("PDF error: {0}")]
    Pdfium(String),
    #[error("Page {page} out of range 1..={page_count}")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("Image error: {0}")]
    Image(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<PdfiumError> for RenderError {
    fn from(err: PdfiumError) -> Self {
        Self::Pdfium(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
