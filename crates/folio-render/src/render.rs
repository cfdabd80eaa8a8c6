use std::io::Read;
use std::path::Path;

use folio_session::PageMetrics;
use pdfium_render::prelude::*;

use crate::error::{RenderError, Result};
use crate::location::{DocumentData, DocumentLocation};

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    // Try to load from vendor directory (relative to workspace root)
    // When running from cargo, the working directory is the workspace root
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    // Fallback to system library or default search paths
    Pdfium::bind_to_system_library().map(Pdfium::new)
}

#[derive(Debug, Clone, Copy)]
pub struct DocumentSummary {
    pub page_count: u32,
    /// Natural size of page 1, used for the initial fit-width computation
    pub first_page: PageMetrics,
}

/// One rasterized page, RGBA8 at the requested scale
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub rgba_data: Vec<u8>,
    /// The page's natural (scale 1) size in points
    pub natural: PageMetrics,
}

/// Resolve a location to renderable bytes. Paths stay on disk; URLs are
/// fetched eagerly so later rasterization calls never touch the network.
pub async fn fetch_document(location: &DocumentLocation) -> Result<DocumentData> {
    match location {
        DocumentLocation::Path(path) => {
            if !tokio::fs::try_exists(path).await? {
                return Err(RenderError::Fetch(format!(
                    "No such file: {}",
                    path.display()
                )));
            }
            Ok(DocumentData::File(path.clone()))
        }
        DocumentLocation::Url(url) => {
            let url = url.clone();
            let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
                let response = ureq::get(&url)
                    .call()
                    .map_err(|e| RenderError::Fetch(e.to_string()))?;
                let mut bytes = Vec::new();
                response.into_reader().read_to_end(&mut bytes)?;
                Ok(bytes)
            })
            .await??;

            Ok(DocumentData::Bytes(std::sync::Arc::new(bytes)))
        }
    }
}

fn metrics_of(page: &PdfPage<'_>) -> PageMetrics {
    PageMetrics {
        width: page.width().value,
        height: page.height().value,
    }
}

/// Open a document far enough to know its shape
pub async fn open_summary(data: DocumentData) -> Result<DocumentSummary> {
    tokio::task::spawn_blocking(move || {
        let pdfium = init_pdfium()?;
        let document = match &data {
            DocumentData::File(path) => pdfium.load_pdf_from_file(path, None)?,
            DocumentData::Bytes(bytes) => {
                pdfium.load_pdf_from_byte_slice(bytes.as_slice(), None)?
            }
        };

        let page_count = document.pages().len() as u32;
        if page_count == 0 {
            return Err(RenderError::Pdfium("Document has no pages".to_string()));
        }

        let first = document.pages().get(0)?;
        Ok(DocumentSummary {
            page_count,
            first_page: metrics_of(&first),
        })
    })
    .await?
}

/// Natural size of one page (1-based)
pub async fn page_metrics(data: DocumentData, page_num: u32) -> Result<PageMetrics> {
    tokio::task::spawn_blocking(move || {
        let pdfium = init_pdfium()?;
        let document = match &data {
            DocumentData::File(path) => pdfium.load_pdf_from_file(path, None)?,
            DocumentData::Bytes(bytes) => {
                pdfium.load_pdf_from_byte_slice(bytes.as_slice(), None)?
            }
        };

        let page_count = document.pages().len() as u32;
        if page_num == 0 || page_num > page_count {
            return Err(RenderError::PageOutOfRange {
                page: page_num,
                page_count,
            });
        }

        let page = document.pages().get((page_num - 1) as u16)?;
        Ok(metrics_of(&page))
    })
    .await?
}

/// Rasterize one page (1-based) at `scale`, where scale 1 maps one PDF point
/// to one pixel. Callers fold the device pixel-density multiplier into
/// `scale` so the buffer comes back sized for physical pixels.
pub async fn rasterize(data: DocumentData, page_num: u32, scale: f32) -> Result<RenderedPage> {
    tokio::task::spawn_blocking(move || {
        let pdfium = init_pdfium()?;
        let document = match &data {
            DocumentData::File(path) => pdfium.load_pdf_from_file(path, None)?,
            DocumentData::Bytes(bytes) => {
                pdfium.load_pdf_from_byte_slice(bytes.as_slice(), None)?
            }
        };

        let page_count = document.pages().len() as u32;
        if page_num == 0 || page_num > page_count {
            return Err(RenderError::PageOutOfRange {
                page: page_num,
                page_count,
            });
        }

        let page = document.pages().get((page_num - 1) as u16)?;
        let natural = metrics_of(&page);

        let target_width = (natural.width * scale).round().max(1.0) as i32;
        let config = PdfRenderConfig::new().set_target_width(target_width);

        let bitmap = page.render_with_config(&config)?;
        let rgba_data = bitmap.as_rgba_bytes().to_vec();

        Ok(RenderedPage {
            page: page_num,
            width_px: bitmap.width() as u32,
            height_px: bitmap.height() as u32,
            rgba_data,
            natural,
        })
    })
    .await?
}

/// Encode a rendered page and write it out as PNG
pub async fn save_png(rendered: &RenderedPage, output_path: impl AsRef<Path>) -> Result<()> {
    let width = rendered.width_px;
    let height = rendered.height_px;
    let rgba = rendered.rgba_data.clone();
    let output_path = output_path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let img = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| RenderError::Image("Bitmap dimensions do not match data".to_string()))?;

        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| RenderError::Image(e.to_string()))?;
        Ok(bytes)
    })
    .await??;

    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}
