use folio_async_runtime::{DocumentId, DocumentLocation, PivotAnchor, ViewerUpdate};
use tokio::sync::mpsc;

use crate::store::{CachedPage, DocumentStore, scale_key};

pub async fn handle_load(
    location: DocumentLocation,
    store: &mut DocumentStore,
    update_tx: &mpsc::UnboundedSender<ViewerUpdate>,
) {
    let data = match folio_render::fetch_document(&location).await {
        Ok(data) => data,
        Err(e) => {
            let _ = update_tx.send(ViewerUpdate::LoadFailed {
                location,
                message: e.to_string(),
            });
            return;
        }
    };

    match folio_render::open_summary(data.clone()).await {
        Ok(summary) => {
            let doc_id = store.next_id();
            store.add_document(doc_id, data);
            let _ = update_tx.send(ViewerUpdate::Loaded {
                doc_id,
                page_count: summary.page_count,
                first_page: summary.first_page,
                location,
            });
        }
        Err(e) => {
            let _ = update_tx.send(ViewerUpdate::LoadFailed {
                location,
                message: e.to_string(),
            });
        }
    }
}

pub async fn handle_render_page(
    doc_id: DocumentId,
    page: u32,
    scale: f32,
    pixels_per_point: f32,
    pivot: Option<PivotAnchor>,
    store: &mut DocumentStore,
    update_tx: &mpsc::UnboundedSender<ViewerUpdate>,
) {
    let cache_key = (doc_id, page, scale_key(scale, pixels_per_point));

    // Check cache first
    if let Some(cached) = store.get_from_cache(&cache_key) {
        let _ = update_tx.send(ViewerUpdate::PageRendered {
            doc_id,
            page,
            width_px: cached.width_px,
            height_px: cached.height_px,
            rgba_data: cached.rgba_data.clone(),
            natural: cached.natural,
            pivot,
        });
        return;
    }

    let Some(data) = store.get_document(&doc_id).cloned() else {
        let _ = update_tx.send(ViewerUpdate::RenderFailed {
            doc_id,
            page,
            message: format!("Document not found: {:?}", doc_id),
        });
        return;
    };

    match folio_render::rasterize(data, page, scale * pixels_per_point).await {
        Ok(rendered) => {
            store.add_to_cache(
                cache_key,
                CachedPage {
                    rgba_data: rendered.rgba_data.clone(),
                    width_px: rendered.width_px,
                    height_px: rendered.height_px,
                    natural: rendered.natural,
                },
            );

            let _ = update_tx.send(ViewerUpdate::PageRendered {
                doc_id,
                page,
                width_px: rendered.width_px,
                height_px: rendered.height_px,
                rgba_data: rendered.rgba_data,
                natural: rendered.natural,
                pivot,
            });
        }
        Err(e) => {
            let _ = update_tx.send(ViewerUpdate::RenderFailed {
                doc_id,
                page,
                message: e.to_string(),
            });
        }
    }
}

/// Prefetch pages into the cache without sending updates to the UI.
/// Runs silently between navigations to make page flips instant.
pub async fn handle_prefetch(
    doc_id: DocumentId,
    pages: Vec<u32>,
    scale: f32,
    pixels_per_point: f32,
    store: &mut DocumentStore,
) {
    for page in pages {
        let cache_key = (doc_id, page, scale_key(scale, pixels_per_point));

        if store.get_from_cache(&cache_key).is_some() {
            continue;
        }

        let Some(data) = store.get_document(&doc_id).cloned() else {
            return;
        };

        match folio_render::rasterize(data, page, scale * pixels_per_point).await {
            Ok(rendered) => {
                store.add_to_cache(
                    cache_key,
                    CachedPage {
                        rgba_data: rendered.rgba_data,
                        width_px: rendered.width_px,
                        height_px: rendered.height_px,
                        natural: rendered.natural,
                    },
                );
                log::debug!("Prefetched page {} into cache", page);
            }
            Err(e) => {
                log::warn!("Failed to prefetch page {}: {}", page, e);
            }
        }
    }
}

pub async fn handle_close(
    doc_id: DocumentId,
    store: &mut DocumentStore,
    update_tx: &mpsc::UnboundedSender<ViewerUpdate>,
) {
    store.remove_document(doc_id);
    let _ = update_tx.send(ViewerUpdate::Closed { doc_id });
}
