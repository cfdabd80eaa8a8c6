use folio_async_runtime::{ViewerCommand, ViewerUpdate};
use folio_session::ViewerOptions;
use tokio::sync::mpsc;

use crate::handlers;
use crate::store::DocumentStore;

/// Async worker task that opens documents and rasterizes pages.
///
/// The loop is single-consumer, so rasterizations complete in the order they
/// were issued; together with the session's one-render-in-flight discipline a
/// stale frame can never overtake a newer one.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: mpsc::UnboundedSender<ViewerUpdate>,
    options: ViewerOptions,
) {
    let mut store = DocumentStore::new(options.page_cache_size);

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut store, &mut command_rx, &update_tx).await;
    }
}

async fn process_command(
    cmd: ViewerCommand,
    store: &mut DocumentStore,
    command_rx: &mut mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: &mpsc::UnboundedSender<ViewerUpdate>,
) {
    match cmd {
        ViewerCommand::Load { location } => {
            handlers::viewer::handle_load(location, store, update_tx).await;
        }
        ViewerCommand::RenderPage {
            mut doc_id,
            mut page,
            mut scale,
            mut pixels_per_point,
            mut pivot,
        } => {
            // Deduplicate render commands - keep the most recent one
            while let Ok(next_cmd) = command_rx.try_recv() {
                match next_cmd {
                    ViewerCommand::RenderPage {
                        doc_id: new_doc_id,
                        page: new_page,
                        scale: new_scale,
                        pixels_per_point: new_ppp,
                        pivot: new_pivot,
                    } => {
                        log::debug!("Discarding queued page render, using newer request");
                        doc_id = new_doc_id;
                        page = new_page;
                        scale = new_scale;
                        pixels_per_point = new_ppp;
                        pivot = new_pivot;
                    }
                    ViewerCommand::PrefetchPages { .. } => {
                        // Discard prefetch commands when we have a direct render pending
                        log::debug!("Discarding prefetch during page navigation");
                    }
                    other => {
                        // Non-render command found, process it before the render
                        Box::pin(process_command(other, store, command_rx, update_tx)).await;
                    }
                }
            }

            handlers::viewer::handle_render_page(
                doc_id,
                page,
                scale,
                pixels_per_point,
                pivot,
                store,
                update_tx,
            )
            .await;
        }
        ViewerCommand::PrefetchPages {
            doc_id,
            pages,
            scale,
            pixels_per_point,
        } => {
            handlers::viewer::handle_prefetch(doc_id, pages, scale, pixels_per_point, store).await;
        }
        ViewerCommand::Close { doc_id } => {
            handlers::viewer::handle_close(doc_id, store, update_tx).await;
        }
    }
}
