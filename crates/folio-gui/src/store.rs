use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use folio_async_runtime::{DocumentData, DocumentId};
use folio_session::PageMetrics;

/// Cached rasterization of one page at one physical scale
pub struct CachedPage {
    pub rgba_data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub natural: PageMetrics,
}

/// (document, page, quantized physical scale)
pub type CacheKey = (DocumentId, u32, u32);

/// Quantize the physical scale so cache keys survive float round-trips.
/// Different zoom levels and pixel densities must not alias to one key.
pub fn scale_key(scale: f32, pixels_per_point: f32) -> u32 {
    (scale * pixels_per_point * 1000.0).round() as u32
}

/// Worker-side state: opened documents plus an LRU cache of rasterized pages
pub struct DocumentStore {
    documents: HashMap<DocumentId, DocumentData>,
    page_cache: HashMap<CacheKey, CachedPage>,
    cache_order: VecDeque<CacheKey>,
    max_cached_pages: usize,
    next_doc_id: AtomicU64,
}

impl DocumentStore {
    pub fn new(max_cached_pages: usize) -> Self {
        Self {
            documents: HashMap::new(),
            page_cache: HashMap::new(),
            cache_order: VecDeque::new(),
            max_cached_pages: max_cached_pages.max(1),
            next_doc_id: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> DocumentId {
        DocumentId(self.next_doc_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn add_document(&mut self, doc_id: DocumentId, data: DocumentData) {
        self.documents.insert(doc_id, data);
    }

    pub fn get_document(&self, doc_id: &DocumentId) -> Option<&DocumentData> {
        self.documents.get(doc_id)
    }

    pub fn add_to_cache(&mut self, key: CacheKey, page: CachedPage) {
        // Re-inserting an existing key refreshes its LRU position
        if self.page_cache.contains_key(&key) {
            self.cache_order.retain(|k| k != &key);
        }

        while self.cache_order.len() >= self.max_cached_pages {
            if let Some(old_key) = self.cache_order.pop_front() {
                self.page_cache.remove(&old_key);
            }
        }

        self.page_cache.insert(key, page);
        self.cache_order.push_back(key);
    }

    pub fn get_from_cache(&mut self, key: &CacheKey) -> Option<&CachedPage> {
        if self.page_cache.contains_key(key) {
            self.cache_order.retain(|k| k != key);
            self.cache_order.push_back(*key);
            self.page_cache.get(key)
        } else {
            None
        }
    }

    pub fn remove_document(&mut self, doc_id: DocumentId) {
        self.documents.remove(&doc_id);
        self.cache_order.retain(|(id, _, _)| *id != doc_id);
        self.page_cache.retain(|(id, _, _), _| *id != doc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> CachedPage {
        CachedPage {
            rgba_data: vec![0; 16],
            width_px: 2,
            height_px: 2,
            natural: PageMetrics {
                width: 100.0,
                height: 100.0,
            },
        }
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut store = DocumentStore::new(2);
        let doc = store.next_id();

        store.add_to_cache((doc, 1, 1000), page());
        store.add_to_cache((doc, 2, 1000), page());

        // Touch page 1 so page 2 becomes the eviction candidate
        assert!(store.get_from_cache(&(doc, 1, 1000)).is_some());

        store.add_to_cache((doc, 3, 1000), page());
        assert!(store.get_from_cache(&(doc, 1, 1000)).is_some());
        assert!(store.get_from_cache(&(doc, 2, 1000)).is_none());
        assert!(store.get_from_cache(&(doc, 3, 1000)).is_some());
    }

    #[test]
    fn test_scale_key_separates_zoom_levels() {
        // 100% and 125% at the same pixel density must not alias
        assert_ne!(scale_key(2.0, 1.0), scale_key(2.5, 1.0));
        // Same zoom on a 2x display is a different buffer too
        assert_ne!(scale_key(2.0, 1.0), scale_key(2.0, 2.0));
        // But the same request maps to the same key
        assert_eq!(scale_key(2.0, 1.5), scale_key(2.0, 1.5));
    }

    #[test]
    fn test_remove_document_drops_its_pages() {
        let mut store = DocumentStore::new(8);
        let doc_a = store.next_id();
        let doc_b = store.next_id();
        assert_ne!(doc_a, doc_b);

        store.add_to_cache((doc_a, 1, 1000), page());
        store.add_to_cache((doc_b, 1, 1000), page());

        store.remove_document(doc_a);
        assert!(store.get_from_cache(&(doc_a, 1, 1000)).is_none());
        assert!(store.get_from_cache(&(doc_b, 1, 1000)).is_some());
    }
}
