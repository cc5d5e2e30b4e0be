use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::core::geo::TileCoord;

/// Default number of tiles kept per overlay layer.
pub const DEFAULT_TILE_CACHE_CAPACITY: usize = 512;

/// In-memory tile cache using LRU eviction.
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct TileCache {
    cache: Arc<Mutex<LruCache<TileCoord, Arc<Vec<u8>>>>>,
}

impl TileCache {
    /// Create a new tile cache with the given capacity (at least one tile).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Get a tile, marking it recently used.
    pub fn get(&self, coord: &TileCoord) -> Option<Arc<Vec<u8>>> {
        self.cache.lock().ok()?.get(coord).cloned()
    }

    /// Store a tile, evicting the least recently used one when full.
    pub fn put(&self, coord: TileCoord, data: Arc<Vec<u8>>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(coord, data);
        }
    }

    /// Returns the cached tile, rendering and storing it on a miss.
    ///
    /// The lock is not held while `render` runs.
    pub fn get_or_insert_with<F>(&self, coord: TileCoord, render: F) -> Arc<Vec<u8>>
    where
        F: FnOnce() -> Vec<u8>,
    {
        if let Some(tile) = self.get(&coord) {
            return tile;
        }
        let tile = Arc::new(render());
        self.put(coord, Arc::clone(&tile));
        tile
    }

    /// Check if a tile is cached without touching its recency.
    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains(coord))
            .unwrap_or(false)
    }

    /// Clear all cached tiles.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    /// Number of cached tiles.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Whether the cache holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached tiles.
    pub fn capacity(&self) -> usize {
        self.cache
            .lock()
            .map(|cache| cache.cap().get())
            .unwrap_or(0)
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_CACHE_CAPACITY)
    }
}
