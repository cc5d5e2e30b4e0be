pub mod cache;
pub mod overlay;
pub mod source;

// Re-exports for convenience
pub use cache::TileCache;
pub use overlay::{is_slime_chunk, CoordsGrid, SlimeChunks, TileGenerator};
pub use source::{folder_tile_url, TileSource};
