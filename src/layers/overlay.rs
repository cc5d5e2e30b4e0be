use std::sync::Arc;

use crate::{
    core::geo::{DimensionId, TileCoord},
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        gate::VisibilityGate,
        map_tile::MapTileLayer,
    },
    tiles::{
        cache::TileCache,
        overlay::{CoordsGrid, SlimeChunks, TileGenerator},
    },
};

pub const COORDS_LAYER_KEY: &str = "coords";
pub const SLIME_LAYER_KEY: &str = "slime";

/// A layer whose tiles are generated on demand and kept in an LRU cache.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    properties: LayerProperties,
    generator: Arc<dyn TileGenerator>,
    /// Restricts the overlay to base layers of one dimension.
    dimension: Option<DimensionId>,
    gate: VisibilityGate,
    cache: TileCache,
}

impl OverlayLayer {
    /// Creates an overlay layer drawing tiles with `generator`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        generator: Arc<dyn TileGenerator>,
        dimension: Option<DimensionId>,
    ) -> Self {
        Self {
            properties: LayerProperties::new(id.into(), name.into(), LayerType::Overlay),
            generator,
            dimension,
            gate: VisibilityGate::new(),
            cache: TileCache::default(),
        }
    }

    /// Chunk grid, shown over every dimension.
    pub fn coords() -> Self {
        Self::new(COORDS_LAYER_KEY, "Coordinates", Arc::new(CoordsGrid), None)
    }

    /// Slime chunks only exist in the overworld.
    pub fn slime() -> Self {
        Self::new(
            SLIME_LAYER_KEY,
            "Slime chunks",
            Arc::new(SlimeChunks),
            Some(DimensionId::OVERWORLD),
        )
    }

    /// Replaces the tile cache, e.g. to share one between layers.
    pub fn with_cache(mut self, cache: TileCache) -> Self {
        self.cache = cache;
        self
    }

    /// Dimension the overlay is restricted to, if any.
    pub fn dimension(&self) -> Option<DimensionId> {
        self.dimension
    }

    /// Get the tile cache.
    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    /// RGBA bytes of the tile at `coord`, `OVERLAY_TILE_SIZE` pixels square.
    pub fn tile(&self, coord: TileCoord) -> Arc<Vec<u8>> {
        self.cache.get_or_insert_with(coord, || {
            log::trace!("generating {} tile {}", self.properties.id, coord);
            self.generator.generate(coord).into_raw()
        })
    }
}

impl LayerTrait for OverlayLayer {
    crate::impl_layer_trait!(properties, gate);

    fn check_visible_with_layer(&self, active: &MapTileLayer) -> bool {
        self.dimension
            .map_or(true, |dimension| dimension == active.dimension_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::constants::OVERLAY_TILE_SIZE, layers::map_tile::tests::descriptor};

    #[test]
    fn test_slime_overlay_follows_overworld() {
        let slime = OverlayLayer::slime();
        let overworld = MapTileLayer::new("dim0", descriptor("Overworld", 0, "dim0"));
        let strongholds =
            MapTileLayer::new("dim0_stronghold", descriptor("Strongholds", 0, "strongholds"));
        let nether = MapTileLayer::new("dim1", descriptor("Nether", 1, "dim1"));

        assert!(slime.check_visible_with_layer(&overworld));
        assert!(slime.check_visible_with_layer(&strongholds));
        assert!(!slime.check_visible_with_layer(&nether));
        assert!(OverlayLayer::coords().check_visible_with_layer(&nether));
    }

    #[test]
    fn test_tiles_are_memoized() {
        let coords = OverlayLayer::coords().with_cache(TileCache::new(8));
        let coord = TileCoord::new(20, 1, 1);

        let first = coords.tile(coord);
        let second = coords.tile(coord);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), (OVERLAY_TILE_SIZE * OVERLAY_TILE_SIZE * 4) as usize);
        assert_eq!(coords.cache().len(), 1);
    }
}
