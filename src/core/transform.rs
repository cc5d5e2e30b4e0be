//! Projection ↔ world coordinate transform.
//!
//! The projection extent is `INTERNAL_TILE_SIZE / tileSize` units wide, so view
//! zoom 0 shows the most zoomed out generated level (`globalMinZoom`) at its
//! native size. The tile grid has its own resolution ladder in which level
//! `z` lines up with view zoom `z - globalMinZoom`. The two ratios convert a
//! projection coordinate back to blocks at the most zoomed in level, where one
//! tile covers `blocksPerTile` blocks.

use serde::{Deserialize, Serialize};

use crate::core::{
    config::GlobalConfig,
    constants::{
        BLOCKS_PER_CHUNK, INTERNAL_TILE_SIZE, MAXIMUM_EXTENT_SIZE, MINIMUM_EXTENT_SIZE,
        OVERLAY_REFERENCE_ZOOM, RESOLUTION_COUNT,
    },
    geo::{BlockCoord, Point},
};

/// Values derived from [`GlobalConfig`]; see [`make_constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConstants {
    pub internal_tile_size: f64,
    pub tile_size: f64,
    pub maximum_extent_size: f64,
    pub minimum_extent_size: f64,
    /// `2^globalMinZoom`.
    pub minimum_zoom_scale: f64,
    /// `2^globalMinZoom / tileSize`, the resolution of tile grid level 0.
    pub tiles_to_pixels: f64,
    /// Projection units per pixel for tile grid levels `0..=42`.
    pub resolutions: Vec<f64>,
    pub global_min_zoom: i32,
    pub zoom_ratio_for_maximum_zoom: f64,
    pub minecraft_tiles_at_most_zoomed_in_level: f64,
}

/// Derives the resolution ladder and block ratios from `config`.
///
/// Pure: equal configs give bit-identical constants. `config` is expected to
/// have passed [`GlobalConfig::validate`].
pub fn make_constants(config: &GlobalConfig) -> DerivedConstants {
    let tile_size = f64::from(config.tile_size);
    let minimum_zoom_scale = 2_f64.powi(config.global_min_zoom);
    let tiles_to_pixels = minimum_zoom_scale / tile_size;

    let resolutions = (0..RESOLUTION_COUNT)
        .map(|z| tiles_to_pixels / 2_f64.powi(z as i32))
        .collect();

    DerivedConstants {
        internal_tile_size: INTERNAL_TILE_SIZE,
        tile_size,
        maximum_extent_size: MAXIMUM_EXTENT_SIZE,
        minimum_extent_size: MINIMUM_EXTENT_SIZE,
        minimum_zoom_scale,
        tiles_to_pixels,
        resolutions,
        global_min_zoom: config.global_min_zoom,
        zoom_ratio_for_maximum_zoom: 1.0 / 2_f64.powi(config.zoom_span()),
        minecraft_tiles_at_most_zoomed_in_level: f64::from(config.blocks_per_tile),
    }
}

impl DerivedConstants {
    /// Block under a projection coordinate, as shown by the pointer tracker.
    pub fn projection_to_block(&self, coordinate: Point) -> BlockCoord {
        let scale = self.minecraft_tiles_at_most_zoomed_in_level;
        let x = (coordinate.x / self.zoom_ratio_for_maximum_zoom * scale).floor();
        let z = (-coordinate.y / self.zoom_ratio_for_maximum_zoom * scale).floor();
        BlockCoord::new(x as i64, z as i64)
    }

    /// Projection coordinate of a world position; used to place player markers.
    pub fn block_to_projection(&self, x: f64, z: f64) -> Point {
        let scale = self.minecraft_tiles_at_most_zoomed_in_level;
        Point::new(
            x * self.zoom_ratio_for_maximum_zoom / scale,
            -z * self.zoom_ratio_for_maximum_zoom / scale,
        )
    }

    /// Projection extent `[min_x, min_y, max_x, max_y]`.
    pub fn projection_extent(&self) -> [f64; 4] {
        let edge = self.internal_tile_size / self.tile_size;
        [0.0, 0.0, edge, edge]
    }

    /// Tile grid extent `[min_x, min_y, max_x, max_y]`.
    pub fn tile_grid_extent(&self) -> [f64; 4] {
        [
            self.minimum_extent_size,
            self.minimum_extent_size,
            self.maximum_extent_size,
            self.maximum_extent_size,
        ]
    }

    /// Resolution at a fractional tile grid level.
    pub fn resolution_at(&self, zoom: f64) -> f64 {
        self.tiles_to_pixels / 2_f64.powf(zoom)
    }

    /// Projection units per pixel at view zoom 0.
    pub fn view_resolution(&self) -> f64 {
        self.projection_extent()[2] / self.internal_tile_size
    }

    /// Tile grid level drawn at a view zoom.
    pub fn tile_grid_zoom(&self, view_zoom: f64) -> i32 {
        view_zoom.round() as i32 + self.global_min_zoom
    }

    /// Projection units covered by one base tile at grid level `z`.
    pub fn tile_span(&self, z: u8) -> f64 {
        let resolution = self
            .resolutions
            .get(usize::from(z))
            .copied()
            .unwrap_or_else(|| self.resolution_at(f64::from(z)));
        resolution * self.tile_size
    }

    /// Projection units covered by one chunk edge.
    pub fn chunk_span(&self) -> f64 {
        BLOCKS_PER_CHUNK * self.zoom_ratio_for_maximum_zoom
            / self.minecraft_tiles_at_most_zoomed_in_level
    }

    /// Projection units covered by one overlay tile at overlay level `z`.
    ///
    /// At [`OVERLAY_REFERENCE_ZOOM`] an overlay tile is exactly one chunk.
    pub fn overlay_tile_span(&self, z: u8) -> f64 {
        self.chunk_span() * 2_f64.powi(OVERLAY_REFERENCE_ZOOM - i32::from(z))
    }
}

impl From<&GlobalConfig> for DerivedConstants {
    fn from(config: &GlobalConfig) -> Self {
        make_constants(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GlobalConfig {
        GlobalConfig {
            factor: 1.0,
            global_min_zoom: 15,
            global_max_zoom: 20,
            tile_size: 512,
            blocks_per_tile: 32,
        }
    }

    #[test]
    fn test_resolutions_strictly_decreasing() {
        for (min, max, tile_size) in [(15, 20, 512), (0, 1, 1), (10, 18, 256), (-2, 3, 64)] {
            let constants = make_constants(&GlobalConfig {
                factor: 1.0,
                global_min_zoom: min,
                global_max_zoom: max,
                tile_size,
                blocks_per_tile: 16,
            });
            assert_eq!(constants.resolutions.len(), 43);
            assert!(constants
                .resolutions
                .windows(2)
                .all(|pair| pair[1] < pair[0]));
        }
    }

    #[test]
    fn test_resolution_values() {
        let constants = make_constants(&config());
        assert_eq!(constants.resolutions[0], 32768.0 / 512.0);
        assert_eq!(constants.resolutions[1], 32.0);
        assert_eq!(constants.resolutions[42], 64.0 / 2_f64.powi(42));
        assert_eq!(constants.zoom_ratio_for_maximum_zoom, 1.0 / 32.0);
        assert_eq!(constants.minecraft_tiles_at_most_zoomed_in_level, 32.0);
    }

    #[test]
    fn test_make_constants_is_pure() {
        let a = make_constants(&config());
        let b = make_constants(&config());
        assert_eq!(a, b);
        for (x, y) in a.resolutions.iter().zip(&b.resolutions) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_projection_to_block_flips_z() {
        let constants = make_constants(&config());
        // one projection unit is 32 tiles of 32 blocks
        assert_eq!(
            constants.projection_to_block(Point::new(1.0, -1.0)),
            BlockCoord::new(1024, 1024)
        );
        assert_eq!(
            constants.projection_to_block(Point::new(-0.0001, 0.0001)),
            BlockCoord::new(-1, -1)
        );
        assert_eq!(constants.projection_to_block(Point::ORIGIN), BlockCoord::new(0, 0));
    }

    #[test]
    fn test_block_to_projection_inverts_pointer_mapping() {
        let constants = make_constants(&config());
        let point = constants.block_to_projection(-300.0, 1200.0);
        assert_eq!(constants.projection_to_block(point), BlockCoord::new(-300, 1200));
    }

    #[test]
    fn test_spans() {
        let constants = make_constants(&config());
        assert_eq!(constants.tile_span(0), 32768.0 / 512.0 * 512.0);
        assert_eq!(constants.chunk_span(), 16.0 / 32.0 / 32.0);
        assert_eq!(constants.overlay_tile_span(20), constants.chunk_span());
        assert_eq!(constants.overlay_tile_span(18), constants.chunk_span() * 4.0);
        assert_eq!(constants.projection_extent(), [0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_view_zoom_lines_up_with_tile_grid() {
        let constants = make_constants(&config());
        assert_eq!(constants.view_resolution(), 1.0 / 512.0);
        assert_eq!(constants.tile_grid_zoom(0.0), 15);
        assert_eq!(constants.tile_grid_zoom(2.4), 17);
        // a level-15 tile is drawn at its native 512 pixels at view zoom 0
        assert_eq!(constants.resolutions[15], constants.view_resolution());
        assert_eq!(constants.tile_span(15) / constants.view_resolution(), 512.0);
    }
}
