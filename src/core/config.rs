//! Global map configuration shipped in `layers.json`.
//!
//! The generator writes one `config` object per export. It is read once at
//! startup and never changes afterwards; everything derived from it lives in
//! [`DerivedConstants`](crate::core::transform::DerivedConstants).

use serde::{Deserialize, Serialize};

use crate::{MapError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    #[serde(default = "default_factor")]
    pub factor: f64,
    /// Most zoomed out level the generator produced.
    pub global_min_zoom: i32,
    /// Most zoomed in level the generator produced.
    pub global_max_zoom: i32,
    /// Edge length of a generated tile in pixels.
    pub tile_size: u32,
    /// Blocks covered by one tile edge at `global_max_zoom`.
    pub blocks_per_tile: u32,
}

fn default_factor() -> f64 {
    1.0
}

impl GlobalConfig {
    /// Checks the values the coordinate transform divides by.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(MapError::InvalidConfig("tileSize must be positive".into()));
        }
        if self.blocks_per_tile == 0 {
            return Err(MapError::InvalidConfig(
                "blocksPerTile must be positive".into(),
            ));
        }
        if !(self.factor > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "factor must be positive, got {}",
                self.factor
            )));
        }
        if self.global_max_zoom <= self.global_min_zoom {
            return Err(MapError::InvalidConfig(format!(
                "globalMaxZoom ({}) must be greater than globalMinZoom ({})",
                self.global_max_zoom, self.global_min_zoom
            )));
        }
        Ok(())
    }

    /// Number of zoom levels between the most zoomed out and most zoomed in tiles.
    pub fn zoom_span(&self) -> i32 {
        self.global_max_zoom - self.global_min_zoom
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            factor: 1.0,
            global_min_zoom: 15,
            global_max_zoom: 20,
            tile_size: 512,
            blocks_per_tile: 32,
        }
    }
}
