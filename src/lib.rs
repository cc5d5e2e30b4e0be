//! # papyrus-map
//!
//! Viewer core for Minecraft worlds rendered by PapyrusCS.
//!
//! The crate models the pieces of a tiled world map that carry state or
//! arithmetic: the layer-select control that remembers pan/zoom per dimension,
//! the projection ↔ block coordinate transform, the generated overlay tiles
//! (chunk grid and slime chunks) and the per-dimension player marker layers.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod tiles;
pub mod ui;
pub mod viewer;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::GlobalConfig,
    geo::{BlockCoord, DimensionId, Point, TileCoord},
    map::Map,
    transform::{make_constants, DerivedConstants},
    viewport::Viewport,
};

pub use crate::data::{
    layers::{LayerDescriptor, LayerRegistry, LayersDocument},
    loader::DataSource,
    players::{partition_players, PlayerMarker, PlayersDocument},
};

pub use crate::layers::{
    base::{DataLayer, LayerTrait, LayerType},
    gate::VisibilityGate,
    manager::LayerManager,
    map_tile::MapTileLayer,
    marker::MarkerLayer,
    overlay::OverlayLayer,
};

pub use crate::tiles::{
    cache::TileCache,
    overlay::{is_slime_chunk, CoordsGrid, SlimeChunks, TileGenerator},
    source::TileSource,
};

pub use crate::ui::{
    checkbox::{Checkbox, CheckboxGroup, CheckboxId, GroupId},
    controls::{LayerControls, ViewState},
};

pub use crate::viewer::Viewer;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Malformed layer key {0:?}: expected dim<N>...")]
    MalformedLayerKey(String),

    #[error("Unknown dimension id {0}")]
    UnknownDimension(i32),

    #[error("No layer is currently selected")]
    NoActiveLayer,

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initialise `env_logger` from `RUST_LOG`, defaulting to `info` for this crate.
///
/// Keeps an already installed logger, so calling this more than once is fine.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("papyrus_map=info"),
    )
    .try_init();

    if let Err(error) = result {
        log::debug!("keeping the installed logger: {}", error);
    }
}
