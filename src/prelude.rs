//! Prelude module for common papyrus-map types and traits
//!
//! Re-exports the most commonly used items for `use papyrus_map::prelude::*;`

pub use crate::core::{
    config::GlobalConfig,
    geo::{BlockCoord, ChunkCoord, DimensionId, Point, TileCoord},
    map::{Map, MapOptions},
    transform::{make_constants, DerivedConstants},
    viewport::Viewport,
};

pub use crate::data::{
    layers::{LayerDescriptor, LayerRegistry, LayersDocument},
    loader::{load_documents, DataSource, HttpDataSource, StaticSource},
    players::{partition_players, PlayerMarker, PlayersDocument},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::data::loader::DirectorySource;

pub use crate::layers::{
    base::{DataLayer, LayerTrait, LayerType},
    manager::LayerManager,
    map_tile::MapTileLayer,
    marker::{MarkerFeature, MarkerLayer},
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

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::FxHashMap as HashMap;
