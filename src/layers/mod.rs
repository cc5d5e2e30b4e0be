#[macro_use]
pub mod macros;

pub mod base;
pub mod gate;
pub mod manager;
pub mod map_tile;
pub mod marker;
pub mod overlay;

pub use base::{DataLayer, LayerProperties, LayerTrait, LayerType};
pub use gate::VisibilityGate;
pub use manager::LayerManager;
pub use map_tile::MapTileLayer;
pub use marker::{MarkerFeature, MarkerLayer, MarkerStyle};
pub use overlay::{OverlayLayer, COORDS_LAYER_KEY, SLIME_LAYER_KEY};
