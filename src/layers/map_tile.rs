use crate::{
    core::geo::{DimensionId, TileCoord},
    data::layers::LayerDescriptor,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        gate::VisibilityGate,
    },
    tiles::source::{folder_tile_url, TileSource},
};

/// A pre-rendered tile layer, one per entry of the layer registry.
///
/// These are the layers the radio buttons switch between.
#[derive(Debug, Clone)]
pub struct MapTileLayer {
    properties: LayerProperties,
    descriptor: LayerDescriptor,
    gate: VisibilityGate,
}

impl MapTileLayer {
    /// Creates a base layer for the registry entry `key`.
    pub fn new(key: impl Into<String>, descriptor: LayerDescriptor) -> Self {
        let properties =
            LayerProperties::new(key.into(), descriptor.name.clone(), LayerType::Map);
        Self {
            properties,
            descriptor,
            gate: VisibilityGate::new(),
        }
    }

    /// Registry key, e.g. `dim0` or `dim0_stronghold`.
    pub fn key(&self) -> &str {
        &self.properties.id
    }

    /// Get the normalized descriptor.
    pub fn descriptor(&self) -> &LayerDescriptor {
        &self.descriptor
    }

    /// Dimension whose view this layer shares.
    pub fn dimension_id(&self) -> DimensionId {
        self.descriptor.dimension_id
    }
}

impl TileSource for MapTileLayer {
    fn url(&self, coord: TileCoord) -> String {
        folder_tile_url(
            &self.descriptor.folder,
            &self.descriptor.file_extension,
            coord,
        )
    }
}

impl LayerTrait for MapTileLayer {
    crate::impl_layer_trait!(properties, gate);

    /// A base layer only shows while it is the active one.
    fn check_visible_with_layer(&self, active: &MapTileLayer) -> bool {
        active.key() == self.key()
    }
}
