use crate::{
    layers::{
        base::{DataLayer, LayerTrait},
        map_tile::MapTileLayer,
    },
    prelude::HashMap,
    MapError, Result,
};

/// Holds the map's layers, keyed by id and ordered for drawing.
#[derive(Debug, Default)]
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, DataLayer>,
    /// Layer IDs sorted by z-index; ties keep insertion order
    render_order: Vec<String>,
}

impl LayerManager {
    /// Create an empty layer manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer. Ids must be unique.
    pub fn add_layer(&mut self, layer: impl Into<DataLayer>) -> Result<()> {
        let layer = layer.into();
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id {layer_id:?}")));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Remove a layer by id, returning it if present.
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<DataLayer> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Get a layer by id.
    pub fn get_layer(&self, layer_id: &str) -> Option<&DataLayer> {
        self.layers.get(layer_id)
    }

    /// Get a mutable layer by id.
    pub fn get_layer_mut(&mut self, layer_id: &str) -> Option<&mut DataLayer> {
        self.layers.get_mut(layer_id)
    }

    /// The base tile layer with this id, if it is one.
    pub fn map_layer(&self, layer_id: &str) -> Option<&MapTileLayer> {
        self.layers.get(layer_id).and_then(DataLayer::as_map)
    }

    /// Lists all layer IDs in render order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.render_order.iter().map(String::as_str)
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&DataLayer> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id))
            .collect()
    }

    /// Applies a function to each layer immutably in render order.
    pub fn for_each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&DataLayer),
    {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                f(layer);
            }
        }
    }

    /// Applies a function to each layer mutably in render order
    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut DataLayer),
    {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get_mut(id) {
                f(layer);
            }
        }
    }

    /// Re-sorts after z-indices changed
    pub fn update_render_order(&mut self) {
        let layers = &self.layers;
        self.render_order.sort_by_key(|id| {
            layers.get(id).map(|l| l.z_index()).unwrap_or(0)
        });
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layer is registered.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
