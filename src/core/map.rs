use crate::{
    core::{
        config::GlobalConfig, constants::DEFAULT_BACKGROUND, geo::Point, transform::DerivedConstants,
        viewport::Viewport,
    },
    layers::{base::DataLayer, manager::LayerManager, map_tile::MapTileLayer},
    Result,
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub center: Point,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub size: Point,
}

impl MapOptions {
    /// Initial view for a world export: origin, fully zoomed out, every
    /// generated level reachable.
    pub fn for_config(config: &GlobalConfig) -> Self {
        Self {
            max_zoom: f64::from(config.zoom_span()),
            ..Self::default()
        }
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: Point::ORIGIN,
            zoom: 0.0,
            min_zoom: 0.0,
            max_zoom: 42.0,
            size: Point::new(800.0, 600.0),
        }
    }
}

/// The map host: a view, a background colour and the stacked data layers.
#[derive(Debug)]
pub struct Map {
    viewport: Viewport,
    layers: LayerManager,
    background: String,
}

impl Map {
    /// Creates a map whose view resolution follows `constants`.
    pub fn new(options: MapOptions, constants: &DerivedConstants) -> Self {
        let mut viewport = Viewport::new(
            options.center,
            options.zoom,
            options.size,
            constants.view_resolution(),
        );
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);

        Self {
            viewport,
            layers: LayerManager::new(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }

    /// Get the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn center(&self) -> Point {
        self.viewport.center
    }

    /// Centers the view on a projection point.
    pub fn set_center(&mut self, center: Point) {
        self.viewport.set_center(center);
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    /// Sets the zoom, clamped to the viewport limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    /// Sets the CSS colour painted behind the tiles.
    pub fn set_background(&mut self, background: impl Into<String>) {
        self.background = background.into();
    }

    /// Adds a layer on top of the existing ones.
    pub fn add_layer(&mut self, layer: impl Into<DataLayer>) -> Result<()> {
        self.layers.add_layer(layer.into())
    }

    /// Get the layer manager.
    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    /// Base layer registered under `key`, if it exists and is a map layer.
    pub fn tile_layer(&self, key: &str) -> Option<&MapTileLayer> {
        self.layers.map_layer(key)
    }
}
