use crate::{
    layers::{gate::VisibilityGate, map_tile::MapTileLayer, marker::MarkerLayer, overlay::OverlayLayer},
    ui::checkbox::CheckboxId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Raster tiles produced by the generator, one per selectable render.
    Map,
    /// Raster tiles generated on demand (chunk grid, slime chunks).
    Overlay,
    /// Player positions for one dimension.
    Markers,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Map => write!(f, "map"),
            LayerType::Overlay => write!(f, "overlay"),
            LayerType::Markers => write!(f, "markers"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        let z_index = match layer_type {
            LayerType::Map => 0,
            LayerType::Overlay => 1,
            LayerType::Markers => 2,
        };
        Self {
            id,
            name,
            layer_type,
            z_index,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Operations shared by every layer kind.
pub trait LayerTrait: Send + Sync {
    /// Get layer key
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Checkboxes that must all be checked for the layer to show.
    fn gate(&self) -> &VisibilityGate;

    fn gate_mut(&mut self) -> &mut VisibilityGate;

    /// Whether the layer belongs on screen while `active` is the base layer,
    /// ignoring checkboxes.
    fn check_visible_with_layer(&self, active: &MapTileLayer) -> bool;

    /// Full visibility rule: every attached checkbox checked and the layer's
    /// own predicate satisfied.
    fn is_visible_with(&self, active: &MapTileLayer, checked: &dyn Fn(CheckboxId) -> bool) -> bool {
        self.gate().is_open(checked) && self.check_visible_with_layer(active)
    }

    /// Puts the layer under the control of a checkbox.
    fn add_checkbox(&mut self, checkbox: CheckboxId, checked: bool) {
        self.gate_mut().attach(checkbox);
        let visible = self.is_visible() && checked;
        self.set_visible(visible);
    }
}

/// Every layer the map can hold.
#[derive(Debug)]
pub enum DataLayer {
    Map(MapTileLayer),
    Overlay(OverlayLayer),
    Markers(MarkerLayer),
}

impl DataLayer {
    /// The layer behind the trait object.
    pub fn as_layer(&self) -> &dyn LayerTrait {
        match self {
            DataLayer::Map(layer) => layer,
            DataLayer::Overlay(layer) => layer,
            DataLayer::Markers(layer) => layer,
        }
    }

    pub fn as_layer_mut(&mut self) -> &mut dyn LayerTrait {
        match self {
            DataLayer::Map(layer) => layer,
            DataLayer::Overlay(layer) => layer,
            DataLayer::Markers(layer) => layer,
        }
    }

    /// The base tile layer, if this is one.
    pub fn as_map(&self) -> Option<&MapTileLayer> {
        match self {
            DataLayer::Map(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_overlay(&self) -> Option<&OverlayLayer> {
        match self {
            DataLayer::Overlay(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_markers(&self) -> Option<&MarkerLayer> {
        match self {
            DataLayer::Markers(layer) => Some(layer),
            _ => None,
        }
    }
}

impl LayerTrait for DataLayer {
    fn id(&self) -> &str {
        self.as_layer().id()
    }

    fn name(&self) -> &str {
        self.as_layer().name()
    }

    fn layer_type(&self) -> LayerType {
        self.as_layer().layer_type()
    }

    fn is_visible(&self) -> bool {
        self.as_layer().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.as_layer_mut().set_visible(visible);
    }

    fn opacity(&self) -> f32 {
        self.as_layer().opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.as_layer_mut().set_opacity(opacity);
    }

    fn z_index(&self) -> i32 {
        self.as_layer().z_index()
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.as_layer_mut().set_z_index(z_index);
    }

    fn gate(&self) -> &VisibilityGate {
        self.as_layer().gate()
    }

    fn gate_mut(&mut self) -> &mut VisibilityGate {
        self.as_layer_mut().gate_mut()
    }

    fn check_visible_with_layer(&self, active: &MapTileLayer) -> bool {
        self.as_layer().check_visible_with_layer(active)
    }
}

impl From<MapTileLayer> for DataLayer {
    fn from(layer: MapTileLayer) -> Self {
        DataLayer::Map(layer)
    }
}

impl From<OverlayLayer> for DataLayer {
    fn from(layer: OverlayLayer) -> Self {
        DataLayer::Overlay(layer)
    }
}

impl From<MarkerLayer> for DataLayer {
    fn from(layer: MarkerLayer) -> Self {
        DataLayer::Markers(layer)
    }
}
