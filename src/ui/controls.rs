//! The layer switcher: radio buttons for base layers, checkbox groups for the
//! data layers on top, and the pointer location readout.
//!
//! Switching base layers keeps one remembered view (center and zoom) per
//! dimension, so jumping from the overworld to the nether and back returns to
//! where the overworld was left.

use crate::{
    core::{
        config::GlobalConfig,
        constants::DEFAULT_BACKGROUND,
        geo::{BlockCoord, DimensionId, Point},
        map::Map,
        transform::{make_constants, DerivedConstants},
    },
    layers::{
        base::{DataLayer, LayerTrait},
        map_tile::MapTileLayer,
    },
    prelude::HashMap,
    ui::checkbox::{Checkbox, CheckboxGroup, CheckboxId, GroupId},
    MapError, Result,
};

/// Per-dimension view memory and the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub current_selected_layer: Option<String>,
    pub remembered_centers: HashMap<DimensionId, Point>,
    pub remembered_zoom: HashMap<DimensionId, f64>,
}

/// One radio button of the base layer list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRadio {
    pub key: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug)]
pub struct LayerControls {
    config: GlobalConfig,
    constants: DerivedConstants,
    view_state: ViewState,
    radios: Vec<LayerRadio>,
    checkboxes: Vec<Checkbox>,
    groups: Vec<CheckboxGroup>,
    location: BlockCoord,
    attached: bool,
}

impl LayerControls {
    /// Creates detached controls for `config`, rejecting degenerate values.
    pub fn new(config: GlobalConfig) -> Result<Self> {
        config.validate()?;
        let constants = make_constants(&config);
        Ok(Self {
            config,
            constants,
            view_state: ViewState::default(),
            radios: Vec::new(),
            checkboxes: Vec::new(),
            groups: Vec::new(),
            location: BlockCoord::default(),
            attached: false,
        })
    }

    /// Registers a base layer and its radio button.
    ///
    /// The first layer starts checked and visible, later ones hidden.
    pub fn add_layer(&mut self, map: &mut Map, mut layer: MapTileLayer) -> Result<()> {
        let first = self.radios.is_empty();
        layer.set_visible(first);

        let radio = LayerRadio {
            key: layer.key().to_string(),
            label: layer.name().to_string(),
            checked: first,
        };
        map.add_layer(layer)?;

        if first {
            self.view_state.current_selected_layer = Some(radio.key.clone());
        }
        self.radios.push(radio);
        Ok(())
    }

    /// Connects the controls to `map` and selects the first layer.
    pub fn attach(&mut self, map: &mut Map) {
        self.attached = true;
        self.view_state.current_selected_layer = None;

        if let Some(first) = self.radios.first().map(|radio| radio.key.clone()) {
            self.click_radio(map, &first);
        }
    }

    /// Disconnects the controls; clicks are ignored until the next `attach`.
    pub fn detach(&mut self) {
        self.attached = false;
        self.view_state.current_selected_layer = None;
    }

    /// Whether the controls currently drive a map.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Handles a click on the radio of layer `key`.
    pub fn click_radio(&mut self, map: &mut Map, key: &str) -> bool {
        self.select_layer(map, key)
    }

    /// Makes `key` the active base layer. Returns whether anything changed.
    pub fn select_layer(&mut self, map: &mut Map, key: &str) -> bool {
        if !self.attached {
            log::debug!("ignoring selection of {} while detached", key);
            return false;
        }
        if self.view_state.current_selected_layer.as_deref() == Some(key) {
            return false;
        }
        let Some(layer) = map.tile_layer(key).cloned() else {
            log::debug!("ignoring selection of unknown layer {}", key);
            return false;
        };
        let descriptor = layer.descriptor();

        map.set_background(
            descriptor
                .background
                .as_deref()
                .unwrap_or(DEFAULT_BACKGROUND),
        );

        self.recompute_visibility(map, &layer, None);

        let new_group = layer.dimension_id();
        let old_group = self
            .view_state
            .current_selected_layer
            .as_deref()
            .and_then(|old| map.tile_layer(old))
            .map(MapTileLayer::dimension_id);

        if let Some(old_group) = old_group {
            self.view_state
                .remembered_centers
                .insert(old_group, map.center());
            self.view_state.remembered_zoom.insert(old_group, map.zoom());
        }

        let (min_zoom, max_zoom) = descriptor.view_zoom_range(&self.config);
        map.viewport_mut().set_zoom_limits(min_zoom, max_zoom);

        let center = self
            .view_state
            .remembered_centers
            .get(&new_group)
            .copied()
            .unwrap_or(Point::ORIGIN);
        let zoom = self
            .view_state
            .remembered_zoom
            .get(&new_group)
            .copied()
            .unwrap_or(min_zoom);
        map.set_center(center);
        map.set_zoom(zoom);

        log::debug!(
            "selected layer {} (dimension {}) at {:?}, zoom {}",
            key,
            new_group,
            center,
            zoom
        );

        self.view_state.current_selected_layer = Some(key.to_string());
        for radio in &mut self.radios {
            radio.checked = radio.key == key;
        }
        self.refresh_groups(&layer);
        true
    }

    /// The active base layer.
    pub fn current_selected_tile_layer<'a>(&self, map: &'a Map) -> Result<&'a MapTileLayer> {
        self.view_state
            .current_selected_layer
            .as_deref()
            .and_then(|key| map.tile_layer(key))
            .ok_or(MapError::NoActiveLayer)
    }

    /// Adds an empty checkbox group and returns its id.
    pub fn create_checkbox_group(&mut self, map: &Map, title: Option<String>) -> GroupId {
        self.groups.push(CheckboxGroup::new(title));
        self.refresh_for_active(map);
        GroupId(self.groups.len() - 1)
    }

    /// Adds `checkbox` to `group`, hidden right away if it does not show for
    /// the active layer.
    pub fn add_checkbox(
        &mut self,
        map: &Map,
        group: GroupId,
        checkbox: Checkbox,
    ) -> Result<CheckboxId> {
        let id = CheckboxId(self.checkboxes.len());
        let group = self
            .groups
            .get_mut(group.0)
            .ok_or_else(|| MapError::Layer(format!("no checkbox group {}", group.0)))?;
        group.checkboxes.push(id);
        self.checkboxes.push(checkbox);
        self.refresh_for_active(map);
        Ok(id)
    }

    fn refresh_for_active(&mut self, map: &Map) {
        if let Ok(active) = self.current_selected_tile_layer(map) {
            self.refresh_groups(active);
        }
    }

    /// Puts the layer `layer_key` under the control of checkbox `id`.
    pub fn attach_checkbox(&self, map: &mut Map, layer_key: &str, id: CheckboxId) -> Result<()> {
        let checked = self.checkbox(id)?.checked;
        let layer = map
            .layers_mut()
            .get_layer_mut(layer_key)
            .ok_or_else(|| MapError::Layer(format!("no layer {layer_key:?}")))?;
        layer.add_checkbox(id, checked);
        Ok(())
    }

    /// Toggles a checkbox and updates every layer it applies to.
    pub fn set_checkbox(&mut self, map: &mut Map, id: CheckboxId, checked: bool) -> Result<()> {
        let filter = self.checkbox(id)?.applies_filter();
        let active = self.current_selected_tile_layer(map)?.clone();

        if let Some(checkbox) = self.checkboxes.get_mut(id.0) {
            checkbox.checked = checked;
        }
        log::debug!("checkbox {} set to {}", id.0, checked);

        let filter = filter.as_deref();
        self.recompute_visibility(map, &active, filter);
        Ok(())
    }

    /// Recomputes the visibility of every layer matched by `filter` (all when
    /// `None`) against `active`.
    fn recompute_visibility(
        &self,
        map: &mut Map,
        active: &MapTileLayer,
        filter: Option<&(dyn Fn(&DataLayer) -> bool + Send + Sync)>,
    ) {
        let checked = |id: CheckboxId| self.checkboxes.get(id.0).map_or(false, |c| c.checked);

        map.layers_mut().for_each_layer_mut(|layer| {
            if filter.map_or(true, |applies| applies(layer)) {
                let visible = layer.is_visible_with(active, &checked);
                layer.set_visible(visible);
            }
        });
    }

    /// Shows the checkboxes that apply to `active`, and the groups with at
    /// least one shown checkbox.
    pub fn refresh_groups(&mut self, active: &MapTileLayer) {
        for checkbox in &mut self.checkboxes {
            checkbox.visible = checkbox.is_shown_for(active);
        }
        let checkboxes = &self.checkboxes;
        for group in &mut self.groups {
            group.visible = group
                .checkboxes
                .iter()
                .any(|id| checkboxes.get(id.0).map_or(false, |c| c.visible));
        }
    }

    /// Updates the location readout from a projection coordinate.
    pub fn handle_pointer_move(&mut self, coordinate: Point) -> BlockCoord {
        self.location = self.constants.projection_to_block(coordinate);
        self.location
    }

    /// Block under the pointer at the last move.
    pub fn location(&self) -> BlockCoord {
        self.location
    }

    /// Location readout, e.g. `X: 12 Z: -40`.
    pub fn location_text(&self) -> String {
        self.location.to_string()
    }

    /// Get the global configuration.
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Get the constants derived from the configuration.
    pub fn constants(&self) -> &DerivedConstants {
        &self.constants
    }

    /// Get the active layer and remembered views.
    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Layer radios in presentation order.
    pub fn radios(&self) -> &[LayerRadio] {
        &self.radios
    }

    /// Get a checkbox by id.
    pub fn checkbox(&self, id: CheckboxId) -> Result<&Checkbox> {
        self.checkboxes
            .get(id.0)
            .ok_or_else(|| MapError::Layer(format!("no checkbox {}", id.0)))
    }

    /// All checkboxes in creation order.
    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.checkboxes
    }

    /// All checkbox groups in creation order.
    pub fn groups(&self) -> &[CheckboxGroup] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::map::MapOptions,
        layers::{base::LayerType, map_tile::tests::descriptor, overlay::OverlayLayer},
    };

    fn setup() -> (LayerControls, Map) {
        let config = GlobalConfig::default();
        let controls = LayerControls::new(config.clone()).unwrap();
        let map = Map::new(MapOptions::for_config(&config), controls.constants());
        (controls, map)
    }

    fn with_layers() -> (LayerControls, Map) {
        let (mut controls, mut map) = setup();
        let mut stronghold = descriptor("Strongholds", 0, "strongholds");
        stronghold.background = Some("#fff".to_string());
        let mut nether = descriptor("Nether", 1, "dim1");
        nether.min_native_zoom = 16;

        for (key, layer) in [
            ("dim0", descriptor("Overworld", 0, "dim0")),
            ("dim0_stronghold", stronghold),
            ("dim1", nether),
        ] {
            controls
                .add_layer(&mut map, MapTileLayer::new(key, layer))
                .unwrap();
        }
        controls.attach(&mut map);
        (controls, map)
    }

    fn visible(map: &Map, key: &str) -> bool {
        map.layers().get_layer(key).unwrap().is_visible()
    }

    #[test]
    fn test_attach_selects_first_layer() {
        let (controls, map) = with_layers();

        assert_eq!(
            controls.view_state().current_selected_layer.as_deref(),
            Some("dim0")
        );
        assert!(visible(&map, "dim0"));
        assert!(!visible(&map, "dim0_stronghold"));
        assert!(!visible(&map, "dim1"));
        assert_eq!(map.background(), DEFAULT_BACKGROUND);
        assert_eq!(map.center(), Point::ORIGIN);
        assert_eq!(map.zoom(), 0.0);
        assert!(controls.radios()[0].checked);
        assert!(!controls.radios()[1].checked);
    }

    #[test]
    fn test_reselecting_active_layer_is_noop() {
        let (mut controls, mut map) = with_layers();
        map.set_center(Point::new(3.0, -4.0));
        map.set_zoom(2.0);
        let before = controls.view_state().clone();

        assert!(!controls.select_layer(&mut map, "dim0"));
        assert_eq!(controls.view_state(), &before);
        assert_eq!(map.center(), Point::new(3.0, -4.0));
        assert_eq!(map.zoom(), 2.0);
    }

    #[test]
    fn test_dimension_round_trip_restores_view() {
        let (mut controls, mut map) = with_layers();
        map.set_center(Point::new(1.5, -2.5));
        map.set_zoom(3.0);

        assert!(controls.select_layer(&mut map, "dim1"));
        map.set_center(Point::new(-7.0, 7.0));
        map.set_zoom(4.0);

        assert!(controls.select_layer(&mut map, "dim0"));
        assert_eq!(map.center(), Point::new(1.5, -2.5));
        assert_eq!(map.zoom(), 3.0);

        assert!(controls.select_layer(&mut map, "dim1"));
        assert_eq!(map.center(), Point::new(-7.0, 7.0));
        assert_eq!(map.zoom(), 4.0);
    }

    #[test]
    fn test_unvisited_dimension_uses_defaults() {
        let (mut controls, mut map) = with_layers();
        map.set_center(Point::new(9.0, 9.0));
        map.set_zoom(5.0);

        assert!(controls.select_layer(&mut map, "dim1"));
        assert_eq!(map.center(), Point::ORIGIN);
        // min_native_zoom 16 - global_min_zoom 15
        assert_eq!(map.zoom(), 1.0);
        assert_eq!(map.viewport().min_zoom, 1.0);
        assert_eq!(map.viewport().max_zoom, 5.0);
        assert!(visible(&map, "dim1"));
        assert!(!visible(&map, "dim0"));
    }

    #[test]
    fn test_layers_in_same_dimension_share_view() {
        let (mut controls, mut map) = with_layers();
        map.set_center(Point::new(2.0, 2.0));
        map.set_zoom(2.0);

        assert!(controls.select_layer(&mut map, "dim0_stronghold"));
        assert_eq!(map.center(), Point::new(2.0, 2.0));
        assert_eq!(map.zoom(), 2.0);
        assert_eq!(map.background(), "#fff");
        assert!(controls.radios()[1].checked);
    }

    #[test]
    fn test_unknown_or_non_map_keys_are_ignored() {
        let (mut controls, mut map) = with_layers();
        map.add_layer(OverlayLayer::coords()).unwrap();
        let before = controls.view_state().clone();

        assert!(!controls.select_layer(&mut map, "dim7"));
        assert!(!controls.select_layer(&mut map, "coords"));
        assert_eq!(controls.view_state(), &before);
    }

    #[test]
    fn test_no_active_layer_before_attach() {
        let (mut controls, mut map) = setup();
        assert!(matches!(
            controls.current_selected_tile_layer(&map),
            Err(MapError::NoActiveLayer)
        ));

        controls
            .add_layer(&mut map, MapTileLayer::new("dim0", descriptor("Overworld", 0, "dim0")))
            .unwrap();
        assert!(!controls.click_radio(&mut map, "dim0"));

        controls.attach(&mut map);
        assert_eq!(controls.current_selected_tile_layer(&map).unwrap().key(), "dim0");

        controls.detach();
        assert!(matches!(
            controls.current_selected_tile_layer(&map),
            Err(MapError::NoActiveLayer)
        ));
        assert!(!controls.click_radio(&mut map, "dim0"));
    }

    #[test]
    fn test_set_checkbox_without_active_layer_fails() {
        let (mut controls, mut map) = setup();
        let group = controls.create_checkbox_group(&map, None);
        let id = controls
            .add_checkbox(&map, group, Checkbox::new("Players", "markers"))
            .unwrap();

        assert!(matches!(
            controls.set_checkbox(&mut map, id, false),
            Err(MapError::NoActiveLayer)
        ));
        assert!(controls.checkbox(id).unwrap().checked);
    }

    #[test]
    fn test_group_visible_if_any_checkbox_shown() {
        let (mut controls, mut map) = with_layers();
        let group = controls.create_checkbox_group(&map, Some("Overlays".to_string()));
        let slime = controls
            .add_checkbox(
                &map,
                group,
                Checkbox::new("Slime chunks", "slime")
                    .shows_for_layer(|layer| layer.dimension_id() == DimensionId::OVERWORLD),
            )
            .unwrap();
        let end_only = controls
            .add_checkbox(
                &map,
                group,
                Checkbox::new("End cities", "end")
                    .shows_for_layer(|layer| layer.dimension_id() == DimensionId::END),
            )
            .unwrap();

        assert!(controls.checkbox(slime).unwrap().visible);
        assert!(!controls.checkbox(end_only).unwrap().visible);
        assert!(controls.groups()[group.0].visible);

        controls.select_layer(&mut map, "dim1");
        assert!(!controls.checkbox(slime).unwrap().visible);
        assert!(!controls.groups()[group.0].visible);
    }

    #[test]
    fn test_checkbox_added_on_other_dimension_starts_hidden() {
        let (mut controls, mut map) = with_layers();
        assert!(controls.select_layer(&mut map, "dim1"));

        let group = controls.create_checkbox_group(&map, Some("Overworld".to_string()));
        assert!(!controls.groups()[group.0].visible);

        let slime = controls
            .add_checkbox(
                &map,
                group,
                Checkbox::new("Slime chunks", "slime")
                    .shows_for_layer(|layer| layer.dimension_id() == DimensionId::OVERWORLD),
            )
            .unwrap();
        assert!(!controls.checkbox(slime).unwrap().visible);
        assert!(!controls.groups()[group.0].visible);

        assert!(controls.select_layer(&mut map, "dim0"));
        assert!(controls.checkbox(slime).unwrap().visible);
        assert!(controls.groups()[group.0].visible);
    }

    #[test]
    fn test_overlay_needs_both_checkboxes_and_dimension() {
        let (mut controls, mut map) = with_layers();
        map.add_layer(OverlayLayer::slime()).unwrap();

        let group = controls.create_checkbox_group(&map, None);
        let overlays = controls
            .add_checkbox(
                &map,
                group,
                Checkbox::new("Overlays", "overlays")
                    .applies_to_layer(|layer| layer.layer_type() == LayerType::Overlay),
            )
            .unwrap();
        let slime = controls
            .add_checkbox(
                &map,
                group,
                Checkbox::new("Slime chunks", "slime")
                    .with_checked(false)
                    .applies_to_layer(|layer| layer.id() == "slime"),
            )
            .unwrap();
        controls.attach_checkbox(&mut map, "slime", overlays).unwrap();
        controls.attach_checkbox(&mut map, "slime", slime).unwrap();
        assert!(!visible(&map, "slime"));

        controls.set_checkbox(&mut map, slime, true).unwrap();
        assert!(visible(&map, "slime"));

        controls.set_checkbox(&mut map, overlays, false).unwrap();
        assert!(!visible(&map, "slime"));

        controls.set_checkbox(&mut map, overlays, true).unwrap();
        assert!(visible(&map, "slime"));

        controls.select_layer(&mut map, "dim1");
        assert!(!visible(&map, "slime"));

        controls.select_layer(&mut map, "dim0_stronghold");
        assert!(visible(&map, "slime"));
    }

    #[test]
    fn test_checkbox_only_touches_matching_layers() {
        let (mut controls, mut map) = with_layers();
        let group = controls.create_checkbox_group(&map, None);
        let coords = controls
            .add_checkbox(
                &map,
                group,
                Checkbox::new("Coordinates", "coords")
                    .applies_to_layer(|layer| layer.id() == "coords"),
            )
            .unwrap();
        map.add_layer(OverlayLayer::coords()).unwrap();
        controls.attach_checkbox(&mut map, "coords", coords).unwrap();

        controls.set_checkbox(&mut map, coords, false).unwrap();
        assert!(!visible(&map, "coords"));
        assert!(visible(&map, "dim0"));
        assert!(!visible(&map, "dim1"));
    }

    #[test]
    fn test_pointer_move_updates_location() {
        let (mut controls, _map) = setup();
        let point = controls.constants().block_to_projection(100.0, -37.0);

        assert_eq!(controls.handle_pointer_move(point), BlockCoord::new(100, -37));
        assert_eq!(controls.location_text(), "X: 100 Z: -37");
    }
}
