//! Startup wiring: turns the two export documents into a map with its layer
//! switcher, overlays and player markers.

use crate::{
    core::{
        geo::{BlockCoord, DimensionId, Point},
        map::{Map, MapOptions},
    },
    data::{
        layers::LayersDocument,
        loader::{load_documents, DataSource},
        players::{partition_players, PlayersDocument},
    },
    layers::{
        base::{DataLayer, LayerTrait, LayerType},
        map_tile::MapTileLayer,
        marker::MarkerLayer,
        overlay::{OverlayLayer, COORDS_LAYER_KEY, SLIME_LAYER_KEY},
    },
    ui::{
        checkbox::{Checkbox, CheckboxId},
        controls::LayerControls,
    },
    Result,
};

/// The checkboxes the viewer creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerCheckboxes {
    pub players: CheckboxId,
    pub coords: CheckboxId,
    pub slime: CheckboxId,
}

#[derive(Debug)]
pub struct Viewer {
    map: Map,
    controls: LayerControls,
    checkboxes: ViewerCheckboxes,
}

impl Viewer {
    /// Builds the viewer. A broken players document only costs the markers.
    pub fn new(layers: LayersDocument, players: Option<PlayersDocument>) -> Result<Self> {
        let (registry, config) = layers.into_parts()?;
        let mut controls = LayerControls::new(config)?;
        let mut map = Map::new(MapOptions::for_config(controls.config()), controls.constants());

        for (key, descriptor) in registry {
            controls.add_layer(&mut map, MapTileLayer::new(key, descriptor))?;
        }

        let global = controls.create_checkbox_group(&map, None);
        let players_box = controls.add_checkbox(
            &map,
            global,
            Checkbox::new("Players", "markers")
                .applies_to_layer(|layer| layer.layer_type() == LayerType::Markers),
        )?;
        let coords_box = controls.add_checkbox(
            &map,
            global,
            Checkbox::new("Coordinates", COORDS_LAYER_KEY)
                .with_checked(false)
                .applies_to_layer(|layer| layer.id() == COORDS_LAYER_KEY),
        )?;

        let overworld = controls.create_checkbox_group(&map, Some("Overworld".to_string()));
        let slime_box = controls.add_checkbox(
            &map,
            overworld,
            Checkbox::new("Slime chunks", SLIME_LAYER_KEY)
                .with_checked(false)
                .shows_for_layer(|layer| layer.dimension_id() == DimensionId::OVERWORLD)
                .applies_to_layer(|layer| layer.id() == SLIME_LAYER_KEY),
        )?;

        map.add_layer(OverlayLayer::coords())?;
        controls.attach_checkbox(&mut map, COORDS_LAYER_KEY, coords_box)?;
        map.add_layer(OverlayLayer::slime())?;
        controls.attach_checkbox(&mut map, SLIME_LAYER_KEY, slime_box)?;

        if let Some(players) = players {
            for layer in Self::marker_layers(&players, &controls) {
                let key = layer.id().to_string();
                map.add_layer(layer)?;
                controls.attach_checkbox(&mut map, &key, players_box)?;
            }
        }

        controls.attach(&mut map);

        log::info!(
            "viewer ready: {} layers, {} base layers",
            map.layers().len(),
            controls.radios().len()
        );

        Ok(Self {
            map,
            controls,
            checkboxes: ViewerCheckboxes {
                players: players_box,
                coords: coords_box,
                slime: slime_box,
            },
        })
    }

    /// One marker layer per dimension, or none if any player is in an
    /// unknown dimension.
    fn marker_layers(players: &PlayersDocument, controls: &LayerControls) -> Vec<MarkerLayer> {
        let buckets = match partition_players(&players.players) {
            Ok(buckets) => buckets,
            Err(error) => {
                log::error!("skipping player markers: {}", error);
                return Vec::new();
            }
        };

        buckets
            .into_iter()
            .enumerate()
            .map(|(index, bucket)| {
                MarkerLayer::new(DimensionId(index as i32), bucket, controls.constants())
            })
            .collect()
    }

    /// Fetches both documents and builds the viewer, logging what went wrong
    /// when that is not possible.
    pub async fn bootstrap(source: &dyn DataSource) -> Option<Self> {
        let loaded = load_documents(source).await;

        let layers = match loaded.layers {
            Ok(layers) => layers,
            Err(error) => {
                log::error!("could not load layers: {}", error);
                return None;
            }
        };
        let players = match loaded.players {
            Ok(players) => Some(players),
            Err(error) => {
                log::warn!("could not load players: {}", error);
                None
            }
        };

        match Self::new(layers, players) {
            Ok(viewer) => Some(viewer),
            Err(error) => {
                log::error!("could not build viewer: {}", error);
                None
            }
        }
    }

    /// Get the map.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Get the map mutably, e.g. to pan or zoom.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Get the layer controls.
    pub fn controls(&self) -> &LayerControls {
        &self.controls
    }

    /// Ids of the built-in checkboxes.
    pub fn checkboxes(&self) -> ViewerCheckboxes {
        self.checkboxes
    }

    /// Switches to the base layer `key`.
    pub fn select_layer(&mut self, key: &str) -> bool {
        self.controls.select_layer(&mut self.map, key)
    }

    /// Toggles a checkbox.
    pub fn set_checkbox(&mut self, id: CheckboxId, checked: bool) -> Result<()> {
        self.controls.set_checkbox(&mut self.map, id, checked)
    }

    /// The active base layer.
    pub fn current_layer(&self) -> Result<&MapTileLayer> {
        self.controls.current_selected_tile_layer(&self.map)
    }

    /// Updates the location readout from a projection coordinate.
    pub fn pointer_move(&mut self, coordinate: Point) -> BlockCoord {
        self.controls.handle_pointer_move(coordinate)
    }

    pub fn location_text(&self) -> String {
        self.controls.location_text()
    }

    /// Visible layers in draw order.
    pub fn visible_layers(&self) -> impl Iterator<Item = &DataLayer> {
        self.map
            .layers()
            .layers()
            .into_iter()
            .filter(|layer| layer.is_visible())
    }

    /// Disconnects the controls from the map.
    pub fn detach(&mut self) {
        self.controls.detach();
    }

    /// Reconnects the controls and selects the first layer.
    pub fn attach(&mut self) {
        self.controls.attach(&mut self.map);
    }
}
