use crate::{
    core::{
        geo::{DimensionId, Point},
        transform::DerivedConstants,
    },
    data::players::PlayerMarker,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        gate::VisibilityGate,
        map_tile::MapTileLayer,
    },
};

/// Font Awesome "map-marker" glyph drawn under the player's name.
pub const MARKER_GLYPH: char = '\u{f041}';
pub const MARKER_FONT: &str = "900 18px 'Font Awesome 5 Free'";
pub const MARKER_STROKE_COLOR: &str = "#ffffff";
pub const MARKER_STROKE_WIDTH: f32 = 2.0;

/// Text style of a player marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub text: String,
    pub font: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
}

impl MarkerStyle {
    /// Label style for `player`: name plus marker glyph in the player colour.
    pub fn for_player(player: &PlayerMarker) -> Self {
        Self {
            text: format!("{}\n{}", player.name, MARKER_GLYPH),
            font: MARKER_FONT.to_string(),
            fill_color: player.color.clone(),
            stroke_color: MARKER_STROKE_COLOR.to_string(),
            stroke_width: MARKER_STROKE_WIDTH,
        }
    }
}

/// One player placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFeature {
    pub uuid: String,
    pub name: String,
    /// Position in projection units.
    pub position: Point,
    pub style: MarkerStyle,
}

impl MarkerFeature {
    /// Marker at the projected position of `player`.
    pub fn from_player(player: &PlayerMarker, constants: &DerivedConstants) -> Self {
        Self {
            uuid: player.uuid.clone(),
            name: player.name.clone(),
            position: constants.block_to_projection(player.x(), player.z()),
            style: MarkerStyle::for_player(player),
        }
    }
}

/// Player markers of one dimension.
#[derive(Debug, Clone)]
pub struct MarkerLayer {
    properties: LayerProperties,
    dimension_id: DimensionId,
    features: Vec<MarkerFeature>,
    gate: VisibilityGate,
}

impl MarkerLayer {
    /// Builds the `players_dim<N>` layer. Layers outside the overworld start hidden.
    pub fn new<'a, I>(dimension_id: DimensionId, players: I, constants: &DerivedConstants) -> Self
    where
        I: IntoIterator<Item = &'a PlayerMarker>,
    {
        let mut properties = LayerProperties::new(
            Self::key_for(dimension_id),
            "Players".to_string(),
            LayerType::Markers,
        );
        properties.visible = dimension_id == DimensionId::OVERWORLD;

        let features = players
            .into_iter()
            .map(|player| MarkerFeature::from_player(player, constants))
            .collect();

        Self {
            properties,
            dimension_id,
            features,
            gate: VisibilityGate::new(),
        }
    }

    /// Layer key for the markers of `dimension_id`, e.g. `players_dim1`.
    pub fn key_for(dimension_id: DimensionId) -> String {
        format!("players_dim{}", dimension_id)
    }

    pub fn dimension_id(&self) -> DimensionId {
        self.dimension_id
    }

    pub fn features(&self) -> &[MarkerFeature] {
        &self.features
    }
}

impl LayerTrait for MarkerLayer {
    crate::impl_layer_trait!(properties, gate);

    fn check_visible_with_layer(&self, active: &MapTileLayer) -> bool {
        active.dimension_id() == self.dimension_id
    }
}
