use serde::{Deserialize, Serialize};

use crate::{
    core::{constants::DIMENSION_COUNT, geo::DimensionId},
    MapError, Result,
};

/// One player from the `playersData.json` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMarker {
    pub uuid: String,
    pub name: String,
    pub dimension_id: DimensionId,
    /// World position `[x, y, z]`.
    pub position: [f64; 3],
    pub color: String,
    pub visible: bool,
}

impl PlayerMarker {
    pub fn x(&self) -> f64 {
        self.position[0]
    }

    pub fn z(&self) -> f64 {
        self.position[2]
    }
}

/// Contents of `playersData.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayersDocument {
    pub players: Vec<PlayerMarker>,
}

impl PlayersDocument {
    /// Parses a `playersData.json` document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Splits visible players into overworld, nether and end buckets.
///
/// Hidden players are dropped first; a visible player in any other dimension
/// is an error.
pub fn partition_players(players: &[PlayerMarker]) -> Result<[Vec<&PlayerMarker>; DIMENSION_COUNT]> {
    let mut buckets: [Vec<&PlayerMarker>; DIMENSION_COUNT] = Default::default();

    for player in players.iter().filter(|player| player.visible) {
        let index = player
            .dimension_id
            .index()
            .ok_or(MapError::UnknownDimension(player.dimension_id.0))?;
        buckets[index].push(player);
    }

    Ok(buckets)
}
