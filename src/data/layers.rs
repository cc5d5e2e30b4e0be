//! Layer registry loaded from `layers.json`.
//!
//! Each entry describes one render the generator produced (a dimension, or a
//! special render such as the stronghold map). Entries may omit
//! `dimensionId` and `background`; [`LayerRegistry::from_raw`] fills both in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        config::GlobalConfig,
        constants::{DIMENSION_KEY_PREFIX, STRONGHOLD_BACKGROUND, STRONGHOLD_LAYER_KEY},
        geo::DimensionId,
    },
    MapError, Result,
};

/// A layer entry as written by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLayerDescriptor {
    pub name: String,
    #[serde(default)]
    pub dimension_id: Option<i32>,
    #[serde(default)]
    pub attribution: Option<String>,
    pub min_native_zoom: i32,
    pub min_zoom: i32,
    pub max_native_zoom: i32,
    pub max_zoom: i32,
    #[serde(default)]
    pub no_wrap: bool,
    #[serde(default)]
    pub background: Option<String>,
    pub tile_size: u32,
    pub folder: String,
    pub file_extension: String,
}

/// A normalized, immutable layer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub name: String,
    pub dimension_id: DimensionId,
    pub attribution: Option<String>,
    pub min_native_zoom: i32,
    pub min_zoom: i32,
    pub max_native_zoom: i32,
    pub max_zoom: i32,
    pub no_wrap: bool,
    /// `None` means the default map background.
    pub background: Option<String>,
    pub tile_size: u32,
    pub folder: String,
    pub file_extension: String,
}

impl LayerDescriptor {
    /// Fills in the fields the generator may leave out.
    pub fn normalize(key: &str, raw: RawLayerDescriptor) -> Result<Self> {
        let dimension_id = match raw.dimension_id {
            Some(id) => DimensionId(id),
            None => parse_dimension_id(key)?,
        };
        let background = raw.background.or_else(|| {
            (key == STRONGHOLD_LAYER_KEY).then(|| STRONGHOLD_BACKGROUND.to_string())
        });

        Ok(Self {
            name: raw.name,
            dimension_id,
            attribution: raw.attribution,
            min_native_zoom: raw.min_native_zoom,
            min_zoom: raw.min_zoom,
            max_native_zoom: raw.max_native_zoom,
            max_zoom: raw.max_zoom,
            no_wrap: raw.no_wrap,
            background,
            tile_size: raw.tile_size,
            folder: raw.folder,
            file_extension: raw.file_extension,
        })
    }

    /// Native zoom range shifted into projection zoom levels.
    pub fn view_zoom_range(&self, config: &GlobalConfig) -> (f64, f64) {
        (
            f64::from(self.min_native_zoom - config.global_min_zoom),
            f64::from(self.max_native_zoom - config.global_min_zoom),
        )
    }
}

/// Reads the dimension id out of a `dim<N>...` key.
///
/// Digits are read up to the first non-digit, so `dim0_stronghold` is
/// dimension 0 and `dim-1` is dimension -1.
pub fn parse_dimension_id(key: &str) -> Result<DimensionId> {
    let malformed = || MapError::MalformedLayerKey(key.to_string());

    let rest = key.strip_prefix(DIMENSION_KEY_PREFIX).ok_or_else(malformed)?;
    let (sign, unsigned) = match rest.as_bytes().first() {
        Some(b'-') => (-1, &rest[1..]),
        Some(b'+') => (1, &rest[1..]),
        _ => (1, rest),
    };
    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(malformed());
    }

    let value: i32 = unsigned[..digits_len].parse().map_err(|_| malformed())?;
    Ok(DimensionId(sign * value))
}

/// Normalized layers in presentation order (keys ascending).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRegistry {
    layers: BTreeMap<String, LayerDescriptor>,
}

impl LayerRegistry {
    /// Normalizes raw descriptors and sorts them by key.
    pub fn from_raw<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, RawLayerDescriptor)>,
    {
        let layers = raw
            .into_iter()
            .map(|(key, entry)| {
                let descriptor = LayerDescriptor::normalize(&key, entry)?;
                Ok((key, descriptor))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { layers })
    }

    /// Get a descriptor by layer key.
    pub fn get(&self, key: &str) -> Option<&LayerDescriptor> {
        self.layers.get(key)
    }

    /// Keys in presentation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Descriptors in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayerDescriptor)> {
        self.layers.iter().map(|(key, layer)| (key.as_str(), layer))
    }

    /// Layer selected when the map first opens.
    pub fn initial_key(&self) -> Option<&str> {
        self.keys().next()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl IntoIterator for LayerRegistry {
    type Item = (String, LayerDescriptor);
    type IntoIter = std::collections::btree_map::IntoIter<String, LayerDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

/// Contents of `layers.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayersDocument {
    pub layers: BTreeMap<String, RawLayerDescriptor>,
    pub config: GlobalConfig,
}

impl LayersDocument {
    /// Parses a `layers.json` document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Validates the config and normalizes every layer.
    pub fn into_parts(self) -> Result<(LayerRegistry, GlobalConfig)> {
        self.config.validate()?;
        let registry = LayerRegistry::from_raw(self.layers)?;
        Ok((registry, self.config))
    }
}
