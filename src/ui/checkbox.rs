//! Checkboxes that toggle groups of data layers.

use std::fmt;
use std::sync::Arc;

use crate::layers::{base::DataLayer, map_tile::MapTileLayer};

/// Decides whether a checkbox is shown while a base layer is active.
pub type ShowsForLayer = Arc<dyn Fn(&MapTileLayer) -> bool + Send + Sync>;

/// Decides which layers a checkbox toggles.
pub type AppliesToLayer = Arc<dyn Fn(&DataLayer) -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckboxId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

#[derive(Clone)]
pub struct Checkbox {
    pub label: String,
    pub name: String,
    pub checked: bool,
    /// Whether the checkbox is currently shown.
    pub visible: bool,
    shows_for_layer: Option<ShowsForLayer>,
    applies_to_layer: Option<AppliesToLayer>,
}

impl Checkbox {
    /// A checked checkbox that shows for every layer and toggles every layer.
    pub fn new(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            checked: true,
            visible: true,
            shows_for_layer: None,
            applies_to_layer: None,
        }
    }

    /// Sets the initial checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Only show the checkbox while `predicate` holds for the active layer.
    pub fn shows_for_layer<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&MapTileLayer) -> bool + Send + Sync + 'static,
    {
        self.shows_for_layer = Some(Arc::new(predicate));
        self
    }

    /// Only recompute layers matching `predicate` when toggled.
    pub fn applies_to_layer<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&DataLayer) -> bool + Send + Sync + 'static,
    {
        self.applies_to_layer = Some(Arc::new(predicate));
        self
    }

    /// Whether the checkbox is shown while `active` is selected.
    pub fn is_shown_for(&self, active: &MapTileLayer) -> bool {
        self.shows_for_layer
            .as_ref()
            .map_or(true, |predicate| predicate(active))
    }

    /// Whether toggling the checkbox affects `layer`.
    pub fn applies_to(&self, layer: &DataLayer) -> bool {
        self.applies_to_layer
            .as_ref()
            .map_or(true, |predicate| predicate(layer))
    }

    pub(crate) fn applies_filter(&self) -> Option<AppliesToLayer> {
        self.applies_to_layer.clone()
    }
}

impl fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkbox")
            .field("label", &self.label)
            .field("name", &self.name)
            .field("checked", &self.checked)
            .field("visible", &self.visible)
            .field("shows_for_layer", &self.shows_for_layer.is_some())
            .field("applies_to_layer", &self.applies_to_layer.is_some())
            .finish()
    }
}

/// A titled set of checkboxes, shown when any member is shown.
#[derive(Debug, Clone)]
pub struct CheckboxGroup {
    pub title: Option<String>,
    pub checkboxes: Vec<CheckboxId>,
    pub visible: bool,
}

impl CheckboxGroup {
    /// Creates an empty group, optionally titled.
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            checkboxes: Vec::new(),
            visible: true,
        }
    }
}
