use crate::ui::checkbox::CheckboxId;

/// The checkboxes a layer is controlled by.
///
/// A gate with no checkboxes is always open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityGate {
    checkboxes: Vec<CheckboxId>,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the layer under `checkbox`; attaching twice is a no-op.
    pub fn attach(&mut self, checkbox: CheckboxId) {
        if !self.checkboxes.contains(&checkbox) {
            self.checkboxes.push(checkbox);
        }
    }

    /// Attached checkboxes in attach order.
    pub fn checkboxes(&self) -> &[CheckboxId] {
        &self.checkboxes
    }

    /// Whether `checkbox` is attached.
    pub fn controls(&self, checkbox: CheckboxId) -> bool {
        self.checkboxes.contains(&checkbox)
    }

    /// True when every attached checkbox is checked.
    pub fn is_open(&self, checked: &dyn Fn(CheckboxId) -> bool) -> bool {
        self.checkboxes.iter().all(|id| checked(*id))
    }
}
