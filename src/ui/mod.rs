pub mod checkbox;
pub mod controls;

pub use checkbox::{AppliesToLayer, Checkbox, CheckboxGroup, CheckboxId, GroupId, ShowsForLayer};
pub use controls::{LayerControls, LayerRadio, ViewState};
