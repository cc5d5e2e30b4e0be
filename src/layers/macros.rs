//! Macros to reduce boilerplate in layer implementations
//!
//! This module provides macros that generate common LayerTrait implementations
//! to avoid code duplication across different layer types.

/// Macro to implement the standard LayerTrait boilerplate methods
///
/// This generates implementations for:
/// - id(), name(), layer_type()
/// - z_index(), set_z_index()
/// - opacity(), set_opacity()
/// - is_visible(), set_visible()
/// - gate(), gate_mut()
///
/// Usage:
/// ```ignore
/// impl LayerTrait for MyLayer {
///     crate::impl_layer_trait!(properties, gate);
///     fn check_visible_with_layer(&self, active: &MapTileLayer) -> bool { true }
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($properties_field:ident, $gate_field:ident) => {
        fn id(&self) -> &str {
            &self.$properties_field.id
        }

        fn name(&self) -> &str {
            &self.$properties_field.name
        }

        fn layer_type(&self) -> $crate::layers::base::LayerType {
            self.$properties_field.layer_type
        }

        fn z_index(&self) -> i32 {
            self.$properties_field.z_index
        }

        fn set_z_index(&mut self, z_index: i32) {
            self.$properties_field.z_index = z_index;
        }

        fn opacity(&self) -> f32 {
            self.$properties_field.opacity
        }

        fn set_opacity(&mut self, opacity: f32) {
            self.$properties_field.opacity = opacity.clamp(0.0, 1.0);
        }

        fn is_visible(&self) -> bool {
            self.$properties_field.visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.$properties_field.visible = visible;
        }

        fn gate(&self) -> &$crate::layers::gate::VisibilityGate {
            &self.$gate_field
        }

        fn gate_mut(&mut self) -> &mut $crate::layers::gate::VisibilityGate {
            &mut self.$gate_field
        }
    };
}
