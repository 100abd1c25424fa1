/// Declares a cloneable, savable newtype render property.
///
/// The wrapped type must implement `Clone`, `Debug`, `PartialEq` and the
/// serde traits; the calling crate needs `serde` as a dependency.
///
/// ```rust,ignore
/// prism_render::render_property! {
///     /// Extra depth offset applied when sorting.
///     pub struct SortBiasProperty(f32) = "SortBias";
/// }
///
/// prism_render::property::register_savable_property::<SortBiasProperty>();
/// ```
#[macro_export]
macro_rules! render_property {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($inner:ty) = $kind:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        $vis struct $name(pub $inner);

        impl $crate::property::RenderProperty for $name {
            fn can_clone(&self) -> bool {
                true
            }

            fn clone_property(&self) -> Option<Box<dyn $crate::property::RenderProperty>> {
                Some(Box::new(self.clone()))
            }

            fn save(&self) -> Option<$crate::property::SavedProperty> {
                $crate::property::save_property(self)
            }
        }

        impl $crate::property::SavableProperty for $name {
            fn kind() -> &'static str {
                $kind
            }
        }
    };
}
