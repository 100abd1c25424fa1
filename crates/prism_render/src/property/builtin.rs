//! Built-in Property Kinds
//!
//! - [`OrthoOrderProperty`]: draw order inside the ortho bucket
//! - [`AccessorProperty`]: read-through facade over state owned elsewhere
//! - [`PayloadProperty`]: arbitrary serde payload

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{RenderProperty, SavableProperty, SavedProperty, save_property};

crate::render_property! {
    /// Explicit draw order used by the ortho comparer; lower draws first.
    pub struct OrthoOrderProperty(i32) = "OrthoOrder";
}

/// Property whose value is read from externally owned state on demand.
///
/// The accessor aliases its source, so the property is neither cloned nor
/// saved.
pub struct AccessorProperty<T> {
    accessor: Arc<dyn Fn() -> T>,
}

impl<T> AccessorProperty<T> {
    pub fn new(accessor: impl Fn() -> T + 'static) -> Self {
        Self {
            accessor: Arc::new(accessor),
        }
    }

    /// Reads the current value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.accessor)()
    }
}

impl<T> fmt::Debug for AccessorProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorProperty")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> RenderProperty for AccessorProperty<T> {}

/// Property carrying a serializable payload.
///
/// Each payload type gets its own property id. Payloads are saved under
/// `std::any::type_name::<T>()`; register the concrete
/// `PayloadProperty<T>` with
/// [`register_savable_property`](super::register_savable_property) before
/// reading it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadProperty<T> {
    pub value: T,
}

impl<T> PayloadProperty<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> RenderProperty for PayloadProperty<T>
where
    T: Clone + fmt::Debug + Serialize + DeserializeOwned + 'static,
{
    fn can_clone(&self) -> bool {
        true
    }

    fn clone_property(&self) -> Option<Box<dyn RenderProperty>> {
        Some(Box::new(self.clone()))
    }

    fn save(&self) -> Option<SavedProperty> {
        save_property(self)
    }
}

impl<T> SavableProperty for PayloadProperty<T>
where
    T: Clone + fmt::Debug + Serialize + DeserializeOwned + 'static,
{
    fn kind() -> &'static str {
        std::any::type_name::<T>()
    }
}
