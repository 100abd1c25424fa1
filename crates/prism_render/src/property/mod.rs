//! Render Properties
//!
//! Typed per-renderable metadata, addressed by a [`RenderPropertyId`] that
//! is shared by every instance of one property type.
//!
//! - [`RenderProperty`]: the property trait
//! - [`RenderPropertyCollection`]: at most one property per id
//! - [`builtin`]: stock property kinds
//! - [`persist`]: JSON persistence of savable properties
//!
//! ```rust,ignore
//! let mut props = RenderPropertyCollection::new();
//! props.add(OrthoOrderProperty(3))?;
//!
//! let order = props.try_get::<OrthoOrderProperty>().map(|p| p.0);
//! ```

use std::any::Any;
use std::fmt;

use prism_core::RenderPropertyId;

pub mod builtin;
mod collection;
mod macros;
pub mod persist;

pub use builtin::{AccessorProperty, OrthoOrderProperty, PayloadProperty};
pub use collection::RenderPropertyCollection;
pub use persist::{SavableProperty, SavedProperty, register_savable_property, save_property};

/// Upcast helper implemented for every `'static` type.
pub trait AsAnyProperty: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAnyProperty for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A piece of render metadata attached to a renderable.
pub trait RenderProperty: AsAnyProperty + fmt::Debug {
    /// Id of this property's type.
    fn id(&self) -> RenderPropertyId {
        RenderPropertyId::for_type_id(self.as_any().type_id())
    }

    /// Whether [`RenderPropertyCollection::clone_cloneable`] keeps this property.
    fn can_clone(&self) -> bool {
        false
    }

    /// Returns a copy when [`can_clone`](Self::can_clone) is `true`.
    fn clone_property(&self) -> Option<Box<dyn RenderProperty>> {
        None
    }

    /// Returns the persisted form, or `None` if the property is not savable.
    fn save(&self) -> Option<SavedProperty> {
        None
    }
}
