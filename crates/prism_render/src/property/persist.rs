//! Property Persistence
//!
//! Savable properties are written as `{ "kind": ..., "value": ... }` records
//! inside a `{ "count": n, "properties": [...] }` document. Loading maps the
//! `kind` back to a constructor through a process-wide registry, so every
//! savable type must be registered before a collection containing it is
//! read. Built-in savable properties are registered automatically.

use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use prism_core::Result;

use super::RenderProperty;
use super::builtin::OrthoOrderProperty;

type LoadFn = fn(serde_json::Value) -> Result<Box<dyn RenderProperty>>;

static SAVABLE_KINDS: LazyLock<RwLock<FxHashMap<&'static str, LoadFn>>> = LazyLock::new(|| {
    let mut kinds: FxHashMap<&'static str, LoadFn> = FxHashMap::default();
    kinds.insert(OrthoOrderProperty::kind(), load::<OrthoOrderProperty>);
    RwLock::new(kinds)
});

/// A property that can be written to and read back from JSON.
pub trait SavableProperty: RenderProperty + Serialize + DeserializeOwned {
    /// Stable name written next to the payload.
    fn kind() -> &'static str;
}

/// Persisted form of one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProperty {
    pub kind: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SavedCollection {
    pub count: i32,
    pub properties: Vec<SavedProperty>,
}

/// Registers `P` so collections containing it can be read back.
pub fn register_savable_property<P: SavableProperty>() {
    SAVABLE_KINDS.write().insert(P::kind(), load::<P>);
}

/// Serializes a savable property; used by [`RenderProperty::save`] impls.
pub fn save_property<P: SavableProperty>(property: &P) -> Option<SavedProperty> {
    match serde_json::to_value(property) {
        Ok(value) => Some(SavedProperty {
            kind: P::kind().to_string(),
            value,
        }),
        Err(err) => {
            log::warn!("Failed to save render property '{}': {err}", P::kind());
            None
        }
    }
}

fn load<P: SavableProperty>(value: serde_json::Value) -> Result<Box<dyn RenderProperty>> {
    Ok(Box::new(serde_json::from_value::<P>(value)?))
}

/// Rebuilds a property, or `None` when its kind is not registered.
pub(crate) fn load_property(record: SavedProperty) -> Result<Option<Box<dyn RenderProperty>>> {
    let loader = SAVABLE_KINDS.read().get(record.kind.as_str()).copied();
    match loader {
        Some(load) => load(record.value).map(Some),
        None => {
            log::debug!("Skipping render property of unregistered kind '{}'", record.kind);
            Ok(None)
        }
    }
}
