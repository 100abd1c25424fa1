use std::collections::hash_map::Entry;
use std::io::{Read, Write};

use rustc_hash::FxHashMap;

use prism_core::{PrismError, RenderPropertyId, Result};

use super::RenderProperty;
use super::persist::{self, SavedCollection};

/// Keyed set of render properties, holding at most one property per type.
#[derive(Debug, Default)]
pub struct RenderPropertyCollection {
    properties: FxHashMap<RenderPropertyId, Box<dyn RenderProperty>>,
}

impl RenderPropertyCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            properties: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Adds a property.
    ///
    /// Fails if a property with the same id is already present.
    pub fn add<P: RenderProperty>(&mut self, property: P) -> Result<()> {
        self.add_boxed(Box::new(property))
    }

    /// Adds a boxed property.
    ///
    /// Fails if the property's id is invalid or already present.
    pub fn add_boxed(&mut self, property: Box<dyn RenderProperty>) -> Result<()> {
        let id = (*property).id();
        if !id.is_valid() {
            return Err(PrismError::InvalidArgument(format!(
                "render property {property:?} has an invalid id"
            )));
        }

        match self.properties.entry(id) {
            Entry::Occupied(_) => Err(PrismError::DuplicateProperty(id)),
            Entry::Vacant(slot) => {
                slot.insert(property);
                Ok(())
            }
        }
    }

    /// Inserts a property, returning the one it replaced.
    pub fn set<P: RenderProperty>(&mut self, property: P) -> Option<Box<dyn RenderProperty>> {
        let boxed: Box<dyn RenderProperty> = Box::new(property);
        let id = (*boxed).id();
        self.properties.insert(id, boxed)
    }

    /// Returns the property of type `P`.
    ///
    /// `None` if absent, or if the entry stored under `P`'s id has another
    /// runtime type.
    #[must_use]
    pub fn try_get<P: RenderProperty>(&self) -> Option<&P> {
        let property: &dyn RenderProperty = &**self.properties.get(&RenderPropertyId::of::<P>())?;
        property.as_any().downcast_ref::<P>()
    }

    pub fn try_get_mut<P: RenderProperty>(&mut self) -> Option<&mut P> {
        let property: &mut dyn RenderProperty =
            &mut **self.properties.get_mut(&RenderPropertyId::of::<P>())?;
        property.as_any_mut().downcast_mut::<P>()
    }

    #[must_use]
    pub fn get_by_id(&self, id: RenderPropertyId) -> Option<&dyn RenderProperty> {
        self.properties.get(&id).map(|p| &**p)
    }

    #[must_use]
    pub fn contains<P: RenderProperty>(&self) -> bool {
        self.contains_id(RenderPropertyId::of::<P>())
    }

    #[must_use]
    pub fn contains_id(&self, id: RenderPropertyId) -> bool {
        self.properties.contains_key(&id)
    }

    pub fn remove<P: RenderProperty>(&mut self) -> Option<Box<dyn RenderProperty>> {
        self.remove_id(RenderPropertyId::of::<P>())
    }

    pub fn remove_id(&mut self, id: RenderPropertyId) -> Option<Box<dyn RenderProperty>> {
        self.properties.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RenderProperty> + '_ {
        self.properties.values().map(|p| &**p)
    }

    /// Copies every property that reports [`RenderProperty::can_clone`].
    ///
    /// Properties that cannot be cloned are dropped from the copy.
    #[must_use]
    pub fn clone_cloneable(&self) -> Self {
        let mut cloned = Self::with_capacity(self.properties.len());
        for (id, property) in &self.properties {
            let property: &dyn RenderProperty = &**property;
            if !property.can_clone() {
                continue;
            }
            if let Some(copy) = property.clone_property() {
                cloned.properties.insert(*id, copy);
            }
        }
        cloned
    }

    /// Writes every savable property as JSON.
    ///
    /// Non-savable properties are left out of both the count and the array.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let properties: Vec<_> = self.iter().filter_map(|p| p.save()).collect();
        let saved = SavedCollection {
            count: i32::try_from(properties.len()).map_err(|_| {
                PrismError::InvalidArgument("too many render properties to persist".to_string())
            })?,
            properties,
        };
        serde_json::to_writer(writer, &saved)?;
        Ok(())
    }

    /// Reads a collection written by [`write`](Self::write).
    ///
    /// Records of unregistered kinds are skipped.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let saved: SavedCollection = serde_json::from_reader(reader)?;
        if usize::try_from(saved.count).ok() != Some(saved.properties.len()) {
            log::warn!(
                "Persisted render property count {} does not match {} records",
                saved.count,
                saved.properties.len()
            );
        }

        let mut collection = Self::with_capacity(saved.properties.len());
        for record in saved.properties {
            if let Some(property) = persist::load_property(record)? {
                collection.add_boxed(property)?;
            }
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::OrthoOrderProperty;

    #[derive(Debug)]
    struct Opaque;
    impl RenderProperty for Opaque {}

    #[test]
    fn test_add_and_get() {
        let mut props = RenderPropertyCollection::new();
        props.add(OrthoOrderProperty(4)).unwrap();
        assert_eq!(props.try_get::<OrthoOrderProperty>(), Some(&OrthoOrderProperty(4)));
        assert!(props.try_get::<Opaque>().is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut props = RenderPropertyCollection::new();
        props.add(OrthoOrderProperty(1)).unwrap();
        assert!(matches!(
            props.add(OrthoOrderProperty(2)),
            Err(PrismError::DuplicateProperty(_))
        ));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_set_replaces() {
        let mut props = RenderPropertyCollection::new();
        assert!(props.set(OrthoOrderProperty(1)).is_none());
        assert!(props.set(OrthoOrderProperty(2)).is_some());
        assert_eq!(props.try_get::<OrthoOrderProperty>().map(|p| p.0), Some(2));
    }

    #[test]
    fn test_clone_drops_non_cloneable() {
        let mut props = RenderPropertyCollection::new();
        props.add(OrthoOrderProperty(1)).unwrap();
        props.add(Opaque).unwrap();

        let cloned = props.clone_cloneable();
        assert_eq!(cloned.len(), 1);
        assert!(cloned.contains::<OrthoOrderProperty>());
        assert!(!cloned.contains::<Opaque>());
    }
}
