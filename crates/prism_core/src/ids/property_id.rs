use std::any::TypeId;
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

static NEXT_PROPERTY_ID: AtomicI32 = AtomicI32::new(0);

/// Lazily populated `TypeId -> id` table. Every instance of one property
/// type resolves to the same id.
static PROPERTY_TYPE_IDS: LazyLock<RwLock<FxHashMap<TypeId, RenderPropertyId>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

/// Key identifying a render property *type*.
///
/// Ids are generated once per type and shared by all instances of that type,
/// which makes them a cheap lookup key inside a
/// `RenderPropertyCollection`. `-1` is the invalid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderPropertyId(i32);

impl RenderPropertyId {
    /// The invalid property id.
    pub const INVALID: Self = Self(-1);

    /// Creates an id from a raw value.
    #[inline]
    #[must_use]
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` if the id is non-negative.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }

    /// Generates a new process-unique id.
    ///
    /// Values increase monotonically for the lifetime of the process and are
    /// never persisted.
    #[must_use]
    pub fn generate_new_unique_id() -> Self {
        Self(NEXT_PROPERTY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the id shared by every property of type `T`.
    #[must_use]
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self::for_type_id(TypeId::of::<T>())
    }

    /// Returns the id registered for `type_id`, assigning one on first use.
    #[must_use]
    pub fn for_type_id(type_id: TypeId) -> Self {
        if let Some(id) = PROPERTY_TYPE_IDS.read().get(&type_id) {
            return *id;
        }

        // Another thread may have won the race between the two locks.
        *PROPERTY_TYPE_IDS
            .write()
            .entry(type_id)
            .or_insert_with(Self::generate_new_unique_id)
    }
}

impl Default for RenderPropertyId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for RenderPropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderPropertyId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;
    struct Bar;

    #[test]
    fn test_same_type_same_id() {
        let a = RenderPropertyId::of::<Foo>();
        let b = RenderPropertyId::of::<Foo>();
        let c = RenderPropertyId::of::<Bar>();

        assert!(a.is_valid());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid() {
        assert!(!RenderPropertyId::INVALID.is_valid());
        assert_eq!(RenderPropertyId::default(), RenderPropertyId::INVALID);
    }
}
