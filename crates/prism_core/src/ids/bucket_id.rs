use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicI32, Ordering};

use lasso::{Spur, ThreadedRodeo};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{PrismError, Result};

/// Names of the buckets every process starts with, in id order.
const DEFAULT_BUCKETS: [RenderBucketId; 5] = [
    RenderBucketId::PRE_OPAQUE,
    RenderBucketId::OPAQUE,
    RenderBucketId::TRANSPARENT,
    RenderBucketId::ORTHO,
    RenderBucketId::POST_OPAQUE,
];

// Starts past the default ids, which occupy 0..5.
static NEXT_BUCKET_ID: AtomicI32 = AtomicI32::new(DEFAULT_BUCKETS.len() as i32);

static BUCKET_NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

static BUCKET_REGISTRY: LazyLock<RwLock<FxHashMap<Spur, RenderBucketId>>> = LazyLock::new(|| {
    let mut registry = FxHashMap::default();
    for id in DEFAULT_BUCKETS {
        registry.insert(BUCKET_NAMES.get_or_intern_static(id.name), id);
    }
    RwLock::new(registry)
});

/// Named key of a render bucket.
///
/// Bucket ids are registered once per name into a process-wide table. Five
/// buckets exist from the start and form the default pipeline:
/// [`PRE_OPAQUE`](Self::PRE_OPAQUE), [`OPAQUE`](Self::OPAQUE),
/// [`TRANSPARENT`](Self::TRANSPARENT), [`ORTHO`](Self::ORTHO) and
/// [`POST_OPAQUE`](Self::POST_OPAQUE).
///
/// Equality, ordering and hashing only look at the integer value.
#[derive(Clone, Copy)]
pub struct RenderBucketId {
    value: i32,
    name: &'static str,
}

impl RenderBucketId {
    /// The invalid bucket id.
    pub const INVALID: Self = Self { value: -1, name: "Invalid" };

    /// Objects drawn before the opaque pass.
    pub const PRE_OPAQUE: Self = Self { value: 0, name: "PreOpaque" };

    /// Opaque geometry, sorted by material then front-to-back.
    pub const OPAQUE: Self = Self { value: 1, name: "Opaque" };

    /// Alpha-blended geometry, sorted back-to-front.
    pub const TRANSPARENT: Self = Self { value: 2, name: "Transparent" };

    /// Screen-space geometry, sorted by explicit order.
    pub const ORTHO: Self = Self { value: 3, name: "Ortho" };

    /// Objects drawn after the opaque pass.
    pub const POST_OPAQUE: Self = Self { value: 4, name: "PostOpaque" };

    /// Registers a new bucket name and returns its id.
    ///
    /// Fails if the name is empty or already registered.
    pub fn register_id(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(PrismError::InvalidArgument(
                "render bucket name must not be empty".to_string(),
            ));
        }

        let mut registry = BUCKET_REGISTRY.write();
        let symbol = BUCKET_NAMES.get_or_intern(name);
        if registry.contains_key(&symbol) {
            return Err(PrismError::DuplicateBucketName(name.to_string()));
        }

        let id = Self {
            value: NEXT_BUCKET_ID.fetch_add(1, Ordering::Relaxed),
            name: BUCKET_NAMES.resolve(&symbol),
        };
        registry.insert(symbol, id);
        log::debug!("Registered render bucket '{}' as {}", id.name, id.value);
        Ok(id)
    }

    /// Looks up a registered bucket by name.
    ///
    /// Returns [`INVALID`](Self::INVALID) when the name is unknown.
    #[must_use]
    pub fn query_id(name: &str) -> Self {
        // The registry seeds the default names on first access.
        let registry = BUCKET_REGISTRY.read();
        let Some(symbol) = BUCKET_NAMES.get(name) else {
            return Self::INVALID;
        };
        registry.get(&symbol).copied().unwrap_or(Self::INVALID)
    }

    /// Returns every registered bucket id in ascending order.
    #[must_use]
    pub fn registered_ids() -> Vec<Self> {
        let mut ids: Vec<Self> = BUCKET_REGISTRY.read().values().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.value
    }

    /// Returns the registered name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Returns `true` if the id is non-negative.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.value >= 0
    }
}

impl Default for RenderBucketId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl PartialEq for RenderBucketId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for RenderBucketId {}

impl PartialOrd for RenderBucketId {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for RenderBucketId {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.value.cmp(&other.value)
    }
}

impl Hash for RenderBucketId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for RenderBucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderBucketId({}, {:?})", self.value, self.name)
    }
}

impl fmt::Display for RenderBucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}
