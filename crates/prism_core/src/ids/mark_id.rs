use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};

static NEXT_MARK_ID: AtomicI32 = AtomicI32::new(0);

/// Tag used to track one renderable instance through a render queue,
/// independently of its bucket membership.
///
/// A new id is handed out on every call to
/// [`generate_new_unique_id`](Self::generate_new_unique_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(i32);

impl MarkId {
    /// The invalid mark id.
    pub const INVALID: Self = Self(-1);

    /// Creates an id from a raw value.
    #[inline]
    #[must_use]
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    /// Generates a new process-unique mark id.
    #[must_use]
    pub fn generate_new_unique_id() -> Self {
        Self(NEXT_MARK_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for MarkId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for MarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkId({})", self.0)
    }
}
