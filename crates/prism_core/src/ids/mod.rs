//! Identifier Types
//!
//! Lightweight integer handles used as map keys throughout the render queue:
//!
//! - [`RenderPropertyId`]: one id per render property *type*
//! - [`RenderBucketId`]: a named, registered bucket key
//! - [`MarkId`]: a per-call tag for tracking individual renderables
//!
//! All ids wrap a non-negative `i32`; `-1` is reserved for the invalid id.
//! Generation goes through process-wide atomic counters, so ids are unique
//! within one run and never persisted.

mod bucket_id;
mod mark_id;
mod property_id;

pub use bucket_id::RenderBucketId;
pub use mark_id::MarkId;
pub use property_id::RenderPropertyId;
