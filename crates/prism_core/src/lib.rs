//! Prism Core
//!
//! Foundational types shared by the Prism render queue crates:
//!
//! - [`ids`]: property, bucket and mark identifiers
//! - [`Camera`]: the viewpoint buckets are sorted against
//! - [`errors`]: the crate-wide [`PrismError`] type

pub mod camera;
pub mod errors;
pub mod ids;

pub use camera::Camera;
pub use errors::{PrismError, Result};
pub use ids::{MarkId, RenderBucketId, RenderPropertyId};
