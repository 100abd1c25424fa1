//! Render Queue
//!
//! Per-frame collection, sorting and drawing of renderables.
//!
//! - [`RenderQueue`]: ordered buckets plus marked renderables
//! - [`RenderBucket`]: entries of one bucket id, sorted and drawn with
//!   material batching
//! - [`RenderBucketComparer`]: sort policies ([`OpaqueComparer`],
//!   [`TransparentComparer`], [`OrthoComparer`])
//!
//! ```rust,ignore
//! let mut queue = RenderQueue::with_default_buckets(32)?;
//! queue.enqueue(&renderable);
//! queue.sort_buckets(ctx.camera(), None);
//! queue.draw_bucket(RenderBucketId::OPAQUE, &mut ctx, true);
//! queue.clear_buckets(true, None);
//! ```

mod bucket;
mod comparer;
mod render_queue;
mod sort;

pub use bucket::{BucketCursor, RenderBucket, RenderBucketEntry};
pub use comparer::{
    OpaqueComparer, OrthoComparer, RenderBucketComparer, TransparentComparer, distance_to_camera,
};
pub use render_queue::{QueueCursor, RenderQueue};
