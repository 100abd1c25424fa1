//! Render Stages
//!
//! A render stage is one unit of per-frame draw logic. Stages run in the
//! order they were registered in a [`RenderStageCollection`], each pulling
//! entries from one or more buckets of the shared queue.
//!
//! - [`SimpleRenderStage`]: draws one bucket
//! - [`SimpleMultiRenderStage`]: draws several buckets in order
//! - [`TransparentRenderStage`]: draws a bucket with two-sided transparency
//! - [`EnforcedStateGuard`]: scoped save/restore of enforced render state

mod collection;
mod guard;
mod simple;
mod transparent;

pub use collection::RenderStageCollection;
pub use guard::EnforcedStateGuard;
pub use simple::{SimpleMultiRenderStage, SimpleRenderStage};
pub use transparent::TransparentRenderStage;

use crate::context::RenderContext;
use crate::queue::RenderQueue;

/// A render stage.
///
/// Stages are data to the renderer: it only knows their names and calls
/// [`execute`](Self::execute) once per frame.
pub trait RenderStage {
    /// Unique name within a [`RenderStageCollection`].
    fn name(&self) -> &str;

    /// Draws this stage's buckets from `queue`.
    fn execute(&mut self, ctx: &mut dyn RenderContext, queue: &RenderQueue);
}
