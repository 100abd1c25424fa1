use std::borrow::Cow;

use smallvec::SmallVec;

use prism_core::RenderBucketId;

use super::RenderStage;
use crate::context::RenderContext;
use crate::queue::RenderQueue;

/// Draws a single bucket.
#[derive(Debug, Clone)]
pub struct SimpleRenderStage {
    name: Cow<'static, str>,
    bucket: RenderBucketId,
    apply_materials: bool,
}

impl SimpleRenderStage {
    /// Creates a stage that draws `bucket` with material batching.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, bucket: RenderBucketId) -> Self {
        Self {
            name: name.into(),
            bucket,
            apply_materials: true,
        }
    }

    /// When `false`, renderables set up their own state and are drawn with
    /// no pass.
    #[must_use]
    pub fn with_apply_materials(mut self, apply: bool) -> Self {
        self.apply_materials = apply;
        self
    }

    #[must_use]
    pub fn bucket(&self) -> RenderBucketId {
        self.bucket
    }

    #[must_use]
    pub fn applies_materials(&self) -> bool {
        self.apply_materials
    }
}

impl RenderStage for SimpleRenderStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, ctx: &mut dyn RenderContext, queue: &RenderQueue) {
        if !queue.draw_bucket(self.bucket, ctx, self.apply_materials) {
            log::trace!("Stage '{}': bucket {} not in queue", self.name, self.bucket);
        }
    }
}

/// Draws several buckets, in the order given.
#[derive(Debug, Clone)]
pub struct SimpleMultiRenderStage {
    name: Cow<'static, str>,
    buckets: SmallVec<[RenderBucketId; 4]>,
    apply_materials: bool,
}

impl SimpleMultiRenderStage {
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        buckets: impl IntoIterator<Item = RenderBucketId>,
    ) -> Self {
        Self {
            name: name.into(),
            buckets: buckets.into_iter().collect(),
            apply_materials: true,
        }
    }

    #[must_use]
    pub fn with_apply_materials(mut self, apply: bool) -> Self {
        self.apply_materials = apply;
        self
    }

    #[must_use]
    pub fn buckets(&self) -> &[RenderBucketId] {
        &self.buckets
    }
}

impl RenderStage for SimpleMultiRenderStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, ctx: &mut dyn RenderContext, queue: &RenderQueue) {
        for &bucket in &self.buckets {
            if !queue.draw_bucket(bucket, ctx, self.apply_materials) {
                log::trace!("Stage '{}': bucket {bucket} not in queue", self.name);
            }
        }
    }
}
