//! Base Renderer
//!
//! [`BaseRenderer`] ties a [`RenderQueue`], an ordered
//! [`RenderStageCollection`] and a render context together. It knows nothing
//! about what the stages do; reconfiguring the pipeline means changing the
//! stage collection.
//!
//! ```rust,ignore
//! let mut renderer = BaseRenderer::with_default_pipeline(ctx, RendererSettings::default())?;
//!
//! for object in &visible {
//!     renderer.process(object);
//! }
//! renderer.render_frame();
//! ```

use prism_core::{RenderBucketId, Result};

use crate::context::RenderContext;
use crate::queue::RenderQueue;
use crate::renderable::RenderableRef;
use crate::settings::RendererSettings;
use crate::stage::{RenderStageCollection, SimpleRenderStage, TransparentRenderStage};

/// Per-frame orchestration of queue and stages.
#[derive(Debug)]
pub struct BaseRenderer<C: RenderContext> {
    context: C,
    queue: RenderQueue,
    stages: RenderStageCollection,
    settings: RendererSettings,
}

impl<C: RenderContext> BaseRenderer<C> {
    /// Assembles a renderer from existing parts.
    pub fn new(
        context: C,
        queue: RenderQueue,
        stages: RenderStageCollection,
        settings: RendererSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            context,
            queue,
            stages,
            settings,
        })
    }

    /// Creates a renderer with the default buckets and no stages.
    pub fn with_settings(context: C, settings: RendererSettings) -> Result<Self> {
        settings.validate()?;
        let queue = RenderQueue::with_default_buckets(settings.initial_bucket_capacity)?;
        Self::new(context, queue, RenderStageCollection::new(), settings)
    }

    /// Creates a renderer with the default buckets and the default stages:
    /// PreOpaque, Opaque, PostOpaque, Transparent, Ortho.
    pub fn with_default_pipeline(context: C, settings: RendererSettings) -> Result<Self> {
        let mut renderer = Self::with_settings(context, settings)?;
        let stages = &mut renderer.stages;
        stages.add(SimpleRenderStage::new("PreOpaque", RenderBucketId::PRE_OPAQUE))?;
        stages.add(SimpleRenderStage::new("Opaque", RenderBucketId::OPAQUE))?;
        stages.add(SimpleRenderStage::new("PostOpaque", RenderBucketId::POST_OPAQUE))?;
        stages.add(TransparentRenderStage::new("Transparent", RenderBucketId::TRANSPARENT))?;
        stages.add(SimpleRenderStage::new("Ortho", RenderBucketId::ORTHO))?;
        Ok(renderer)
    }

    /// Enqueues `renderable` unless it is not valid for draw.
    pub fn process(&mut self, renderable: &RenderableRef) -> bool {
        if !renderable.is_valid_for_draw() {
            log::trace!("Renderer: skipped renderable not valid for draw");
            return false;
        }
        self.queue.enqueue(renderable)
    }

    /// Runs one frame.
    ///
    /// Optionally sorts every bucket against the context camera, executes
    /// every stage in order, then optionally clears every bucket.
    pub fn render(&mut self, sort_buckets: bool, clear_buckets: bool) {
        if sort_buckets {
            let camera = self.context.camera().copied();
            self.queue.sort_buckets(camera.as_ref(), None);
        }

        self.stages.execute_all(&mut self.context, &self.queue);

        if clear_buckets {
            self.queue
                .clear_buckets(self.settings.notify_marked_on_clear, None);
        }
    }

    /// Runs one frame with the sort and clear flags from the settings.
    pub fn render_frame(&mut self) {
        self.render(self.settings.sort_buckets, self.settings.clear_buckets);
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    #[must_use]
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut RenderQueue {
        &mut self.queue
    }

    #[must_use]
    pub fn stages(&self) -> &RenderStageCollection {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut RenderStageCollection {
        &mut self.stages
    }

    #[must_use]
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Consumes the renderer, returning its context.
    pub fn into_context(self) -> C {
        self.context
    }
}
