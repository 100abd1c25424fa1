//! Prism
//!
//! Render queue and render stage pipeline for real-time 3D engines.
//!
//! Renderables are pushed into a [`RenderQueue`](render::RenderQueue) every
//! frame, fanned out into buckets by their material definition, sorted per
//! bucket (material then front to back for opaque geometry, back to front
//! for transparent geometry), and drawn by an ordered list of render stages
//! that batch draws sharing material state.
//!
//! # Crates
//!
//! - [`core`]: ids, camera, errors
//! - [`render`]: properties, materials, queue, stages, renderer
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use prism::prelude::*;
//!
//! let mut renderer =
//!     BaseRenderer::with_default_pipeline(StateContext::with_camera(camera), RendererSettings::default())?;
//!
//! renderer.process(&my_renderable);
//! renderer.render_frame();
//!
//! println!("{} draw calls", renderer.context().stats().draw_calls);
//! ```

pub use glam;
pub use prism_core as core;
pub use prism_render as render;

pub use prism_core::{Camera, MarkId, PrismError, RenderBucketId, RenderPropertyId, Result};
pub use prism_render::{
    BaseRenderer, Material, MaterialDefinition, RenderContext, RenderQueue, RenderStage,
    Renderable, RenderableRef, RendererSettings, StandardMaterial, StateContext,
};

/// Commonly used types, for glob import.
pub mod prelude {
    pub use prism_core::{Camera, MarkId, PrismError, RenderBucketId, RenderPropertyId, Result};
    pub use prism_render::property::{
        AccessorProperty, OrthoOrderProperty, PayloadProperty, RenderProperty,
        RenderPropertyCollection, SavableProperty, register_savable_property,
    };
    pub use prism_render::queue::{
        BucketCursor, OpaqueComparer, OrthoComparer, QueueCursor, RenderBucket,
        RenderBucketComparer, RenderBucketEntry, RenderQueue, TransparentComparer,
    };
    pub use prism_render::renderable::{
        InstanceDefinition, InstancedRenderable, MarkedRenderable, MaterialDefinition,
        MaterialRef, Renderable, RenderableRef,
    };
    pub use prism_render::stage::{
        EnforcedStateGuard, RenderStage, RenderStageCollection, SimpleMultiRenderStage,
        SimpleRenderStage, TransparentRenderStage,
    };
    pub use prism_render::{
        BaseRenderer, BlendState, DepthStencilState, EnforcedRenderState, FrameStats, Material,
        MaterialPass, MaterialSortKey, RasterizerState, RenderContext, RendererSettings, ShaderId,
        StandardMaterial, StateContext, TransparencyMode, compare_materials,
    };
}
