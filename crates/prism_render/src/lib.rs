//! Prism Render
//!
//! The render queue and render stage pipeline:
//!
//! - [`queue`]: buckets, sort policies and the [`RenderQueue`]
//! - [`stage`]: pluggable per-frame draw logic
//! - [`renderer`]: [`BaseRenderer`], one `render()` call per frame
//! - [`property`]: typed per-renderable metadata
//! - [`material`], [`renderable`], [`state`], [`context`]: the surfaces the
//!   queue draws through

pub mod context;
pub mod material;
pub mod property;
pub mod queue;
pub mod renderable;
pub mod renderer;
pub mod settings;
pub mod stage;
pub mod state;

pub use context::{FrameStats, RenderContext, StateContext};
pub use material::{
    Material, MaterialPass, MaterialSortKey, ShaderId, StandardMaterial, TransparencyMode,
    compare_materials,
};
pub use property::{
    AccessorProperty, OrthoOrderProperty, PayloadProperty, RenderProperty,
    RenderPropertyCollection, SavableProperty, register_savable_property,
};
pub use queue::{
    BucketCursor, OpaqueComparer, OrthoComparer, QueueCursor, RenderBucket, RenderBucketComparer,
    RenderBucketEntry, RenderQueue, TransparentComparer,
};
pub use renderable::{
    InstanceDefinition, InstancedRenderable, MarkedRenderable, MaterialDefinition, MaterialRef,
    Renderable, RenderableRef,
};
pub use renderer::BaseRenderer;
pub use settings::RendererSettings;
pub use stage::{
    EnforcedStateGuard, RenderStage, RenderStageCollection, SimpleMultiRenderStage,
    SimpleRenderStage, TransparentRenderStage,
};
pub use state::{
    BlendState, CompareFunction, CullMode, DepthStencilState, EnforcedRenderState, FillMode,
    RasterizerState, VertexWinding,
};
