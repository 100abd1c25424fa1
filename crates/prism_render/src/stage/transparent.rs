use std::borrow::Cow;

use prism_core::RenderBucketId;

use super::{EnforcedStateGuard, RenderStage};
use crate::context::RenderContext;
use crate::material::{Material, TransparencyMode};
use crate::queue::{RenderBucketEntry, RenderQueue};
use crate::state::{DepthStencilState, EnforcedRenderState, RasterizerState};

const FACE_STATE: EnforcedRenderState = EnforcedRenderState::RASTERIZER.union(EnforcedRenderState::DEPTH_STENCIL);

/// Draws a transparent bucket, rendering two-sided materials in two passes.
///
/// A two-sided material with exactly one pass is drawn back faces first
/// (front culling, counter-clockwise winding, depth writes off) and then
/// front faces (back culling). Every other entry is drawn once per pass.
///
/// When the caller has enforced a wireframe or no-cull rasterizer state the
/// stage is in debug rendering: everything is drawn single-pass and the
/// caller's state is left alone. Otherwise the rasterizer, depth-stencil and
/// enforced state are restored when the stage returns.
#[derive(Debug, Clone)]
pub struct TransparentRenderStage {
    name: Cow<'static, str>,
    bucket: RenderBucketId,
}

impl TransparentRenderStage {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, bucket: RenderBucketId) -> Self {
        Self {
            name: name.into(),
            bucket,
        }
    }

    #[must_use]
    pub fn bucket(&self) -> RenderBucketId {
        self.bucket
    }

    fn is_debug_rendering(ctx: &dyn RenderContext) -> bool {
        ctx.enforced_state().contains(EnforcedRenderState::RASTERIZER) && ctx.rasterizer_state().is_debug()
    }
}

impl RenderStage for TransparentRenderStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, ctx: &mut dyn RenderContext, queue: &RenderQueue) {
        let Some(bucket) = queue.bucket(self.bucket) else {
            log::trace!("Stage '{}': bucket {} not in queue", self.name, self.bucket);
            return;
        };
        if bucket.is_empty() {
            return;
        }

        if Self::is_debug_rendering(ctx) {
            log::trace!("Stage '{}': debug rendering, two-sided pass disabled", self.name);
            for entry in bucket {
                draw_single_pass(ctx, bucket.id(), entry);
            }
            return;
        }

        let mut guard = EnforcedStateGuard::new(ctx);
        for entry in bucket {
            match entry.material() {
                Some(material) if is_two_pass(material) => {
                    draw_two_pass(&mut guard, bucket.id(), entry, material);
                }
                _ => draw_single_pass(&mut *guard, bucket.id(), entry),
            }
        }
    }
}

fn is_two_pass(material: &dyn Material) -> bool {
    material.transparency() == TransparencyMode::TwoSided && material.passes().len() == 1
}

fn draw_single_pass(ctx: &mut dyn RenderContext, bucket: RenderBucketId, entry: &RenderBucketEntry) {
    let renderable = entry.renderable();
    let Some(material) = entry.material() else {
        renderable.setup_draw_call(ctx, bucket, None);
        return;
    };

    material.apply_material(ctx, renderable.render_properties());
    for pass in material.passes() {
        pass.apply(ctx);
        renderable.setup_draw_call(ctx, bucket, Some(pass));
    }
}

fn draw_two_pass(
    guard: &mut EnforcedStateGuard<'_>,
    bucket: RenderBucketId,
    entry: &RenderBucketEntry,
    material: &dyn Material,
) {
    let renderable = entry.renderable();
    let Some(pass) = material.passes().first() else {
        return;
    };

    material.apply_material(&mut **guard, renderable.render_properties());
    pass.apply(&mut **guard);

    // Back faces.
    guard.lift(FACE_STATE);
    guard.set_rasterizer_state(RasterizerState::CULL_FRONT_CCW);
    guard.set_depth_stencil_state(DepthStencilState::DEPTH_WRITE_OFF);
    guard.enforce(FACE_STATE);
    renderable.setup_draw_call(&mut **guard, bucket, Some(pass));
    guard.lift(FACE_STATE);

    // Front faces.
    guard.set_rasterizer_state(RasterizerState::CULL_BACK);
    guard.enforce(EnforcedRenderState::RASTERIZER);
    pass.apply(&mut **guard);
    renderable.setup_draw_call(&mut **guard, bucket, Some(pass));
    guard.lift(EnforcedRenderState::RASTERIZER);
}
