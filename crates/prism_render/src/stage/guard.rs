use std::ops::{Deref, DerefMut};

use crate::context::RenderContext;
use crate::state::{DepthStencilState, EnforcedRenderState, RasterizerState};

/// Scoped snapshot of the rasterizer, depth-stencil and enforced state.
///
/// The context is reachable through the guard while it lives. On drop the
/// enforcement flags are lifted, both states are put back and the original
/// flags are restored, whatever path the scope left by.
pub struct EnforcedStateGuard<'a> {
    ctx: &'a mut dyn RenderContext,
    rasterizer: RasterizerState,
    depth_stencil: DepthStencilState,
    enforced: EnforcedRenderState,
}

impl<'a> EnforcedStateGuard<'a> {
    pub fn new(ctx: &'a mut dyn RenderContext) -> Self {
        Self {
            rasterizer: ctx.rasterizer_state(),
            depth_stencil: ctx.depth_stencil_state(),
            enforced: ctx.enforced_state(),
            ctx,
        }
    }

    /// Flags that will be restored on drop.
    #[must_use]
    pub fn saved_enforced_state(&self) -> EnforcedRenderState {
        self.enforced
    }

    /// Adds `flags` to the context's enforced state.
    pub fn enforce(&mut self, flags: EnforcedRenderState) {
        let current = self.ctx.enforced_state();
        self.ctx.set_enforced_state(current | flags);
    }

    /// Removes `flags` from the context's enforced state.
    pub fn lift(&mut self, flags: EnforcedRenderState) {
        let current = self.ctx.enforced_state();
        self.ctx.set_enforced_state(current - flags);
    }
}

impl<'a> Deref for EnforcedStateGuard<'a> {
    type Target = dyn RenderContext + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl DerefMut for EnforcedStateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for EnforcedStateGuard<'_> {
    fn drop(&mut self) {
        self.ctx.set_enforced_state(EnforcedRenderState::empty());
        self.ctx.set_rasterizer_state(self.rasterizer);
        self.ctx.set_depth_stencil_state(self.depth_stencil);
        self.ctx.set_enforced_state(self.enforced);
    }
}
