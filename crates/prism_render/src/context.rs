//! Render Context
//!
//! [`RenderContext`] is the surface render stages, materials and renderables
//! draw through. The GPU backend behind it is not part of this crate.
//!
//! [`StateContext`] is a CPU-side implementation that tracks the current
//! state, honours [`EnforcedRenderState`] locks, skips redundant changes and
//! counts everything in [`FrameStats`]. It is useful for headless runs and
//! for verifying how much state churn a frame produced.

use std::ops::Range;

use prism_core::Camera;

use crate::material::{MaterialSortKey, ShaderId};
use crate::property::RenderPropertyCollection;
use crate::state::{BlendState, DepthStencilState, EnforcedRenderState, RasterizerState};

/// Draw submission surface consumed by the render queue.
pub trait RenderContext {
    /// Camera of the current view, if any.
    fn camera(&self) -> Option<&Camera>;

    fn rasterizer_state(&self) -> RasterizerState;

    /// Sets the rasterizer state unless [`EnforcedRenderState::RASTERIZER`]
    /// is set.
    fn set_rasterizer_state(&mut self, state: RasterizerState);

    fn depth_stencil_state(&self) -> DepthStencilState;

    /// Sets the depth-stencil state unless
    /// [`EnforcedRenderState::DEPTH_STENCIL`] is set.
    fn set_depth_stencil_state(&mut self, state: DepthStencilState);

    fn blend_state(&self) -> BlendState;

    /// Sets the blend state unless [`EnforcedRenderState::BLEND`] is set.
    fn set_blend_state(&mut self, state: BlendState);

    fn enforced_state(&self) -> EnforcedRenderState;

    fn set_enforced_state(&mut self, flags: EnforcedRenderState);

    /// Binds the shader program of a material pass.
    fn bind_shader(&mut self, shader: ShaderId);

    /// Uploads per-object constants for a material.
    fn bind_constants(&mut self, material: MaterialSortKey, properties: &RenderPropertyCollection);

    /// Issues a draw with the currently bound state.
    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);
}

/// Counters collected by [`StateContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub shader_binds: u32,
    pub rasterizer_changes: u32,
    pub depth_stencil_changes: u32,
    pub blend_changes: u32,
    /// State change requests dropped because the state was enforced.
    pub blocked_changes: u32,
    pub constant_uploads: u32,
    pub draw_calls: u32,
}

/// CPU-side [`RenderContext`] with redundant-state filtering.
#[derive(Debug, Default)]
pub struct StateContext {
    camera: Option<Camera>,
    rasterizer: RasterizerState,
    depth_stencil: DepthStencilState,
    blend: BlendState,
    enforced: EnforcedRenderState,
    current_shader: Option<ShaderId>,
    stats: FrameStats,
}

impl StateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera: Some(camera),
            ..Self::default()
        }
    }

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    #[must_use]
    pub fn current_shader(&self) -> Option<ShaderId> {
        self.current_shader
    }

    #[must_use]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Clears the counters and forgets the bound shader.
    pub fn reset_stats(&mut self) {
        self.stats = FrameStats::default();
        self.current_shader = None;
    }
}

impl RenderContext for StateContext {
    fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    fn rasterizer_state(&self) -> RasterizerState {
        self.rasterizer
    }

    fn set_rasterizer_state(&mut self, state: RasterizerState) {
        if self.enforced.contains(EnforcedRenderState::RASTERIZER) {
            self.stats.blocked_changes += 1;
            return;
        }
        if self.rasterizer != state {
            self.rasterizer = state;
            self.stats.rasterizer_changes += 1;
        }
    }

    fn depth_stencil_state(&self) -> DepthStencilState {
        self.depth_stencil
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilState) {
        if self.enforced.contains(EnforcedRenderState::DEPTH_STENCIL) {
            self.stats.blocked_changes += 1;
            return;
        }
        if self.depth_stencil != state {
            self.depth_stencil = state;
            self.stats.depth_stencil_changes += 1;
        }
    }

    fn blend_state(&self) -> BlendState {
        self.blend
    }

    fn set_blend_state(&mut self, state: BlendState) {
        if self.enforced.contains(EnforcedRenderState::BLEND) {
            self.stats.blocked_changes += 1;
            return;
        }
        if self.blend != state {
            self.blend = state;
            self.stats.blend_changes += 1;
        }
    }

    fn enforced_state(&self) -> EnforcedRenderState {
        self.enforced
    }

    fn set_enforced_state(&mut self, flags: EnforcedRenderState) {
        self.enforced = flags;
    }

    fn bind_shader(&mut self, shader: ShaderId) {
        if self.current_shader != Some(shader) {
            self.current_shader = Some(shader);
            self.stats.shader_binds += 1;
        }
    }

    fn bind_constants(&mut self, _material: MaterialSortKey, _properties: &RenderPropertyCollection) {
        self.stats.constant_uploads += 1;
    }

    fn draw(&mut self, _vertices: Range<u32>, _instances: Range<u32>) {
        self.stats.draw_calls += 1;
    }
}
