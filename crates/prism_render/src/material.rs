//! Materials
//!
//! The render queue only sees materials through the [`Material`] trait:
//! a batching sort key, an ordered list of [`MaterialPass`]es, a
//! [`TransparencyMode`], and a hook that uploads per-object constants.
//!
//! [`StandardMaterial`] is the stock implementation.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use crate::context::RenderContext;
use crate::property::RenderPropertyCollection;
use crate::state::{BlendState, DepthStencilState, RasterizerState};

/// Handle of a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ShaderId(pub u32);

/// Batching key of a material (shader group + pass count).
///
/// Two materials with equal keys are render-compatible: they can share
/// shader and pass state across a run of draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MaterialSortKey(u64);

impl MaterialSortKey {
    #[must_use]
    pub fn new(shader_group: u32, pass_count: usize) -> Self {
        let pass_bits = (pass_count as u64) & 0xFFFF_FFFF;
        Self((u64::from(shader_group) << 32) | pass_bits)
    }

    #[inline]
    #[must_use]
    pub fn bits(self) -> u64 {
        self.0
    }
}

/// How a transparent material is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransparencyMode {
    /// Drawn once with the pass's own state.
    #[default]
    OneSided,
    /// Drawn twice: back faces first, then front faces.
    TwoSided,
}

/// One pass of a material.
///
/// Each state is optional; `None` leaves the context's current state alone.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPass {
    pub name: Cow<'static, str>,
    pub shader: ShaderId,
    pub rasterizer: Option<RasterizerState>,
    pub depth_stencil: Option<DepthStencilState>,
    pub blend: Option<BlendState>,
}

impl MaterialPass {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, shader: ShaderId) -> Self {
        Self {
            name: name.into(),
            shader,
            rasterizer: None,
            depth_stencil: None,
            blend: None,
        }
    }

    #[must_use]
    pub fn with_rasterizer(mut self, state: RasterizerState) -> Self {
        self.rasterizer = Some(state);
        self
    }

    #[must_use]
    pub fn with_depth_stencil(mut self, state: DepthStencilState) -> Self {
        self.depth_stencil = Some(state);
        self
    }

    #[must_use]
    pub fn with_blend(mut self, state: BlendState) -> Self {
        self.blend = Some(state);
        self
    }

    /// Binds the shader and applies every state this pass defines.
    pub fn apply(&self, ctx: &mut dyn RenderContext) {
        ctx.bind_shader(self.shader);
        if let Some(state) = self.blend {
            ctx.set_blend_state(state);
        }
        if let Some(state) = self.rasterizer {
            ctx.set_rasterizer_state(state);
        }
        if let Some(state) = self.depth_stencil {
            ctx.set_depth_stencil_state(state);
        }
    }
}

/// A material as seen by the render queue.
pub trait Material: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Batching order; equal keys mean the materials can share pass state.
    fn sort_key(&self) -> MaterialSortKey;

    /// Passes in draw order.
    fn passes(&self) -> &[MaterialPass];

    fn transparency(&self) -> TransparencyMode {
        TransparencyMode::OneSided
    }

    /// Uploads the constants of one object before it is drawn.
    fn apply_material(&self, ctx: &mut dyn RenderContext, properties: &RenderPropertyCollection);
}

/// Total order over optional materials.
///
/// A missing material sorts before any material; two missing materials are
/// equal.
#[must_use]
pub fn compare_materials(a: Option<&dyn Material>, b: Option<&dyn Material>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.sort_key().cmp(&b.sort_key()),
    }
}

/// Stock material: a list of passes and a transparency mode.
///
/// The sort key is built from the first pass's shader and the pass count.
#[derive(Debug, Clone)]
pub struct StandardMaterial {
    name: Cow<'static, str>,
    passes: SmallVec<[MaterialPass; 2]>,
    transparency: TransparencyMode,
}

impl StandardMaterial {
    /// Creates a material without passes.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            passes: SmallVec::new(),
            transparency: TransparencyMode::OneSided,
        }
    }

    /// Creates a material with a single pass using `shader`.
    #[must_use]
    pub fn with_shader(name: impl Into<Cow<'static, str>>, shader: ShaderId) -> Self {
        Self::new(name).with_pass(MaterialPass::new("Main", shader))
    }

    #[must_use]
    pub fn with_pass(mut self, pass: MaterialPass) -> Self {
        self.passes.push(pass);
        self
    }

    #[must_use]
    pub fn with_transparency(mut self, mode: TransparencyMode) -> Self {
        self.transparency = mode;
        self
    }

    pub fn add_pass(&mut self, pass: MaterialPass) {
        self.passes.push(pass);
    }
}

impl Material for StandardMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort_key(&self) -> MaterialSortKey {
        let shader = self.passes.first().map_or(0, |p| p.shader.0);
        MaterialSortKey::new(shader, self.passes.len())
    }

    fn passes(&self) -> &[MaterialPass] {
        &self.passes
    }

    fn transparency(&self) -> TransparencyMode {
        self.transparency
    }

    fn apply_material(&self, ctx: &mut dyn RenderContext, properties: &RenderPropertyCollection) {
        ctx.bind_constants(self.sort_key(), properties);
    }
}
