//! Render State Definitions
//!
//! Fixed-function GPU state that materials and stages switch between:
//! rasterizer, depth-stencil and blend state, plus the
//! [`EnforcedRenderState`] flags a caller uses to lock a state in place.

use bitflags::bitflags;

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
}

/// Vertex winding that marks a triangle as front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexWinding {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

/// Rasterizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RasterizerState {
    pub cull: CullMode,
    pub winding: VertexWinding,
    pub fill: FillMode,
}

impl RasterizerState {
    /// Cull back faces, clockwise front. The default.
    pub const CULL_BACK: Self = Self {
        cull: CullMode::Back,
        winding: VertexWinding::Clockwise,
        fill: FillMode::Solid,
    };

    /// Cull front faces with counter-clockwise winding; shows back faces.
    pub const CULL_FRONT_CCW: Self = Self {
        cull: CullMode::Front,
        winding: VertexWinding::CounterClockwise,
        fill: FillMode::Solid,
    };

    /// No culling.
    pub const CULL_NONE: Self = Self {
        cull: CullMode::None,
        winding: VertexWinding::Clockwise,
        fill: FillMode::Solid,
    };

    /// Wireframe with no culling, typically enforced for debug views.
    pub const WIREFRAME: Self = Self {
        cull: CullMode::None,
        winding: VertexWinding::Clockwise,
        fill: FillMode::Wireframe,
    };

    /// Returns `true` for states only used by debug views: wireframe fill or
    /// culling disabled.
    #[inline]
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.fill == FillMode::Wireframe || self.cull == CullMode::None
    }
}

/// Depth comparison function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    Never,
    #[default]
    Less,
    LessEqual,
    Equal,
    Greater,
    GreaterEqual,
    NotEqual,
    Always,
}

/// Depth-stencil state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    pub depth_enable: bool,
    pub depth_write: bool,
    pub compare: CompareFunction,
}

impl DepthStencilState {
    /// Depth test and write enabled.
    pub const DEFAULT: Self = Self {
        depth_enable: true,
        depth_write: true,
        compare: CompareFunction::Less,
    };

    /// Depth test enabled, writes disabled.
    pub const DEPTH_WRITE_OFF: Self = Self {
        depth_enable: true,
        depth_write: false,
        compare: CompareFunction::Less,
    };

    /// Depth test and write disabled.
    pub const NONE: Self = Self {
        depth_enable: false,
        depth_write: false,
        compare: CompareFunction::Always,
    };
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Blend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendState {
    Opaque,
    AlphaBlend,
    Additive,
}

impl BlendState {
    pub const OPAQUE: Self = Self::Opaque;
    pub const ALPHA_BLEND: Self = Self::AlphaBlend;
    pub const ADDITIVE: Self = Self::Additive;
}

impl Default for BlendState {
    fn default() -> Self {
        Self::Opaque
    }
}

bitflags! {
    /// States a caller has locked on a render context.
    ///
    /// While a flag is set, the context ignores requests to change the
    /// matching state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EnforcedRenderState: u32 {
        const BLEND         = 1 << 0;
        const RASTERIZER    = 1 << 1;
        const DEPTH_STENCIL = 1 << 2;
    }
}
