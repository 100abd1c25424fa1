//! Shared helpers for the integration suites: a renderable that records
//! every draw it receives, and a few stock materials.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::{Affine3A, Vec3};
use prism::prelude::*;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One `setup_draw_call` as seen by a [`TestRenderable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub label: &'static str,
    pub bucket: RenderBucketId,
    pub pass: Option<String>,
    pub rasterizer: RasterizerState,
    pub depth_stencil: DepthStencilState,
    pub enforced: EnforcedRenderState,
}

pub type DrawLog = Rc<RefCell<Vec<DrawRecord>>>;

pub fn new_log() -> DrawLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn labels(log: &DrawLog) -> Vec<&'static str> {
    log.borrow().iter().map(|r| r.label).collect()
}

pub fn passes(log: &DrawLog) -> Vec<Option<String>> {
    log.borrow().iter().map(|r| r.pass.clone()).collect()
}

pub struct TestRenderable {
    pub label: &'static str,
    materials: MaterialDefinition,
    transform: Affine3A,
    properties: RenderPropertyCollection,
    valid: bool,
    markable: bool,
    log: DrawLog,
    pub cleared_marks: RefCell<Vec<MarkId>>,
    /// `marked_count()` of the queue at each notification.
    pub marks_seen: RefCell<Vec<usize>>,
}

impl TestRenderable {
    pub fn new(label: &'static str, log: &DrawLog) -> Self {
        Self {
            label,
            materials: MaterialDefinition::new(),
            transform: Affine3A::IDENTITY,
            properties: RenderPropertyCollection::new(),
            valid: true,
            markable: false,
            log: Rc::clone(log),
            cleared_marks: RefCell::new(Vec::new()),
            marks_seen: RefCell::new(Vec::new()),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform = Affine3A::from_translation(position);
        self
    }

    /// Places the object `distance` units in front of a camera at the origin
    /// looking down -Z.
    pub fn at_depth(self, distance: f32) -> Self {
        self.at(Vec3::new(0.0, 0.0, -distance))
    }

    pub fn with_material(mut self, bucket: RenderBucketId, material: MaterialRef) -> Self {
        self.materials.insert(bucket, material);
        self
    }

    pub fn with_property<P: RenderProperty>(mut self, property: P) -> Self {
        self.properties.add(property).unwrap();
        self
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn markable(mut self) -> Self {
        self.markable = true;
        self
    }

    pub fn into_ref(self) -> RenderableRef {
        Rc::new(self)
    }
}

impl Renderable for TestRenderable {
    fn material_definition(&self) -> &MaterialDefinition {
        &self.materials
    }

    fn world_transform(&self) -> Affine3A {
        self.transform
    }

    fn render_properties(&self) -> &RenderPropertyCollection {
        &self.properties
    }

    fn is_valid_for_draw(&self) -> bool {
        self.valid
    }

    fn setup_draw_call(
        &self,
        ctx: &mut dyn RenderContext,
        bucket: RenderBucketId,
        pass: Option<&MaterialPass>,
    ) {
        self.log.borrow_mut().push(DrawRecord {
            label: self.label,
            bucket,
            pass: pass.map(|p| p.name.to_string()),
            rasterizer: ctx.rasterizer_state(),
            depth_stencil: ctx.depth_stencil_state(),
            enforced: ctx.enforced_state(),
        });
        ctx.draw(0..3, 0..1);
    }

    fn as_marked(&self) -> Option<&dyn MarkedRenderable> {
        if self.markable {
            Some(self as &dyn MarkedRenderable)
        } else {
            None
        }
    }
}

impl MarkedRenderable for TestRenderable {
    fn on_mark_cleared(&self, id: MarkId, queue: &RenderQueue) {
        let marked_self = queue
            .get_marked(id)
            .is_some_and(|r| std::ptr::eq(Rc::as_ptr(r).cast::<()>(), std::ptr::from_ref(self).cast::<()>()));
        assert!(marked_self, "mark must still point at this renderable during notification");
        self.cleared_marks.borrow_mut().push(id);
        self.marks_seen.borrow_mut().push(queue.marked_count());
    }
}

/// Single-pass material named `name`, batching under `shader`.
pub fn material(name: &'static str, shader: u32) -> MaterialRef {
    Arc::new(StandardMaterial::with_shader(name, ShaderId(shader)))
}

/// Material with `count` passes `P0..Pn`, pass `i` using shader `shader + i`.
pub fn multi_pass(name: &'static str, shader: u32, count: u32) -> MaterialRef {
    let mut mat = StandardMaterial::new(name);
    for i in 0..count {
        mat.add_pass(MaterialPass::new(format!("P{i}"), ShaderId(shader + i)));
    }
    Arc::new(mat)
}

pub fn two_sided(name: &'static str, shader: u32) -> MaterialRef {
    Arc::new(
        StandardMaterial::with_shader(name, ShaderId(shader))
            .with_transparency(TransparencyMode::TwoSided),
    )
}

pub fn camera() -> Camera {
    Camera::new(Vec3::ZERO, Vec3::NEG_Z)
}
