//! Renderables
//!
//! Anything that can be pushed through a [`RenderQueue`] implements
//! [`Renderable`]. Its [`MaterialDefinition`] decides which buckets it
//! joins: one entry per bucket, each with the material used there.
//!
//! Two optional capabilities are exposed through query methods rather than
//! downcasting:
//! - [`MarkedRenderable`]: notified when its mark is cleared
//! - [`InstancedRenderable`]: drawn through a shared [`InstanceDefinition`]

use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;

use prism_core::{MarkId, RenderBucketId};

use crate::context::RenderContext;
use crate::material::{Material, MaterialPass};
use crate::property::RenderPropertyCollection;
use crate::queue::RenderQueue;

/// Shared handle to a renderable.
pub type RenderableRef = Rc<dyn Renderable>;

/// Shared handle to a material.
pub type MaterialRef = Arc<dyn Material>;

/// An object the render queue can sort and draw.
pub trait Renderable {
    /// Bucket-to-material map deciding which buckets this object joins.
    fn material_definition(&self) -> &MaterialDefinition;

    fn world_transform(&self) -> Affine3A;

    fn render_properties(&self) -> &RenderPropertyCollection;

    /// Objects that are not valid for draw are rejected by buckets.
    fn is_valid_for_draw(&self) -> bool;

    /// Issues the draw for one pass.
    ///
    /// `pass` is `None` when the renderable is expected to set up its own
    /// state.
    fn setup_draw_call(
        &self,
        ctx: &mut dyn RenderContext,
        bucket: RenderBucketId,
        pass: Option<&MaterialPass>,
    );

    /// World-space position used for distance sorting.
    fn world_position(&self) -> Vec3 {
        Vec3::from(self.world_transform().translation)
    }

    fn as_marked(&self) -> Option<&dyn MarkedRenderable> {
        None
    }

    fn as_instanced(&self) -> Option<&dyn InstancedRenderable> {
        None
    }
}

/// A renderable that wants to know when a queue drops its mark.
pub trait MarkedRenderable: Renderable {
    /// Called while `id` is still marked in `queue`; the mark is dropped
    /// right after.
    fn on_mark_cleared(&self, id: MarkId, queue: &RenderQueue);
}

/// A renderable drawn as one instance of a shared definition.
pub trait InstancedRenderable: Renderable {
    fn instance_definition(&self) -> Option<&InstanceDefinition>;
}

/// Materials a renderable uses, keyed by bucket.
#[derive(Debug, Clone, Default)]
pub struct MaterialDefinition {
    materials: FxHashMap<RenderBucketId, MaterialRef>,
}

impl MaterialDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, bucket: RenderBucketId, material: MaterialRef) -> Self {
        self.insert(bucket, material);
        self
    }

    /// Sets the material for `bucket`, returning the previous one.
    pub fn insert(&mut self, bucket: RenderBucketId, material: MaterialRef) -> Option<MaterialRef> {
        self.materials.insert(bucket, material)
    }

    pub fn remove(&mut self, bucket: RenderBucketId) -> Option<MaterialRef> {
        self.materials.remove(&bucket)
    }

    #[must_use]
    pub fn get(&self, bucket: RenderBucketId) -> Option<&MaterialRef> {
        self.materials.get(&bucket)
    }

    #[must_use]
    pub fn contains(&self, bucket: RenderBucketId) -> bool {
        self.materials.contains_key(&bucket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RenderBucketId, &MaterialRef)> + '_ {
        self.materials.iter().map(|(id, material)| (*id, material))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// `true` when non-empty and every bucket id is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.materials.is_empty() && self.materials.keys().all(|id| id.is_valid())
    }
}

/// Shared description of an instanced draw.
///
/// Tracks how many instances are currently attached, up to a fixed limit.
#[derive(Debug)]
pub struct InstanceDefinition {
    name: Cow<'static, str>,
    max_instances: usize,
    instance_count: Cell<usize>,
}

impl InstanceDefinition {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, max_instances: usize) -> Self {
        Self {
            name: name.into(),
            max_instances,
            instance_count: Cell::new(0),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instance_count.get()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.instance_count.get() >= self.max_instances
    }

    /// Attaches one instance; `false` when the definition is full.
    pub fn add_instance(&self) -> bool {
        if self.is_full() {
            return false;
        }
        self.instance_count.set(self.instance_count.get() + 1);
        true
    }

    /// Detaches one instance; `false` when none are attached.
    pub fn remove_instance(&self) -> bool {
        let count = self.instance_count.get();
        if count == 0 {
            return false;
        }
        self.instance_count.set(count - 1);
        true
    }
}
