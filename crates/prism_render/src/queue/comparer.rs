//! Bucket sort policies.
//!
//! A comparer is a pure strategy object. The queue hands it the camera for
//! the duration of one sort and takes it back afterwards.

use std::cmp::Ordering;
use std::fmt;

use glam::Vec3;
use prism_core::Camera;

use super::bucket::RenderBucketEntry;
use crate::material::compare_materials;
use crate::property::OrthoOrderProperty;

/// Ordering strategy of one bucket.
pub trait RenderBucketComparer: fmt::Debug {
    fn camera(&self) -> Option<&Camera>;

    fn set_camera(&mut self, camera: Option<Camera>);

    fn compare(&self, a: &RenderBucketEntry, b: &RenderBucketEntry) -> Ordering;
}

/// Depth of `position` along the camera's view axis.
///
/// The offset from the camera is projected onto the view direction and the
/// length of that projection is returned, so points behind the camera get
/// a positive depth too. Without a camera every depth is `0`.
#[must_use]
pub fn distance_to_camera(position: Vec3, camera: Option<&Camera>) -> f32 {
    let Some(camera) = camera else {
        return 0.0;
    };
    let direction = camera.direction();
    let along = (position - camera.position()).dot(direction).abs();
    (direction * along).length()
}

fn entry_distance(entry: &RenderBucketEntry, camera: Option<&Camera>) -> f32 {
    distance_to_camera(entry.renderable().world_position(), camera)
}

/// Material first, then front to back.
#[derive(Debug, Default, Clone)]
pub struct OpaqueComparer {
    camera: Option<Camera>,
}

impl OpaqueComparer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBucketComparer for OpaqueComparer {
    fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    fn compare(&self, a: &RenderBucketEntry, b: &RenderBucketEntry) -> Ordering {
        compare_materials(a.material(), b.material()).then_with(|| {
            let camera = self.camera.as_ref();
            entry_distance(a, camera).total_cmp(&entry_distance(b, camera))
        })
    }
}

/// Back to front; materials are ignored.
#[derive(Debug, Default, Clone)]
pub struct TransparentComparer {
    camera: Option<Camera>,
}

impl TransparentComparer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBucketComparer for TransparentComparer {
    fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    fn compare(&self, a: &RenderBucketEntry, b: &RenderBucketEntry) -> Ordering {
        let camera = self.camera.as_ref();
        entry_distance(b, camera).total_cmp(&entry_distance(a, camera))
    }
}

/// Ascending [`OrthoOrderProperty`]. Entries without the property compare
/// equal to everything.
#[derive(Debug, Default, Clone)]
pub struct OrthoComparer {
    camera: Option<Camera>,
}

impl OrthoComparer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBucketComparer for OrthoComparer {
    fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    fn compare(&self, a: &RenderBucketEntry, b: &RenderBucketEntry) -> Ordering {
        let order = |entry: &RenderBucketEntry| {
            entry
                .renderable()
                .render_properties()
                .try_get::<OrthoOrderProperty>()
                .map(|p| p.0)
        };
        match (order(a), order(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        }
    }
}
