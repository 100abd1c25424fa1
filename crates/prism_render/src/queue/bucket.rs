//! Render Bucket
//!
//! A bucket stores `(material, renderable)` entries for one
//! [`RenderBucketId`], sorts them with its comparer and draws them with
//! material batching.
//!
//! # Batching
//!
//! With materials applied, [`RenderBucket::draw_all`] groups consecutive
//! entries whose materials compare equal (same shader group and pass count)
//! into a run. A run of one entry is drawn pass by pass. A longer run is
//! drawn pass-major: each pass is applied once and then every entry in the
//! run is drawn with it, so shader and state binds are paid once per pass
//! instead of once per object and pass.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use prism_core::{Camera, PrismError, RenderBucketId, Result};

use super::comparer::RenderBucketComparer;
use super::sort::hybrid_sort;
use crate::context::RenderContext;
use crate::material::{Material, compare_materials};
use crate::renderable::{MaterialRef, Renderable, RenderableRef};

/// A renderable paired with the material it uses in one bucket.
#[derive(Clone)]
pub struct RenderBucketEntry {
    material: Option<MaterialRef>,
    renderable: RenderableRef,
}

impl RenderBucketEntry {
    #[must_use]
    pub fn new(material: Option<MaterialRef>, renderable: RenderableRef) -> Self {
        Self {
            material,
            renderable,
        }
    }

    #[must_use]
    pub fn material(&self) -> Option<&dyn Material> {
        self.material.as_deref()
    }

    #[must_use]
    pub fn material_ref(&self) -> Option<&MaterialRef> {
        self.material.as_ref()
    }

    #[must_use]
    pub fn renderable(&self) -> &dyn Renderable {
        &*self.renderable
    }

    #[must_use]
    pub fn renderable_ref(&self) -> &RenderableRef {
        &self.renderable
    }
}

impl fmt::Debug for RenderBucketEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderBucketEntry")
            .field("material", &self.material().map(Material::name))
            .field("renderable", &Rc::as_ptr(&self.renderable).cast::<()>())
            .finish()
    }
}

/// Reference identity of two renderables, ignoring vtables.
pub(crate) fn same_renderable(a: &RenderableRef, b: &RenderableRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// Entries of one bucket plus its sort policy.
pub struct RenderBucket {
    id: RenderBucketId,
    comparer: Box<dyn RenderBucketComparer>,
    entries: Vec<RenderBucketEntry>,
    /// Merge sort auxiliary buffer; grows with the bucket, never shrinks.
    scratch: Vec<RenderBucketEntry>,
    version: u64,
}

impl RenderBucket {
    /// Creates an empty bucket.
    ///
    /// Fails if `id` is invalid or `initial_capacity` is zero.
    pub fn new(
        id: RenderBucketId,
        comparer: Box<dyn RenderBucketComparer>,
        initial_capacity: usize,
    ) -> Result<Self> {
        if !id.is_valid() {
            return Err(PrismError::InvalidArgument(format!(
                "cannot create a render bucket for invalid id {id}"
            )));
        }
        if initial_capacity == 0 {
            return Err(PrismError::InvalidArgument(format!(
                "render bucket {id} needs a non-zero initial capacity"
            )));
        }

        Ok(Self {
            id,
            comparer,
            entries: Vec::with_capacity(initial_capacity),
            scratch: Vec::with_capacity(initial_capacity),
            version: 0,
        })
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> RenderBucketId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Bumped by every mutation; cursors compare against it.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn comparer(&self) -> &dyn RenderBucketComparer {
        &*self.comparer
    }

    pub fn comparer_mut(&mut self) -> &mut dyn RenderBucketComparer {
        &mut *self.comparer
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RenderBucketEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[RenderBucketEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderBucketEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn contains(&self, renderable: &RenderableRef) -> bool {
        self.entries
            .iter()
            .any(|e| same_renderable(&e.renderable, renderable))
    }

    /// Appends an entry, doubling the capacity when full.
    ///
    /// Returns `false` if the renderable is not valid for draw or is
    /// already in the bucket.
    pub fn add(&mut self, renderable: &RenderableRef, material: Option<MaterialRef>) -> bool {
        if !renderable.is_valid_for_draw() {
            log::trace!("Bucket {}: rejected renderable not valid for draw", self.id);
            return false;
        }
        if self.contains(renderable) {
            log::trace!("Bucket {}: renderable already queued", self.id);
            return false;
        }

        let capacity = self.entries.capacity();
        if self.entries.len() == capacity {
            self.entries.reserve_exact(capacity.max(1));
            log::trace!(
                "Bucket {} grew from {capacity} to {}",
                self.id,
                self.entries.capacity()
            );
        }

        self.entries
            .push(RenderBucketEntry::new(material, Rc::clone(renderable)));
        self.version = self.version.wrapping_add(1);
        true
    }

    /// Removes the first entry holding `renderable`, keeping the order of
    /// the rest.
    pub fn remove(&mut self, renderable: &RenderableRef) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|e| same_renderable(&e.renderable, renderable))
        else {
            return false;
        };

        self.entries.remove(index);
        self.version = self.version.wrapping_add(1);
        true
    }

    /// Drops every entry; capacity is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.version = self.version.wrapping_add(1);
    }

    /// Sorts with the comparer's current camera.
    pub fn sort(&mut self) {
        if self.entries.len() <= 1 {
            return;
        }

        log::trace!("Sorting bucket {} ({} entries)", self.id, self.entries.len());
        let comparer = &*self.comparer;
        hybrid_sort(&mut self.entries, &mut self.scratch, |a, b| {
            comparer.compare(a, b)
        });
        self.version = self.version.wrapping_add(1);
    }

    /// Sorts against `camera`, which the comparer only holds for this call.
    pub fn sort_with_camera(&mut self, camera: Option<&Camera>) {
        self.comparer.set_camera(camera.copied());
        self.sort();
        self.comparer.set_camera(None);
    }

    /// Draws every entry.
    ///
    /// Without `apply_materials` each renderable is drawn once with no pass
    /// and sets up its own state. Otherwise entries are drawn in material
    /// runs; see the module docs.
    pub fn draw_all(&self, ctx: &mut dyn RenderContext, apply_materials: bool) {
        if !apply_materials {
            for entry in &self.entries {
                entry.renderable.setup_draw_call(ctx, self.id, None);
            }
            return;
        }

        let mut index = 0;
        while index < self.entries.len() {
            let head = &self.entries[index];
            let Some(material) = head.material() else {
                head.renderable.setup_draw_call(ctx, self.id, None);
                index += 1;
                continue;
            };

            // A missing material never compares equal to a present one, so
            // runs stop at entries without a material.
            let end = self.entries[index + 1..]
                .iter()
                .position(|e| compare_materials(Some(material), e.material()) != Ordering::Equal)
                .map_or(self.entries.len(), |offset| index + 1 + offset);

            self.draw_run(ctx, material, &self.entries[index..end]);
            index = end;
        }
    }

    fn draw_run(&self, ctx: &mut dyn RenderContext, material: &dyn Material, run: &[RenderBucketEntry]) {
        if let [entry] = run {
            material.apply_material(ctx, entry.renderable.render_properties());
            for pass in material.passes() {
                pass.apply(ctx);
                entry.renderable.setup_draw_call(ctx, self.id, Some(pass));
            }
            return;
        }

        for (pass_index, pass) in material.passes().iter().enumerate() {
            pass.apply(ctx);
            for entry in run {
                if pass_index == 0
                    && let Some(own) = entry.material()
                {
                    own.apply_material(ctx, entry.renderable.render_properties());
                }
                entry.renderable.setup_draw_call(ctx, self.id, Some(pass));
            }
        }
    }

    /// Creates a fail-fast cursor positioned before the first entry.
    #[must_use]
    pub fn cursor(&self) -> BucketCursor {
        BucketCursor {
            bucket: self.id,
            version: self.version,
            index: None,
        }
    }
}

impl fmt::Debug for RenderBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderBucket")
            .field("id", &self.id)
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.capacity())
            .field("version", &self.version)
            .field("comparer", &self.comparer)
            .finish()
    }
}

impl<'a> IntoIterator for &'a RenderBucket {
    type Item = &'a RenderBucketEntry;
    type IntoIter = std::slice::Iter<'a, RenderBucketEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Cursor over a bucket that fails once the bucket has been modified.
///
/// The cursor does not borrow the bucket; each step is handed the bucket
/// and checks its version against the one captured at creation.
#[derive(Debug, Clone)]
pub struct BucketCursor {
    bucket: RenderBucketId,
    version: u64,
    index: Option<usize>,
}

impl BucketCursor {
    fn check(&self, bucket: &RenderBucket) -> Result<()> {
        if bucket.id != self.bucket {
            return Err(PrismError::InvalidArgument(format!(
                "cursor of bucket {} used with bucket {}",
                self.bucket, bucket.id
            )));
        }
        if bucket.version != self.version {
            return Err(PrismError::CollectionModified);
        }
        Ok(())
    }

    /// Advances to the next entry; `Ok(false)` past the end.
    pub fn move_next(&mut self, bucket: &RenderBucket) -> Result<bool> {
        self.check(bucket)?;
        let next = self.index.map_or(0, |i| i.saturating_add(1));
        if next < bucket.len() {
            self.index = Some(next);
            Ok(true)
        } else {
            self.index = Some(bucket.len());
            Ok(false)
        }
    }

    /// Moves back before the first entry.
    pub fn reset(&mut self, bucket: &RenderBucket) -> Result<()> {
        self.check(bucket)?;
        self.index = None;
        Ok(())
    }

    /// Entry under the cursor, if positioned on one.
    #[must_use]
    pub fn current<'a>(&self, bucket: &'a RenderBucket) -> Option<&'a RenderBucketEntry> {
        if bucket.id != self.bucket || bucket.version != self.version {
            return None;
        }
        self.index.and_then(|i| bucket.entries.get(i))
    }
}
