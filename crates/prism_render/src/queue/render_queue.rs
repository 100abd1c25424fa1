use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use prism_core::{Camera, MarkId, PrismError, RenderBucketId, Result};

use super::bucket::RenderBucket;
use super::comparer::{OpaqueComparer, OrthoComparer, RenderBucketComparer, TransparentComparer};
use crate::context::RenderContext;
use crate::renderable::RenderableRef;

/// Buckets in default pipeline order, with the comparer each one sorts by.
const DEFAULT_BUCKETS: [RenderBucketId; 5] = [
    RenderBucketId::PRE_OPAQUE,
    RenderBucketId::OPAQUE,
    RenderBucketId::POST_OPAQUE,
    RenderBucketId::TRANSPARENT,
    RenderBucketId::ORTHO,
];

fn default_comparer(id: RenderBucketId) -> Box<dyn RenderBucketComparer> {
    if id == RenderBucketId::TRANSPARENT {
        Box::new(TransparentComparer::new())
    } else if id == RenderBucketId::ORTHO {
        Box::new(OrthoComparer::new())
    } else {
        Box::new(OpaqueComparer::new())
    }
}

/// Ordered set of buckets plus a side table of marked renderables.
///
/// Bucket order is insertion order; stages that walk every bucket see them
/// in that order. Marks are independent of bucket membership and survive
/// sorting, but are dropped by [`clear_buckets`](Self::clear_buckets).
#[derive(Default)]
pub struct RenderQueue {
    buckets: Vec<RenderBucket>,
    lookup: FxHashMap<RenderBucketId, usize>,
    marks: FxHashMap<MarkId, RenderableRef>,
    version: u64,
}

impl RenderQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue holding the five default buckets.
    ///
    /// PreOpaque, Opaque and PostOpaque sort by material then front to back,
    /// Transparent sorts back to front and Ortho by explicit order.
    pub fn with_default_buckets(initial_capacity: usize) -> Result<Self> {
        let mut queue = Self::new();
        for id in DEFAULT_BUCKETS {
            queue.add_bucket(RenderBucket::new(id, default_comparer(id), initial_capacity)?)?;
        }
        Ok(queue)
    }

    // ========================================================================
    // Buckets
    // ========================================================================

    /// Appends a bucket; fails if its id is already present.
    pub fn add_bucket(&mut self, bucket: RenderBucket) -> Result<()> {
        let id = bucket.id();
        if self.lookup.contains_key(&id) {
            return Err(PrismError::DuplicateBucket(id));
        }

        log::debug!("Render queue: added bucket {id}");
        self.lookup.insert(id, self.buckets.len());
        self.buckets.push(bucket);
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Removes a bucket, returning it; `None` if absent.
    pub fn remove_bucket(&mut self, id: RenderBucketId) -> Option<RenderBucket> {
        let index = self.lookup.remove(&id)?;
        let bucket = self.buckets.remove(index);
        for slot in self.lookup.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }

        log::debug!("Render queue: removed bucket {id}");
        self.version = self.version.wrapping_add(1);
        Some(bucket)
    }

    #[must_use]
    pub fn contains_bucket(&self, id: RenderBucketId) -> bool {
        self.lookup.contains_key(&id)
    }

    #[must_use]
    pub fn bucket(&self, id: RenderBucketId) -> Option<&RenderBucket> {
        self.lookup.get(&id).map(|&i| &self.buckets[i])
    }

    pub fn bucket_mut(&mut self, id: RenderBucketId) -> Option<&mut RenderBucket> {
        self.lookup.get(&id).map(|&i| &mut self.buckets[i])
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket ids in queue order.
    pub fn bucket_ids(&self) -> impl Iterator<Item = RenderBucketId> + '_ {
        self.buckets.iter().map(RenderBucket::id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderBucket> {
        self.buckets.iter()
    }

    /// Total number of entries over all buckets.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(RenderBucket::len).sum()
    }

    /// Bumped when buckets are added or removed.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    // ========================================================================
    // Per-frame flow
    // ========================================================================

    /// Adds `renderable` to every registered bucket its material definition
    /// names.
    ///
    /// Returns `true` if at least one bucket accepted it; buckets already
    /// holding it do not take it again.
    pub fn enqueue(&mut self, renderable: &RenderableRef) -> bool {
        let mut accepted = false;
        for (id, material) in renderable.material_definition().iter() {
            if !id.is_valid() {
                continue;
            }
            if let Some(&index) = self.lookup.get(&id) {
                accepted |= self.buckets[index].add(renderable, Some(Arc::clone(material)));
            }
        }

        if !accepted {
            log::trace!("Render queue: no bucket accepted renderable");
        }
        accepted
    }

    /// Removes `renderable` from every bucket its material definition names.
    ///
    /// Returns `true` if it was removed from at least one bucket.
    pub fn dequeue(&mut self, renderable: &RenderableRef) -> bool {
        let mut removed = false;
        for (id, _) in renderable.material_definition().iter() {
            if let Some(&index) = self.lookup.get(&id) {
                removed |= self.buckets[index].remove(renderable);
            }
        }
        removed
    }

    /// Sorts the targeted buckets (all when `ids` is `None`) against
    /// `camera`.
    ///
    /// Each comparer holds the camera only while its bucket sorts.
    pub fn sort_buckets(&mut self, camera: Option<&Camera>, ids: Option<&[RenderBucketId]>) {
        if camera.is_none() {
            log::trace!("Render queue: sorting without a camera, distances are zero");
        }
        self.for_each_target(ids, |bucket| bucket.sort_with_camera(camera));
    }

    /// Clears the targeted buckets (all when `ids` is `None`), then clears
    /// every mark, notifying marked renderables first if `notify_marked`.
    pub fn clear_buckets(&mut self, notify_marked: bool, ids: Option<&[RenderBucketId]>) {
        self.for_each_target(ids, RenderBucket::clear);
        self.clear_marks(notify_marked);
    }

    /// Draws one bucket; `false` if the queue does not hold it.
    pub fn draw_bucket(
        &self,
        id: RenderBucketId,
        ctx: &mut dyn RenderContext,
        apply_materials: bool,
    ) -> bool {
        let Some(bucket) = self.bucket(id) else {
            return false;
        };
        bucket.draw_all(ctx, apply_materials);
        true
    }

    fn for_each_target(&mut self, ids: Option<&[RenderBucketId]>, mut f: impl FnMut(&mut RenderBucket)) {
        match ids {
            None => self.buckets.iter_mut().for_each(f),
            Some(ids) => {
                for id in ids {
                    match self.lookup.get(id) {
                        Some(&index) => f(&mut self.buckets[index]),
                        None => log::trace!("Render queue: bucket {id} not present, skipped"),
                    }
                }
            }
        }
    }

    /// Appends every entry of this queue to the matching buckets of `other`
    /// and copies the marks `other` does not have yet.
    pub fn copy_to(&self, other: &mut RenderQueue) {
        for bucket in &self.buckets {
            let Some(dest) = other.bucket_mut(bucket.id()) else {
                continue;
            };
            for entry in bucket {
                dest.add(entry.renderable_ref(), entry.material_ref().cloned());
            }
        }

        for (id, renderable) in &self.marks {
            other
                .marks
                .entry(*id)
                .or_insert_with(|| Rc::clone(renderable));
        }
    }

    // ========================================================================
    // Marks
    // ========================================================================

    /// Associates `renderable` with `id`.
    ///
    /// Returns `false` if `id` is invalid or already marked.
    pub fn mark(&mut self, id: MarkId, renderable: &RenderableRef) -> bool {
        if !id.is_valid() || self.marks.contains_key(&id) {
            return false;
        }
        self.marks.insert(id, Rc::clone(renderable));
        true
    }

    /// Notifies a [`MarkedRenderable`](crate::renderable::MarkedRenderable),
    /// then drops the mark.
    ///
    /// Returns `false` if `id` was not marked.
    pub fn unmark(&mut self, id: MarkId) -> bool {
        let Some(renderable) = self.marks.get(&id).map(Rc::clone) else {
            return false;
        };
        if let Some(marked) = renderable.as_marked() {
            marked.on_mark_cleared(id, self);
        }
        self.marks.remove(&id);
        true
    }

    #[must_use]
    pub fn is_marked(&self, id: MarkId) -> bool {
        self.marks.contains_key(&id)
    }

    #[must_use]
    pub fn get_marked(&self, id: MarkId) -> Option<&RenderableRef> {
        self.marks.get(&id)
    }

    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.marks.len()
    }

    /// Drops every mark.
    ///
    /// With `notify`, marked renderables are told in ascending id order
    /// while the whole table is still visible through the queue.
    pub fn clear_marks(&mut self, notify: bool) {
        if notify {
            let mut pending: Vec<(MarkId, RenderableRef)> = self
                .marks
                .iter()
                .map(|(id, renderable)| (*id, Rc::clone(renderable)))
                .collect();
            pending.sort_unstable_by_key(|(id, _)| *id);

            for (id, renderable) in pending {
                if let Some(marked) = renderable.as_marked() {
                    marked.on_mark_cleared(id, self);
                }
            }
        }
        self.marks.clear();
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// Creates a fail-fast cursor over the buckets.
    #[must_use]
    pub fn cursor(&self) -> QueueCursor {
        QueueCursor {
            version: self.version,
            index: None,
        }
    }
}

impl fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderQueue")
            .field("buckets", &self.buckets)
            .field("marks", &self.marks.len())
            .field("version", &self.version)
            .finish()
    }
}

impl<'a> IntoIterator for &'a RenderQueue {
    type Item = &'a RenderBucket;
    type IntoIter = std::slice::Iter<'a, RenderBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Cursor over the buckets of a queue; fails once buckets were added or
/// removed.
#[derive(Debug, Clone)]
pub struct QueueCursor {
    version: u64,
    index: Option<usize>,
}

impl QueueCursor {
    pub fn move_next(&mut self, queue: &RenderQueue) -> Result<bool> {
        if queue.version != self.version {
            return Err(PrismError::CollectionModified);
        }
        let next = self.index.map_or(0, |i| i.saturating_add(1));
        if next < queue.buckets.len() {
            self.index = Some(next);
            Ok(true)
        } else {
            self.index = Some(queue.buckets.len());
            Ok(false)
        }
    }

    pub fn reset(&mut self, queue: &RenderQueue) -> Result<()> {
        if queue.version != self.version {
            return Err(PrismError::CollectionModified);
        }
        self.index = None;
        Ok(())
    }

    #[must_use]
    pub fn current<'a>(&self, queue: &'a RenderQueue) -> Option<&'a RenderBucket> {
        if queue.version != self.version {
            return None;
        }
        self.index.and_then(|i| queue.buckets.get(i))
    }
}
