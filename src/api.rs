use std::collections::HashSet;

use glam::Vec2;

use crate::bbox::BoundingVolume;
use crate::types::*;

/// What the grid needs to know about an object it indexes.
///
/// The grid copies these values at insert time and never holds a reference
/// to the object itself.
pub trait Indexable {
    /// Stable identity; two live objects must never share an id.
    fn id(&self) -> ObjectId;

    /// Current bounding box in world coordinates.
    fn bbox(&self) -> BoundingVolume;

    /// Reference point for distance queries.
    fn position(&self) -> Vec2;

    /// Type tag for filtered queries; `0` means untyped.
    fn type_tag(&self) -> u32 {
        0
    }
}

impl<T: Indexable + ?Sized> Indexable for &T {
    fn id(&self) -> ObjectId {
        (**self).id()
    }

    fn bbox(&self) -> BoundingVolume {
        (**self).bbox()
    }

    fn position(&self) -> Vec2 {
        (**self).position()
    }

    fn type_tag(&self) -> u32 {
        (**self).type_tag()
    }
}

impl Indexable for ObjectDesc {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bbox(&self) -> BoundingVolume {
        self.bbox
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn type_tag(&self) -> u32 {
        self.type_tag
    }
}

/// Public API contract for the broad-phase spatial index.
pub trait SpatialIndexApi {
    /// Construct a grid covering `cfg.bounds`.
    ///
    /// # Panics
    /// Panics if the bounds are degenerate or the cell size is not positive.
    fn new(cfg: GridConfig) -> Self
    where
        Self: Sized;

    // --- Mutation ----------------------------------------------------------

    /// Index `obj` in every cell its current bbox overlaps. Out-of-world
    /// boxes are clamped into the boundary cells.
    fn insert<O: Indexable + ?Sized>(&mut self, obj: &O);

    /// Remove `id` from the cells recorded at its last insert.
    /// Returns false if it was not indexed.
    fn remove(&mut self, id: ObjectId) -> bool;

    /// Reindex an object after it moved. Returns true if it was indexed before.
    fn update<O: Indexable + ?Sized>(&mut self, obj: &O) -> bool;

    /// Empty every bucket. Keeps the cell allocation.
    fn remove_all(&mut self);

    /// Per-step reset: `remove_all` followed by inserting every object.
    fn rebuild<I>(&mut self, objects: I)
    where
        I: IntoIterator,
        I::Item: Indexable;

    // --- Queries -----------------------------------------------------------

    /// Every other indexed object whose bbox overlaps `obj`'s current bbox.
    fn bbox_collisions<O: Indexable + ?Sized>(&self, obj: &O, filter: TypeFilter)
    -> HashSet<ObjectId>;

    /// Every indexed object whose position is strictly closer than `distance` to `point`.
    fn objects_within_distance(
        &self,
        point: Vec2,
        distance: f32,
        filter: TypeFilter,
    ) -> HashSet<ObjectId>;

    /// Every indexed object whose bbox overlaps `bbox`.
    fn objects_within_bbox(&self, bbox: &BoundingVolume, filter: TypeFilter) -> HashSet<ObjectId>;
}
