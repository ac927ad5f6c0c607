use glam::Vec2;

use crate::bbox::BoundingVolume;

/// Stable caller-assigned handle for an indexed object (e.g., pack your entity id).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u64);

/// Restricts a query to objects carrying a given type tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// No filtering.
    #[default]
    Any,
    /// Only objects whose `type_tag` equals the value.
    Only(u32),
}

impl TypeFilter {
    /// Filter rule: `Any` accepts everything, `Only(t)` accepts exactly `t`.
    pub fn accepts(self, type_tag: u32) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Only(t) => t == type_tag,
        }
    }
}

impl From<u32> for TypeFilter {
    /// `0` means "any type".
    fn from(tag: u32) -> Self {
        if tag == 0 { TypeFilter::Any } else { TypeFilter::Only(tag) }
    }
}

/// Inclusive rectangle of cell coordinates `[i0..=i1] x [j0..=j1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub i0: usize,
    pub i1: usize,
    pub j0: usize,
    pub j1: usize,
}

impl IndexRange {
    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        (self.i1 - self.i0 + 1) * (self.j1 - self.j0 + 1)
    }

    /// Iterate the covered cells row by row.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (self.j0..=self.j1).flat_map(move |j| (self.i0..=self.i1).map(move |i| (i, j)))
    }
}

/// Plain description of an object to be indexed.
#[derive(Copy, Clone, Debug)]
pub struct ObjectDesc {
    pub id: ObjectId,
    pub bbox: BoundingVolume,
    /// Reference point used by distance queries (usually the bbox center).
    pub position: Vec2,
    /// `0` for untyped objects.
    pub type_tag: u32,
}

impl ObjectDesc {
    /// Centered box; position is the center.
    pub fn centered(id: ObjectId, center: Vec2, half_extents: Vec2, type_tag: u32) -> Self {
        Self {
            id,
            bbox: BoundingVolume::from_center_half_extents(center, half_extents),
            position: center,
            type_tag,
        }
    }

    /// Box given by its corners; position is the box center.
    pub fn from_bbox(id: ObjectId, bbox: BoundingVolume, type_tag: u32) -> Self {
        Self { id, bbox, position: bbox.center(), type_tag }
    }
}

/// Construction parameters for a grid.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Extent of the indexed world. Fixed for the lifetime of the grid.
    pub bounds: BoundingVolume,
    /// Upper bound on a cell's width; cells come out this wide or wider.
    pub max_cell_width: f32,
    /// Upper bound on a cell's height.
    pub max_cell_height: f32,
    /// Enable internal timing instrumentation for `rebuild`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enable_timing: bool,
}

impl GridConfig {
    /// Convenience constructor with timing disabled.
    pub fn new(bounds: BoundingVolume, max_cell_width: f32, max_cell_height: f32) -> Self {
        Self { bounds, max_cell_width, max_cell_height, enable_timing: false }
    }
}

/// Debug/performance statistics for the current grid contents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridStats {
    pub objects: usize,
    pub cells: usize,
    pub occupied_cells: usize,
    /// Sum of bucket sizes; an object spanning k cells counts k times.
    pub memberships: usize,
    pub max_bucket: usize,
}

/// Timing breakdown for the last `rebuild`.
#[derive(Copy, Clone, Debug, Default)]
pub struct GridTiming {
    pub rebuild_ms: f64,
    pub clear_ms: f64,
    pub insert_ms: f64,
    pub objects_inserted: usize,
}
