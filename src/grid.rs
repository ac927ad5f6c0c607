use glam::Vec2;
use log::{debug, trace};

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::api::{Indexable, SpatialIndexApi};
use crate::bbox::BoundingVolume;
use crate::error::GridError;
use crate::types::*;

/// Uniform-grid broad-phase over a bounded 2D world.
///
/// Each cell holds the set of ids whose bbox overlaps it. The grid keeps a
/// snapshot of every indexed object (cell range, bbox, position, type tag),
/// so removal walks exactly the cells written at insert time even if the
/// caller's object has moved since.
///
/// The configuration is fixed at construction:
///
/// ```compile_fail
/// use bonkgrid::*;
/// let mut g = Grid::new(GridConfig::new(BoundingVolume::new(0.0, 0.0, 100.0, 100.0), 10.0, 10.0));
/// g.cfg.bounds = BoundingVolume::new(50.0, 50.0, 150.0, 150.0);
/// ```
pub struct Grid {
    cfg: GridConfig,

    cell_count_x: usize,
    cell_count_y: usize,
    // cells per world unit, per axis
    scale: Vec2,

    // Row-major buckets: index = j * cell_count_x + i
    cells: Vec<HashSet<ObjectId>>,

    // id -> snapshot taken at last insert
    entries: HashMap<ObjectId, Entry>,

    last_timing: Option<GridTiming>,
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    range: IndexRange,
    bbox: BoundingVolume,
    position: Vec2,
    type_tag: u32,
}

impl Entry {
    fn of<O: Indexable + ?Sized>(obj: &O, range: IndexRange) -> Self {
        Self { range, bbox: obj.bbox(), position: obj.position(), type_tag: obj.type_tag() }
    }
}

impl SpatialIndexApi for Grid {
    fn new(cfg: GridConfig) -> Self {
        match Self::try_new(cfg) {
            Ok(grid) => grid,
            Err(e) => panic!("invalid grid configuration: {e}"),
        }
    }

    fn insert<O: Indexable + ?Sized>(&mut self, obj: &O) {
        let id = obj.id();
        if self.entries.contains_key(&id) {
            self.remove(id);
        }
        let bbox = obj.bbox();
        if !bbox.intersects(&self.cfg.bounds) {
            debug!("object {:?} outside world bounds {:?}, clamping to boundary cells", id, bbox);
        }
        let range = self.index_range_for(&bbox);
        self.link(id, Entry::of(obj, range));
    }

    fn remove(&mut self, id: ObjectId) -> bool {
        let Some(entry) = self.entries.remove(&id) else {
            trace!("remove of unindexed object {:?}", id);
            return false;
        };
        let cx = self.cell_count_x;
        let mut found = false;
        for (i, j) in entry.range.cells() {
            found |= self.cells[j * cx + i].remove(&id);
        }
        found
    }

    fn update<O: Indexable + ?Sized>(&mut self, obj: &O) -> bool {
        let id = obj.id();
        let range = self.index_range_for(&obj.bbox());
        match self.entries.get(&id).map(|e| e.range) {
            Some(prev) if prev == range => {
                // Same cells; only the snapshot changes.
                self.entries.insert(id, Entry::of(obj, range));
                true
            }
            Some(_) => {
                self.remove(id);
                self.link(id, Entry::of(obj, range));
                true
            }
            None => {
                self.link(id, Entry::of(obj, range));
                false
            }
        }
    }

    fn remove_all(&mut self) {
        for bucket in &mut self.cells {
            bucket.clear();
        }
        debug!("grid cleared ({} objects dropped)", self.entries.len());
        self.entries.clear();
    }

    fn rebuild<I>(&mut self, objects: I)
    where
        I: IntoIterator,
        I::Item: Indexable,
    {
        let t_all = if self.cfg.enable_timing { Some(Instant::now()) } else { None };
        self.remove_all();
        let clear_ms = t_all.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);

        let t1 = if self.cfg.enable_timing { Some(Instant::now()) } else { None };
        let mut inserted = 0usize;
        for obj in objects {
            self.insert(&obj);
            inserted += 1;
        }
        let insert_ms = t1.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);

        self.last_timing = t_all.map(|t| GridTiming {
            rebuild_ms: t.elapsed().as_secs_f64() * 1000.0,
            clear_ms,
            insert_ms,
            objects_inserted: inserted,
        });
    }

    fn bbox_collisions<O: Indexable + ?Sized>(
        &self,
        obj: &O,
        filter: TypeFilter,
    ) -> HashSet<ObjectId> {
        let me = obj.id();
        let bbox = obj.bbox();
        self.scan(&bbox, filter, |id, e| id != me && bbox.intersects(&e.bbox))
    }

    fn objects_within_distance(
        &self,
        point: Vec2,
        distance: f32,
        filter: TypeFilter,
    ) -> HashSet<ObjectId> {
        if !(distance > 0.0) {
            return HashSet::new();
        }
        let d2 = distance * distance;
        let region = BoundingVolume::around_point(point, distance);
        self.scan(&region, filter, |_, e| (e.position - point).length_squared() < d2)
    }

    fn objects_within_bbox(&self, bbox: &BoundingVolume, filter: TypeFilter) -> HashSet<ObjectId> {
        self.scan(bbox, filter, |_, e| bbox.intersects(&e.bbox))
    }
}

/// Upper bound on `cell_count_x * cell_count_y`.
pub const MAX_CELLS: usize = 1 << 24;

impl Grid {
    /// Validating constructor; `SpatialIndexApi::new` panics where this returns `Err`.
    pub fn try_new(cfg: GridConfig) -> Result<Self, GridError> {
        let b = cfg.bounds;
        let finite = [b.x1, b.y1, b.x2, b.y2].iter().all(|v| v.is_finite());
        if !finite || b.x2 <= b.x1 || b.y2 <= b.y1 {
            return Err(GridError::DegenerateBounds { x1: b.x1, y1: b.y1, x2: b.x2, y2: b.y2 });
        }
        let (w, h) = (cfg.max_cell_width, cfg.max_cell_height);
        if !(w.is_finite() && w > 0.0 && h.is_finite() && h > 0.0) {
            return Err(GridError::InvalidCellSize { width: w, height: h });
        }

        // Never zero cells; a world smaller than one cell gets one large cell.
        let cell_count_x = ((b.width() / w).floor() as usize).max(1);
        let cell_count_y = ((b.height() / h).floor() as usize).max(1);
        let cell_total = match cell_count_x.checked_mul(cell_count_y) {
            Some(n) if n <= MAX_CELLS => n,
            _ => {
                return Err(GridError::TooManyCells {
                    x: cell_count_x,
                    y: cell_count_y,
                    max: MAX_CELLS,
                });
            }
        };
        let scale = Vec2::new(
            cell_count_x as f32 / b.width(),
            cell_count_y as f32 / b.height(),
        );
        debug!(
            "grid {}x{} cells over {:?} (cell {:.3}x{:.3})",
            cell_count_x,
            cell_count_y,
            b,
            b.width() / cell_count_x as f32,
            b.height() / cell_count_y as f32
        );

        Ok(Self {
            cfg,
            cell_count_x,
            cell_count_y,
            scale,
            cells: vec![HashSet::new(); cell_total],
            entries: HashMap::new(),
            last_timing: None,
        })
    }

    /// Cell coordinates covered by `bbox`, clamped into the grid.
    pub(crate) fn index_range_for(&self, bbox: &BoundingVolume) -> IndexRange {
        let o = self.cfg.bounds.min();
        let a0 = axis_index(bbox.x1, o.x, self.scale.x, self.cell_count_x);
        let a1 = axis_index(bbox.x2, o.x, self.scale.x, self.cell_count_x);
        let b0 = axis_index(bbox.y1, o.y, self.scale.y, self.cell_count_y);
        let b1 = axis_index(bbox.y2, o.y, self.scale.y, self.cell_count_y);
        IndexRange { i0: a0.min(a1), i1: a0.max(a1), j0: b0.min(b1), j1: b0.max(b1) }
    }

    fn link(&mut self, id: ObjectId, entry: Entry) {
        let cx = self.cell_count_x;
        for (i, j) in entry.range.cells() {
            self.cells[j * cx + i].insert(id);
        }
        self.entries.insert(id, entry);
    }

    /// Visit each distinct candidate in the cells under `region` once and
    /// collect those passing `filter` and `keep`.
    fn scan<F>(&self, region: &BoundingVolume, filter: TypeFilter, keep: F) -> HashSet<ObjectId>
    where
        F: Fn(ObjectId, &Entry) -> bool,
    {
        let range = self.index_range_for(region);
        let mut out = HashSet::new();
        let mut seen = HashSet::new();
        for (i, j) in range.cells() {
            for &id in &self.cells[j * self.cell_count_x + i] {
                if !seen.insert(id) {
                    continue;
                }
                let Some(e) = self.entries.get(&id) else { continue };
                if filter.accepts(e.type_tag) && keep(id, e) {
                    out.insert(id);
                }
            }
        }
        out
    }

    /// Whether `id` is currently indexed.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of indexed objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(cells along X, cells along Y)`.
    pub fn cell_counts(&self) -> (usize, usize) {
        (self.cell_count_x, self.cell_count_y)
    }

    /// Actual cell dimensions (never larger than requested, unless the world is smaller).
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.cfg.bounds.width() / self.cell_count_x as f32,
            self.cfg.bounds.height() / self.cell_count_y as f32,
        )
    }

    /// World extent given at construction.
    pub fn bounds(&self) -> BoundingVolume {
        self.cfg.bounds
    }

    /// Configuration the grid was built with.
    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    /// Cell range recorded for `id` at its last insert.
    pub fn indexed_range(&self, id: ObjectId) -> Option<IndexRange> {
        self.entries.get(&id).map(|e| e.range)
    }

    /// Members of cell `(i, j)`, or `None` if out of range.
    pub fn bucket(&self, i: usize, j: usize) -> Option<&HashSet<ObjectId>> {
        if i >= self.cell_count_x || j >= self.cell_count_y {
            return None;
        }
        self.cells.get(j * self.cell_count_x + i)
    }

    /// World rectangle of cell `(i, j)`.
    pub fn cell_bounds(&self, i: usize, j: usize) -> Option<BoundingVolume> {
        if i >= self.cell_count_x || j >= self.cell_count_y {
            return None;
        }
        let cs = self.cell_size();
        let min = self.cfg.bounds.min() + Vec2::new(i as f32 * cs.x, j as f32 * cs.y);
        Some(BoundingVolume::from_min_max(min, min + cs))
    }

    /// Return debug/perf stats for the current contents.
    pub fn debug_stats(&self) -> GridStats {
        let mut stats = GridStats {
            objects: self.entries.len(),
            cells: self.cells.len(),
            ..Default::default()
        };
        for bucket in &self.cells {
            let n = bucket.len();
            if n > 0 {
                stats.occupied_cells += 1;
            }
            stats.memberships += n;
            stats.max_bucket = stats.max_bucket.max(n);
        }
        stats
    }

    /// Return timing breakdown for the last `rebuild` (when enabled).
    pub fn timing(&self) -> Option<GridTiming> {
        self.last_timing
    }
}

/// Map one coordinate to a cell index in `[0, count - 1]`. NaN maps to 0.
fn axis_index(v: f32, origin: f32, scale: f32, count: usize) -> usize {
    let k = ((v - origin) * scale).floor();
    if k.is_nan() || k <= 0.0 {
        0
    } else {
        (k as usize).min(count - 1)
    }
}
