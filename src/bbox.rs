use glam::Vec2;

/// Axis-aligned rectangle in world coordinates.
///
/// Invariant: `x1 <= x2` and `y1 <= y2`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingVolume {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingVolume {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "invalid bounding volume: min > max");
        Self { x1, y1, x2, y2 }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Centered box with half extents along X/Y.
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self::from_min_max(center - half_extents, center + half_extents)
    }

    /// Square `[p.x - r, p.y - r, p.x + r, p.y + r]` enclosing the circle of radius `r`.
    ///
    /// Unchecked: a NaN point yields NaN corners, which grid lookups clamp to cell 0.
    pub fn around_point(p: Vec2, r: f32) -> Self {
        Self { x1: p.x - r, y1: p.y - r, x2: p.x + r, y2: p.y + r }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Vec2 {
        (self.min() + self.max()) * 0.5
    }

    /// Closed-interval overlap: touching edges count as intersecting.
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        !(self.x2 < other.x1 || self.x1 > other.x2 || self.y2 < other.y1 || self.y1 > other.y2)
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x1: self.x1 + delta.x,
            y1: self.y1 + delta.y,
            x2: self.x2 + delta.x,
            y2: self.y2 + delta.y,
        }
    }
}
