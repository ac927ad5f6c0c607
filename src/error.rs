use thiserror::Error;

/// Construction-time validation failures for a grid.
///
/// Runtime operations never fail; only `Grid::try_new` reports these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// World extent is empty, inverted, or not finite.
    #[error("degenerate world bounds ({x1}, {y1})-({x2}, {y2})")]
    DegenerateBounds { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Cell dimensions must be finite and strictly positive.
    #[error("invalid max cell size {width} x {height}")]
    InvalidCellSize { width: f32, height: f32 },
    /// Bounds divided by the cell size give more cells than a grid may allocate.
    #[error("grid of {x} x {y} cells exceeds the limit of {max} cells")]
    TooManyCells { x: usize, y: usize, max: usize },
}
