//! bonkgrid: uniform-grid broad-phase spatial index for bounded 2D worlds

pub mod types;
pub mod bbox;
pub mod api;
pub mod grid;
pub mod error;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::bbox::BoundingVolume;
pub use crate::error::GridError;
pub use crate::grid::Grid;
