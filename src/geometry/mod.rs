//! Polygon geometry for boundary validation and measurement
//!
//! # Submodules
//! - `types` - Vertices, closure conventions and input layouts
//! - `area` - Shoelace area of a single ring
//! - `batch` - Shape-preserving areas of many rings

mod area;
mod batch;
mod types;

pub use types::{
    points_from_column_major, points_from_interleaved, AreaConvention, Closure, ClosureMode, Point,
};

pub use area::{detect_closure, normalize_ring, polygon_area, PolygonArea};

pub use batch::{polygon_areas, AreaBatch, PolygonBatch};
