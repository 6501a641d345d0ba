use serde::{Deserialize, Serialize};

use crate::error::{GdsError, Result};

/// A 2D vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Bit-exact coordinate equality (`-0.0` and `0.0` differ)
    pub fn same_bits(&self, other: &Point) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point { x: p[0], y: p[1] }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Whether the last vertex repeats the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// Last vertex duplicates the first
    Explicit,
    /// Ring connects back to the first vertex implicitly
    Implicit,
}

/// How the closure of an input ring is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosureMode {
    /// Compare first and last vertex
    #[default]
    Detect,
    /// Treat every ring as already closed
    Explicit,
    /// Treat every ring as open
    Implicit,
}

/// Which area value batch results report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaConvention {
    #[default]
    Unsigned,
    /// Positive for counter-clockwise rings
    Signed,
}

/// Vertices stored as an n×2 column-major matrix: all x, then all y
pub fn points_from_column_major(data: &[f64]) -> Result<Vec<Point>> {
    if data.len() % 2 != 0 {
        return Err(GdsError::InvalidPolygon(format!(
            "coordinate array of length {} does not hold (x, y) pairs",
            data.len()
        )));
    }
    let n = data.len() / 2;
    Ok((0..n).map(|k| Point::new(data[k], data[n + k])).collect())
}

/// Vertices stored as `x0, y0, x1, y1, ...`
pub fn points_from_interleaved(data: &[f64]) -> Result<Vec<Point>> {
    if data.len() % 2 != 0 {
        return Err(GdsError::InvalidPolygon(format!(
            "coordinate array of length {} does not hold (x, y) pairs",
            data.len()
        )));
    }
    Ok(data.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect())
}
