//! Shoelace area of simple polygons
//!
//! Reference: mathworld.wolfram.com/PolygonArea.html

use std::collections::HashSet;

use super::types::{AreaConvention, Closure, ClosureMode, Point};
use crate::error::{GdsError, Result};

/// Area of one ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonArea {
    /// Absolute area, independent of winding
    pub area: f64,
    /// Positive for counter-clockwise traversal
    pub signed_area: f64,
    pub closure: Closure,
}

impl PolygonArea {
    pub fn value(&self, convention: AreaConvention) -> f64 {
        match convention {
            AreaConvention::Unsigned => self.area,
            AreaConvention::Signed => self.signed_area,
        }
    }
}

/// Closed if first and last vertex are bit-identical
pub fn detect_closure(vertices: &[Point]) -> Closure {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) if vertices.len() > 1 && first.same_bits(last) => {
            Closure::Explicit
        }
        _ => Closure::Implicit,
    }
}

/// Resolve the closure of `vertices` and return the open ring (no
/// duplicated closing vertex), rejecting rings with fewer than 3 distinct
/// vertices.
pub fn normalize_ring(vertices: &[Point], mode: ClosureMode) -> Result<(&[Point], Closure)> {
    if vertices.len() < 3 {
        return Err(GdsError::InvalidPolygon(format!(
            "polygons must have 3 or more vertices, got {}",
            vertices.len()
        )));
    }

    let closure = match mode {
        ClosureMode::Detect => detect_closure(vertices),
        ClosureMode::Explicit => Closure::Explicit,
        ClosureMode::Implicit => Closure::Implicit,
    };
    let open = match closure {
        Closure::Explicit => &vertices[..vertices.len() - 1],
        Closure::Implicit => vertices,
    };

    let distinct: HashSet<(u64, u64)> = open
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect();
    if distinct.len() < 3 {
        return Err(GdsError::InvalidPolygon(format!(
            "{} distinct vertices after closure normalization, need 3",
            distinct.len()
        )));
    }
    Ok((open, closure))
}

/// Area of a simple polygon.
///
/// Sums `x[i]*y[i+1] - x[i+1]*y[i]` over the stored ring; open rings get the
/// wrap term `x[n-1]*y[0] - x[0]*y[n-1]` as well.
pub fn polygon_area(vertices: &[Point], mode: ClosureMode) -> Result<PolygonArea> {
    let (_, closure) = normalize_ring(vertices, mode)?;

    let mut sum: f64 = vertices
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum();
    if closure == Closure::Implicit {
        let n = vertices.len();
        sum += vertices[n - 1].x * vertices[0].y - vertices[0].x * vertices[n - 1].y;
    }
    let signed_area = 0.5 * sum;

    Ok(PolygonArea {
        area: signed_area.abs(),
        signed_area,
        closure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn test_unit_square_implicit() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let a = polygon_area(&square, ClosureMode::Detect).unwrap();
        assert_eq!(a.closure, Closure::Implicit);
        assert_eq!(a.area, 1.0);
        assert_eq!(a.signed_area, 1.0);
    }

    #[test]
    fn test_unit_square_explicit() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let a = polygon_area(&square, ClosureMode::Detect).unwrap();
        assert_eq!(a.closure, Closure::Explicit);
        assert_eq!(a.area, 1.0);
    }

    #[test]
    fn test_reversal_flips_sign_only() {
        let mut ring = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (2.0, 5.0), (0.0, 3.0)]);
        let forward = polygon_area(&ring, ClosureMode::Detect).unwrap();
        ring.reverse();
        let backward = polygon_area(&ring, ClosureMode::Detect).unwrap();
        assert_eq!(forward.area, backward.area);
        assert_eq!(forward.signed_area, -backward.signed_area);
        assert!(forward.signed_area > 0.0);
        assert_eq!(forward.area, 16.0);
    }

    #[test]
    fn test_two_vertices_invalid() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            polygon_area(&line, ClosureMode::Detect),
            Err(GdsError::InvalidPolygon(_))
        ));
    }

    #[test]
    fn test_closed_triangle_needs_three_distinct() {
        // Closed ring with only two distinct vertices
        let ring = pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(polygon_area(&ring, ClosureMode::Detect).is_err());
        // Duplicates inside an open ring count once
        let ring = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 0.0), (1.0, 1.0)]);
        assert!(polygon_area(&ring, ClosureMode::Implicit).is_err());
    }

    #[test]
    fn test_forced_closure_modes() {
        let square = pts(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        assert_eq!(polygon_area(&square, ClosureMode::Detect).unwrap().area, 4.0);
        // Forcing explicit on an open ring drops the wrap edge
        let forced = polygon_area(&square, ClosureMode::Explicit).unwrap();
        assert_eq!(forced.closure, Closure::Explicit);
        assert_eq!(forced.area, 5.0);

        let closed = pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        // Wrap term of a closed ring is zero
        let forced = polygon_area(&closed, ClosureMode::Implicit).unwrap();
        assert_eq!(forced.area, 4.0);
    }

    #[test]
    fn test_negative_zero_is_not_closure() {
        let ring = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (-0.0, 0.0)]);
        assert_eq!(detect_closure(&ring), Closure::Implicit);
    }

    #[test]
    fn test_value_by_convention() {
        let cw = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let a = polygon_area(&cw, ClosureMode::Detect).unwrap();
        assert_eq!(a.value(AreaConvention::Unsigned), 1.0);
        assert_eq!(a.value(AreaConvention::Signed), -1.0);
    }
}
