//! Areas of many polygons at once, keeping the input's order and shape

use rayon::prelude::*;
use serde::Serialize;

use super::area::polygon_area;
use super::types::{AreaConvention, ClosureMode, Point};
use crate::error::{GdsError, Result};

/// Polygons laid out as `rows × cols`, stored row by row
#[derive(Debug, Clone)]
pub struct PolygonBatch {
    pub rows: usize,
    pub cols: usize,
    pub polygons: Vec<Vec<Point>>,
}

impl PolygonBatch {
    /// A single column of polygons
    pub fn column(polygons: Vec<Vec<Point>>) -> Self {
        PolygonBatch {
            rows: polygons.len(),
            cols: 1,
            polygons,
        }
    }

    pub fn with_shape(rows: usize, cols: usize, polygons: Vec<Vec<Point>>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(polygons.len()) {
            return Err(GdsError::InvalidPolygon(format!(
                "batch shape {}x{} does not match {} polygons",
                rows,
                cols,
                polygons.len()
            )));
        }
        Ok(PolygonBatch {
            rows,
            cols,
            polygons,
        })
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Areas with the same shape and order as the batch they came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaBatch {
    pub rows: usize,
    pub cols: usize,
    pub areas: Vec<f64>,
}

impl AreaBatch {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row.checked_mul(self.cols)?.checked_add(col)?;
        self.areas.get(index).copied()
    }

    /// Areas regrouped into rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.areas
            .chunks(self.cols.max(1))
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Compute every area of `batch`.
///
/// Polygons are independent, so they are evaluated in parallel; the
/// indexed collect keeps results in input order. The first invalid polygon
/// fails the whole batch.
pub fn polygon_areas(
    batch: &PolygonBatch,
    mode: ClosureMode,
    convention: AreaConvention,
) -> Result<AreaBatch> {
    if batch.is_empty() {
        return Err(GdsError::InvalidPolygon("no input polygons".to_string()));
    }

    let areas = batch
        .polygons
        .par_iter()
        .enumerate()
        .map(|(i, ring)| {
            polygon_area(ring, mode)
                .map(|a| a.value(convention))
                .map_err(|e| match e {
                    GdsError::InvalidPolygon(msg) => {
                        GdsError::InvalidPolygon(format!("polygon {}: {}", i, msg))
                    }
                    other => other,
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(AreaBatch {
        rows: batch.rows,
        cols: batch.cols,
        areas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ]
    }

    #[test]
    fn test_batch_preserves_order() {
        let batch = PolygonBatch::column(vec![square(1.0), square(3.0), square(2.0)]);
        let areas = polygon_areas(&batch, ClosureMode::Detect, AreaConvention::Unsigned).unwrap();
        assert_eq!(areas.areas, vec![1.0, 9.0, 4.0]);
        assert_eq!((areas.rows, areas.cols), (3, 1));
    }

    #[test]
    fn test_batch_preserves_shape() {
        let polys = (1..=6).map(|k| square(k as f64)).collect();
        let batch = PolygonBatch::with_shape(2, 3, polys).unwrap();
        let areas = polygon_areas(&batch, ClosureMode::Detect, AreaConvention::Unsigned).unwrap();
        assert_eq!(areas.get(0, 2), Some(9.0));
        assert_eq!(areas.get(1, 0), Some(16.0));
        assert_eq!(areas.get(2, 0), None);
        assert_eq!(areas.to_rows(), vec![vec![1.0, 4.0, 9.0], vec![16.0, 25.0, 36.0]]);
    }

    #[test]
    fn test_batch_signed_convention() {
        let mut cw = square(2.0);
        cw.reverse();
        let batch = PolygonBatch::column(vec![square(2.0), cw]);
        let areas = polygon_areas(&batch, ClosureMode::Detect, AreaConvention::Signed).unwrap();
        assert_eq!(areas.areas, vec![4.0, -4.0]);
    }

    #[test]
    fn test_batch_errors() {
        assert!(PolygonBatch::with_shape(2, 2, vec![square(1.0)]).is_err());
        let empty = PolygonBatch::column(Vec::new());
        assert!(polygon_areas(&empty, ClosureMode::Detect, AreaConvention::Unsigned).is_err());

        let batch = PolygonBatch::column(vec![square(1.0), vec![Point::new(0.0, 0.0)]]);
        let err = polygon_areas(&batch, ClosureMode::Detect, AreaConvention::Unsigned).unwrap_err();
        assert!(err.to_string().contains("polygon 1"));
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        let rows = (1usize << (usize::BITS - 1)) + 1;
        let err = PolygonBatch::with_shape(rows, 2, vec![square(1.0), square(2.0)]).unwrap_err();
        assert!(matches!(err, GdsError::InvalidPolygon(_)));
        assert!(PolygonBatch::with_shape(usize::MAX, usize::MAX, Vec::new()).is_err());
    }
}
