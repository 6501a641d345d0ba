//! Boundary elements: BOUNDARY, LAYER, DATATYPE, XY, ENDEL

use std::collections::HashSet;
use std::io::{Seek, Write};

use log::debug;

use crate::error::{GdsError, Result};
use crate::geometry::{normalize_ring, polygon_area, ClosureMode, Point};
use crate::record::{check_record_len, Record, RecordType, HEADER_LEN};
use crate::stream::StreamWriter;

/// Convert a vertex in database units to integer coordinates
fn to_db(p: &Point) -> Result<[i32; 2]> {
    let convert = |v: f64| -> Result<i32> {
        let r = v.round();
        if !r.is_finite() || r < i32::MIN as f64 || r > i32::MAX as f64 {
            return Err(GdsError::InvalidPolygon(format!(
                "coordinate {} is outside the 32-bit database range",
                v
            )));
        }
        Ok(r as i32)
    };
    Ok([convert(p.x)?, convert(p.y)?])
}

/// Records for one boundary; the XY ring is written explicitly closed
pub fn boundary_records(
    layer: u16,
    datatype: u16,
    ring: &[Point],
    mode: ClosureMode,
) -> Result<Vec<Record>> {
    let (open, _) = normalize_ring(ring, mode)?;

    let xy_len = HEADER_LEN + (open.len() + 1) * 8;
    check_record_len(xy_len)?;

    let vertices = open.iter().map(to_db).collect::<Result<Vec<[i32; 2]>>>()?;
    let distinct: HashSet<[i32; 2]> = vertices.iter().copied().collect();
    if distinct.len() < 3 {
        return Err(GdsError::InvalidPolygon(format!(
            "{} distinct vertices after rounding to database units, need 3",
            distinct.len()
        )));
    }

    let mut coords = Vec::with_capacity((vertices.len() + 1) * 2);
    for v in vertices.iter().chain(vertices.first()) {
        coords.extend_from_slice(v);
    }

    Ok(vec![
        Record::no_data(RecordType::Boundary),
        Record::words(RecordType::Layer, &[layer]),
        Record::words(RecordType::DataType, &[datatype]),
        Record::ints(RecordType::Xy, &coords),
        Record::no_data(RecordType::EndEl),
    ])
}

/// Validate `ring` and write it as a boundary element.
///
/// Nothing is written if the ring is degenerate or too large for one XY
/// record.
pub fn write_boundary<W: Write + Seek>(
    writer: &mut StreamWriter<W>,
    layer: u16,
    datatype: u16,
    ring: &[Point],
    mode: ClosureMode,
) -> Result<()> {
    let records = boundary_records(layer, datatype, ring, mode);
    let records = writer.abort_on_err(records)?;
    writer.write_records(&records)?;
    if log::log_enabled!(log::Level::Debug) {
        if let Ok(a) = polygon_area(ring, mode) {
            debug!("boundary on {}/{}: {} vertices, area {}", layer, datatype, ring.len(), a.area);
        }
    }
    Ok(())
}
