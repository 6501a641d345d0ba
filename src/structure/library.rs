//! Library framing: HEADER, BGNLIB, LIBNAME, UNITS ... ENDLIB

use std::io::{Seek, Write};

use log::debug;
use serde::{Deserialize, Serialize};

use super::names::{name_record, NamePolicy};
use crate::error::Result;
use crate::record::{date_pair, Record, RecordType};
use crate::stream::StreamWriter;

/// Stream format version written in the HEADER record
pub const GDS_VERSION: u16 = 600;

/// Database unit definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Units {
    /// Size of a database unit in user units
    pub user_units_per_db: f64,
    /// Size of a database unit in meters
    pub meters_per_db: f64,
}

impl Default for Units {
    /// 1 nm database unit, 1 µm user unit
    fn default() -> Self {
        Units {
            user_units_per_db: 1e-3,
            meters_per_db: 1e-9,
        }
    }
}

/// HEADER, BGNLIB (two date snapshots), LIBNAME and UNITS
pub fn begin_library<W: Write + Seek>(
    writer: &mut StreamWriter<W>,
    name: &str,
    units: Units,
    policy: NamePolicy,
) -> Result<()> {
    let records = library_records(name, units, policy);
    let records = writer.abort_on_err(records)?;
    writer.write_records(&records)?;
    debug!("began library '{}'", name);
    Ok(())
}

fn library_records(name: &str, units: Units, policy: NamePolicy) -> Result<Vec<Record>> {
    let (modification, access) = date_pair();
    let mut dates = Vec::with_capacity(12);
    dates.extend_from_slice(&modification.to_words());
    dates.extend_from_slice(&access.to_words());

    Ok(vec![
        Record::words(RecordType::Header, &[GDS_VERSION]),
        Record::words(RecordType::BgnLib, &dates),
        name_record(RecordType::LibName, name, policy)?,
        Record::reals(
            RecordType::Units,
            &[units.user_units_per_db, units.meters_per_db],
        )?,
    ])
}

/// ENDLIB, then flush the stream
pub fn end_library<W: Write + Seek>(writer: &mut StreamWriter<W>) -> Result<()> {
    writer.write_record(&Record::no_data(RecordType::EndLib))?;
    writer.flush()
}
