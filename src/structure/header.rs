//! Structure begin/end records

use std::io::{Seek, Write};

use log::debug;

use super::names::{name_record, NamePolicy};
use crate::error::Result;
use crate::record::{date_pair, GdsDate, Record, RecordType};
use crate::stream::StreamWriter;

/// Name and the two timestamps written at the head of a structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureHeader {
    pub name: String,
    pub creation: GdsDate,
    pub modification: GdsDate,
}

impl StructureHeader {
    /// Sample creation and modification dates independently
    pub fn new(name: impl Into<String>) -> Self {
        let (creation, modification) = date_pair();
        StructureHeader {
            name: name.into(),
            creation,
            modification,
        }
    }

    pub fn with_dates(name: impl Into<String>, creation: GdsDate, modification: GdsDate) -> Self {
        StructureHeader {
            name: name.into(),
            creation,
            modification,
        }
    }

    /// BGNSTR followed by STRNAME, fully encoded in memory
    pub fn records(&self, policy: NamePolicy) -> Result<[Record; 2]> {
        let mut dates = Vec::with_capacity(12);
        dates.extend_from_slice(&self.creation.to_words());
        dates.extend_from_slice(&self.modification.to_words());
        let bgnstr = Record::words(RecordType::BgnStr, &dates);
        let strname = name_record(RecordType::StrName, &self.name, policy)?;
        Ok([bgnstr, strname])
    }
}

/// Write BGNSTR (creation and modification date) and STRNAME for `name`.
///
/// The name is validated and both records are encoded before anything is
/// written; any failure aborts the writer's session.
pub fn begin_structure<W: Write + Seek>(
    writer: &mut StreamWriter<W>,
    name: &str,
    policy: NamePolicy,
) -> Result<StructureHeader> {
    let header = StructureHeader::new(name);
    write_structure_header(writer, &header, policy)?;
    Ok(header)
}

/// Write a prepared header
pub fn write_structure_header<W: Write + Seek>(
    writer: &mut StreamWriter<W>,
    header: &StructureHeader,
    policy: NamePolicy,
) -> Result<()> {
    let records = header.records(policy);
    let records = writer.abort_on_err(records)?;
    writer.write_records(&records)?;
    debug!("began structure '{}'", header.name);
    Ok(())
}

pub fn end_structure<W: Write + Seek>(writer: &mut StreamWriter<W>) -> Result<()> {
    writer.write_record(&Record::no_data(RecordType::EndStr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GdsError;
    use std::io::Cursor;

    #[test]
    fn test_header_bytes() {
        let date = GdsDate([2016, 11, 3, 14, 5, 59]);
        let header = StructureHeader::with_dates("INV", date, date);
        let mut w = StreamWriter::new(Cursor::new(Vec::new())).unwrap();
        write_structure_header(&mut w, &header, NamePolicy::Canonical).unwrap();
        let bytes = w.into_inner().into_inner();

        assert_eq!(&bytes[0..4], &[0x00, 0x1C, 0x05, 0x02]);
        assert_eq!(&bytes[4..6], &[0x07, 0xE0]);
        assert_eq!(&bytes[16..18], &[0x07, 0xE0]);
        assert_eq!(&bytes[28..], &[0x00, 0x08, 0x06, 0x06, b'I', b'N', b'V', 0]);
    }

    #[test]
    fn test_begin_structure_dates_are_sampled() {
        let mut w = StreamWriter::new(Cursor::new(Vec::new())).unwrap();
        let header = begin_structure(&mut w, "TOP", NamePolicy::Legacy).unwrap();
        assert!(header.creation.0[0] >= 2020);
        assert!(header.modification.0[0] >= 2020);
        assert_eq!(w.position(), 28 + 8);
    }

    #[test]
    fn test_long_name_aborts_before_writing() {
        let mut w = StreamWriter::new(Cursor::new(Vec::new())).unwrap();
        let name = "X".repeat(40);
        let err = begin_structure(&mut w, &name, NamePolicy::Legacy).unwrap_err();
        assert!(matches!(err, GdsError::NameTooLong { .. }));
        assert!(w.is_poisoned());
        assert!(w.into_inner().into_inner().is_empty());
    }
}
