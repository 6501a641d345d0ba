//! Sequential record decoding

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use log::trace;

use crate::error::{GdsError, Result};
use crate::record::{decode_header, Record, HEADER_LEN};

/// Reads records one after another until end of stream.
///
/// As an iterator it stops after the first error, since the stream
/// position is no longer on a record boundary.
pub struct RecordReader<R: Read> {
    inner: R,
    offset: u64,
    failed: bool,
}

impl RecordReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(RecordReader::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        RecordReader {
            inner,
            offset: 0,
            failed: false,
        }
    }

    /// Offset of the next record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Next record, `None` at a clean end of stream
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let mut header = [0u8; HEADER_LEN];
        let mut filled = 0;
        while filled < HEADER_LEN {
            match self.inner.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(GdsError::CorruptRecord(format!(
                        "truncated header at offset {}",
                        self.offset
                    )))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let header = decode_header(&header)?;
        let mut payload = vec![0u8; header.payload_len()];
        self.inner.read_exact(&mut payload).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                GdsError::CorruptRecord(format!(
                    "record at offset {} declares {} bytes but the stream ends early",
                    self.offset, header.length
                ))
            } else {
                GdsError::Io(e)
            }
        })?;

        trace!(
            "read record type 0x{:02X} ({} bytes) at {}",
            header.record_type,
            header.length,
            self.offset
        );
        self.offset += header.length as u64;
        Ok(Some(Record::raw(header.record_type, header.data_type, payload)))
    }

    /// Drain the stream into a vector
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_record().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

impl<R: Read> std::iter::FusedIterator for RecordReader<R> {}
