//! Position-tracked record output with length patching

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use log::{debug, warn};

use crate::error::{GdsError, Result};
use crate::record::{check_record_len, encode_header, Record, RecordType, HEADER_LEN};

/// Location of a record whose header was written with a placeholder length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMark {
    pub offset: u64,
    pub record_type: u8,
    pub data_type: u8,
}

/// Sequential writer for one output session.
///
/// The writer owns its stream but never closes or reopens it; dropping the
/// writer or calling [`StreamWriter::into_inner`] is up to the caller. The
/// first failure poisons the session and every later call returns
/// [`GdsError::SessionAborted`].
pub struct StreamWriter<W: Write + Seek> {
    inner: W,
    position: u64,
    poisoned: bool,
}

impl StreamWriter<BufWriter<File>> {
    /// Create or truncate `path` and start a session on it
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        debug!("opened {} for writing", path.as_ref().display());
        StreamWriter::new(BufWriter::new(file))
    }
}

impl<W: Write + Seek> StreamWriter<W> {
    pub fn new(mut inner: W) -> Result<Self> {
        let position = inner.stream_position()?;
        Ok(StreamWriter {
            inner,
            position,
            poisoned: false,
        })
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Position as tracked by the writer (no syscall)
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Mark the session failed after an error raised outside the writer
    pub fn abort(&mut self) {
        if !self.poisoned {
            warn!("aborting write session at offset {}", self.position);
            self.poisoned = true;
        }
    }

    /// Pass `result` through, aborting the session if it is an error
    pub fn abort_on_err<T>(&mut self, result: Result<T>) -> Result<T> {
        if self.poisoned {
            return Err(GdsError::SessionAborted);
        }
        if result.is_err() {
            self.abort();
        }
        result
    }

    /// Run one stream operation, poisoning the session if it fails
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.poisoned {
            return Err(GdsError::SessionAborted);
        }
        let result = op(self);
        if let Err(e) = &result {
            warn!("aborting write session at offset {}: {}", self.position, e);
            self.poisoned = true;
        }
        result
    }

    /// Append a complete record.
    ///
    /// Header and payload go out in one `write_all`, so a record whose
    /// length is not representable never reaches the stream.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.guarded(|w| {
            let bytes = record.encode()?;
            w.inner.write_all(&bytes)?;
            debug!(
                "wrote {} record ({} bytes) at {}",
                record.kind().map_or("unknown", RecordType::name),
                bytes.len(),
                w.position
            );
            w.position += bytes.len() as u64;
            Ok(())
        })
    }

    pub fn write_records(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Current offset as reported by the underlying stream
    pub fn tell(&mut self) -> Result<u64> {
        self.guarded(|w| Ok(w.inner.stream_position()?))
    }

    /// Overwrite the 2-byte length field at `offset` with `actual_length`
    /// and return to the previous write position.
    ///
    /// The field must lie inside what has already been written; nothing
    /// else in the stream is touched and its size does not change.
    pub fn patch_length(&mut self, offset: u64, actual_length: usize) -> Result<()> {
        self.guarded(|w| {
            let length = check_record_len(actual_length)?;
            let resume = w.inner.stream_position()?;
            if offset.checked_add(2).map_or(true, |end| end > resume) {
                return Err(GdsError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "length field at {} lies beyond written data ({} bytes)",
                        offset, resume
                    ),
                )));
            }
            w.inner.seek(SeekFrom::Start(offset))?;
            w.inner.write_u16::<BigEndian>(length)?;
            w.inner.seek(SeekFrom::Start(resume))?;
            debug!("patched length {} at offset {}", length, offset);
            Ok(())
        })
    }

    /// Write a header with a placeholder length; finish with
    /// [`StreamWriter::finish_record`] once the payload is out.
    pub fn begin_record(&mut self, kind: RecordType) -> Result<RecordMark> {
        self.begin_raw_record(kind.code(), kind.data_type().code())
    }

    pub fn begin_raw_record(&mut self, record_type: u8, data_type: u8) -> Result<RecordMark> {
        self.guarded(|w| {
            let offset = w.position;
            let header = encode_header(record_type, data_type, 0)?;
            w.inner.write_all(&header)?;
            w.position += HEADER_LEN as u64;
            Ok(RecordMark {
                offset,
                record_type,
                data_type,
            })
        })
    }

    /// Append raw payload bytes to the record opened by `begin_record`
    pub fn write_payload(&mut self, bytes: &[u8]) -> Result<()> {
        self.guarded(|w| {
            w.inner.write_all(bytes)?;
            w.position += bytes.len() as u64;
            Ok(())
        })
    }

    /// Patch the length of `mark` from the bytes written since it was opened
    pub fn finish_record(&mut self, mark: RecordMark) -> Result<u16> {
        let Some(total) = self.position.checked_sub(mark.offset) else {
            let err = GdsError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "record mark at {} lies beyond written data ({} bytes)",
                    mark.offset, self.position
                ),
            ));
            return self.abort_on_err(Err(err));
        };
        let length = usize::try_from(total).unwrap_or(usize::MAX);
        self.patch_length(mark.offset, length)?;
        Ok(length as u16)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.guarded(|w| Ok(w.inner.flush()?))
    }

    /// Hand the stream back to the caller
    pub fn into_inner(self) -> W {
        self.inner
    }
}
