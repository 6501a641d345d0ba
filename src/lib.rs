//! GDSII stream codec and structural writer
//!
//! GDSII describes IC / photomask layout as a flat sequence of records that
//! build a library → structure → element hierarchy. This crate provides:
//!
//! - `record` - Record header framing and typed payloads
//! - `stream` - Position-tracked output with length patching, and a reader
//! - `structure` - Library, structure and boundary element writers
//! - `geometry` - Polygon area with explicit/implicit ring closure
//! - `config` - Writer options from JSON and environment
//!
//! # Example
//! ```ignore
//! use gdsio::{begin_library, begin_structure, end_library, end_structure};
//! use gdsio::{NamePolicy, StreamWriter, Units};
//!
//! let mut writer = StreamWriter::create("cells.gds")?;
//! begin_library(&mut writer, "CELLS", Units::default(), NamePolicy::Canonical)?;
//! begin_structure(&mut writer, "INV", NamePolicy::Canonical)?;
//! end_structure(&mut writer)?;
//! end_library(&mut writer)?;
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod record;
pub mod stream;
pub mod structure;

pub use config::WriterOptions;
pub use error::{GdsError, Result};
pub use geometry::{
    polygon_area, polygon_areas, AreaBatch, AreaConvention, Closure, ClosureMode, Point,
    PolygonArea, PolygonBatch,
};
pub use record::{decode_header, encode_header, encode_string, encode_words, GdsDate, Record, RecordType};
pub use stream::{RecordReader, StreamWriter};
pub use structure::{
    begin_library, begin_structure, end_library, end_structure, write_boundary, NamePolicy,
    StructureHeader, Units,
};
