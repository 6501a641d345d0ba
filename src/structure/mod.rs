//! Structural writing on top of [`StreamWriter`](crate::stream::StreamWriter)
//!
//! # Submodules
//! - `names` - Name records and the legacy/canonical length policy
//! - `header` - Structure begin (dates + name) and end records
//! - `library` - Library framing records
//! - `element` - Boundary elements with validated rings

mod element;
mod header;
mod library;
mod names;

pub use names::{name_record, NamePolicy, LEGACY_NAME_LIMIT};

pub use header::{begin_structure, end_structure, write_structure_header, StructureHeader};

pub use library::{begin_library, end_library, Units, GDS_VERSION};

pub use element::{boundary_records, write_boundary};
