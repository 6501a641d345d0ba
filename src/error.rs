//! Error types for the GDSII codec, stream writer and polygon geometry

use thiserror::Error;

/// Every failure this crate can report.
///
/// All variants are terminal for the operation that raised them. A
/// [`StreamWriter`](crate::stream::StreamWriter) that observes any of them
/// while writing is poisoned and answers [`GdsError::SessionAborted`] from
/// then on.
#[derive(Error, Debug)]
pub enum GdsError {
    /// A record length is odd or does not fit the 16-bit length field.
    #[error("record length {length} is not representable (must be even and at most 65534)")]
    FormatOverflow { length: usize },

    /// A decoded header is truncated or declares an odd / sub-minimum length.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// Underlying stream failure (write, seek, tell or read).
    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Structure name exceeds the legacy 32 character limit.
    #[error("structure name '{name}' has {length} characters, limit is {limit}")]
    NameTooLong {
        name: String,
        length: usize,
        limit: usize,
    },

    /// Names are written into ASCII records and may not carry other bytes.
    #[error("name '{name}' contains non-ASCII characters")]
    NonAsciiName { name: String },

    /// Fewer than 3 distinct vertices after closure normalization.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// A string or byte buffer could not be reserved.
    #[error("could not allocate {requested} bytes")]
    Allocation { requested: usize },

    /// The writer already failed once; the session must be restarted.
    #[error("write session aborted by an earlier failure")]
    SessionAborted,

    /// A configuration source could not be understood.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GdsError>;
