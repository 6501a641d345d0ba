//! GDSII record codec
//!
//! # Submodules
//! - `types` - Record type and data type code tables
//! - `codec` - Header framing and typed payload encoding/decoding
//! - `date` - Six-word timestamps

mod codec;
mod date;
mod types;

pub use codec::{
    check_record_len, decode_header, decode_ints, decode_real8, decode_reals, decode_string,
    decode_words, encode_header, encode_ints, encode_real8, encode_string, encode_words, Record,
    RecordHeader, HEADER_LEN, MAX_RECORD_LEN,
};
pub use date::{date_pair, GdsDate};
pub use types::{DataType, RecordType};
