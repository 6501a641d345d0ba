//! Record framing and typed payload encoding
//!
//! Every GDSII record starts with a 4-byte header:
//! `[length: u16][record type: u8][data type: u8]`, all big-endian, where
//! `length` counts the header itself. Total record length is always even.

use byteorder::{BigEndian, ByteOrder};

use super::types::{DataType, RecordType};
use crate::error::{GdsError, Result};

/// Size of the record header in bytes
pub const HEADER_LEN: usize = 4;

/// Largest even value the 16-bit length field can carry
pub const MAX_RECORD_LEN: usize = 0xFFFE;

/// Decoded record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub length: u16,
    pub record_type: u8,
    pub data_type: u8,
}

impl RecordHeader {
    pub fn payload_len(&self) -> usize {
        self.length as usize - HEADER_LEN
    }

    /// Known record type, if any
    pub fn kind(&self) -> Option<RecordType> {
        RecordType::from_code(self.record_type)
    }
}

/// Validate a total record length (header included)
pub fn check_record_len(total: usize) -> Result<u16> {
    if total < HEADER_LEN || total > MAX_RECORD_LEN || total % 2 != 0 {
        return Err(GdsError::FormatOverflow { length: total });
    }
    Ok(total as u16)
}

/// Encode a record header for a payload of `payload_len` bytes
pub fn encode_header(record_type: u8, data_type: u8, payload_len: usize) -> Result<[u8; 4]> {
    let total = payload_len
        .checked_add(HEADER_LEN)
        .ok_or(GdsError::FormatOverflow { length: usize::MAX })?;
    let length = check_record_len(total)?;

    let mut header = [0u8; HEADER_LEN];
    BigEndian::write_u16(&mut header[0..2], length);
    header[2] = record_type;
    header[3] = data_type;
    Ok(header)
}

/// Decode a record header from the first 4 bytes of `bytes`
pub fn decode_header(bytes: &[u8]) -> Result<RecordHeader> {
    if bytes.len() < HEADER_LEN {
        return Err(GdsError::CorruptRecord(format!(
            "header needs {} bytes, got {}",
            HEADER_LEN,
            bytes.len()
        )));
    }
    let length = BigEndian::read_u16(&bytes[0..2]);
    if (length as usize) < HEADER_LEN || length % 2 != 0 {
        return Err(GdsError::CorruptRecord(format!(
            "declared length {} is odd or below the {} byte minimum",
            length, HEADER_LEN
        )));
    }
    Ok(RecordHeader {
        length,
        record_type: bytes[2],
        data_type: bytes[3],
    })
}

/// ASCII payload, padded with one NUL when the input length is odd
pub fn encode_string(s: &[u8]) -> Result<Vec<u8>> {
    let padded = s.len() + s.len() % 2;
    let mut out = Vec::new();
    out.try_reserve_exact(padded)
        .map_err(|_| GdsError::Allocation { requested: padded })?;
    out.extend_from_slice(s);
    out.resize(padded, 0);
    Ok(out)
}

/// ASCII payload back to text, trailing NUL padding removed
pub fn decode_string(payload: &[u8]) -> String {
    let end = payload
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&payload[..end]).into_owned()
}

pub fn encode_words(values: &[u16]) -> Vec<u8> {
    let mut out = vec![0u8; values.len() * 2];
    BigEndian::write_u16_into(values, &mut out);
    out
}

pub fn decode_words(payload: &[u8]) -> Result<Vec<u16>> {
    if payload.len() % 2 != 0 {
        return Err(GdsError::CorruptRecord(format!(
            "16-bit array payload has odd length {}",
            payload.len()
        )));
    }
    let mut out = vec![0u16; payload.len() / 2];
    BigEndian::read_u16_into(payload, &mut out);
    Ok(out)
}

pub fn encode_ints(values: &[i32]) -> Vec<u8> {
    let mut out = vec![0u8; values.len() * 4];
    BigEndian::write_i32_into(values, &mut out);
    out
}

pub fn decode_ints(payload: &[u8]) -> Result<Vec<i32>> {
    if payload.len() % 4 != 0 {
        return Err(GdsError::CorruptRecord(format!(
            "32-bit array payload length {} is not a multiple of 4",
            payload.len()
        )));
    }
    let mut out = vec![0i32; payload.len() / 4];
    BigEndian::read_i32_into(payload, &mut out);
    Ok(out)
}

/// Encode an `f64` as a GDSII 8-byte real.
///
/// Layout: sign bit, 7-bit base-16 exponent biased by 64, 56-bit mantissa
/// in `[1/16, 1)`.
pub fn encode_real8(value: f64) -> Result<[u8; 8]> {
    let mut out = [0u8; 8];
    if value == 0.0 {
        return Ok(out);
    }
    if !value.is_finite() {
        return Err(GdsError::FormatOverflow { length: 8 });
    }

    let sign: u8 = if value < 0.0 { 0x80 } else { 0x00 };
    let mut mantissa = value.abs();
    let mut exponent: i32 = 64;
    while mantissa >= 1.0 {
        mantissa /= 16.0;
        exponent += 1;
    }
    while mantissa < 1.0 / 16.0 {
        mantissa *= 16.0;
        exponent -= 1;
    }
    if !(0..=127).contains(&exponent) {
        return Err(GdsError::FormatOverflow { length: 8 });
    }

    // Exact: the mantissa has at most 53 significant bits below 2^-4.
    let bits = (mantissa * (1u64 << 56) as f64) as u64;
    BigEndian::write_u64(&mut out, bits);
    out[0] = sign | exponent as u8;
    Ok(out)
}

pub fn decode_real8(bytes: [u8; 8]) -> f64 {
    let sign = if bytes[0] & 0x80 != 0 { -1.0 } else { 1.0 };
    let exponent = (bytes[0] & 0x7F) as i32 - 64;
    let mantissa = BigEndian::read_u64(&bytes) & 0x00FF_FFFF_FFFF_FFFF;
    sign * (mantissa as f64 / (1u64 << 56) as f64) * 16f64.powi(exponent)
}

pub fn decode_reals(payload: &[u8]) -> Result<Vec<f64>> {
    if payload.len() % 8 != 0 {
        return Err(GdsError::CorruptRecord(format!(
            "8-byte real payload length {} is not a multiple of 8",
            payload.len()
        )));
    }
    Ok(payload
        .chunks_exact(8)
        .map(|c| {
            let mut b = [0u8; 8];
            b.copy_from_slice(c);
            decode_real8(b)
        })
        .collect())
}

/// One record: type and data-type codes plus an already encoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub record_type: u8,
    pub data_type: u8,
    pub payload: Vec<u8>,
}

impl Record {
    /// Record with the data type the format prescribes for `kind`
    pub fn new(kind: RecordType, payload: Vec<u8>) -> Self {
        Record {
            record_type: kind.code(),
            data_type: kind.data_type().code(),
            payload,
        }
    }

    /// Record from raw codes; unknown codes are accepted
    pub fn raw(record_type: u8, data_type: u8, payload: Vec<u8>) -> Self {
        Record {
            record_type,
            data_type,
            payload,
        }
    }

    pub fn no_data(kind: RecordType) -> Self {
        Record::new(kind, Vec::new())
    }

    pub fn words(kind: RecordType, values: &[u16]) -> Self {
        Record::new(kind, encode_words(values))
    }

    pub fn ints(kind: RecordType, values: &[i32]) -> Self {
        Record::new(kind, encode_ints(values))
    }

    pub fn string(kind: RecordType, s: &str) -> Result<Self> {
        Ok(Record::new(kind, encode_string(s.as_bytes())?))
    }

    pub fn reals(kind: RecordType, values: &[f64]) -> Result<Self> {
        let mut payload = Vec::with_capacity(values.len() * 8);
        for &v in values {
            payload.extend_from_slice(&encode_real8(v)?);
        }
        Ok(Record::new(kind, payload))
    }

    pub fn kind(&self) -> Option<RecordType> {
        RecordType::from_code(self.record_type)
    }

    pub fn data_kind(&self) -> Option<DataType> {
        DataType::from_code(self.data_type)
    }

    /// Total encoded length, header included
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    /// Header followed by payload, in one buffer
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = encode_header(self.record_type, self.data_type, self.payload.len())?;
        let mut out = Vec::new();
        out.try_reserve_exact(self.encoded_len())
            .map_err(|_| GdsError::Allocation {
                requested: self.encoded_len(),
            })?;
        out.extend_from_slice(&header);
        out.extend_from_slice(&self.payload);
        Ok(out)
    }
}
