use serde::{Deserialize, Serialize};

use crate::error::{GdsError, Result};
use crate::record::{encode_string, Record, RecordType};

/// Character limit enforced by [`NamePolicy::Legacy`]
pub const LEGACY_NAME_LIMIT: usize = 32;

/// How structure and library names are checked before encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// At most 32 characters, longer names are rejected
    Legacy,
    /// Any length that fits a record
    #[default]
    Canonical,
}

/// Build an ASCII name record (STRNAME, LIBNAME, SNAME) under `policy`.
///
/// The name is materialized into its own buffer first and the declared
/// record length is taken from that buffer, so the length field always
/// matches the emitted bytes. Only ASCII names are accepted under either
/// policy, so the legacy limit counts bytes and characters alike.
pub fn name_record(kind: RecordType, name: &str, policy: NamePolicy) -> Result<Record> {
    if !name.is_ascii() {
        return Err(GdsError::NonAsciiName {
            name: name.to_string(),
        });
    }
    if policy == NamePolicy::Legacy {
        let length = name.len();
        if length > LEGACY_NAME_LIMIT {
            return Err(GdsError::NameTooLong {
                name: name.to_string(),
                length,
                limit: LEGACY_NAME_LIMIT,
            });
        }
    }
    Ok(Record::new(kind, encode_string(name.as_bytes())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_two_accepted_by_both() {
        let name = "A".repeat(32);
        for policy in [NamePolicy::Legacy, NamePolicy::Canonical] {
            let rec = name_record(RecordType::StrName, &name, policy).unwrap();
            assert_eq!(rec.payload.len(), 32);
        }
    }

    #[test]
    fn test_thirty_three_only_rejected_by_legacy() {
        let name = "B".repeat(33);
        assert!(matches!(
            name_record(RecordType::StrName, &name, NamePolicy::Legacy),
            Err(GdsError::NameTooLong { length: 33, limit: 32, .. })
        ));
        let rec = name_record(RecordType::StrName, &name, NamePolicy::Canonical).unwrap();
        assert_eq!(rec.payload.len(), 34);
        assert_eq!(rec.payload[33], 0);
    }

    #[test]
    fn test_padding() {
        let even = name_record(RecordType::StrName, "NAND", NamePolicy::Canonical).unwrap();
        assert_eq!(even.payload, b"NAND".to_vec());
        let odd = name_record(RecordType::StrName, "NOR", NamePolicy::Legacy).unwrap();
        assert_eq!(odd.payload, b"NOR\0".to_vec());
    }

    #[test]
    fn test_non_ascii_rejected() {
        // 16 characters but 32 bytes
        let name = "é".repeat(16);
        for policy in [NamePolicy::Legacy, NamePolicy::Canonical] {
            assert!(matches!(
                name_record(RecordType::StrName, &name, policy),
                Err(GdsError::NonAsciiName { .. })
            ));
        }
    }
}
