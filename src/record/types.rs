//! Record type and data type code tables

/// GDSII record type codes (byte 2 of the header)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    Header = 0x00,
    BgnLib = 0x01,
    LibName = 0x02,
    Units = 0x03,
    EndLib = 0x04,
    BgnStr = 0x05,
    StrName = 0x06,
    EndStr = 0x07,
    Boundary = 0x08,
    Path = 0x09,
    Sref = 0x0A,
    Aref = 0x0B,
    Text = 0x0C,
    Layer = 0x0D,
    DataType = 0x0E,
    Width = 0x0F,
    Xy = 0x10,
    EndEl = 0x11,
    Sname = 0x12,
}

impl RecordType {
    /// Look up a known record type. Unknown codes are not an error here.
    pub fn from_code(code: u8) -> Option<Self> {
        use RecordType::*;
        let rt = match code {
            0x00 => Header,
            0x01 => BgnLib,
            0x02 => LibName,
            0x03 => Units,
            0x04 => EndLib,
            0x05 => BgnStr,
            0x06 => StrName,
            0x07 => EndStr,
            0x08 => Boundary,
            0x09 => Path,
            0x0A => Sref,
            0x0B => Aref,
            0x0C => Text,
            0x0D => Layer,
            0x0E => DataType,
            0x0F => Width,
            0x10 => Xy,
            0x11 => EndEl,
            0x12 => Sname,
            _ => return None,
        };
        Some(rt)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Mnemonic used in dumps
    pub fn name(self) -> &'static str {
        use RecordType::*;
        match self {
            Header => "HEADER",
            BgnLib => "BGNLIB",
            LibName => "LIBNAME",
            Units => "UNITS",
            EndLib => "ENDLIB",
            BgnStr => "BGNSTR",
            StrName => "STRNAME",
            EndStr => "ENDSTR",
            Boundary => "BOUNDARY",
            Path => "PATH",
            Sref => "SREF",
            Aref => "AREF",
            Text => "TEXT",
            Layer => "LAYER",
            DataType => "DATATYPE",
            Width => "WIDTH",
            Xy => "XY",
            EndEl => "ENDEL",
            Sname => "SNAME",
        }
    }

    /// Data type the format prescribes for this record
    pub fn data_type(self) -> DataType {
        match self {
            RecordType::EndLib
            | RecordType::EndStr
            | RecordType::Boundary
            | RecordType::Path
            | RecordType::Sref
            | RecordType::Aref
            | RecordType::Text
            | RecordType::EndEl => DataType::NoData,
            RecordType::Header
            | RecordType::BgnLib
            | RecordType::BgnStr
            | RecordType::Layer
            | RecordType::DataType => DataType::Int16,
            RecordType::Width | RecordType::Xy => DataType::Int32,
            RecordType::Units => DataType::Real8,
            RecordType::LibName | RecordType::StrName | RecordType::Sname => DataType::Ascii,
        }
    }
}

/// Payload data type codes (byte 3 of the header)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    NoData = 0,
    BitArray = 1,
    Int16 = 2,
    Int32 = 3,
    Real4 = 4,
    Real8 = 5,
    Ascii = 6,
}

impl DataType {
    pub fn from_code(code: u8) -> Option<Self> {
        let dt = match code {
            0 => DataType::NoData,
            1 => DataType::BitArray,
            2 => DataType::Int16,
            3 => DataType::Int32,
            4 => DataType::Real4,
            5 => DataType::Real8,
            6 => DataType::Ascii,
            _ => return None,
        };
        Some(dt)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_codes_roundtrip() {
        for code in 0x00..=0x12u8 {
            let rt = RecordType::from_code(code).expect("known code");
            assert_eq!(rt.code(), code);
        }
        assert_eq!(RecordType::from_code(0x13), None);
        assert_eq!(RecordType::from_code(0xFF), None);
    }

    #[test]
    fn test_prescribed_data_types() {
        assert_eq!(RecordType::BgnStr.data_type(), DataType::Int16);
        assert_eq!(RecordType::StrName.data_type(), DataType::Ascii);
        assert_eq!(RecordType::Units.data_type(), DataType::Real8);
        assert_eq!(RecordType::Xy.data_type(), DataType::Int32);
        assert_eq!(RecordType::EndStr.data_type(), DataType::NoData);
        assert_eq!(DataType::from_code(7), None);
    }
}
