//! Primitive datatype vocabulary for literal values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigurationError;

/// The 24 supported XSD primitive datatypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeDefXsd {
    String,
    NormalizedString,
    Boolean,
    Decimal,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    NonPositiveInteger,
    NegativeInteger,
    NonNegativeInteger,
    PositiveInteger,
    Date,
    DateTime,
    Time,
    AnyUri,
    Base64Binary,
    HexBinary,
}

impl DataTypeDefXsd {
    pub const ALL: [DataTypeDefXsd; 24] = [
        DataTypeDefXsd::String,
        DataTypeDefXsd::NormalizedString,
        DataTypeDefXsd::Boolean,
        DataTypeDefXsd::Decimal,
        DataTypeDefXsd::Float,
        DataTypeDefXsd::Double,
        DataTypeDefXsd::Byte,
        DataTypeDefXsd::Short,
        DataTypeDefXsd::Int,
        DataTypeDefXsd::Long,
        DataTypeDefXsd::UnsignedByte,
        DataTypeDefXsd::UnsignedShort,
        DataTypeDefXsd::UnsignedInt,
        DataTypeDefXsd::UnsignedLong,
        DataTypeDefXsd::NonPositiveInteger,
        DataTypeDefXsd::NegativeInteger,
        DataTypeDefXsd::NonNegativeInteger,
        DataTypeDefXsd::PositiveInteger,
        DataTypeDefXsd::Date,
        DataTypeDefXsd::DateTime,
        DataTypeDefXsd::Time,
        DataTypeDefXsd::AnyUri,
        DataTypeDefXsd::Base64Binary,
        DataTypeDefXsd::HexBinary,
    ];

    /// Tag name without the `xs:` prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            DataTypeDefXsd::String => "string",
            DataTypeDefXsd::NormalizedString => "normalizedString",
            DataTypeDefXsd::Boolean => "boolean",
            DataTypeDefXsd::Decimal => "decimal",
            DataTypeDefXsd::Float => "float",
            DataTypeDefXsd::Double => "double",
            DataTypeDefXsd::Byte => "byte",
            DataTypeDefXsd::Short => "short",
            DataTypeDefXsd::Int => "int",
            DataTypeDefXsd::Long => "long",
            DataTypeDefXsd::UnsignedByte => "unsignedByte",
            DataTypeDefXsd::UnsignedShort => "unsignedShort",
            DataTypeDefXsd::UnsignedInt => "unsignedInt",
            DataTypeDefXsd::UnsignedLong => "unsignedLong",
            DataTypeDefXsd::NonPositiveInteger => "nonPositiveInteger",
            DataTypeDefXsd::NegativeInteger => "negativeInteger",
            DataTypeDefXsd::NonNegativeInteger => "nonNegativeInteger",
            DataTypeDefXsd::PositiveInteger => "positiveInteger",
            DataTypeDefXsd::Date => "date",
            DataTypeDefXsd::DateTime => "dateTime",
            DataTypeDefXsd::Time => "time",
            DataTypeDefXsd::AnyUri => "anyURI",
            DataTypeDefXsd::Base64Binary => "base64Binary",
            DataTypeDefXsd::HexBinary => "hexBinary",
        }
    }

    /// Closed range for the fixed-width integer types
    pub fn integer_bounds(&self) -> Option<(i128, i128)> {
        match self {
            DataTypeDefXsd::Byte => Some((i8::MIN.into(), i8::MAX.into())),
            DataTypeDefXsd::Short => Some((i16::MIN.into(), i16::MAX.into())),
            DataTypeDefXsd::Int => Some((i32::MIN.into(), i32::MAX.into())),
            DataTypeDefXsd::Long => Some((i64::MIN.into(), i64::MAX.into())),
            DataTypeDefXsd::UnsignedByte => Some((0, u8::MAX.into())),
            DataTypeDefXsd::UnsignedShort => Some((0, u16::MAX.into())),
            DataTypeDefXsd::UnsignedInt => Some((0, u32::MAX.into())),
            DataTypeDefXsd::UnsignedLong => Some((0, u64::MAX.into())),
            _ => None,
        }
    }

    /// Any integer-valued type, bounded or sign-constrained
    pub fn is_integer(&self) -> bool {
        self.integer_bounds().is_some()
            || matches!(
                self,
                DataTypeDefXsd::NonPositiveInteger
                    | DataTypeDefXsd::NegativeInteger
                    | DataTypeDefXsd::NonNegativeInteger
                    | DataTypeDefXsd::PositiveInteger
            )
    }
}

impl fmt::Display for DataTypeDefXsd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both `int` and `xs:int`
impl FromStr for DataTypeDefXsd {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("xs:").unwrap_or(s);
        DataTypeDefXsd::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| ConfigurationError::UnsupportedType(s.to_string()))
    }
}

impl Serialize for DataTypeDefXsd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataTypeDefXsd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
