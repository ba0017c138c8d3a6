//! Typed literal validation
//!
//! [`validate_typed_literal`] checks a raw string against the lexical and
//! range rules of its declared [`DataTypeDefXsd`]. Callers gate presence:
//! absent or empty values are not passed in (an empty string is still
//! accepted where the grammar allows it, e.g. `boolean` and `hexBinary`).

pub mod coerce;
pub mod datatype;
pub mod temporal;

use std::str::FromStr;
use std::sync::LazyLock;

use base64::Engine;
use bigdecimal::BigDecimal;
use regex::Regex;

use crate::error::{AasError, ValueError};

pub use coerce::{coerce_typed_literal, CoerceOptions, TypedValue};
pub use datatype::DataTypeDefXsd;

/// RFC 3986 appendix B: scheme, authority, path, query, fragment
static URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*):)?(?://(?P<authority>[^/?#]*))?(?P<path>[^?#]*)(?:\?[^#]*)?(?:#.*)?$")
        .unwrap()
});

const BOOLEAN_LITERALS: &[&str] = &["true", "false", "1", "0", ""];

/// Validate `raw` against the rules of `datatype`
pub fn validate_typed_literal(datatype: DataTypeDefXsd, raw: &str) -> Result<(), ValueError> {
    let result = check_literal(datatype, raw);
    if let Err(e) = &result {
        tracing::trace!(%datatype, rule = e.rule(), "literal rejected");
    }
    result
}

/// Validate against a datatype given by name (`int` or `xs:int`).
///
/// An unknown name is a configuration error, not a value error.
pub fn validate_tagged_literal(tag: &str, raw: &str) -> Result<DataTypeDefXsd, AasError> {
    let datatype = DataTypeDefXsd::from_str(tag)?;
    validate_typed_literal(datatype, raw)?;
    Ok(datatype)
}

fn check_literal(datatype: DataTypeDefXsd, raw: &str) -> Result<(), ValueError> {
    let format_error = |reason: &str| ValueError::Format {
        datatype,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let type_mismatch = || ValueError::TypeMismatch {
        datatype,
        value: raw.to_string(),
    };

    match datatype {
        DataTypeDefXsd::String => Ok(()),
        DataTypeDefXsd::NormalizedString => {
            if raw.contains(['\r', '\n', '\t']) {
                Err(format_error("must not contain carriage return, line feed or tab"))
            } else {
                Ok(())
            }
        }
        DataTypeDefXsd::Boolean => {
            if BOOLEAN_LITERALS.contains(&raw) {
                Ok(())
            } else {
                Err(type_mismatch())
            }
        }
        DataTypeDefXsd::Decimal => BigDecimal::from_str(raw).map(|_| ()).map_err(|_| type_mismatch()),
        DataTypeDefXsd::Float | DataTypeDefXsd::Double => {
            raw.parse::<f64>().map(|_| ()).map_err(|_| type_mismatch())
        }
        DataTypeDefXsd::Byte
        | DataTypeDefXsd::Short
        | DataTypeDefXsd::Int
        | DataTypeDefXsd::Long
        | DataTypeDefXsd::UnsignedByte
        | DataTypeDefXsd::UnsignedShort
        | DataTypeDefXsd::UnsignedInt
        | DataTypeDefXsd::UnsignedLong
        | DataTypeDefXsd::NonPositiveInteger
        | DataTypeDefXsd::NegativeInteger
        | DataTypeDefXsd::NonNegativeInteger
        | DataTypeDefXsd::PositiveInteger => check_integer(datatype, raw),
        DataTypeDefXsd::Date => {
            let parts = temporal::lex_date(raw).ok_or_else(|| format_error("must match YYYY-MM-DD"))?;
            parts
                .to_naive()
                .map(|_| ())
                .ok_or_else(|| format_error("is not a valid calendar date"))
        }
        DataTypeDefXsd::Time => {
            let parts = temporal::lex_time(raw)
                .ok_or_else(|| format_error("must match HH:MM[:SS[.fff]][Z|±HH:MM]"))?;
            check_time_bounds(datatype, raw, &parts)
        }
        DataTypeDefXsd::DateTime => {
            let (date, time) = temporal::lex_date_time(raw)
                .ok_or_else(|| format_error("must match YYYY-MM-DDThh:mm[:ss[.fff]][Z|±HH:MM]"))?;
            if date.to_naive().is_none() {
                return Err(format_error("has an invalid calendar date"));
            }
            check_time_bounds(datatype, raw, &time)
        }
        DataTypeDefXsd::AnyUri => {
            let has_scheme_or_path = URI_RE
                .captures(raw)
                .map(|caps| {
                    caps.name("scheme").is_some()
                        || caps.name("path").is_some_and(|p| !p.as_str().is_empty())
                })
                .unwrap_or(false);
            if has_scheme_or_path {
                Ok(())
            } else {
                Err(format_error("has neither a scheme nor a path"))
            }
        }
        DataTypeDefXsd::Base64Binary => base64::engine::general_purpose::STANDARD
            .decode(raw)
            .map(|_| ())
            .map_err(|e| format_error(&format!("is not valid base64 ({})", e))),
        DataTypeDefXsd::HexBinary => {
            if raw.len() % 2 == 0 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
                Ok(())
            } else {
                Err(format_error("must be an even number of hexadecimal digits"))
            }
        }
    }
}

/// Sign and digits of an integer literal `[+-]?[0-9]+`
struct IntegerLexeme<'a> {
    negative: bool,
    digits: &'a str,
}

impl<'a> IntegerLexeme<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let (negative, digits) = match raw.as_bytes().first()? {
            b'-' => (true, &raw[1..]),
            b'+' => (false, &raw[1..]),
            _ => (false, raw),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self { negative, digits })
    }

    fn is_zero(&self) -> bool {
        self.digits.bytes().all(|b| b == b'0')
    }

    fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }
}

fn check_integer(datatype: DataTypeDefXsd, raw: &str) -> Result<(), ValueError> {
    let lexeme = IntegerLexeme::parse(raw).ok_or_else(|| ValueError::TypeMismatch {
        datatype,
        value: raw.to_string(),
    })?;
    let range_error = |constraint: String| ValueError::Range {
        datatype,
        value: raw.to_string(),
        constraint,
    };

    if let Some((min, max)) = datatype.integer_bounds() {
        // anything too wide for i128 is far outside every fixed-width range
        let in_range = raw.parse::<i128>().is_ok_and(|v| (min..=max).contains(&v));
        return if in_range {
            Ok(())
        } else {
            Err(range_error(format!("within [{}, {}]", min, max)))
        };
    }

    let (ok, constraint) = match datatype {
        DataTypeDefXsd::NonPositiveInteger => (!lexeme.is_positive(), "<= 0"),
        DataTypeDefXsd::NegativeInteger => (lexeme.is_negative(), "< 0"),
        DataTypeDefXsd::NonNegativeInteger => (!lexeme.is_negative(), ">= 0"),
        DataTypeDefXsd::PositiveInteger => (lexeme.is_positive(), "> 0"),
        _ => (true, ""),
    };
    if ok {
        Ok(())
    } else {
        Err(range_error(constraint.to_string()))
    }
}

fn check_time_bounds(
    datatype: DataTypeDefXsd,
    raw: &str,
    parts: &temporal::TimeParts,
) -> Result<(), ValueError> {
    parts.check_bounds().map_err(|oob| ValueError::Range {
        datatype,
        value: raw.to_string(),
        constraint: format!("{} {}", oob.component, oob.bounds),
    })
}
