//! Typed output for already-validated literals
//!
//! Coercion never establishes validity. It runs on the export path, after
//! [`validate_typed_literal`](super::validate_typed_literal) accepted the
//! literal at construction, and falls back to the original string whenever
//! a conversion does not go through.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde_json::Value;

use super::datatype::DataTypeDefXsd;
use super::temporal;

/// Explicit, immutable switch for typed output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoerceOptions {
    /// Produce typed values instead of the raw literal
    pub produce_typed: bool,
}

impl CoerceOptions {
    pub fn typed() -> Self {
        Self { produce_typed: true }
    }
}

/// A literal converted to its richer representation
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Original literal, unchanged
    Text(String),
    Boolean(bool),
    Integer(i128),
    Float(f64),
    Date(NaiveDate),
    Time {
        time: NaiveTime,
        offset: Option<FixedOffset>,
    },
    /// dateTime with a timezone designator
    DateTime(DateTime<FixedOffset>),
    /// dateTime without a timezone designator
    LocalDateTime(NaiveDateTime),
}

impl TypedValue {
    pub fn is_text(&self) -> bool {
        matches!(self, TypedValue::Text(_))
    }

    /// JSON rendering: booleans and numbers natively, temporal values as
    /// ISO-8601 strings. Integers wider than 64 bits and non-finite floats
    /// have no JSON number form and become a string / `null`.
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::Text(s) => Value::String(s.clone()),
            TypedValue::Boolean(b) => Value::Bool(*b),
            TypedValue::Integer(i) => {
                if let Ok(v) = i64::try_from(*i) {
                    Value::from(v)
                } else if let Ok(v) = u64::try_from(*i) {
                    Value::from(v)
                } else {
                    Value::String(i.to_string())
                }
            }
            TypedValue::Float(f) => Value::from(*f),
            TypedValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            TypedValue::Time { time, offset } => {
                let mut s = time.format("%H:%M:%S%.f").to_string();
                if let Some(offset) = offset {
                    s.push_str(&offset.to_string());
                }
                Value::String(s)
            }
            TypedValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            TypedValue::LocalDateTime(dt) => {
                Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

/// Convert a validated literal for export.
///
/// With `produce_typed` unset the literal passes through untouched.
pub fn coerce_typed_literal(datatype: DataTypeDefXsd, raw: &str, options: CoerceOptions) -> TypedValue {
    if !options.produce_typed {
        return TypedValue::Text(raw.to_string());
    }
    match coerce(datatype, raw) {
        Some(value) => value,
        None => {
            tracing::warn!(%datatype, literal = raw, "typed coercion failed; keeping the literal");
            TypedValue::Text(raw.to_string())
        }
    }
}

fn coerce(datatype: DataTypeDefXsd, raw: &str) -> Option<TypedValue> {
    match datatype {
        DataTypeDefXsd::Boolean => match raw {
            // empty means "no value" and is kept as such
            "" => Some(TypedValue::Text(String::new())),
            "true" | "1" => Some(TypedValue::Boolean(true)),
            "false" | "0" => Some(TypedValue::Boolean(false)),
            _ => None,
        },
        DataTypeDefXsd::Float | DataTypeDefXsd::Double => raw.parse().ok().map(TypedValue::Float),
        // nearest f64; extreme exponents round to zero or overflow to text
        DataTypeDefXsd::Decimal => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(TypedValue::Float),
        t if t.is_integer() => raw.parse().ok().map(TypedValue::Integer),
        DataTypeDefXsd::Date => temporal::lex_date(raw)?.to_naive().map(TypedValue::Date),
        DataTypeDefXsd::Time => {
            let parts = temporal::lex_time(raw)?;
            let offset = match parts.offset {
                Some(offset) => Some(offset.to_fixed()?),
                None => None,
            };
            Some(TypedValue::Time {
                time: parts.to_naive()?,
                offset,
            })
        }
        DataTypeDefXsd::DateTime => {
            let (date, time) = temporal::lex_date_time(raw)?;
            let local = NaiveDateTime::new(date.to_naive()?, time.to_naive()?);
            match time.offset {
                Some(offset) => offset
                    .to_fixed()?
                    .from_local_datetime(&local)
                    .single()
                    .map(TypedValue::DateTime),
                None => Some(TypedValue::LocalDateTime(local)),
            }
        }
        _ => Some(TypedValue::Text(raw.to_string())),
    }
}
