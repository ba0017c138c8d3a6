//! Lexical parsing of `date`, `time` and `dateTime` literals
//!
//! Shared by the validator (bounds checks) and the coercer (chrono values).
//! Grammar:
//!
//! ```text
//! date     YYYY-MM-DD
//! time     HH:MM[:SS[.fraction]][Z | ±HH:MM]
//! dateTime YYYY-MM-DDTHH:MM[:SS[.fraction]][Z | ±HH:MM]
//! ```

use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use regex::{Captures, Regex};

const DATE_PATTERN: &str = r"(?P<Y>[0-9]{4})-(?P<M>[0-9]{2})-(?P<D>[0-9]{2})";
const TIME_PATTERN: &str = concat!(
    r"(?P<h>[0-9]{2}):(?P<m>[0-9]{2})",
    r"(?::(?P<s>[0-9]{2})(?:\.(?P<f>[0-9]{1,9}))?)?",
    r"(?:(?P<z>Z)|(?P<sign>[+\-])(?P<tzh>[0-9]{2}):(?P<tzm>[0-9]{2}))?",
);

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", DATE_PATTERN)).unwrap());

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", TIME_PATTERN)).unwrap());

static DATE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}T{}$", DATE_PATTERN, TIME_PATTERN)).unwrap());

/// Year, month and day as written; not yet checked against the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    /// The calendar date, if one exists (year 0 is rejected)
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if self.year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Timezone designator of a time literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Trailing `Z`
    Utc,
    Fixed { negative: bool, hours: u32, minutes: u32 },
}

impl Offset {
    /// `Z` normalizes to an explicit zero offset
    pub fn to_fixed(&self) -> Option<FixedOffset> {
        match *self {
            Offset::Utc => FixedOffset::east_opt(0),
            Offset::Fixed { negative, hours, minutes } => {
                let seconds = (hours * 3600 + minutes * 60) as i32;
                FixedOffset::east_opt(if negative { -seconds } else { seconds })
            }
        }
    }
}

/// Time-of-day components as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub hour: u32,
    pub minute: u32,
    pub second: Option<u32>,
    /// Fraction of a second, scaled to nanoseconds
    pub nanos: u32,
    pub offset: Option<Offset>,
}

/// Component that fell outside its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub component: &'static str,
    pub bounds: &'static str,
}

impl TimeParts {
    /// Hour 0..23, minute 0..59, second 0..59, offset hour 0..14, offset minute 0..59
    pub fn check_bounds(&self) -> Result<(), OutOfBounds> {
        let fail = |component, bounds| Err(OutOfBounds { component, bounds });
        if self.hour > 23 {
            return fail("hour", "within 00..23");
        }
        if self.minute > 59 {
            return fail("minute", "within 00..59");
        }
        if matches!(self.second, Some(s) if s > 59) {
            return fail("second", "within 00..59");
        }
        if let Some(Offset::Fixed { hours, minutes, .. }) = self.offset {
            if hours > 14 {
                return fail("offset hour", "within 00..14");
            }
            if minutes > 59 {
                return fail("offset minute", "within 00..59");
            }
        }
        Ok(())
    }

    pub fn to_naive(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second.unwrap_or(0), self.nanos)
    }
}

fn field<T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

fn date_parts(caps: &Captures<'_>) -> Option<DateParts> {
    Some(DateParts {
        year: field(caps, "Y")?,
        month: field(caps, "M")?,
        day: field(caps, "D")?,
    })
}

fn time_parts(caps: &Captures<'_>) -> Option<TimeParts> {
    let nanos = match caps.name("f") {
        Some(fraction) => format!("{:0<9}", fraction.as_str()).parse().ok()?,
        None => 0,
    };
    let offset = if caps.name("z").is_some() {
        Some(Offset::Utc)
    } else if let Some(sign) = caps.name("sign") {
        Some(Offset::Fixed {
            negative: sign.as_str() == "-",
            hours: field(caps, "tzh")?,
            minutes: field(caps, "tzm")?,
        })
    } else {
        None
    };
    Some(TimeParts {
        hour: field(caps, "h")?,
        minute: field(caps, "m")?,
        second: caps.name("s").and_then(|s| s.as_str().parse().ok()),
        nanos,
        offset,
    })
}

/// Match `YYYY-MM-DD` exactly
pub fn lex_date(literal: &str) -> Option<DateParts> {
    date_parts(&DATE_RE.captures(literal)?)
}

/// Match `HH:MM[:SS[.fraction]][Z | ±HH:MM]` exactly
pub fn lex_time(literal: &str) -> Option<TimeParts> {
    time_parts(&TIME_RE.captures(literal)?)
}

/// Match `YYYY-MM-DDTHH:MM[:SS[.fraction]][Z | ±HH:MM]` exactly
pub fn lex_date_time(literal: &str) -> Option<(DateParts, TimeParts)> {
    let caps = DATE_TIME_RE.captures(literal)?;
    Some((date_parts(&caps)?, time_parts(&caps)?))
}
