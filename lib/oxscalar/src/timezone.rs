use crate::calendar::{MAX_INSTANT, MILLIS_PER_DAY, MILLIS_PER_MINUTE};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::str::FromStr;

/// A timezone offset with respect to UTC, with minute precision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimezoneOffset {
    offset: i16, // in minute with respect to UTC
}

impl TimezoneOffset {
    pub const MAX: Self = Self { offset: 14 * 60 };
    pub const MIN: Self = Self { offset: -14 * 60 };
    pub const UTC: Self = Self { offset: 0 };

    /// From offset in minute with respect to UTC
    #[inline]
    pub fn new(offset_in_minutes: i16) -> Result<Self, InvalidTimezoneError> {
        let value = Self {
            offset: offset_in_minutes,
        };
        if Self::MIN <= value && value <= Self::MAX {
            Ok(value)
        } else {
            Err(InvalidTimezoneError {
                offset_in_minutes: offset_in_minutes.into(),
            })
        }
    }

    /// From offset in second with respect to UTC, as `chrono` reports it.
    fn from_seconds(offset_in_seconds: i32) -> Result<Self, InvalidTimezoneError> {
        let offset_in_minutes = i64::from(offset_in_seconds / 60);
        Self::new(
            offset_in_minutes
                .try_into()
                .map_err(|_| InvalidTimezoneError { offset_in_minutes })?,
        )
    }

    #[inline]
    #[must_use]
    pub const fn in_minutes(self) -> i16 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn in_millis(self) -> i64 {
        i64::from(self.offset) * MILLIS_PER_MINUTE
    }

    /// The offset the way the legacy `Date.toString` wrote it, `GMT+0100`.
    pub(crate) fn to_gmt_string(self) -> String {
        let sign = if self.offset < 0 { '-' } else { '+' };
        let offset = self.offset.unsigned_abs();
        format!("GMT{sign}{:02}{:02}", offset / 60, offset % 60)
    }
}

impl fmt::Display for TimezoneOffset {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            0 => f.write_str("Z"),
            offset if offset < 0 => write!(f, "-{:02}:{:02}", -offset / 60, -offset % 60),
            offset => write!(f, "+{:02}:{:02}", offset / 60, offset % 60),
        }
    }
}

impl FromStr for TimezoneOffset {
    type Err = ParseTimezoneError;

    /// Parses `Z`, `UTC`, `±hh`, `±hhmm` or `±hh:mm`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input == "Z" || input.eq_ignore_ascii_case("utc") {
            return Ok(Self::UTC);
        }
        let (sign, input) = if let Some(left) = input.strip_prefix('-') {
            (-1, left)
        } else if let Some(left) = input.strip_prefix('+') {
            (1, left)
        } else {
            return Err(ParseTimezoneError::Syntax);
        };
        let digits = input.replacen(':', "", 1);
        if !matches!(digits.len(), 2 | 4) || !digits.bytes().all(|c| c.is_ascii_digit()) {
            return Err(ParseTimezoneError::Syntax);
        }
        let hours = i16::from_str(&digits[..2]).map_err(|_| ParseTimezoneError::Syntax)?;
        let minutes = i16::from_str(digits.get(2..).filter(|m| !m.is_empty()).unwrap_or("0"))
            .map_err(|_| ParseTimezoneError::Syntax)?;
        if minutes >= 60 {
            return Err(ParseTimezoneError::Syntax);
        }
        Ok(Self::new(sign * (hours * 60 + minutes))?)
    }
}

/// An error when an offset is out of the ±14:00 range.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("invalid timezone offset {}:{}",
        self.offset_in_minutes / 60,
        self.offset_in_minutes.abs() % 60)]
pub struct InvalidTimezoneError {
    offset_in_minutes: i64,
}

/// An error raised while parsing a [`TimezoneOffset`].
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum ParseTimezoneError {
    #[error("timezone offsets are written Z, UTC, +hh:mm or -hh:mm")]
    Syntax,
    #[error(transparent)]
    Range(#[from] InvalidTimezoneError),
}

/// The time zone local calendar fields are read in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum LocalZone {
    /// The zone of the host, with its daylight saving time rules.
    #[default]
    System,
    /// A constant offset.
    Fixed(TimezoneOffset),
}

impl LocalZone {
    /// The offset in effect at the instant `millis` milliseconds after the epoch.
    #[must_use]
    pub fn offset_at(self, millis: i64) -> TimezoneOffset {
        match self {
            Self::Fixed(offset) => offset,
            Self::System => DateTime::from_timestamp_millis(millis)
                .and_then(|instant| {
                    TimezoneOffset::from_seconds(
                        instant.with_timezone(&Local).offset().local_minus_utc(),
                    )
                    .ok()
                })
                .unwrap_or(TimezoneOffset::UTC),
        }
    }

    /// The offset to subtract from a local wall clock reading to get the instant.
    ///
    /// Readings skipped by a daylight saving transition use the offset before it,
    /// repeated readings the first of their two offsets.
    #[must_use]
    pub fn offset_of_local(self, local_millis: i64) -> TimezoneOffset {
        match self {
            Self::Fixed(offset) => offset,
            Self::System => {
                let Some(wall) = DateTime::from_timestamp_millis(local_millis) else {
                    return TimezoneOffset::UTC;
                };
                Local
                    .from_local_datetime(&wall.naive_utc())
                    .earliest()
                    .and_then(|instant| {
                        TimezoneOffset::from_seconds(instant.offset().local_minus_utc()).ok()
                    })
                    .unwrap_or_else(|| self.offset_at(local_millis.saturating_sub(MILLIS_PER_DAY)))
            }
        }
    }

    /// The instant of a local wall clock reading, if it is in the representable range.
    #[must_use]
    pub fn instant_of_local(self, local_millis: i64) -> Option<i64> {
        let instant = local_millis.checked_sub(self.offset_of_local(local_millis).in_millis())?;
        (-MAX_INSTANT..=MAX_INSTANT).contains(&instant).then_some(instant)
    }
}

impl fmt::Display for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("local"),
            Self::Fixed(offset) => offset.fmt(f),
        }
    }
}

impl FromStr for LocalZone {
    type Err = ParseTimezoneError;

    /// Parses `local` or a [`TimezoneOffset`].
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.eq_ignore_ascii_case("local") {
            Ok(Self::System)
        } else {
            Ok(Self::Fixed(input.parse()?))
        }
    }
}
