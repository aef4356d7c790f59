use crate::calendar::CivilDateTime;
use crate::timezone::LocalZone;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Where `now` comes from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Clock {
    /// The clock of the host.
    #[default]
    System,
    /// A frozen instant, in milliseconds since the Unix epoch.
    Fixed(i64),
}

impl Clock {
    /// The current instant, in milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub fn now(self) -> i64 {
        match self {
            Self::System => Utc::now().timestamp_millis(),
            Self::Fixed(millis) => millis,
        }
    }
}

impl FromStr for Clock {
    type Err = ParseClockError;

    /// Parses `system`, milliseconds since the epoch or an RFC 3339 instant.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.eq_ignore_ascii_case("system") {
            return Ok(Self::System);
        }
        if let Ok(millis) = input.parse() {
            return Ok(Self::Fixed(millis));
        }
        Ok(Self::Fixed(
            DateTime::parse_from_rfc3339(input)?.timestamp_millis(),
        ))
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("system"),
            Self::Fixed(millis) => millis.fmt(f),
        }
    }
}

/// An error raised while parsing a [`Clock`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("expected 'system', milliseconds since the epoch or an RFC 3339 instant: {0}")]
pub struct ParseClockError(#[from] chrono::ParseError);

/// The environment of the temporal functions: the local time zone and the clock.
///
/// The default context reads the zone and the clock of the host.
/// Pinning both makes every function deterministic:
///
/// ```
/// use oxscalar::{Clock, DateContext, LocalZone, TimezoneOffset};
///
/// let context = DateContext::default()
///     .with_zone(LocalZone::Fixed(TimezoneOffset::UTC))
///     .with_clock(Clock::Fixed(0));
/// assert_eq!(context.now(), 0);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct DateContext {
    zone: LocalZone,
    clock: Clock,
}

impl DateContext {
    #[inline]
    #[must_use]
    pub const fn new(zone: LocalZone, clock: Clock) -> Self {
        Self { zone, clock }
    }

    #[inline]
    #[must_use]
    pub const fn with_zone(self, zone: LocalZone) -> Self {
        Self { zone, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_clock(self, clock: Clock) -> Self {
        Self { clock, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn zone(&self) -> LocalZone {
        self.zone
    }

    #[inline]
    #[must_use]
    pub const fn clock(&self) -> Clock {
        self.clock
    }

    #[inline]
    #[must_use]
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// The local wall clock reading of an instant.
    #[inline]
    #[must_use]
    pub fn local_fields(&self, instant: i64) -> CivilDateTime {
        CivilDateTime::from_millis(instant + self.zone.offset_at(instant).in_millis())
    }
}
