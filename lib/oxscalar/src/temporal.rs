use crate::calendar::{CivilDateTime, MAX_INSTANT};
use crate::context::DateContext;
use crate::guard::Nullable;
use crate::units::{TemporalUnit, unit_quantity};
use std::fmt;

/// An elapsed time, in milliseconds, with the unit it was written in.
///
/// ```
/// use oxscalar::{Duration, TemporalUnit};
///
/// let duration = Duration::new(442_800_000, TemporalUnit::Hour);
/// assert_eq!(duration.to_unit(TemporalUnit::Day), Some(5.125));
/// assert_eq!(duration.to_string(), "123 hours");
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Duration {
    millis: i64,
    unit: TemporalUnit,
}

impl Duration {
    #[inline]
    #[must_use]
    pub const fn new(millis: i64, unit: TemporalUnit) -> Self {
        Self { millis, unit }
    }

    #[inline]
    #[must_use]
    pub const fn millis(self) -> i64 {
        self.millis
    }

    /// The unit the duration is printed in.
    #[inline]
    #[must_use]
    pub const fn unit(self) -> TemporalUnit {
        self.unit
    }

    /// The duration expressed in `unit`, `None` if the unit has no fixed length.
    #[expect(clippy::cast_precision_loss)]
    #[inline]
    #[must_use]
    pub fn to_unit(self, unit: TemporalUnit) -> Option<f64> {
        unit_quantity(unit, self.millis as f64)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantity = self.to_unit(self.unit).unwrap_or_default();
        write!(
            f,
            "{} {}",
            ryu_js::Buffer::new().format(quantity),
            self.unit.plural()
        )
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
enum TemporalKind {
    Instant(i64),
    Interval(Duration),
}

/// A parsed date: an absolute instant or a duration.
///
/// The value carries the flags the legacy runtime kept on the side:
/// whether it is an interval and whether its source text had no time of day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TemporalValue {
    kind: TemporalKind,
    date_only: bool,
}

impl TemporalValue {
    /// An instant `millis` milliseconds after the Unix epoch, `None` out of the ±100 000 000 days range.
    #[inline]
    #[must_use]
    pub fn instant(millis: i64, date_only: bool) -> Option<Self> {
        (-MAX_INSTANT..=MAX_INSTANT)
            .contains(&millis)
            .then_some(Self {
                kind: TemporalKind::Instant(millis),
                date_only,
            })
    }

    #[inline]
    #[must_use]
    pub const fn interval(duration: Duration) -> Self {
        Self {
            kind: TemporalKind::Interval(duration),
            date_only: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_interval(&self) -> bool {
        matches!(self.kind, TemporalKind::Interval(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        self.date_only
    }

    /// Milliseconds since the Unix epoch for instants, length for intervals.
    #[inline]
    #[must_use]
    pub const fn millis(&self) -> i64 {
        match self.kind {
            TemporalKind::Instant(millis) => millis,
            TemporalKind::Interval(duration) => duration.millis,
        }
    }

    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        match self.kind {
            TemporalKind::Instant(_) => None,
            TemporalKind::Interval(duration) => Some(duration),
        }
    }

    /// The calendar fields of the value.
    ///
    /// Intervals are read from the epoch in UTC, instants in the local zone of `context`.
    #[must_use]
    pub fn fields(&self, context: &DateContext) -> CivilDateTime {
        match self.kind {
            TemporalKind::Instant(millis) => context.local_fields(millis),
            TemporalKind::Interval(duration) => CivilDateTime::from_millis(duration.millis),
        }
    }

    /// Moves an instant by `duration`, or lengthens an interval.
    ///
    /// The result keeps the flags of `self`.
    #[must_use]
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let millis = self.millis().checked_add(duration.millis)?;
        match self.kind {
            TemporalKind::Instant(_) => Self::instant(millis, self.date_only),
            TemporalKind::Interval(own) => Some(Self::interval(Duration::new(millis, own.unit))),
        }
    }

    /// The legacy ISO rendering: `yyyy-mm-dd` for date-only values (local calendar date),
    /// `yyyy-mm-ddThh:mm:ssZ` otherwise. Intervals print as their duration.
    #[must_use]
    pub fn to_iso_string(&self, context: &DateContext) -> String {
        match self.kind {
            TemporalKind::Interval(duration) => duration.to_string(),
            TemporalKind::Instant(millis) if self.date_only => {
                let fields = context.local_fields(millis);
                format!(
                    "{}-{:02}-{:02}",
                    format_year(fields.year()),
                    fields.month(),
                    fields.day()
                )
            }
            TemporalKind::Instant(millis) => {
                let fields = CivilDateTime::from_millis(millis);
                format!(
                    "{}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                    format_year(fields.year()),
                    fields.month(),
                    fields.day(),
                    fields.hour(),
                    fields.minute(),
                    fields.second()
                )
            }
        }
    }
}

impl Nullable for TemporalValue {}

/// Four digits for years 0 to 9999, a signed six digit year otherwise.
pub(crate) fn format_year(year: i64) -> String {
    if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{year:06}")
    }
}

/// What the date functions accept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    /// Free-form text, read by the parser cascade.
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    Millis(f64),
    /// An already parsed value, taken as is.
    Value(TemporalValue),
}

impl<'a> From<&'a str> for DateInput<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for DateInput<'_> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Millis(value)
    }
}

impl From<i64> for DateInput<'_> {
    #[expect(clippy::cast_precision_loss)]
    #[inline]
    fn from(value: i64) -> Self {
        Self::Millis(value as f64)
    }
}

impl From<TemporalValue> for DateInput<'_> {
    #[inline]
    fn from(value: TemporalValue) -> Self {
        Self::Value(value)
    }
}

impl From<&TemporalValue> for DateInput<'_> {
    #[inline]
    fn from(value: &TemporalValue) -> Self {
        Self::Value(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Clock;
    use crate::timezone::{LocalZone, TimezoneOffset};

    fn context() -> DateContext {
        DateContext::new(
            LocalZone::Fixed(TimezoneOffset::MIN),
            Clock::Fixed(0),
        )
    }

    #[test]
    fn durations() {
        let duration = Duration::new(5_400_000, TemporalUnit::Minute);
        assert_eq!(duration.to_string(), "90 minutes");
        assert_eq!(duration.to_unit(TemporalUnit::Hour), Some(1.5));
        assert_eq!(duration.to_unit(TemporalUnit::IsoWeek), None);
        assert_eq!(
            Duration::new(1_500, TemporalUnit::Second).to_string(),
            "1.5 seconds"
        );
    }

    #[test]
    fn flags() {
        let interval = TemporalValue::interval(Duration::new(1_000, TemporalUnit::Second));
        assert!(interval.is_interval());
        assert!(!interval.is_date_only());
        assert_eq!(interval.millis(), 1_000);
        assert_eq!(TemporalValue::instant(MAX_INSTANT + 1, false), None);
        let instant = TemporalValue::instant(0, true);
        assert!(instant.is_some_and(|v| v.is_date_only() && !v.is_interval()));
    }

    #[test]
    fn interval_fields_are_utc() {
        let interval = TemporalValue::interval(Duration::new(3_600_000, TemporalUnit::Hour));
        assert_eq!(interval.fields(&context()).hour(), 1);
        assert_eq!(interval.fields(&context()).year(), 1970);
    }

    #[test]
    fn iso_strings() {
        let context = context();
        let instant = TemporalValue::instant(0, false);
        assert_eq!(
            instant.map(|v| v.to_iso_string(&context)).as_deref(),
            Some("1970-01-01T00:00:00Z")
        );
        let date = TemporalValue::instant(0, true);
        assert_eq!(
            date.map(|v| v.to_iso_string(&context)).as_deref(),
            Some("1969-12-31")
        );
        let interval = TemporalValue::interval(Duration::new(86_400_000, TemporalUnit::Day));
        assert_eq!(interval.to_iso_string(&context), "1 days");
    }

    #[test]
    fn additions() {
        let day = Duration::new(86_400_000, TemporalUnit::Day);
        let instant = TemporalValue::instant(0, true).and_then(|v| v.checked_add(day));
        assert_eq!(instant.map(|v| v.millis()), Some(86_400_000));
        assert!(instant.is_some_and(|v| v.is_date_only()));
        let interval = TemporalValue::interval(day).checked_add(day);
        assert_eq!(interval.and_then(|v| v.duration()), Some(Duration::new(172_800_000, TemporalUnit::Day)));
        assert_eq!(
            TemporalValue::instant(MAX_INSTANT, false).and_then(|v| v.checked_add(day)),
            None
        );
    }

    #[test]
    fn years() {
        assert_eq!(format_year(2020), "2020");
        assert_eq!(format_year(33), "0033");
        assert_eq!(format_year(-1), "-000001");
        assert_eq!(format_year(12_345), "+012345");
    }
}
