use crate::calendar::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use std::fmt;
use std::str::FromStr;

/// A calendar unit, as named by truncation, extraction and interval functions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TemporalUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    IsoWeek,
    Month,
    Quarter,
    Year,
}

impl TemporalUnit {
    pub const ALL: [Self; 9] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::IsoWeek,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Every accepted spelling of the unit, the canonical one first.
    #[must_use]
    pub const fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Second => &["second", "seconds", "sec", "secs"],
            Self::Minute => &["minute", "minutes", "min", "mins"],
            Self::Hour => &["hour", "hours", "hr", "hrs"],
            Self::Day => &["day", "days"],
            Self::Week => &["week", "weeks", "wk", "wks"],
            Self::IsoWeek => &["iso-week", "iso-wk"],
            Self::Month => &["month", "months", "mo", "mos"],
            Self::Quarter => &["quarter", "quarters", "qtr", "qtrs"],
            Self::Year => &["year", "years", "yr", "yrs"],
        }
    }

    /// Looks a unit up by any of its spellings, ignoring case.
    ///
    /// ```
    /// use oxscalar::TemporalUnit;
    ///
    /// assert_eq!(TemporalUnit::from_name("HRS"), Some(TemporalUnit::Hour));
    /// assert_eq!(TemporalUnit::from_name("fortnight"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| {
            unit.synonyms()
                .iter()
                .any(|synonym| synonym.eq_ignore_ascii_case(name))
        })
    }

    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.synonyms()[0]
    }

    /// Plural of the canonical name, used to print quantities.
    #[inline]
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::IsoWeek => "iso-weeks",
            _ => self.synonyms()[1],
        }
    }

    /// Whether a quantity of this unit may appear in an interval text such as `3 days`.
    #[inline]
    #[must_use]
    pub const fn is_interval_unit(self) -> bool {
        matches!(
            self,
            Self::Second | Self::Minute | Self::Hour | Self::Day | Self::Month | Self::Year
        )
    }

    /// The fixed length of the unit in milliseconds.
    ///
    /// Months and years use their average Gregorian lengths, 30.436875 and 365.2425 days.
    /// ISO weeks have no length.
    #[must_use]
    pub const fn millis(self) -> Option<i64> {
        match self {
            Self::Second => Some(MILLIS_PER_SECOND),
            Self::Minute => Some(MILLIS_PER_MINUTE),
            Self::Hour => Some(MILLIS_PER_HOUR),
            Self::Day => Some(MILLIS_PER_DAY),
            Self::Week => Some(7 * MILLIS_PER_DAY),
            Self::IsoWeek => None,
            Self::Month => Some(2_629_746_000),
            Self::Quarter => Some(7_889_238_000),
            Self::Year => Some(31_556_952_000),
        }
    }
}

impl fmt::Display for TemporalUnit {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemporalUnit {
    type Err = UnknownUnitError;

    #[inline]
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| UnknownUnitError {
            name: name.to_owned(),
        })
    }
}

/// A unit name that matches no spelling of any [`TemporalUnit`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("'{name}' is not a known date unit")]
pub struct UnknownUnitError {
    name: String,
}

/// Expresses a duration of `duration_millis` milliseconds in `unit`.
///
/// Returns `None` for units without a fixed length and for unknown unit names.
///
/// ```
/// use oxscalar::interval_to_unit;
///
/// assert_eq!(interval_to_unit("hours", 5_400_000.), Some(1.5));
/// assert_eq!(interval_to_unit("iso-week", 5_400_000.), None);
/// ```
#[must_use]
pub fn interval_to_unit(unit: &str, duration_millis: f64) -> Option<f64> {
    TemporalUnit::from_name(unit).and_then(|unit| unit_quantity(unit, duration_millis))
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn unit_quantity(unit: TemporalUnit, duration_millis: f64) -> Option<f64> {
    Some(duration_millis / unit.millis()? as f64)
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn synonyms() {
        for unit in TemporalUnit::ALL {
            for synonym in unit.synonyms() {
                assert_eq!(TemporalUnit::from_name(synonym), Some(unit));
                assert_eq!(TemporalUnit::from_name(&synonym.to_uppercase()), Some(unit));
            }
        }
        assert_eq!(TemporalUnit::from_name("isoweek"), None);
        assert_eq!(TemporalUnit::from_name(""), None);
    }

    #[test]
    fn from_str() -> Result<(), UnknownUnitError> {
        assert_eq!("qtr".parse::<TemporalUnit>()?, TemporalUnit::Quarter);
        assert_eq!(
            "decade".parse::<TemporalUnit>().map_err(|e| e.to_string()),
            Err("'decade' is not a known date unit".to_owned())
        );
        Ok(())
    }

    #[test]
    fn interval_units() {
        assert!(TemporalUnit::Day.is_interval_unit());
        assert!(!TemporalUnit::Week.is_interval_unit());
        assert!(!TemporalUnit::Quarter.is_interval_unit());
    }

    #[test]
    fn conversions() {
        let duration = 5. * 86_400_000. + 3. * 3_600_000.;
        assert_eq!(interval_to_unit("hour", duration), Some(123.));
        assert_eq!(interval_to_unit("days", duration), Some(5.125));
        assert_eq!(interval_to_unit("wk", 604_800_000.), Some(1.));
        assert_eq!(interval_to_unit("qtr", 7_889_238_000.), Some(1.));
        assert_eq!(interval_to_unit("yr", 31_556_952_000.), Some(1.));
        assert_eq!(interval_to_unit("mos", 2_629_746_000.), Some(1.));
        assert_eq!(interval_to_unit("iso-wk", duration), None);
        assert_eq!(interval_to_unit("decade", duration), None);
    }

    #[test]
    fn names() {
        assert_eq!(TemporalUnit::IsoWeek.to_string(), "iso-week");
        assert_eq!(TemporalUnit::Hour.plural(), "hours");
        assert_eq!(TemporalUnit::Second.plural(), "seconds");
    }
}
